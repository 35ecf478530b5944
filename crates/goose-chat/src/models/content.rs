use super::role::Role;
use serde::{Deserialize, Serialize};

/// Hints attached to a piece of content about who should see it and how prominent it is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<Vec<Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    pub data: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

impl ImageContent {
    /// The image as an inline `data:` reference
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
/// Content returned by a tool or produced by the assistant
pub enum Content {
    Text(TextContent),
    Image(ImageContent),
}

impl Content {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Content::Text(TextContent {
            text: text.into(),
            annotations: None,
        })
    }

    pub fn image<S: Into<String>, T: Into<String>>(data: S, mime_type: T) -> Self {
        Content::Image(ImageContent {
            data: data.into(),
            mime_type: mime_type.into(),
            annotations: None,
        })
    }

    /// Get the text content if this is a TextContent variant
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(&text.text),
            _ => None,
        }
    }

    /// Get the image content if this is an ImageContent variant
    pub fn as_image(&self) -> Option<(&str, &str)> {
        match self {
            Content::Image(image) => Some((&image.data, &image.mime_type)),
            _ => None,
        }
    }

    fn annotations_mut(&mut self) -> &mut Annotations {
        let slot = match self {
            Content::Text(text) => &mut text.annotations,
            Content::Image(image) => &mut image.annotations,
        };
        slot.get_or_insert_with(Annotations::default)
    }

    /// Set the audience for the content
    pub fn with_audience(mut self, audience: Vec<Role>) -> Self {
        self.annotations_mut().audience = Some(audience);
        self
    }

    /// Set the priority for the content, clamped to 0.0..=1.0
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.annotations_mut().priority = Some(priority.clamp(0.0, 1.0));
        self
    }

    pub fn annotations(&self) -> Option<&Annotations> {
        match self {
            Content::Text(text) => text.annotations.as_ref(),
            Content::Image(image) => image.annotations.as_ref(),
        }
    }

    /// Get the audience if set
    pub fn audience(&self) -> Option<&Vec<Role>> {
        self.annotations().and_then(|a| a.audience.as_ref())
    }

    /// Get the priority if set
    pub fn priority(&self) -> Option<f64> {
        self.annotations().and_then(|a| a.priority)
    }

    /// Content without an audience is meant for everyone
    pub fn is_user_visible(&self) -> bool {
        self.audience()
            .map_or(true, |audience| audience.contains(&Role::User))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_annotated_text() {
        let content: Content = serde_json::from_value(json!({
            "type": "text",
            "text": "done",
            "annotations": { "audience": ["user"], "priority": 0.9 }
        }))
        .unwrap();

        assert_eq!(content.as_text(), Some("done"));
        assert_eq!(content.audience(), Some(&vec![Role::User]));
        assert_eq!(content.priority(), Some(0.9));
    }

    #[test]
    fn test_deserialize_image_without_annotations() {
        let content: Content = serde_json::from_value(json!({
            "type": "image",
            "mimeType": "image/png",
            "data": "aGVsbG8="
        }))
        .unwrap();

        assert_eq!(content.as_image(), Some(("aGVsbG8=", "image/png")));
        assert!(content.annotations().is_none());
        assert!(content.is_user_visible());
    }

    #[test]
    fn test_audience_visibility() {
        assert!(Content::text("a").with_audience(vec![Role::User]).is_user_visible());
        assert!(!Content::text("b")
            .with_audience(vec![Role::Assistant])
            .is_user_visible());
        assert!(!Content::text("c").with_audience(vec![]).is_user_visible());
    }

    #[test]
    fn test_priority_is_clamped() {
        assert_eq!(Content::text("x").with_priority(3.0).priority(), Some(1.0));
    }

    #[test]
    fn test_image_data_uri() {
        let image = ImageContent {
            data: "abc".into(),
            mime_type: "image/jpeg".into(),
            annotations: None,
        };
        assert_eq!(image.data_uri(), "data:image/jpeg;base64,abc");
    }
}
