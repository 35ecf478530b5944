use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One update of a long running operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(deserialize_with = "token_from_value")]
    pub progress_token: String,
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Progress tokens are strings or integers depending on the server
fn token_from_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "progress token must be a string or number, got {other}"
        ))),
    }
}

impl Progress {
    pub fn new<S: Into<String>>(token: S, progress: f64) -> Self {
        Self {
            progress_token: token.into(),
            progress,
            total: None,
            message: None,
        }
    }

    pub fn with_total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }

    pub(crate) fn from_params(params: &Value) -> Option<Self> {
        serde_json::from_value(params.clone()).ok()
    }

    /// How full the bar is, in percent. `None` when there is no total to measure against.
    pub fn percent(&self) -> Option<f64> {
        let total = self.total?;
        if total <= 0.0 {
            return Some(100.0);
        }
        Some((self.progress / total * 100.0).clamp(0.0, 100.0))
    }
}

/// Reduce progress updates to the most advanced entry per token.
///
/// Tokens keep the order in which they were first seen. When two entries for a
/// token report the same progress, the later one wins.
pub fn aggregate(progress: &[Progress]) -> Vec<Progress> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut best: Vec<&Progress> = Vec::new();

    for entry in progress {
        match slots.get(entry.progress_token.as_str()) {
            Some(&slot) => {
                if entry.progress >= best[slot].progress {
                    best[slot] = entry;
                }
            }
            None => {
                slots.insert(entry.progress_token.as_str(), best.len());
                best.push(entry);
            }
        }
    }

    best.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn permutations(items: &[Progress]) -> Vec<Vec<Progress>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head.clone());
                out.push(tail);
            }
        }
        out
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("expected a determinate percentage");
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn test_max_wins_regardless_of_order() {
        let entries = vec![
            Progress::new("t1", 0.2),
            Progress::new("t1", 0.9).with_message("almost"),
            Progress::new("t1", 0.5),
            Progress::new("t1", 0.1),
        ];

        for order in permutations(&entries) {
            let aggregated = aggregate(&order);
            assert_eq!(aggregated.len(), 1);
            assert_eq!(aggregated[0].progress, 0.9);
            assert_eq!(aggregated[0].message.as_deref(), Some("almost"));
        }
    }

    #[test]
    fn test_tokens_keep_first_seen_order() {
        let aggregated = aggregate(&[
            Progress::new("b", 1.0),
            Progress::new("a", 3.0),
            Progress::new("b", 2.0),
            Progress::new("c", 1.0),
            Progress::new("a", 1.0),
        ]);

        let tokens: Vec<_> = aggregated
            .iter()
            .map(|p| (p.progress_token.as_str(), p.progress))
            .collect();
        assert_eq!(tokens, vec![("b", 2.0), ("a", 3.0), ("c", 1.0)]);
    }

    #[test]
    fn test_tie_goes_to_last() {
        let aggregated = aggregate(&[
            Progress::new("t", 0.5).with_message("first"),
            Progress::new("t", 0.5).with_message("second"),
        ]);
        assert_eq!(aggregated[0].message.as_deref(), Some("second"));
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_numeric_token_from_params() {
        let progress =
            Progress::from_params(&json!({"progressToken": 7, "progress": 3, "total": 10}))
                .unwrap();
        assert_eq!(progress.progress_token, "7");
        assert_close(progress.percent(), 30.0);
    }

    #[test]
    fn test_params_without_progress_are_rejected() {
        assert!(Progress::from_params(&json!({"progressToken": "t"})).is_none());
        assert!(Progress::from_params(&json!({"progressToken": null, "progress": 1})).is_none());
    }

    #[test]
    fn test_percent() {
        assert_eq!(Progress::new("t", 0.7).percent(), None);
        assert_close(Progress::new("t", 0.7).with_total(1.0).percent(), 70.0);
        assert_eq!(Progress::new("t", 12.0).with_total(10.0).percent(), Some(100.0));
        assert_eq!(Progress::new("t", 1.0).with_total(0.0).percent(), Some(100.0));
    }
}
