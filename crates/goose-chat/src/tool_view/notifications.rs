use serde_json::Value;

use super::progress::Progress;
use crate::models::notification::{NotificationEvent, LOG_METHOD, PROGRESS_METHOD};

/// Notifications for one tool call, split by what they carry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classified {
    pub logs: Vec<String>,
    pub progress: Vec<Progress>,
}

/// Split notifications into log lines and progress updates, keeping arrival order.
///
/// Unknown methods and progress events whose params don't describe a progress
/// update are dropped.
pub fn classify(notifications: &[NotificationEvent]) -> Classified {
    let mut classified = Classified::default();

    for notification in notifications {
        match notification.method() {
            LOG_METHOD => classified.logs.push(log_to_string(notification)),
            PROGRESS_METHOD => match Progress::from_params(notification.params()) {
                Some(progress) => classified.progress.push(progress),
                None => tracing::debug!(
                    params = %notification.params(),
                    "dropping progress notification without a usable token"
                ),
            },
            other => tracing::debug!(method = other, "ignoring notification"),
        }
    }

    classified
}

/// The display line for a log notification
pub fn log_to_string(notification: &NotificationEvent) -> String {
    let data = match notification.params().get("data") {
        Some(data) if is_truthy(data) => data,
        _ => return String::new(),
    };

    if let Some(output) = data.as_object().and_then(|obj| obj.get("output")) {
        if is_truthy(output) {
            return value_to_string(output);
        }
    }

    value_to_string(data)
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JavaScript truthiness, which is what the servers sending these assume
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn log(data: Value) -> NotificationEvent {
        NotificationEvent::new(LOG_METHOD, json!({ "level": "info", "data": data }))
    }

    #[test]
    fn test_log_prefers_truthy_output() {
        assert_eq!(
            log_to_string(&log(json!({"type": "shell", "output": "hello"}))),
            "hello"
        );
    }

    #[test]
    fn test_log_with_empty_output_serializes_data() {
        let line = log_to_string(&log(json!({"output": ""})));
        assert_eq!(line, r#"{"output":""}"#);
    }

    #[test]
    fn test_log_string_data_is_verbatim() {
        assert_eq!(log_to_string(&log(json!("plain line"))), "plain line");
    }

    #[test]
    fn test_log_other_data_is_json() {
        assert_eq!(log_to_string(&log(json!({"step": 2}))), r#"{"step":2}"#);
        assert_eq!(log_to_string(&log(json!(42))), "42");
    }

    #[test]
    fn test_log_missing_or_falsy_data_is_empty() {
        assert_eq!(
            log_to_string(&NotificationEvent::new(LOG_METHOD, json!({}))),
            ""
        );
        assert_eq!(log_to_string(&log(json!(null))), "");
        assert_eq!(log_to_string(&log(json!(""))), "");
        assert_eq!(log_to_string(&log(json!(0))), "");
        assert_eq!(
            log_to_string(&NotificationEvent::new(LOG_METHOD, Value::Null)),
            ""
        );
    }

    #[test]
    fn test_classify_splits_and_drops_unknown() {
        let notifications = vec![
            log(json!("first")),
            NotificationEvent::new(
                PROGRESS_METHOD,
                json!({"progressToken": "t1", "progress": 1, "total": 4}),
            ),
            NotificationEvent::new("notifications/unknown", json!({"data": "x"})),
            log(json!("second")),
            NotificationEvent::new(PROGRESS_METHOD, json!({"progress": 2})),
        ];

        let classified = classify(&notifications);
        assert_eq!(classified.logs, vec!["first", "second"]);
        assert_eq!(classified.progress.len(), 1);
        assert_eq!(classified.progress[0].progress_token, "t1");
        assert_eq!(classified.progress[0].total, Some(4.0));
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(classify(&[]), Classified::default());
    }
}
