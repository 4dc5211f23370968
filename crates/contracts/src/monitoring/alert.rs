use serde::{Deserialize, Serialize};

/// An alert record as served by `GET /api/alerts`.
///
/// `severity` stays a plain string on the wire: the backend does not
/// validate it, and badge rendering degrades gracefully for values
/// outside the known set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub severity: String,
    #[serde(default)]
    pub resolved: bool,
}

/// Creation payload for `POST /api/alerts` (sent as an array for batches).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAlert {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub severity: String,
}

impl NewAlert {
    pub fn new(kind: &str, message: &str, severity: Severity) -> Self {
        Self {
            kind: kind.to_string(),
            message: message.to_string(),
            severity: severity.as_str().to_string(),
        }
    }
}

/// The severity values the backend is known to use. Drives the filter
/// selector options on the Alerts page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Info];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_uses_type_on_the_wire() {
        let json = r#"{
            "id": 7,
            "type": "CPU Usage",
            "message": "CPU over 90%",
            "severity": "Critical",
            "timestamp": "2024-03-15T14:02:26.123456",
            "resolved": false
        }"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.kind, "CPU Usage");
        assert!(!alert.resolved);

        let back = serde_json::to_value(&alert).unwrap();
        assert_eq!(back["type"], "CPU Usage");
        assert!(back.get("kind").is_none());
    }

    #[test]
    fn resolved_defaults_to_false_when_missing() {
        let json = r#"{
            "id": 1,
            "type": "Failed logins",
            "message": "5 failed login attempts in 2 minutes",
            "severity": "Warning",
            "timestamp": "2024-03-15T14:02:26"
        }"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert!(!alert.resolved);
    }

    #[test]
    fn new_alert_serializes_type_field() {
        let payload = NewAlert::new("CPU Usage", "CPU over 90%", Severity::Critical);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "CPU Usage");
        assert_eq!(json["severity"], "Critical");
    }
}
