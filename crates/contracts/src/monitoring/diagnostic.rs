use serde::{Deserialize, Serialize};

/// A diagnostic reading as served by `GET /api/diagnostics`.
/// The backend returns the newest 50 records first; the dashboard
/// reverses them before charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub id: i64,
    pub timestamp: String,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
}

/// Creation payload for `POST /api/diagnostics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDiagnostic {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_round_trips() {
        let json = r#"{
            "id": 3,
            "cpu_usage": 42.5,
            "memory_usage": 61.0,
            "disk_usage": 70.2,
            "timestamp": "2024-03-15T14:02:26"
        }"#;
        let d: Diagnostic = serde_json::from_str(json).unwrap();
        assert_eq!(d.cpu_usage, 42.5);
        assert_eq!(d.timestamp, "2024-03-15T14:02:26");
    }
}
