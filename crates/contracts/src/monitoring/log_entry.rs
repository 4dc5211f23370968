use serde::{Deserialize, Serialize};

/// A log record as served by `GET /api/logs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: String,
    #[serde(default)]
    pub source: Option<String>,
    pub level: String,
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
}

/// The log levels the backend emits, in ascending order of severity.
/// Drives the level selector options on the Logs page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }
}

/// Server-side filter parameters for `/api/logs` and `/api/logs/export`.
///
/// Blank filters are omitted from the query string entirely rather than
/// sent as empty values; the "All" level selection maps to no `level`
/// parameter at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogQuery {
    pub level: Option<String>,
    pub source: Option<String>,
    pub q: Option<String>,
}

impl LogQuery {
    /// Build a query from raw selector/input values, treating blanks and
    /// the "All" level as absent.
    pub fn from_filters(level: &str, source: &str, q: &str) -> Self {
        let non_blank = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        Self {
            level: (level != "All").then(|| level.to_string()).and_then(|l| non_blank(&l)),
            source: non_blank(source),
            q: non_blank(q),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.source.is_none() && self.q.is_none()
    }

    /// Render as a `?`-prefixed, percent-encoded query string, or an
    /// empty string when no filter is set.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        for (key, value) in [
            ("level", &self.level),
            ("source", &self.source),
            ("q", &self.q),
        ] {
            if let Some(v) = value {
                pairs.push(format!("{}={}", key, urlencoding::encode(v)));
            }
        }
        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_tolerate_absence_and_null() {
        let json = r#"{
            "id": 11,
            "timestamp": "2024-03-15T14:02:26",
            "level": "INFO",
            "message": "service started",
            "source": null
        }"#;
        let entry: LogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.source, None);
        assert_eq!(entry.context, None);
    }

    #[test]
    fn blank_filters_produce_no_query_string() {
        let query = LogQuery::from_filters("All", "", "   ");
        assert!(query.is_empty());
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn only_non_blank_parameters_are_sent() {
        let query = LogQuery::from_filters("ERROR", "", "disk full");
        assert_eq!(query.level.as_deref(), Some("ERROR"));
        assert_eq!(query.source, None);
        assert_eq!(query.to_query_string(), "?level=ERROR&q=disk%20full");
    }

    #[test]
    fn values_are_percent_encoded() {
        let query = LogQuery::from_filters("All", "auth&svc", "a=b?");
        assert_eq!(
            query.to_query_string(),
            "?source=auth%26svc&q=a%3Db%3F"
        );
    }

    #[test]
    fn filter_values_are_trimmed() {
        let query = LogQuery::from_filters("All", "  nginx  ", "");
        assert_eq!(query.source.as_deref(), Some("nginx"));
        assert_eq!(query.to_query_string(), "?source=nginx");
    }
}
