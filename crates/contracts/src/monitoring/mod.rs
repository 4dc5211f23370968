//! Wire types for the server-monitor REST API.

pub mod alert;
pub mod diagnostic;
pub mod log_entry;

pub use alert::{Alert, NewAlert, Severity};
pub use diagnostic::{Diagnostic, NewDiagnostic};
pub use log_entry::{LogEntry, LogLevel, LogQuery};
