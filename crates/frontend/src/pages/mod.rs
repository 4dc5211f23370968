pub mod alerts;
pub mod dashboard;
pub mod diagnostics;
pub mod logs;
