//! Service layer for defectd
//!
//! Business logic shared by the CLI commands: checking issue bodies and handing
//! accepted defects to a manager.

pub mod defect_service;
pub mod manager;

pub use defect_service::{DefectService, HandleOutcome, ACCEPTED_COMMENT, CHECK_COMMAND};
pub use manager::{build_manager, DefectManager, JsonLinesManager, StdoutManager};
