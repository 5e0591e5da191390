// Defectd - Defect report extractor and validator
// Turns issue bodies written in the defect template into validated defect records

pub mod cli;
pub mod models;
pub mod parser;
pub mod services;
pub mod validator;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use models::{DefectError, DefectRecord, FieldTag, IssueIdentity, Policy, RawFieldMap};
pub use parser::{AffectedTableParser, TemplateExtractor};
pub use services::{DefectService, HandleOutcome};
pub use validator::DefectValidator;
