//! Errors surfaced to the reporter
//!
//! `Display` output of these types is posted verbatim as an issue comment, so the
//! message text is part of the observable behavior.

use super::{FieldTag, SeverityLevel};

/// A section could not be located or was left empty
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("{} 解析失败", .0.label())]
    PatternNotFound(FieldTag),

    #[error("{} 不允许为空", .0.label())]
    EmptyField(FieldTag),

    #[error("issue 内容过长: {len} 字节, 上限 {max} 字节")]
    BodyTooLarge { len: usize, max: usize },
}

impl ExtractionError {
    /// The section the error is about, if any
    pub fn tag(&self) -> Option<FieldTag> {
        match self {
            ExtractionError::PatternNotFound(tag) | ExtractionError::EmptyField(tag) => Some(*tag),
            ExtractionError::BodyTooLarge { .. } => None,
        }
    }
}

/// Category of a `ValidationError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    VersionCoverageMismatch,
    InvalidSeverity,
    InvalidSystemVersion,
}

/// A section was present but its value breaks policy
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(
        "受影响版本排查与当前维护版本不一致，缺少版本: {}\n当前维护版本:\n{}",
        .missing.join(", "),
        .maintained.join("\n")
    )]
    VersionCoverageMismatch {
        missing: Vec<String>,
        maintained: Vec<String>,
    },

    #[error(
        "{} {} 不合法，可选值: {}",
        FieldTag::SeverityLevel.label(),
        .value,
        severity_choices()
    )]
    InvalidSeverity { value: String },

    #[error(
        "{} {} 不在当前维护版本中，当前维护版本:\n{}",
        FieldTag::SystemVersion.label(),
        .value,
        .maintained.join("\n")
    )]
    InvalidSystemVersion {
        value: String,
        maintained: Vec<String>,
    },
}

impl ValidationError {
    pub fn kind(&self) -> ValidationKind {
        match self {
            ValidationError::VersionCoverageMismatch { .. } => ValidationKind::VersionCoverageMismatch,
            ValidationError::InvalidSeverity { .. } => ValidationKind::InvalidSeverity,
            ValidationError::InvalidSystemVersion { .. } => ValidationKind::InvalidSystemVersion,
        }
    }
}

fn severity_choices() -> String {
    SeverityLevel::ALL
        .iter()
        .map(|level| level.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Any user-actionable failure of a defect report
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefectError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
