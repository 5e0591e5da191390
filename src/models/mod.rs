pub mod config;
pub mod defect;
pub mod error;
pub mod event;
pub mod field;
pub mod policy;

pub use config::{DefectdConfig, IssueConfig, ManagerConfig, DEFAULT_MAX_BODY_BYTES};
pub use defect::{
    AffectedState, DefectRecord, IssueIdentity, RawFieldMap, SeverityLevel, VersionState,
};
pub use error::{DefectError, ExtractionError, ValidationError, ValidationKind};
pub use event::{IssueEvent, IssueHook, NoteEvent, NoteHook, ProjectHook};
pub use field::{FieldAnchor, FieldTag, Terminator, TrimPolicy, ANCHORS};
pub use policy::{AffectedFilter, Policy};
