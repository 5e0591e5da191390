//! Webhook payloads the defect handler reads
//!
//! Only the fields the handler needs are modeled; everything else in the payload is ignored.

use super::IssueIdentity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueHook {
    pub number: String,

    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub state: String,

    /// Issue type name, e.g. "缺陷"
    #[serde(default)]
    pub type_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectHook {
    /// Owning organization
    pub namespace: String,
    /// Repository name
    pub name: String,
}

/// An issue was opened or edited
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueEvent {
    pub issue: IssueHook,
    pub project: ProjectHook,
}

impl IssueEvent {
    pub fn identity(&self) -> IssueIdentity {
        identity_of(&self.issue, &self.project)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteHook {
    #[serde(default)]
    pub body: String,
}

/// A comment was posted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteEvent {
    /// "Issue", "PullRequest", ...
    #[serde(default)]
    pub noteable_type: String,

    pub comment: NoteHook,

    /// Present when the note was posted on an issue
    #[serde(default)]
    pub issue: Option<IssueHook>,

    pub project: ProjectHook,
}

impl NoteEvent {
    pub fn is_issue(&self) -> bool {
        self.noteable_type == "Issue" && self.issue.is_some()
    }
}

pub(crate) fn identity_of(issue: &IssueHook, project: &ProjectHook) -> IssueIdentity {
    IssueIdentity::new(
        issue.number.clone(),
        project.namespace.clone(),
        project.name.clone(),
        issue.state.clone(),
    )
}
