//! Defect service - checks issue bodies and hands accepted defects to a manager

use super::manager::DefectManager;
use crate::models::event::identity_of;
use crate::models::{
    DefectError, DefectRecord, IssueConfig, IssueEvent, IssueHook, IssueIdentity, NoteEvent,
    Policy, ProjectHook,
};
use crate::parser::{AffectedTableParser, TemplateExtractor};
use crate::validator::DefectValidator;
use crate::Result;

/// Comment command that asks for a re-check of an issue
pub const CHECK_COMMAND: &str = "/check-issue";

/// Comment posted when a defect is accepted
pub const ACCEPTED_COMMENT: &str = "Your issue is accepted, thank you";

/// What the caller should do after an event was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    /// Not a defect issue or not a check request; nothing to post
    Ignored,
    /// The report was wrong; post `comment` on the issue
    Rejected { comment: String },
    /// The report was saved; post `comment` on the issue
    Accepted {
        record: DefectRecord,
        comment: String,
    },
}

impl HandleOutcome {
    /// Comment to post back on the issue, if any
    pub fn comment(&self) -> Option<&str> {
        match self {
            HandleOutcome::Ignored => None,
            HandleOutcome::Rejected { comment } | HandleOutcome::Accepted { comment, .. } => {
                Some(comment.as_str())
            }
        }
    }
}

pub struct DefectService {
    issue_type: String,
    policy: Policy,
    extractor: TemplateExtractor,
    affected: AffectedTableParser,
    manager: Box<dyn DefectManager>,
}

impl DefectService {
    pub fn new(config: &IssueConfig, manager: Box<dyn DefectManager>) -> Result<Self> {
        let extractor = TemplateExtractor::new()?.with_max_body_bytes(config.max_body_bytes);

        Ok(Self {
            issue_type: config.issue_type.clone(),
            policy: config.policy()?,
            extractor,
            affected: AffectedTableParser::new()?,
            manager,
        })
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Extract and validate a body; pure, no side effects
    pub fn check(
        &self,
        body: &str,
        issue: IssueIdentity,
    ) -> std::result::Result<DefectRecord, DefectError> {
        let fields = self.extractor.extract(body)?;
        let record = DefectValidator::new(&self.policy, &self.affected).validate(fields, issue)?;
        Ok(record)
    }

    pub async fn handle_issue_event(&self, event: &IssueEvent) -> Result<HandleOutcome> {
        self.handle_issue(&event.issue, &event.project).await
    }

    /// Only notes on issues that contain `/check-issue` trigger a check
    pub async fn handle_note_event(&self, event: &NoteEvent) -> Result<HandleOutcome> {
        if !event.comment.body.contains(CHECK_COMMAND) {
            return Ok(HandleOutcome::Ignored);
        }

        match (&event.issue, event.is_issue()) {
            (Some(issue), true) => self.handle_issue(issue, &event.project).await,
            _ => Ok(HandleOutcome::Ignored),
        }
    }

    async fn handle_issue(&self, issue: &IssueHook, project: &ProjectHook) -> Result<HandleOutcome> {
        if issue.type_name != self.issue_type {
            eprintln!(
                "[defectd] Skipping {}/{}#{}: issue type '{}' is not '{}'",
                project.namespace, project.name, issue.number, issue.type_name, self.issue_type
            );
            return Ok(HandleOutcome::Ignored);
        }

        let record = match self.check(&issue.body, identity_of(issue, project)) {
            Ok(record) => record,
            Err(e) => {
                eprintln!(
                    "[defectd] Rejected {}/{}#{}: {}",
                    project.namespace,
                    project.name,
                    issue.number,
                    e.to_string().replace('\n', " ")
                );
                return Ok(HandleOutcome::Rejected {
                    comment: e.to_string(),
                });
            }
        };

        self.manager.save(&record).await?;
        eprintln!(
            "[defectd] Accepted {}/{}#{} ({} affected version(s))",
            project.namespace,
            project.name,
            issue.number,
            record.affected_version.len()
        );

        Ok(HandleOutcome::Accepted {
            record,
            comment: ACCEPTED_COMMENT.to_string(),
        })
    }
}
