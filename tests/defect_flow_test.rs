//! Integration tests for the defect report flow
//!
//! Tests cover:
//! - Extraction of a complete template body
//! - Validation against the maintained-version policy
//! - Issue/note event handling and hand-off to a manager

use async_trait::async_trait;
use defectd::models::{
    AffectedFilter, DefectError, DefectRecord, ExtractionError, FieldTag, IssueConfig,
    IssueEvent, IssueHook, IssueIdentity, NoteEvent, NoteHook, ProjectHook, SeverityLevel,
    ValidationKind, ANCHORS, DEFAULT_MAX_BODY_BYTES,
};
use defectd::parser::{render_template, AffectedTableParser, TemplateExtractor};
use defectd::services::{DefectManager, DefectService, HandleOutcome, ACCEPTED_COMMENT};
use defectd::validator::DefectValidator;
use std::sync::{Arc, Mutex};

const MAINTAINED: [&str; 2] = ["openEuler-20.03-LTS-SP1", "openEuler-22.03-LTS"];

/// Build a body through the template renderer, overriding selected sections
fn body_with(overrides: &[(FieldTag, &str)]) -> String {
    render_template(|tag| {
        if let Some((_, value)) = overrides.iter().find(|(t, _)| *t == tag) {
            return value.to_string();
        }
        match tag {
            FieldTag::Kernel => "5.10".to_string(),
            FieldTag::Components => "kernel".to_string(),
            FieldTag::SystemVersion => "openEuler-22.03-LTS".to_string(),
            FieldTag::Description => "crash on boot".to_string(),
            FieldTag::ReferenceUrl => "https://example.com/ref".to_string(),
            FieldTag::GuidanceUrl => "https://example.com/guide".to_string(),
            FieldTag::Influence => "all x86 machines".to_string(),
            FieldTag::SeverityLevel => "High".to_string(),
            FieldTag::AffectedVersionBlock => {
                "\nopenEuler-20.03-LTS-SP1:不受影响\nopenEuler-22.03-LTS:受影响\n".to_string()
            }
            FieldTag::Abi => "不受影响".to_string(),
        }
    })
}

fn issue_config() -> IssueConfig {
    IssueConfig {
        issue_type: "缺陷".to_string(),
        maintain_version: MAINTAINED.iter().map(|v| v.to_string()).collect(),
        affected_filter: AffectedFilter::AsReported,
        max_body_bytes: DEFAULT_MAX_BODY_BYTES,
    }
}

/// Manager that keeps every saved record in memory
#[derive(Clone, Default)]
struct RecordingManager {
    saved: Arc<Mutex<Vec<DefectRecord>>>,
}

#[async_trait]
impl DefectManager for RecordingManager {
    async fn save(&self, record: &DefectRecord) -> defectd::Result<()> {
        self.saved.lock().unwrap().push(record.clone());
        Ok(())
    }
}

fn service() -> (DefectService, RecordingManager) {
    let manager = RecordingManager::default();
    let service = DefectService::new(&issue_config(), Box::new(manager.clone())).unwrap();
    (service, manager)
}

fn issue_event(type_name: &str, body: String) -> IssueEvent {
    IssueEvent {
        issue: IssueHook {
            number: "I7QW2X".to_string(),
            body,
            state: "open".to_string(),
            type_name: type_name.to_string(),
        },
        project: ProjectHook {
            namespace: "src-openeuler".to_string(),
            name: "kernel".to_string(),
        },
    }
}

#[test]
fn test_end_to_end_scenario() {
    let body = "内核信息:5.10\n\
                缺陷归属组件:kernel\n\
                组件版本:5.10.0\n\
                缺陷归属的版本:openEuler-22.03-LTS\n\
                缺陷简述:crash on boot\n\
                缺陷创建时间:2024-03-01\n\
                缺陷详情参考链接:https://example.com/ref\n\
                缺陷分析指导链接:https://example.com/guide\n\
                二、缺陷分析结构反馈\n\
                影响性分析说明:all machines\n\
                缺陷严重等级:High\n\
                受影响版本排查(受影响/不受影响):\n\
                openEuler-20.03-LTS-SP1:不受影响\n\
                openEuler-22.03-LTS:受影响\n\
                abi变化(受影响/不受影响):不受影响";

    let (service, _) = service();
    let record = service
        .check(body, IssueIdentity::new("I1", "src-openeuler", "kernel", "open"))
        .unwrap();

    assert_eq!(record.severity_level, SeverityLevel::High);
    assert_eq!(record.affected_version, vec!["openEuler-22.03-LTS"]);
    assert_eq!(record.system_version, "openEuler-22.03-LTS");
    assert_eq!(record.description, "crash on boot\n");
    assert_eq!(record.issue.org, "src-openeuler");
}

#[test]
fn test_body_with_field_labels_only() {
    let body = "内核信息:5.10\n\
                缺陷归属组件:kernel\n\
                缺陷归属的版本:openEuler-22.03-LTS\n\
                缺陷简述:crash on boot\n\
                缺陷详情参考链接:https://example.com/ref\n\
                缺陷分析指导链接:https://example.com/guide\n\
                影响性分析说明:all machines\n\
                缺陷严重等级:High\n\
                受影响版本排查(受影响/不受影响):\n\
                openEuler-20.03-LTS-SP1:不受影响\n\
                openEuler-22.03-LTS:受影响\n\
                abi变化(受影响/不受影响):不受影响";

    let (service, _) = service();
    let record = service.check(body, IssueIdentity::default()).unwrap();

    assert_eq!(record.component, "kernel");
    assert_eq!(record.description, "crash on boot\n");
    assert_eq!(record.guidance_url, "https://example.com/guide");
    assert_eq!(record.affected_version, vec!["openEuler-22.03-LTS"]);
}

#[test]
fn test_whitespace_in_maintained_version_rejected() {
    let mut config = issue_config();
    config.maintain_version.push("openEuler 24.03".to_string());
    assert!(DefectService::new(&config, Box::new(RecordingManager::default())).is_err());
}

#[test]
fn test_every_missing_label_is_named() {
    let extractor = TemplateExtractor::new().unwrap();
    let body = body_with(&[]);

    for anchor in ANCHORS {
        let start = format!("{}：", anchor.start_marker());
        let broken = body.replacen(&start, "", 1);
        assert_ne!(broken, body, "label for {:?} not found in rendered body", anchor.tag);

        let err = extractor.extract(&broken).unwrap_err();
        assert_eq!(err, ExtractionError::PatternNotFound(anchor.tag), "removed {:?}", anchor.tag);
    }
}

#[test]
fn test_raw_and_trimmed_whitespace() {
    let extractor = TemplateExtractor::new().unwrap();
    let body = body_with(&[
        (FieldTag::Description, "line one\n  line two"),
        (FieldTag::Influence, "a b\tc"),
        (FieldTag::Kernel, " 5.10 \t-rc1 "),
    ]);

    let fields = extractor.extract(&body).unwrap();
    assert_eq!(fields.get(FieldTag::Description), "line one\n  line two\n");
    assert_eq!(fields.get(FieldTag::Influence), "a b\tc\n");
    assert_eq!(fields.get(FieldTag::Kernel), "5.10-rc1");
}

#[test]
fn test_extra_versions_and_affected_output() {
    let (service, _) = service();
    let body = body_with(&[(
        FieldTag::AffectedVersionBlock,
        "openEuler-20.03-LTS-SP1:受影响 openEuler-22.03-LTS:不受影响 openEuler-24.03-LTS:受影响 openEuler-23.09:不受影响",
    )]);

    let record = service.check(&body, IssueIdentity::default()).unwrap();
    assert_eq!(
        record.affected_version,
        vec!["openEuler-20.03-LTS-SP1", "openEuler-24.03-LTS"]
    );
}

#[test]
fn test_missing_maintained_version_fails() {
    let (service, _) = service();
    let body = body_with(&[(FieldTag::AffectedVersionBlock, "openEuler-22.03-LTS:受影响")]);

    match service.check(&body, IssueIdentity::default()) {
        Err(DefectError::Validation(err)) => {
            assert_eq!(err.kind(), ValidationKind::VersionCoverageMismatch);
            assert!(err.to_string().contains("缺少版本: openEuler-20.03-LTS-SP1"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_severe_is_not_a_severity() {
    let (service, _) = service();
    let body = body_with(&[(FieldTag::SeverityLevel, "Severe")]);

    match service.check(&body, IssueIdentity::default()) {
        Err(DefectError::Validation(err)) => {
            assert_eq!(err.kind(), ValidationKind::InvalidSeverity);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_record_json_revalidates() {
    let (service, _) = service();
    let record = service
        .check(&body_with(&[]), IssueIdentity::new("I2", "o", "r", "open"))
        .unwrap();

    let json = serde_json::to_string(&record).unwrap();
    let back: DefectRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);

    let parser = AffectedTableParser::new().unwrap();
    let validator = DefectValidator::new(service.policy(), &parser);
    assert!(validator.revalidate(&back).is_ok());
}

#[tokio::test]
async fn test_accepted_issue_is_saved_once() {
    let (service, manager) = service();

    let outcome = service
        .handle_issue_event(&issue_event("缺陷", body_with(&[])))
        .await
        .unwrap();

    match &outcome {
        HandleOutcome::Accepted { record, comment } => {
            assert_eq!(comment, ACCEPTED_COMMENT);
            assert_eq!(record.issue.number, "I7QW2X");
            assert_eq!(record.issue.repo, "kernel");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(manager.saved.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rejected_issue_is_not_saved() {
    let (service, manager) = service();
    let body = body_with(&[(FieldTag::SystemVersion, "openEuler-21.09")]);

    let outcome = service
        .handle_issue_event(&issue_event("缺陷", body))
        .await
        .unwrap();

    assert!(matches!(outcome, HandleOutcome::Rejected { .. }));
    assert!(outcome
        .comment()
        .unwrap()
        .starts_with("缺陷归属的版本 openEuler-21.09"));
    assert!(manager.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_other_issue_types_ignored() {
    let (service, manager) = service();

    let outcome = service
        .handle_issue_event(&issue_event("需求", body_with(&[])))
        .await
        .unwrap();

    assert_eq!(outcome, HandleOutcome::Ignored);
    assert_eq!(outcome.comment(), None);
    assert!(manager.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_note_needs_check_command() {
    let (service, manager) = service();
    let event = issue_event("缺陷", body_with(&[]));

    let mut note = NoteEvent {
        noteable_type: "Issue".to_string(),
        comment: NoteHook {
            body: "looks good".to_string(),
        },
        issue: Some(event.issue.clone()),
        project: event.project.clone(),
    };

    let outcome = service.handle_note_event(&note).await.unwrap();
    assert_eq!(outcome, HandleOutcome::Ignored);

    note.comment.body = "please /check-issue again".to_string();
    let outcome = service.handle_note_event(&note).await.unwrap();
    assert!(matches!(outcome, HandleOutcome::Accepted { .. }));
    assert_eq!(manager.saved.lock().unwrap().len(), 1);
}
