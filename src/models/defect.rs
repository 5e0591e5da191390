use super::FieldTag;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Extracted section text, one entry per `FieldTag`
///
/// Only ever built complete: the extractor either fills all ten entries or fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFieldMap {
    values: [String; FieldTag::COUNT],
}

impl RawFieldMap {
    /// Build from values in template order
    pub fn new(values: [String; FieldTag::COUNT]) -> Self {
        Self { values }
    }

    pub fn get(&self, tag: FieldTag) -> &str {
        &self.values[tag.index()]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldTag, &str)> {
        FieldTag::ALL
            .iter()
            .map(move |tag| (*tag, self.values[tag.index()].as_str()))
    }

    pub fn into_values(self) -> [String; FieldTag::COUNT] {
        self.values
    }
}

/// Marker attached to each version in the affected-version table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AffectedState {
    Affected,
    Unaffected,
}

impl AffectedState {
    pub fn marker(&self) -> &'static str {
        match self {
            AffectedState::Affected => "受影响",
            AffectedState::Unaffected => "不受影响",
        }
    }

    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "受影响" => Some(AffectedState::Affected),
            "不受影响" => Some(AffectedState::Unaffected),
            _ => None,
        }
    }
}

/// A `(version, state)` row of the affected-version table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionState {
    pub version: String,
    pub state: AffectedState,
}

/// Allowed values of 缺陷严重等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 4] = [
        SeverityLevel::Low,
        SeverityLevel::Moderate,
        SeverityLevel::High,
        SeverityLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "Low",
            SeverityLevel::Moderate => "Moderate",
            SeverityLevel::High => "High",
            SeverityLevel::Critical => "Critical",
        }
    }
}

impl FromStr for SeverityLevel {
    type Err = ();

    /// Exact, case-sensitive match
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeverityLevel::ALL
            .iter()
            .find(|level| level.as_str() == s)
            .copied()
            .ok_or(())
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the issue a report came from, supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueIdentity {
    #[serde(rename = "issue_number")]
    pub number: String,
    #[serde(rename = "issue_org")]
    pub org: String,
    #[serde(rename = "issue_repo")]
    pub repo: String,
    #[serde(rename = "issue_status")]
    pub status: String,
}

impl IssueIdentity {
    pub fn new(
        number: impl Into<String>,
        org: impl Into<String>,
        repo: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            org: org.into(),
            repo: repo.into(),
            status: status.into(),
        }
    }
}

/// A validated defect, ready to hand to a `DefectManager`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectRecord {
    #[serde(flatten)]
    pub issue: IssueIdentity,
    pub kernel: String,
    pub component: String,
    pub system_version: String,
    pub description: String,
    pub reference_url: String,
    pub guidance_url: String,
    pub influence: String,
    pub severity_level: SeverityLevel,
    pub affected_version: Vec<String>,
    pub abi: String,
}
