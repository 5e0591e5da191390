use super::field::strip_whitespace;
use serde::{Deserialize, Serialize};

/// Which affected versions end up in a `DefectRecord`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffectedFilter {
    /// Every version the reporter marked affected, maintained or not
    #[default]
    AsReported,
    /// Only affected versions that are also maintained
    MaintainedOnly,
}

/// Operator policy a report is validated against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    maintained_versions: Vec<String>,
    affected_filter: AffectedFilter,
}

impl Policy {
    /// Build a policy from the maintained versions, keeping first-seen order
    pub fn new<I, S>(maintained_versions: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut versions: Vec<String> = Vec::new();
        for version in maintained_versions {
            let version = version.into();
            if version.trim().is_empty() {
                anyhow::bail!("Maintained version must not be blank");
            }
            // Reports are compared after whitespace is stripped, so this could never match
            if strip_whitespace(&version) != version {
                anyhow::bail!("Maintained version '{}' must not contain whitespace", version);
            }
            if !versions.contains(&version) {
                versions.push(version);
            }
        }

        if versions.is_empty() {
            anyhow::bail!("At least one maintained version is required");
        }

        Ok(Self {
            maintained_versions: versions,
            affected_filter: AffectedFilter::default(),
        })
    }

    pub fn with_affected_filter(mut self, filter: AffectedFilter) -> Self {
        self.affected_filter = filter;
        self
    }

    pub fn maintained_versions(&self) -> &[String] {
        &self.maintained_versions
    }

    pub fn affected_filter(&self) -> AffectedFilter {
        self.affected_filter
    }

    pub fn is_maintained(&self, version: &str) -> bool {
        self.maintained_versions.iter().any(|v| v == version)
    }
}
