use super::field::strip_whitespace;
use super::{AffectedFilter, Policy};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default upper bound on an issue body, in bytes
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefectdConfig {
    pub issue: IssueConfig,

    #[serde(default)]
    pub manager: ManagerConfig,
}

/// Which issues are checked and the policy they are checked against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueConfig {
    /// Issue type name that carries the defect template
    pub issue_type: String,

    /// Versions currently maintained
    pub maintain_version: Vec<String>,

    #[serde(default)]
    pub affected_filter: AffectedFilter,

    /// Bodies larger than this are rejected before extraction (0 = default)
    #[serde(default)]
    pub max_body_bytes: usize,
}

impl IssueConfig {
    fn set_default(&mut self) {
        if self.max_body_bytes == 0 {
            self.max_body_bytes = DEFAULT_MAX_BODY_BYTES;
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.issue_type.trim().is_empty() {
            anyhow::bail!("issue.issue_type must not be empty");
        }
        if self.maintain_version.is_empty() {
            anyhow::bail!("issue.maintain_version must list at least one version");
        }
        if self.maintain_version.iter().any(|v| v.trim().is_empty()) {
            anyhow::bail!("issue.maintain_version contains a blank entry");
        }
        if let Some(v) = self
            .maintain_version
            .iter()
            .find(|v| strip_whitespace(v) != v.as_str())
        {
            anyhow::bail!("issue.maintain_version entry '{}' contains whitespace", v);
        }
        Ok(())
    }

    /// Build the validation policy
    pub fn policy(&self) -> anyhow::Result<Policy> {
        Ok(Policy::new(self.maintain_version.iter().cloned())?
            .with_affected_filter(self.affected_filter))
    }
}

/// Where accepted defects are handed off
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// HTTP endpoint receiving a JSON POST per defect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// JSON-lines file receiving one record per line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl DefectdConfig {
    /// Load config from a YAML file, or TOML when the extension is `.toml`
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;

        let is_toml = path.extension().map_or(false, |ext| ext == "toml");
        let mut config = if is_toml {
            Self::from_toml(&content)?
        } else {
            Self::from_yaml(&content)?
        };

        config.set_default();
        config
            .validate()
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse YAML config")
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse TOML config")
    }

    pub fn set_default(&mut self) {
        self.issue.set_default();
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.issue.validate()?;
        if let Some(endpoint) = &self.manager.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                anyhow::bail!("manager.endpoint must be an http(s) URL: {}", endpoint);
            }
        }
        Ok(())
    }
}
