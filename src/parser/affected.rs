use crate::models::{AffectedFilter, AffectedState, Policy, ValidationError, VersionState};
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;

/// `openEuler<anything>` + colon + `受影响` / `不受影响`, never crossing a line
const VERSION_STATE_PATTERN: &str = r"(openEuler.*?)[:：](不?受影响)";

/// Parser for the 受影响版本排查 block
pub struct AffectedTableParser {
    pattern: Regex,
}

impl AffectedTableParser {
    pub fn new() -> Result<Self> {
        let pattern =
            Regex::new(VERSION_STATE_PATTERN).context("Failed to compile affected-version regex")?;
        Ok(Self { pattern })
    }

    /// Scan the block left to right
    pub fn parse_version_states(&self, block: &str) -> Vec<VersionState> {
        self.pattern
            .captures_iter(block)
            .filter_map(|cap| {
                let version = cap.get(1)?.as_str().to_string();
                let state = AffectedState::from_marker(cap.get(2)?.as_str())?;
                Some(VersionState { version, state })
            })
            .collect()
    }

    /// Parse the block and check it against `policy`
    ///
    /// Every maintained version must appear in the block with either marker. Extra,
    /// non-maintained versions are accepted. Returns the versions marked affected in
    /// match order, filtered according to the policy's `AffectedFilter`.
    pub fn parse(
        &self,
        block: &str,
        policy: &Policy,
    ) -> std::result::Result<Vec<String>, ValidationError> {
        let states = self.parse_version_states(block);

        let observed: HashSet<&str> = states.iter().map(|s| s.version.as_str()).collect();
        let missing: Vec<String> = policy
            .maintained_versions()
            .iter()
            .filter(|v| !observed.contains(v.as_str()))
            .cloned()
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError::VersionCoverageMismatch {
                missing,
                maintained: policy.maintained_versions().to_vec(),
            });
        }

        let affected = states
            .into_iter()
            .filter(|s| s.state == AffectedState::Affected)
            .map(|s| s.version)
            .filter(|v| match policy.affected_filter() {
                AffectedFilter::AsReported => true,
                AffectedFilter::MaintainedOnly => policy.is_maintained(v),
            })
            .collect();

        Ok(affected)
    }
}
