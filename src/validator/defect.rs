use crate::models::{
    DefectRecord, FieldTag, IssueIdentity, Policy, RawFieldMap, SeverityLevel, ValidationError,
};
use crate::parser::AffectedTableParser;

/// Checks extracted sections against the operator policy
pub struct DefectValidator<'a> {
    policy: &'a Policy,
    affected: &'a AffectedTableParser,
}

impl<'a> DefectValidator<'a> {
    pub fn new(policy: &'a Policy, affected: &'a AffectedTableParser) -> Self {
        Self { policy, affected }
    }

    /// Validate `fields` and assemble the record
    ///
    /// Checks run in order and stop at the first failure: affected-version coverage,
    /// severity, system version.
    pub fn validate(
        &self,
        fields: RawFieldMap,
        issue: IssueIdentity,
    ) -> Result<DefectRecord, ValidationError> {
        let affected_version = self
            .affected
            .parse(fields.get(FieldTag::AffectedVersionBlock), self.policy)?;
        let severity_level = self.check_severity(fields.get(FieldTag::SeverityLevel))?;
        self.check_system_version(fields.get(FieldTag::SystemVersion))?;

        // Destructured in `FieldTag::ALL` order
        let [kernel, component, system_version, description, reference_url, guidance_url, influence, _, _, abi] =
            fields.into_values();

        Ok(DefectRecord {
            issue,
            kernel,
            component,
            system_version,
            description,
            reference_url,
            guidance_url,
            influence,
            severity_level,
            affected_version,
            abi,
        })
    }

    /// Re-run the severity and system version checks on an existing record
    pub fn revalidate(&self, record: &DefectRecord) -> Result<(), ValidationError> {
        self.check_severity(record.severity_level.as_str())?;
        self.check_system_version(&record.system_version)
    }

    fn check_severity(&self, value: &str) -> Result<SeverityLevel, ValidationError> {
        value
            .parse::<SeverityLevel>()
            .map_err(|_| ValidationError::InvalidSeverity {
                value: value.to_string(),
            })
    }

    fn check_system_version(&self, value: &str) -> Result<(), ValidationError> {
        if self.policy.is_maintained(value) {
            Ok(())
        } else {
            Err(ValidationError::InvalidSystemVersion {
                value: value.to_string(),
                maintained: self.policy.maintained_versions().to_vec(),
            })
        }
    }
}
