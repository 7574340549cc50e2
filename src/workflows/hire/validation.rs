use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::domain::{DriverHireRequest, QuickHireRequest};
use super::wizard::Section;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Checks the value as stored; surrounding whitespace makes it malformed.
pub fn is_well_formed_email(raw: &str) -> bool {
    EMAIL_PATTERN.is_match(raw)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    Missing,
    Malformed,
}

impl FieldProblem {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Malformed => "malformed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub problem: FieldProblem,
}

/// Outcome of checking one section (or a whole request). Never mutates the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<FieldIssue>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn offending_fields(&self) -> Vec<&'static str> {
        self.issues.iter().map(|issue| issue.field).collect()
    }

    pub fn into_result(self, scope: &'static str) -> Result<(), ValidationError> {
        if self.passed() {
            Ok(())
        } else {
            Err(ValidationError {
                scope,
                issues: self.issues,
            })
        }
    }

    fn require(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.issues.push(FieldIssue {
                field,
                problem: FieldProblem::Missing,
            });
        }
    }

    fn require_email(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.require(field, value);
        } else if !is_well_formed_email(value) {
            self.issues.push(FieldIssue {
                field,
                problem: FieldProblem::Malformed,
            });
        }
    }
}

/// Client-side validation failure: required fields missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{scope} is incomplete: {}", describe_issues(.issues))]
pub struct ValidationError {
    pub scope: &'static str,
    pub issues: Vec<FieldIssue>,
}

fn describe_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{} ({})", issue.field, issue.problem.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Whether the given section's required fields are satisfied.
pub fn can_proceed(section: Section, form: &DriverHireRequest) -> ValidationReport {
    let mut report = ValidationReport::default();
    match section {
        Section::Personal => {
            let personal = &form.personal_details;
            report.require("fullName", &personal.full_name);
            report.require_email("email", &personal.email);
            report.require("phone", &personal.phone);
            report.require("location", &personal.location);
        }
        Section::Driver => {
            let project = &form.project_details;
            report.require("dutiesDescription", &project.duties_description);
            report.require("resumptionDateTime", &project.resumption_date_time);
        }
        Section::Vehicle => {}
        Section::Address => {
            report.require("homeAddress", &form.address_information.home_address);
        }
    }
    report
}

/// Every section must pass before the wizard may submit.
pub fn validate_request(form: &DriverHireRequest) -> ValidationReport {
    let issues = Section::ordered()
        .into_iter()
        .flat_map(|section| can_proceed(section, form).issues)
        .collect();
    ValidationReport { issues }
}

pub fn validate_quick_request(request: &QuickHireRequest) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.require("fullName", &request.full_name);
    report.require_email("email", &request.email);
    report.require("phone", &request.phone);
    report.require("location", &request.location);
    report.require("requestDetails", &request.request_details);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern_accepts_common_addresses() {
        assert!(is_well_formed_email("ada@example.com"));
        assert!(is_well_formed_email("ops.team+hire@lagosdrivers.ng"));
        assert!(!is_well_formed_email(" ops.team+hire@lagosdrivers.ng "));
        assert!(!is_well_formed_email("ada@example"));
        assert!(!is_well_formed_email("ada example@x.com"));
        assert!(!is_well_formed_email("@example.com"));
    }

    #[test]
    fn validation_error_lists_fields_in_order() {
        let err = ValidationError {
            scope: "personal section",
            issues: vec![
                FieldIssue {
                    field: "fullName",
                    problem: FieldProblem::Missing,
                },
                FieldIssue {
                    field: "email",
                    problem: FieldProblem::Malformed,
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "personal section is incomplete: fullName (missing), email (malformed)"
        );
    }
}
