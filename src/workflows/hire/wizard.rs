//! Multi-section intake wizard expressed as a pure state transition.
//!
//! `WizardState::apply` never mutates its receiver: a successful action yields the next
//! state, a rejected one yields an error and the caller keeps the state it already had.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{DriverHireRequest, DriverType, InsuranceCover, Transmission, YesNo};
use super::rates::{parse_schedule, salary_package_for, InvalidScheduleKind};
use super::validation::{can_proceed, validate_request, ValidationError};

/// The four wizard sections, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Personal,
    Driver,
    Vehicle,
    Address,
}

impl Section {
    pub const fn ordered() -> [Self; 4] {
        [Self::Personal, Self::Driver, Self::Vehicle, Self::Address]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Personal => 0,
            Self::Driver => 1,
            Self::Vehicle => 2,
            Self::Address => 3,
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Personal => Some(Self::Driver),
            Self::Driver => Some(Self::Vehicle),
            Self::Vehicle => Some(Self::Address),
            Self::Address => None,
        }
    }

    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Personal => None,
            Self::Driver => Some(Self::Personal),
            Self::Vehicle => Some(Self::Driver),
            Self::Address => Some(Self::Vehicle),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Personal => "Personal Details",
            Self::Driver => "Project Details",
            Self::Vehicle => "Vehicle Details",
            Self::Address => "Address Information",
        }
    }

    pub const fn scope(self) -> &'static str {
        match self {
            Self::Personal => "personal section",
            Self::Driver => "driver section",
            Self::Vehicle => "vehicle section",
            Self::Address => "address section",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Driver => "driver",
            Self::Vehicle => "vehicle",
            Self::Address => "address",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

/// Where the wizard is in its submit lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Editing,
    Submitting,
    Submitted,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardAction {
    UpdateField {
        section: Section,
        field: String,
        value: String,
    },
    Navigate {
        direction: Direction,
    },
    /// Direct tab selection; still limited to adjacent sections.
    Select {
        section: Section,
    },
    SubmitRequested,
    SubmissionSucceeded,
    SubmissionFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    InvalidScheduleKind(#[from] InvalidScheduleKind),
    #[error("unknown field '{field}' in the {section} section")]
    UnknownField { section: Section, field: String },
    #[error("'{value}' is not a valid choice for {field}")]
    InvalidChoice { field: &'static str, value: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("cannot move from the {from} section directly to the {to} section")]
    NonAdjacentSection { from: Section, to: Section },
    #[error("requests can only be submitted from the address section")]
    SubmitUnavailable,
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("the request has already been submitted")]
    AlreadySubmitted,
    #[error("no submission is in flight")]
    NoSubmissionInFlight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub active_section: Section,
    pub form_data: DriverHireRequest,
    pub submission: SubmissionStatus,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            active_section: Section::Personal,
            form_data: DriverHireRequest::default(),
            submission: SubmissionStatus::Editing,
        }
    }

    pub fn apply(&self, action: WizardAction) -> Result<Self, WizardError> {
        match action {
            WizardAction::UpdateField {
                section,
                field,
                value,
            } => self.update_field(section, &field, value),
            WizardAction::Navigate { direction } => self.navigate(direction),
            WizardAction::Select { section } => self.select(section),
            WizardAction::SubmitRequested => self.begin_submission(),
            WizardAction::SubmissionSucceeded => self.finish_submission(true),
            WizardAction::SubmissionFailed => self.finish_submission(false),
        }
    }

    /// Replace one leaf field. Setting `workSchedule` also re-derives `salaryPackage`.
    pub fn update_field(
        &self,
        section: Section,
        field: &str,
        value: impl Into<String>,
    ) -> Result<Self, WizardError> {
        let mut next = self.clone();
        assign_field(&mut next.form_data, section, field, value.into())?;
        Ok(next)
    }

    /// Move one section forward or backward. Forward requires the active section to pass.
    pub fn navigate(&self, direction: Direction) -> Result<Self, WizardError> {
        let target = match direction {
            Direction::Forward => self.active_section.next(),
            Direction::Backward => self.active_section.previous(),
        };
        let Some(target) = target else {
            return Ok(self.clone());
        };

        if direction == Direction::Forward {
            can_proceed(self.active_section, &self.form_data)
                .into_result(self.active_section.scope())?;
        }

        Ok(Self {
            active_section: target,
            ..self.clone()
        })
    }

    pub fn select(&self, section: Section) -> Result<Self, WizardError> {
        let current = self.active_section;
        if section == current {
            return Ok(self.clone());
        }
        if current.next() == Some(section) {
            return self.navigate(Direction::Forward);
        }
        if current.previous() == Some(section) {
            return self.navigate(Direction::Backward);
        }
        Err(WizardError::NonAdjacentSection {
            from: current,
            to: section,
        })
    }

    /// True when the final section offers "Submit" in place of "Next".
    pub fn can_submit(&self) -> bool {
        self.active_section == Section::Address
            && matches!(
                self.submission,
                SubmissionStatus::Editing | SubmissionStatus::Failed
            )
    }

    pub fn is_busy(&self) -> bool {
        self.submission == SubmissionStatus::Submitting
    }

    fn begin_submission(&self) -> Result<Self, WizardError> {
        match self.submission {
            SubmissionStatus::Submitting => return Err(WizardError::SubmissionInFlight),
            SubmissionStatus::Submitted => return Err(WizardError::AlreadySubmitted),
            SubmissionStatus::Editing | SubmissionStatus::Failed => {}
        }
        if self.active_section != Section::Address {
            return Err(WizardError::SubmitUnavailable);
        }
        validate_request(&self.form_data).into_result("request")?;

        Ok(Self {
            submission: SubmissionStatus::Submitting,
            ..self.clone()
        })
    }

    fn finish_submission(&self, succeeded: bool) -> Result<Self, WizardError> {
        if self.submission != SubmissionStatus::Submitting {
            return Err(WizardError::NoSubmissionInFlight);
        }
        let submission = if succeeded {
            SubmissionStatus::Submitted
        } else {
            SubmissionStatus::Failed
        };
        Ok(Self {
            submission,
            ..self.clone()
        })
    }
}

fn assign_field(
    form: &mut DriverHireRequest,
    section: Section,
    field: &str,
    value: String,
) -> Result<(), WizardError> {
    match section {
        Section::Personal => {
            let personal = &mut form.personal_details;
            match field {
                "fullName" => personal.full_name = value,
                "email" => personal.email = value.trim().to_string(),
                "phone" => personal.phone = value,
                "maritalStatus" => personal.marital_status = yes_no("maritalStatus", value)?,
                "location" => personal.location = value,
                _ => return Err(unknown(section, field)),
            }
        }
        Section::Driver => {
            let project = &mut form.project_details;
            match field {
                "driverType" => {
                    project.driver_type = DriverType::from_wire(&value)
                        .ok_or(WizardError::InvalidChoice {
                            field: "driverType",
                            value,
                        })?;
                }
                "contractDuration" => project.contract_duration = value,
                "salaryPackage" => project.salary_package = value,
                "workSchedule" => {
                    let schedule = parse_schedule(&value)?;
                    project.work_schedule = schedule;
                    project.salary_package = salary_package_for(schedule);
                }
                "accommodation" => project.accommodation = yes_no("accommodation", value)?,
                "dutiesDescription" => project.duties_description = value,
                "resumptionDateTime" => project.resumption_date_time = value,
                "closingTime" => project.closing_time = value,
                _ => return Err(unknown(section, field)),
            }
        }
        Section::Vehicle => {
            let vehicle = &mut form.vehicle_details;
            match field {
                "providesVehicle" => vehicle.provides_vehicle = yes_no("providesVehicle", value)?,
                "vehicleType" => vehicle.vehicle_type = value,
                "vehicleTransmission" => {
                    vehicle.vehicle_transmission = Transmission::from_wire(&value).ok_or(
                        WizardError::InvalidChoice {
                            field: "vehicleTransmission",
                            value,
                        },
                    )?;
                }
                "vehicleInsurance" => {
                    vehicle.vehicle_insurance = InsuranceCover::from_wire(&value).ok_or(
                        WizardError::InvalidChoice {
                            field: "vehicleInsurance",
                            value,
                        },
                    )?;
                }
                "vehicleBrand" => vehicle.vehicle_brand = value,
                "vehicleModel" => vehicle.vehicle_model = value,
                "vehicleYear" => vehicle.vehicle_year = value,
                _ => return Err(unknown(section, field)),
            }
        }
        Section::Address => {
            let address = &mut form.address_information;
            match field {
                "homeAddress" => address.home_address = value,
                "officeAddress" => address.office_address = value,
                "pickupLocations" => address.pickup_locations = value,
                _ => return Err(unknown(section, field)),
            }
        }
    }
    Ok(())
}

fn yes_no(field: &'static str, value: String) -> Result<YesNo, WizardError> {
    YesNo::from_wire(&value).ok_or(WizardError::InvalidChoice { field, value })
}

fn unknown(section: Section, field: &str) -> WizardError {
    WizardError::UnknownField {
        section,
        field: field.to_string(),
    }
}
