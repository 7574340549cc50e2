use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::rates::salary_package_for;

/// Identifier assigned by the request store when a record is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Schedules a hired driver can be booked for. Each one carries a fixed rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkSchedule {
    #[default]
    Weekdays,
    WeekdaysSaturday,
    FullWeek,
    Shift,
}

impl WorkSchedule {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Weekdays,
            Self::WeekdaysSaturday,
            Self::FullWeek,
            Self::Shift,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekdays => "weekdays",
            Self::WeekdaysSaturday => "weekdaysSaturday",
            Self::FullWeek => "fullWeek",
            Self::Shift => "shift",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Weekdays => "Monday to Friday",
            Self::WeekdaysSaturday => "Monday to Saturday",
            Self::FullWeek => "Full week",
            Self::Shift => "Single shift",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|schedule| schedule.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DriverType {
    #[default]
    Personal,
    Corporate,
    Chauffeur,
    Logistics,
}

impl DriverType {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Personal,
            Self::Corporate,
            Self::Chauffeur,
            Self::Logistics,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Corporate => "corporate",
            Self::Chauffeur => "chauffeur",
            Self::Logistics => "logistics",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Personal => "Personal driver",
            Self::Corporate => "Corporate driver",
            Self::Chauffeur => "Chauffeur",
            Self::Logistics => "Logistics driver",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|kind| kind.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Transmission {
    #[default]
    Automatic,
    Manual,
}

impl Transmission {
    pub const fn ordered() -> [Self; 2] {
        [Self::Automatic, Self::Manual]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::Manual => "manual",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|kind| kind.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsuranceCover {
    #[default]
    Comprehensive,
    ThirdParty,
}

impl InsuranceCover {
    pub const fn ordered() -> [Self; 2] {
        [Self::Comprehensive, Self::ThirdParty]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comprehensive => "comprehensive",
            Self::ThirdParty => "thirdParty",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Comprehensive => "Comprehensive",
            Self::ThirdParty => "Third party",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|kind| kind.as_str() == raw)
    }
}

/// Yes/no answers, kept as text on the wire like every other form field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub marital_status: YesNo,
    /// Preferred driver location.
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectDetails {
    pub driver_type: DriverType,
    pub contract_duration: String,
    /// Derived from `work_schedule` through the rate table.
    pub salary_package: String,
    pub work_schedule: WorkSchedule,
    pub accommodation: YesNo,
    pub duties_description: String,
    pub resumption_date_time: String,
    pub closing_time: String,
}

impl Default for ProjectDetails {
    fn default() -> Self {
        let work_schedule = WorkSchedule::default();
        Self {
            driver_type: DriverType::default(),
            contract_duration: String::new(),
            salary_package: salary_package_for(work_schedule),
            work_schedule,
            accommodation: YesNo::No,
            duties_description: String::new(),
            resumption_date_time: String::new(),
            closing_time: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VehicleDetails {
    pub provides_vehicle: YesNo,
    pub vehicle_type: String,
    pub vehicle_transmission: Transmission,
    pub vehicle_insurance: InsuranceCover,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_year: String,
}

impl Default for VehicleDetails {
    fn default() -> Self {
        Self {
            provides_vehicle: YesNo::Yes,
            vehicle_type: String::new(),
            vehicle_transmission: Transmission::default(),
            vehicle_insurance: InsuranceCover::default(),
            vehicle_brand: String::new(),
            vehicle_model: String::new(),
            vehicle_year: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddressInformation {
    pub home_address: String,
    pub office_address: String,
    pub pickup_locations: String,
}

/// Complete payload collected by the multi-section wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DriverHireRequest {
    pub personal_details: PersonalDetails,
    pub project_details: ProjectDetails,
    pub vehicle_details: VehicleDetails,
    pub address_information: AddressInformation,
}

/// Flat payload posted by the single-page request form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuickHireRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub request_details: String,
}

/// Either shape of submitted request, stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", content = "fields", rename_all = "snake_case")]
pub enum HirePayload {
    Wizard(DriverHireRequest),
    Quick(QuickHireRequest),
}

impl HirePayload {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Wizard(_) => "wizard",
            Self::Quick(_) => "quick",
        }
    }

    pub fn requester_name(&self) -> &str {
        match self {
            Self::Wizard(request) => &request.personal_details.full_name,
            Self::Quick(request) => &request.full_name,
        }
    }

    pub fn requester_email(&self) -> &str {
        match self {
            Self::Wizard(request) => &request.personal_details.email,
            Self::Quick(request) => &request.email,
        }
    }
}

impl From<DriverHireRequest> for HirePayload {
    fn from(value: DriverHireRequest) -> Self {
        Self::Wizard(value)
    }
}

impl From<QuickHireRequest> for HirePayload {
    fn from(value: QuickHireRequest) -> Self {
        Self::Quick(value)
    }
}

/// Durable copy of a submitted request as held by the request store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub id: RequestId,
    pub created_at: DateTime<Utc>,
    pub payload: HirePayload,
}
