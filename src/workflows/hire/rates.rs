//! Fixed monthly rates per work schedule, in naira.

use super::domain::WorkSchedule;

/// Raised when a schedule identifier is not part of the rate table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized work schedule '{0}'")]
pub struct InvalidScheduleKind(pub String);

pub struct RateTable;

impl RateTable {
    pub const fn amount(schedule: WorkSchedule) -> u32 {
        match schedule {
            WorkSchedule::Weekdays => 155_000,
            WorkSchedule::WeekdaysSaturday => 175_000,
            WorkSchedule::FullWeek => 200_000,
            WorkSchedule::Shift => 30_000,
        }
    }

    pub fn entries() -> Vec<(WorkSchedule, u32)> {
        WorkSchedule::ordered()
            .into_iter()
            .map(|schedule| (schedule, Self::amount(schedule)))
            .collect()
    }
}

pub fn parse_schedule(raw: &str) -> Result<WorkSchedule, InvalidScheduleKind> {
    WorkSchedule::from_wire(raw).ok_or_else(|| InvalidScheduleKind(raw.to_string()))
}

/// Text value stored in `salaryPackage` for a schedule.
pub fn salary_package_for(schedule: WorkSchedule) -> String {
    RateTable::amount(schedule).to_string()
}

/// Render an amount as `₦155,000`.
pub fn format_naira(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("₦{grouped}")
}
