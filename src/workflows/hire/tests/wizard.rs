use super::common::*;
use crate::workflows::hire::domain::{
    DriverType, InsuranceCover, Transmission, WorkSchedule, YesNo,
};
use crate::workflows::hire::rates::InvalidScheduleKind;
use crate::workflows::hire::wizard::{
    Direction, Section, SubmissionStatus, WizardAction, WizardError, WizardState,
};

#[test]
fn initial_state_uses_documented_baseline() {
    let state = WizardState::new();
    let form = &state.form_data;

    assert_eq!(state.active_section, Section::Personal);
    assert_eq!(state.submission, SubmissionStatus::Editing);
    assert_eq!(form.project_details.work_schedule, WorkSchedule::Weekdays);
    assert_eq!(form.project_details.salary_package, "155000");
    assert_eq!(form.vehicle_details.provides_vehicle, YesNo::Yes);
    assert_eq!(form.personal_details.marital_status, YesNo::No);
    assert_eq!(form.project_details.accommodation, YesNo::No);
    assert_eq!(form.project_details.driver_type, DriverType::Personal);
    assert_eq!(
        form.vehicle_details.vehicle_transmission,
        Transmission::Automatic
    );
    assert_eq!(
        form.vehicle_details.vehicle_insurance,
        InsuranceCover::Comprehensive
    );
    assert!(form.personal_details.full_name.is_empty());
    assert!(form.address_information.home_address.is_empty());
}

#[test]
fn schedule_change_derives_salary_package() {
    let expected = [
        ("weekdays", "155000"),
        ("weekdaysSaturday", "175000"),
        ("fullWeek", "200000"),
        ("shift", "30000"),
    ];

    let mut state = WizardState::new();
    for (schedule, salary) in expected {
        state = state
            .update_field(Section::Driver, "workSchedule", schedule)
            .expect("known schedule");
        assert_eq!(state.form_data.project_details.work_schedule.as_str(), schedule);
        assert_eq!(state.form_data.project_details.salary_package, salary);
    }
}

#[test]
fn unknown_schedule_leaves_state_unchanged() {
    let state = WizardState::new()
        .update_field(Section::Driver, "workSchedule", "fullWeek")
        .expect("known schedule");

    match state.update_field(Section::Driver, "workSchedule", "weekend") {
        Err(WizardError::InvalidScheduleKind(InvalidScheduleKind(value))) => {
            assert_eq!(value, "weekend")
        }
        other => panic!("expected invalid schedule, got {other:?}"),
    }
    assert_eq!(state.form_data.project_details.salary_package, "200000");
    assert_eq!(
        state.form_data.project_details.work_schedule,
        WorkSchedule::FullWeek
    );
}

#[test]
fn salary_package_edit_is_overwritten_by_next_schedule_change() {
    let state = WizardState::new()
        .update_field(Section::Driver, "salaryPackage", "160000")
        .expect("salary editable");
    assert_eq!(state.form_data.project_details.salary_package, "160000");

    let state = state
        .update_field(Section::Driver, "workSchedule", "weekdaysSaturday")
        .expect("known schedule");
    assert_eq!(state.form_data.project_details.salary_package, "175000");
}

#[test]
fn update_field_rejects_unknown_fields_and_choices() {
    let state = WizardState::new();

    assert!(matches!(
        state.update_field(Section::Personal, "workSchedule", "shift"),
        Err(WizardError::UnknownField {
            section: Section::Personal,
            ..
        })
    ));
    assert!(matches!(
        state.update_field(Section::Vehicle, "vehicleTransmission", "cvt"),
        Err(WizardError::InvalidChoice {
            field: "vehicleTransmission",
            ..
        })
    ));
    assert!(matches!(
        state.update_field(Section::Vehicle, "providesVehicle", "maybe"),
        Err(WizardError::InvalidChoice {
            field: "providesVehicle",
            ..
        })
    ));

    let updated = state
        .update_field(Section::Vehicle, "vehicleInsurance", "thirdParty")
        .expect("valid choice");
    assert_eq!(
        updated.form_data.vehicle_details.vehicle_insurance,
        InsuranceCover::ThirdParty
    );
}

#[test]
fn forward_navigation_is_gated_by_the_active_section() {
    let state = WizardState::new()
        .update_field(Section::Personal, "fullName", "Ada Obi")
        .expect("field");

    match state.navigate(Direction::Forward) {
        Err(WizardError::Validation(err)) => {
            let fields: Vec<&str> = err.issues.iter().map(|issue| issue.field).collect();
            assert_eq!(fields, vec!["email", "phone", "location"]);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn backward_and_boundary_moves_are_no_ops() {
    let state = WizardState::new();
    let back = state.navigate(Direction::Backward).expect("no-op");
    assert_eq!(back, state);

    let at_address = wizard_at_address();
    let forward = at_address.navigate(Direction::Forward).expect("no-op");
    assert_eq!(forward, at_address);

    let vehicle = at_address.navigate(Direction::Backward).expect("back");
    assert_eq!(vehicle.active_section, Section::Vehicle);
}

#[test]
fn backward_navigation_ignores_an_incomplete_section() {
    let mut at_driver = wizard_at_address();
    at_driver.active_section = Section::Driver;
    at_driver.form_data.project_details.duties_description.clear();
    assert!(at_driver.navigate(Direction::Forward).is_err());

    let personal = at_driver
        .navigate(Direction::Backward)
        .expect("backward is never gated");
    assert_eq!(personal.active_section, Section::Personal);
    assert!(personal.form_data.project_details.duties_description.is_empty());
}

#[test]
fn email_is_stored_without_surrounding_whitespace() {
    let state = WizardState::new()
        .update_field(Section::Personal, "email", "  ada@example.com \n")
        .expect("field");

    assert_eq!(state.form_data.personal_details.email, "ada@example.com");
}

#[test]
fn tab_selection_is_limited_to_adjacent_sections() {
    let state = WizardState::new();
    assert!(matches!(
        state.select(Section::Vehicle),
        Err(WizardError::NonAdjacentSection {
            from: Section::Personal,
            to: Section::Vehicle
        })
    ));

    let at_address = wizard_at_address();
    let vehicle = at_address.select(Section::Vehicle).expect("adjacent");
    assert_eq!(vehicle.active_section, Section::Vehicle);
    assert_eq!(at_address.select(Section::Address).expect("same"), at_address);
}

#[test]
fn submit_is_only_offered_on_the_address_section() {
    assert!(!WizardState::new().can_submit());
    assert!(matches!(
        WizardState::new().apply(WizardAction::SubmitRequested),
        Err(WizardError::SubmitUnavailable)
    ));
    assert!(wizard_at_address().can_submit());
}

#[test]
fn submit_lifecycle_guards_against_double_submission() {
    let busy = wizard_at_address()
        .apply(WizardAction::SubmitRequested)
        .expect("submission starts");
    assert!(busy.is_busy());
    assert!(!busy.can_submit());
    assert!(matches!(
        busy.apply(WizardAction::SubmitRequested),
        Err(WizardError::SubmissionInFlight)
    ));

    let failed = busy
        .apply(WizardAction::SubmissionFailed)
        .expect("failure settles");
    assert_eq!(failed.submission, SubmissionStatus::Failed);
    assert_eq!(failed.form_data, busy.form_data);
    assert!(failed.can_submit());

    let submitted = failed
        .apply(WizardAction::SubmitRequested)
        .and_then(|state| state.apply(WizardAction::SubmissionSucceeded))
        .expect("retry succeeds");
    assert_eq!(submitted.submission, SubmissionStatus::Submitted);
    assert!(matches!(
        submitted.apply(WizardAction::SubmitRequested),
        Err(WizardError::AlreadySubmitted)
    ));
}

#[test]
fn settling_without_a_submission_is_rejected() {
    assert!(matches!(
        wizard_at_address().apply(WizardAction::SubmissionSucceeded),
        Err(WizardError::NoSubmissionInFlight)
    ));
}

#[test]
fn actions_deserialize_from_tagged_json() {
    let action: WizardAction = serde_json::from_str(
        r#"{"type":"update_field","section":"driver","field":"workSchedule","value":"shift"}"#,
    )
    .expect("action parses");
    let state = WizardState::new().apply(action).expect("applies");
    assert_eq!(state.form_data.project_details.salary_package, "30000");

    let action: WizardAction =
        serde_json::from_str(r#"{"type":"navigate","direction":"backward"}"#).expect("parses");
    assert_eq!(WizardState::new().apply(action).expect("no-op"), WizardState::new());
}
