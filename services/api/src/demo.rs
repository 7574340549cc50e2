use crate::infra::{InMemoryRequestStore, LoggingNotifier};
use clap::Args;
use driver_hire::error::AppError;
use driver_hire::workflows::hire::{
    format_naira, Direction, EmailTemplate, HirePayload, NotificationPayload, NotificationRouting,
    NotificationService, RateTable, Section, SubmissionPipeline, WizardAction, WizardState,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Work schedule chosen in the driver section (weekdays, weekdaysSaturday, fullWeek, shift)
    #[arg(long, default_value = "weekdays")]
    pub(crate) schedule: String,
    /// Print the rendered staff notification after submitting
    #[arg(long)]
    pub(crate) show_email: bool,
}

pub(crate) fn print_rate_table() {
    println!("Monthly driver rates");
    for (schedule, amount) in RateTable::entries() {
        println!("- {:<32} {}", schedule.label(), format_naira(amount));
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        schedule,
        show_email,
    } = args;

    println!("Driver hire intake demo");
    let template = EmailTemplate::standard("https://lagosdrivers.ng")?;
    let store = Arc::new(InMemoryRequestStore::default());
    let notifier = Arc::new(LoggingNotifier::new(template));
    let pipeline = SubmissionPipeline::new(
        store.clone(),
        notifier.clone(),
        NotificationRouting {
            recipient: "admin@lagosdrivers.ng".to_string(),
            subject: "New Driver Hire Request".to_string(),
        },
    );

    let state = walk(&demo_script(&schedule));
    println!(
        "\nForm complete at the {} section | salary package {}",
        state.active_section.label(),
        state.form_data.project_details.salary_package
    );

    let settled = match pipeline.submit_wizard(&state).await {
        Ok(settled) => settled,
        Err(err) => {
            println!("Submission refused: {err}");
            return Ok(());
        }
    };
    println!("Submission status: {:?}", settled.submission);
    println!("Stored requests: {}", store.len());
    for (recipient, subject) in notifier.deliveries() {
        println!("Notified {recipient} with subject \"{subject}\"");
    }

    if show_email {
        let payload = HirePayload::Wizard(settled.form_data);
        match notifier.render(&NotificationPayload::from(&payload)) {
            Ok(content) => println!("\n{}", content.html),
            Err(err) => println!("Notification preview unavailable: {err}"),
        }
    }

    Ok(())
}

/// Applies each action in turn, printing the transition. Rejected actions leave the
/// state untouched, the same way the wizard keeps the user on the current section.
pub(crate) fn walk(script: &[WizardAction]) -> WizardState {
    let mut state = WizardState::new();
    for action in script {
        match state.apply(action.clone()) {
            Ok(next) => {
                if next.active_section != state.active_section {
                    println!(
                        "  {} -> {}",
                        state.active_section.label(),
                        next.active_section.label()
                    );
                } else if let WizardAction::UpdateField { field, value, .. } = action {
                    println!("  set {field} = {value}");
                }
                state = next;
            }
            Err(err) => println!("  rejected: {err}"),
        }
    }
    state
}

fn set(section: Section, field: &str, value: &str) -> WizardAction {
    WizardAction::UpdateField {
        section,
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn forward() -> WizardAction {
    WizardAction::Navigate {
        direction: Direction::Forward,
    }
}

pub(crate) fn demo_script(schedule: &str) -> Vec<WizardAction> {
    vec![
        forward(),
        set(Section::Personal, "fullName", "Chioma Eze"),
        set(Section::Personal, "email", "chioma@example.com"),
        set(Section::Personal, "phone", "08031234567"),
        set(Section::Personal, "maritalStatus", "yes"),
        set(Section::Personal, "location", "Ikoyi"),
        forward(),
        WizardAction::Select {
            section: Section::Address,
        },
        set(Section::Driver, "driverType", "chauffeur"),
        set(Section::Driver, "contractDuration", "12 months"),
        set(Section::Driver, "workSchedule", schedule),
        set(Section::Driver, "accommodation", "no"),
        set(Section::Driver, "dutiesDescription", "School runs and office commute"),
        set(Section::Driver, "resumptionDateTime", "2025-11-03 07:00"),
        set(Section::Driver, "closingTime", "18:00"),
        forward(),
        set(Section::Vehicle, "vehicleType", "SUV"),
        set(Section::Vehicle, "vehicleBrand", "Toyota"),
        set(Section::Vehicle, "vehicleModel", "Highlander"),
        set(Section::Vehicle, "vehicleTransmission", "automatic"),
        forward(),
        set(Section::Address, "homeAddress", "4 Bourdillon Road, Ikoyi"),
        set(Section::Address, "officeAddress", "Plot 12, Adeola Odeku, Victoria Island"),
        set(Section::Address, "pickupLocations", "Home, school gate"),
    ]
}
