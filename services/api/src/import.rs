use crate::infra::build_pipeline;
use clap::Args;
use driver_hire::config::AppConfig;
use driver_hire::error::AppError;
use driver_hire::telemetry;
use driver_hire::workflows::hire::{
    validate_quick_request, HirePayload, NotificationService, QuickHireRequest,
    QuickRequestImporter, RequestStore, SubmissionPipeline,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// CSV export with Full Name, Email, Phone, Location and Request Details columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RowOutcome {
    Submitted { request_id: String },
    Skipped { reason: String },
    Failed { stage: &'static str },
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ImportSummary {
    pub(crate) outcomes: Vec<RowOutcome>,
}

impl ImportSummary {
    pub(crate) fn submitted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, RowOutcome::Submitted { .. }))
            .count()
    }
}

pub(crate) async fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let requests = QuickRequestImporter::from_path(&args.csv)?;
    let pipeline = build_pipeline(&config)?;

    println!("Importing {} request(s) from {}", requests.len(), args.csv.display());
    let summary = submit_all(&pipeline, requests).await;
    for (index, outcome) in summary.outcomes.iter().enumerate() {
        let row = index + 1;
        match outcome {
            RowOutcome::Submitted { request_id } => println!("- row {row}: stored as {request_id}"),
            RowOutcome::Skipped { reason } => println!("- row {row}: skipped ({reason})"),
            RowOutcome::Failed { stage } => println!("- row {row}: failed at {stage} stage"),
        }
    }
    println!(
        "{} of {} request(s) submitted",
        summary.submitted(),
        summary.outcomes.len()
    );

    Ok(())
}

/// Submits each row independently; a failing row never stops the rest.
pub(crate) async fn submit_all<S, N>(
    pipeline: &SubmissionPipeline<S, N>,
    requests: Vec<QuickHireRequest>,
) -> ImportSummary
where
    S: RequestStore + 'static,
    N: NotificationService + 'static,
{
    let mut summary = ImportSummary::default();
    for request in requests {
        let outcome = match validate_quick_request(&request).into_result("row") {
            Err(err) => RowOutcome::Skipped {
                reason: err.to_string(),
            },
            Ok(()) => match pipeline.submit(HirePayload::Quick(request)).await {
                Ok(confirmation) => RowOutcome::Submitted {
                    request_id: confirmation.request_id.to_string(),
                },
                Err(err) => RowOutcome::Failed {
                    stage: err.stage().as_str(),
                },
            },
        };
        summary.outcomes.push(outcome);
    }
    summary
}
