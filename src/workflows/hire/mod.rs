//! Driver hire request intake: the multi-section wizard, its validation gate, and the
//! persist → render → dispatch submission pipeline.

pub mod domain;
pub mod import;
pub mod notification;
pub mod pipeline;
pub mod rates;
pub mod repository;
pub mod resend;
pub mod router;
pub mod sanity;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use domain::{
    AddressInformation, DriverHireRequest, DriverType, HirePayload, InsuranceCover,
    PersonalDetails, ProjectDetails, QuickHireRequest, RequestId, RequestRecord, Transmission,
    VehicleDetails, WorkSchedule, YesNo,
};
pub use import::{HireImportError, QuickRequestImporter};
pub use notification::{
    DispatchError, EmailTemplate, NotificationContent, NotificationPayload, NotificationService,
    RenderError,
};
pub use pipeline::{
    Confirmation, NotificationRouting, SubmissionError, SubmissionPipeline, SubmissionStage,
};
pub use rates::{format_naira, parse_schedule, salary_package_for, InvalidScheduleKind, RateTable};
pub use repository::{RequestStore, StoreError};
pub use resend::ResendNotifier;
pub use router::{hire_router, SubmissionResponse};
pub use sanity::SanityRequestStore;
pub use validation::{
    can_proceed, validate_quick_request, validate_request, FieldIssue, FieldProblem,
    ValidationError, ValidationReport,
};
pub use wizard::{Direction, Section, SubmissionStatus, WizardAction, WizardError, WizardState};
