use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::hire::domain::{
    DriverHireRequest, HirePayload, QuickHireRequest, RequestId, RequestRecord,
};
use crate::workflows::hire::notification::{
    DispatchError, EmailTemplate, NotificationContent, NotificationPayload, NotificationService,
    RenderError,
};
use crate::workflows::hire::pipeline::{NotificationRouting, SubmissionPipeline};
use crate::workflows::hire::repository::{RequestStore, StoreError};
use crate::workflows::hire::wizard::{Direction, Section, WizardState};

pub(super) fn quick_request() -> QuickHireRequest {
    QuickHireRequest {
        full_name: "Ada Obi".to_string(),
        email: "ada@example.com".to_string(),
        phone: "08012345678".to_string(),
        location: "Lekki".to_string(),
        request_details: "Need driver weekdays 8am-6pm".to_string(),
    }
}

pub(super) fn complete_request() -> DriverHireRequest {
    let mut request = DriverHireRequest::default();
    request.personal_details.full_name = "Chioma Eze".to_string();
    request.personal_details.email = "chioma@example.com".to_string();
    request.personal_details.phone = "08033334444".to_string();
    request.personal_details.location = "Victoria Island".to_string();
    request.project_details.duties_description = "School runs and office commute".to_string();
    request.project_details.resumption_date_time = "2025-11-03 07:00".to_string();
    request.project_details.closing_time = "18:00".to_string();
    request.vehicle_details.vehicle_brand = "Toyota".to_string();
    request.vehicle_details.vehicle_model = "Camry".to_string();
    request.vehicle_details.vehicle_year = "2019".to_string();
    request.address_information.home_address = "12 Admiralty Way, Lekki".to_string();
    request
}

/// Wizard filled in through field updates and parked on the address section.
pub(super) fn wizard_at_address() -> WizardState {
    let updates = [
        (Section::Personal, "fullName", "Chioma Eze"),
        (Section::Personal, "email", "chioma@example.com"),
        (Section::Personal, "phone", "08033334444"),
        (Section::Personal, "location", "Victoria Island"),
        (Section::Driver, "dutiesDescription", "School runs and office commute"),
        (Section::Driver, "resumptionDateTime", "2025-11-03 07:00"),
        (Section::Address, "homeAddress", "12 Admiralty Way, Lekki"),
    ];

    let mut state = WizardState::new();
    for (section, field, value) in updates {
        state = state
            .update_field(section, field, value)
            .expect("known field");
    }
    for _ in 0..3 {
        state = state
            .navigate(Direction::Forward)
            .expect("sections are complete");
    }
    assert_eq!(state.active_section, Section::Address);
    state
}

pub(super) fn routing() -> NotificationRouting {
    NotificationRouting {
        recipient: "admin@lagosdrivers.ng".to_string(),
        subject: "New Driver Hire Request".to_string(),
    }
}

pub(super) fn build_pipeline(
    notifier: RecordingNotifier,
) -> (
    SubmissionPipeline<MemoryStore, RecordingNotifier>,
    Arc<MemoryStore>,
    Arc<RecordingNotifier>,
) {
    let store = Arc::new(MemoryStore::default());
    let notifier = Arc::new(notifier);
    let pipeline = SubmissionPipeline::new(store.clone(), notifier.clone(), routing());
    (pipeline, store, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<Vec<RequestRecord>>>,
}

impl MemoryStore {
    pub(super) fn records(&self) -> Vec<RequestRecord> {
        self.records.lock().expect("store mutex poisoned").clone()
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn create(&self, payload: &HirePayload) -> Result<RequestRecord, StoreError> {
        let record = RequestRecord {
            id: RequestId(uuid::Uuid::new_v4().to_string()),
            created_at: Utc::now(),
            payload: payload.clone(),
        };
        self.records
            .lock()
            .expect("store mutex poisoned")
            .push(record.clone());
        Ok(record)
    }

    async fn fetch(&self, id: &RequestId) -> Result<Option<RequestRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }
}

pub(super) struct UnavailableStore;

#[async_trait]
impl RequestStore for UnavailableStore {
    async fn create(&self, _payload: &HirePayload) -> Result<RequestRecord, StoreError> {
        Err(StoreError::Unavailable("content backend offline".to_string()))
    }

    async fn fetch(&self, _id: &RequestId) -> Result<Option<RequestRecord>, StoreError> {
        Err(StoreError::Unavailable("content backend offline".to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NotifierMode {
    Deliver,
    FailRender,
    FailSend,
}

/// Renders with the standard template and records every call.
pub(super) struct RecordingNotifier {
    mode: NotifierMode,
    template: EmailTemplate,
    renders: AtomicUsize,
    sends: AtomicUsize,
    sent: Mutex<Vec<(String, String, String)>>,
}

impl RecordingNotifier {
    pub(super) fn new(mode: NotifierMode) -> Self {
        Self {
            mode,
            template: EmailTemplate::standard("https://lagosdrivers.ng").expect("template"),
            renders: AtomicUsize::new(0),
            sends: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn render_calls(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    pub(super) fn send_calls(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    /// (recipient, subject, html) for each delivered message.
    pub(super) fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

#[async_trait]
impl NotificationService for RecordingNotifier {
    fn render(&self, payload: &NotificationPayload) -> Result<NotificationContent, RenderError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        if self.mode == NotifierMode::FailRender {
            return Err(RenderError::Template("missing partial".to_string()));
        }
        self.template.render(payload)
    }

    async fn send(
        &self,
        content: &NotificationContent,
        recipient: &str,
        subject: &str,
    ) -> Result<(), DispatchError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        if self.mode == NotifierMode::FailSend {
            return Err(DispatchError::Rejected {
                status: 422,
                body: "invalid from address".to_string(),
            });
        }
        self.sent.lock().expect("notifier mutex poisoned").push((
            recipient.to_string(),
            subject.to_string(),
            content.html.clone(),
        ));
        Ok(())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
