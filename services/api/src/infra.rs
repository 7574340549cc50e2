use async_trait::async_trait;
use chrono::Utc;
use driver_hire::config::AppConfig;
use driver_hire::error::AppError;
use driver_hire::workflows::hire::{
    DispatchError, EmailTemplate, HirePayload, NotificationContent, NotificationPayload,
    NotificationRouting, NotificationService, RenderError, RequestId, RequestRecord, RequestStore,
    ResendNotifier, SanityRequestStore, StoreError, SubmissionPipeline,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type HirePipeline = SubmissionPipeline<ConfiguredStore, ConfiguredNotifier>;

#[derive(Default, Clone)]
pub(crate) struct InMemoryRequestStore {
    records: Arc<Mutex<HashMap<RequestId, RequestRecord>>>,
}

impl InMemoryRequestStore {
    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn create(&self, payload: &HirePayload) -> Result<RequestRecord, StoreError> {
        let record = RequestRecord {
            id: RequestId(Uuid::new_v4().to_string()),
            created_at: Utc::now(),
            payload: payload.clone(),
        };
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn fetch(&self, id: &RequestId) -> Result<Option<RequestRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Renders notifications but only logs them instead of contacting a mail provider.
#[derive(Debug)]
pub(crate) struct LoggingNotifier {
    template: EmailTemplate,
    deliveries: Mutex<Vec<(String, String)>>,
}

impl LoggingNotifier {
    pub(crate) fn new(template: EmailTemplate) -> Self {
        Self {
            template,
            deliveries: Mutex::new(Vec::new()),
        }
    }

    /// Recipient and subject of every message handed to `send`.
    pub(crate) fn deliveries(&self) -> Vec<(String, String)> {
        self.deliveries
            .lock()
            .expect("notifier mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl NotificationService for LoggingNotifier {
    fn render(&self, payload: &NotificationPayload) -> Result<NotificationContent, RenderError> {
        self.template.render(payload)
    }

    async fn send(
        &self,
        content: &NotificationContent,
        recipient: &str,
        subject: &str,
    ) -> Result<(), DispatchError> {
        info!(
            recipient,
            subject,
            html_bytes = content.html.len(),
            "notification logged (no mail provider configured)"
        );
        self.deliveries
            .lock()
            .expect("notifier mutex poisoned")
            .push((recipient.to_string(), subject.to_string()));
        Ok(())
    }
}

pub(crate) enum ConfiguredStore {
    Sanity(SanityRequestStore),
    Memory(InMemoryRequestStore),
}

impl ConfiguredStore {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            ConfiguredStore::Sanity(_) => "sanity",
            ConfiguredStore::Memory(_) => "memory",
        }
    }
}

#[async_trait]
impl RequestStore for ConfiguredStore {
    async fn create(&self, payload: &HirePayload) -> Result<RequestRecord, StoreError> {
        match self {
            ConfiguredStore::Sanity(store) => store.create(payload).await,
            ConfiguredStore::Memory(store) => store.create(payload).await,
        }
    }

    async fn fetch(&self, id: &RequestId) -> Result<Option<RequestRecord>, StoreError> {
        match self {
            ConfiguredStore::Sanity(store) => store.fetch(id).await,
            ConfiguredStore::Memory(store) => store.fetch(id).await,
        }
    }
}

pub(crate) enum ConfiguredNotifier {
    Resend(ResendNotifier),
    Log(LoggingNotifier),
}

impl ConfiguredNotifier {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            ConfiguredNotifier::Resend(_) => "resend",
            ConfiguredNotifier::Log(_) => "log",
        }
    }
}

#[async_trait]
impl NotificationService for ConfiguredNotifier {
    fn render(&self, payload: &NotificationPayload) -> Result<NotificationContent, RenderError> {
        match self {
            ConfiguredNotifier::Resend(notifier) => notifier.render(payload),
            ConfiguredNotifier::Log(notifier) => notifier.render(payload),
        }
    }

    async fn send(
        &self,
        content: &NotificationContent,
        recipient: &str,
        subject: &str,
    ) -> Result<(), DispatchError> {
        match self {
            ConfiguredNotifier::Resend(notifier) => notifier.send(content, recipient, subject).await,
            ConfiguredNotifier::Log(notifier) => notifier.send(content, recipient, subject).await,
        }
    }
}

pub(crate) fn routing_from(config: &AppConfig) -> NotificationRouting {
    NotificationRouting {
        recipient: config.notifications.recipient.clone(),
        subject: config.notifications.subject.clone(),
    }
}

/// Picks the content backend and mail provider from configuration, falling back to
/// in-memory storage and logged notifications when credentials are absent.
pub(crate) fn build_pipeline(config: &AppConfig) -> Result<HirePipeline, AppError> {
    let template = EmailTemplate::standard(config.site.base_url.clone())?;

    let store = match &config.store.sanity {
        Some(sanity) => ConfiguredStore::Sanity(SanityRequestStore::new(sanity.clone())),
        None => ConfiguredStore::Memory(InMemoryRequestStore::default()),
    };
    let notifier = match &config.notifications.resend_api_key {
        Some(api_key) => ConfiguredNotifier::Resend(ResendNotifier::new(
            api_key.clone(),
            config.notifications.sender.clone(),
            template,
        )),
        None => ConfiguredNotifier::Log(LoggingNotifier::new(template)),
    };

    info!(
        store = store.describe(),
        notifier = notifier.describe(),
        "hire submission pipeline configured"
    );

    Ok(SubmissionPipeline::new(
        Arc::new(store),
        Arc::new(notifier),
        routing_from(config),
    ))
}
