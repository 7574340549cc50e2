use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use super::domain::{HirePayload, RequestId};
use super::notification::{DispatchError, NotificationPayload, NotificationService, RenderError};
use super::repository::{RequestStore, StoreError};
use super::wizard::{WizardAction, WizardError, WizardState};

/// Fixed destination for staff notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRouting {
    pub recipient: String,
    pub subject: String,
}

/// Returned once all three stages have completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub request_id: RequestId,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStage {
    Persist,
    Render,
    Dispatch,
}

impl SubmissionStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Persist => "persist",
            Self::Render => "render",
            Self::Dispatch => "dispatch",
        }
    }
}

/// Failure of one pipeline stage.
///
/// `Render` and `Dispatch` happen after the record was stored, so they carry the id of
/// the record that now exists without a matching notification.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("persisting the request failed: {0}")]
    Persistence(#[from] StoreError),
    #[error("rendering the notification for request {request_id} failed: {source}")]
    Render {
        request_id: RequestId,
        #[source]
        source: RenderError,
    },
    #[error("dispatching the notification for request {request_id} failed: {source}")]
    Dispatch {
        request_id: RequestId,
        #[source]
        source: DispatchError,
    },
}

impl SubmissionError {
    pub const fn stage(&self) -> SubmissionStage {
        match self {
            Self::Persistence(_) => SubmissionStage::Persist,
            Self::Render { .. } => SubmissionStage::Render,
            Self::Dispatch { .. } => SubmissionStage::Dispatch,
        }
    }

    /// Id of the record created before the failure, if any.
    pub fn persisted_request(&self) -> Option<&RequestId> {
        match self {
            Self::Persistence(_) => None,
            Self::Render { request_id, .. } | Self::Dispatch { request_id, .. } => {
                Some(request_id)
            }
        }
    }
}

/// Persist, render, dispatch. Sequential and fail-fast, with no retry and no
/// compensation: a failure after the first stage leaves the stored record in place.
pub struct SubmissionPipeline<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
    routing: NotificationRouting,
}

impl<S, N> SubmissionPipeline<S, N>
where
    S: RequestStore + 'static,
    N: NotificationService + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, routing: NotificationRouting) -> Self {
        Self {
            store,
            notifier,
            routing,
        }
    }

    pub fn routing(&self) -> &NotificationRouting {
        &self.routing
    }

    pub async fn submit(&self, payload: HirePayload) -> Result<Confirmation, SubmissionError> {
        let form = payload.kind();

        let record = self.store.create(&payload).await.map_err(|err| {
            error!(form, stage = "persist", error = %err, "hire request was not stored");
            SubmissionError::Persistence(err)
        })?;
        info!(form, request_id = %record.id, "hire request stored");

        let summary = NotificationPayload::from(&record.payload);
        let content = self.notifier.render(&summary).map_err(|source| {
            warn!(
                form,
                request_id = %record.id,
                stage = "render",
                error = %source,
                "hire request stored but notification could not be rendered"
            );
            SubmissionError::Render {
                request_id: record.id.clone(),
                source,
            }
        })?;

        self.notifier
            .send(&content, &self.routing.recipient, &self.routing.subject)
            .await
            .map_err(|source| {
                warn!(
                    form,
                    request_id = %record.id,
                    stage = "dispatch",
                    error = %source,
                    "hire request stored but notification was not delivered"
                );
                SubmissionError::Dispatch {
                    request_id: record.id.clone(),
                    source,
                }
            })?;
        info!(form, request_id = %record.id, recipient = %self.routing.recipient, "staff notified");

        Ok(Confirmation {
            request_id: record.id,
            received_at: record.created_at,
        })
    }

    /// Drive the wizard's submit lifecycle: mark it busy, run the pipeline, and settle
    /// into `Submitted` or `Failed`. Form data is kept either way.
    pub async fn submit_wizard(&self, state: &WizardState) -> Result<WizardState, WizardError> {
        let busy = state.apply(WizardAction::SubmitRequested)?;
        let outcome = self
            .submit(HirePayload::Wizard(busy.form_data.clone()))
            .await;
        match outcome {
            Ok(_) => busy.apply(WizardAction::SubmissionSucceeded),
            Err(_) => busy.apply(WizardAction::SubmissionFailed),
        }
    }
}
