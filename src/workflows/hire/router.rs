use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::domain::{DriverHireRequest, HirePayload, QuickHireRequest};
use super::notification::NotificationService;
use super::pipeline::SubmissionPipeline;
use super::repository::RequestStore;

pub const SUBMITTED_MESSAGE: &str = "Request submitted";
pub const FAILED_MESSAGE: &str = "Something went wrong";
pub const INVALID_PAYLOAD_MESSAGE: &str = "Invalid request payload";

/// Body returned by both submission endpoints. Failure causes stay server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
}

impl SubmissionResponse {
    fn new(success: bool, message: &str) -> Self {
        Self {
            success,
            message: message.to_string(),
        }
    }
}

/// Router builder exposing the quick form and wizard submission endpoints.
pub fn hire_router<S, N>(pipeline: Arc<SubmissionPipeline<S, N>>) -> Router
where
    S: RequestStore + 'static,
    N: NotificationService + 'static,
{
    Router::new()
        .route("/api/hire", post(quick_submit_handler::<S, N>))
        .route("/api/v1/hire/requests", post(wizard_submit_handler::<S, N>))
        .with_state(pipeline)
}

pub(crate) async fn quick_submit_handler<S, N>(
    State(pipeline): State<Arc<SubmissionPipeline<S, N>>>,
    payload: Result<Json<QuickHireRequest>, JsonRejection>,
) -> Response
where
    S: RequestStore + 'static,
    N: NotificationService + 'static,
{
    match payload {
        Ok(Json(request)) => submit(&pipeline, HirePayload::Quick(request)).await,
        Err(rejection) => invalid_payload(rejection),
    }
}

pub(crate) async fn wizard_submit_handler<S, N>(
    State(pipeline): State<Arc<SubmissionPipeline<S, N>>>,
    payload: Result<Json<DriverHireRequest>, JsonRejection>,
) -> Response
where
    S: RequestStore + 'static,
    N: NotificationService + 'static,
{
    match payload {
        Ok(Json(request)) => submit(&pipeline, HirePayload::Wizard(request)).await,
        Err(rejection) => invalid_payload(rejection),
    }
}

async fn submit<S, N>(pipeline: &SubmissionPipeline<S, N>, payload: HirePayload) -> Response
where
    S: RequestStore + 'static,
    N: NotificationService + 'static,
{
    match pipeline.submit(payload).await {
        Ok(_) => (
            StatusCode::OK,
            Json(SubmissionResponse::new(true, SUBMITTED_MESSAGE)),
        )
            .into_response(),
        Err(err) => {
            error!(
                stage = err.stage().as_str(),
                orphaned_request = ?err.persisted_request(),
                error = %err,
                "hire API error"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SubmissionResponse::new(false, FAILED_MESSAGE)),
            )
                .into_response()
        }
    }
}

fn invalid_payload(rejection: JsonRejection) -> Response {
    warn!(error = %rejection.body_text(), "rejected hire request body");
    (
        StatusCode::BAD_REQUEST,
        Json(SubmissionResponse::new(false, INVALID_PAYLOAD_MESSAGE)),
    )
        .into_response()
}
