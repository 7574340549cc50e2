//! Request store backed by the Sanity content backend's HTTP API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::domain::{DriverHireRequest, HirePayload, QuickHireRequest, RequestId, RequestRecord};
use super::repository::{RequestStore, StoreError};
use crate::config::SanityConfig;

const QUICK_DOCUMENT_TYPE: &str = "driverRequest";
const WIZARD_DOCUMENT_TYPE: &str = "driverHireRequest";

#[derive(Clone, Debug)]
pub struct SanityRequestStore {
    client: reqwest::Client,
    config: SanityConfig,
}

impl SanityRequestStore {
    pub fn new(config: SanityConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn api_base(&self) -> String {
        format!(
            "https://{}.api.sanity.io/v{}/data",
            self.config.project_id, self.config.api_version
        )
    }

    pub(crate) fn mutate_url(&self) -> String {
        format!(
            "{}/mutate/{}?returnIds=true",
            self.api_base(),
            self.config.dataset
        )
    }

    pub(crate) fn document_url(&self, id: &RequestId) -> String {
        format!("{}/doc/{}/{}", self.api_base(), self.config.dataset, id.0)
    }
}

#[derive(Debug, Deserialize)]
struct MutateResponse {
    #[serde(default)]
    results: Vec<MutationResult>,
}

#[derive(Debug, Deserialize)]
struct MutationResult {
    id: String,
}

#[derive(Debug, Deserialize)]
struct DocumentResponse {
    #[serde(default)]
    documents: Vec<Value>,
}

#[async_trait]
impl RequestStore for SanityRequestStore {
    async fn create(&self, payload: &HirePayload) -> Result<RequestRecord, StoreError> {
        let document = document_for(payload)?;
        let response = self
            .client
            .post(self.mutate_url())
            .bearer_auth(self.config.token.expose())
            .json(&json!({ "mutations": [{ "create": document }] }))
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        let response = check_status(response).await?;
        let body: MutateResponse = response
            .json()
            .await
            .map_err(|err| StoreError::Malformed(err.to_string()))?;
        let id = body
            .results
            .into_iter()
            .next()
            .map(|result| RequestId(result.id))
            .ok_or_else(|| StoreError::Malformed("mutation returned no document id".to_string()))?;

        debug!(request_id = %id, "sanity document created");
        Ok(RequestRecord {
            id,
            created_at: Utc::now(),
            payload: payload.clone(),
        })
    }

    async fn fetch(&self, id: &RequestId) -> Result<Option<RequestRecord>, StoreError> {
        let response = self
            .client
            .get(self.document_url(id))
            .bearer_auth(self.config.token.expose())
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response).await?;
        let body: DocumentResponse = response
            .json()
            .await
            .map_err(|err| StoreError::Malformed(err.to_string()))?;

        body.documents
            .into_iter()
            .next()
            .map(record_from_document)
            .transpose()
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    if status.is_client_error() {
        Err(StoreError::Rejected(format!("{status}: {body}")))
    } else {
        Err(StoreError::Unavailable(format!("{status}: {body}")))
    }
}

/// Mutation document for a payload: the payload's own fields plus `_type`.
pub(crate) fn document_for(payload: &HirePayload) -> Result<Value, StoreError> {
    let (document_type, fields) = match payload {
        HirePayload::Wizard(request) => (WIZARD_DOCUMENT_TYPE, serde_json::to_value(request)),
        HirePayload::Quick(request) => (QUICK_DOCUMENT_TYPE, serde_json::to_value(request)),
    };
    let mut fields = fields.map_err(|err| StoreError::Rejected(err.to_string()))?;
    match fields.as_object_mut() {
        Some(map) => {
            map.insert("_type".to_string(), Value::String(document_type.to_string()));
        }
        None => return Err(StoreError::Rejected("payload is not an object".to_string())),
    }
    Ok(fields)
}

pub(crate) fn record_from_document(document: Value) -> Result<RequestRecord, StoreError> {
    let id = document
        .get("_id")
        .and_then(Value::as_str)
        .map(|id| RequestId(id.to_string()))
        .ok_or_else(|| StoreError::Malformed("document has no _id".to_string()))?;
    let created_at = document
        .get("_createdAt")
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| StoreError::Malformed(format!("document {id} has no _createdAt")))?;
    let document_type = document
        .get("_type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let payload = match document_type.as_str() {
        WIZARD_DOCUMENT_TYPE => serde_json::from_value::<DriverHireRequest>(document)
            .map(HirePayload::Wizard),
        QUICK_DOCUMENT_TYPE => {
            serde_json::from_value::<QuickHireRequest>(document).map(HirePayload::Quick)
        }
        other => {
            return Err(StoreError::Malformed(format!(
                "document {id} has unexpected type '{other}'"
            )))
        }
    }
    .map_err(|err| StoreError::Malformed(err.to_string()))?;

    Ok(RequestRecord {
        id,
        created_at,
        payload,
    })
}
