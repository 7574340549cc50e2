use async_trait::async_trait;

use super::domain::{HirePayload, RequestId, RequestRecord};

/// Durable persistence for submitted requests.
///
/// `create` stores a verbatim copy of the payload and assigns the id and creation time.
/// Records are never updated or deleted by the intake workflow.
#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn create(&self, payload: &HirePayload) -> Result<RequestRecord, StoreError>;
    async fn fetch(&self, id: &RequestId) -> Result<Option<RequestRecord>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request store unavailable: {0}")]
    Unavailable(String),
    #[error("request store rejected the record: {0}")]
    Rejected(String),
    #[error("request store returned an unexpected response: {0}")]
    Malformed(String),
}
