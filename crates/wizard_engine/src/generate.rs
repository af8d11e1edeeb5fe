use serde_json::Value;

use crate::{GuideRequest, RemoteError};

/// Produces the interview guide from both structured records and the raw inputs.
#[async_trait::async_trait]
pub trait GenerationAdapter: Send + Sync {
    async fn generate_guide(&self, request: &GuideRequest) -> Result<Value, RemoteError>;
}
