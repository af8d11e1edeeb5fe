use serde_json::Value;

use crate::RemoteError;

/// Turns raw résumé and job description text into structured records.
///
/// Implementations make exactly one attempt per call; retrying is the
/// caller's decision.
#[async_trait::async_trait]
pub trait ParsingAdapter: Send + Sync {
    async fn parse_resume(&self, resume_text: &str) -> Result<Value, RemoteError>;

    async fn parse_job_description(
        &self,
        description: &str,
        company_name: Option<&str>,
    ) -> Result<Value, RemoteError>;
}
