use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use wizard_logging::{wizard_debug, wizard_warn};

use crate::{
    EngineSettings, FailureKind, GenerationAdapter, GuideRequest, JobDescriptionParseRequest,
    ParsingAdapter, RemoteError, ResumeParseRequest,
};

pub const PARSE_RESUME_PATH: &str = "/parse-resume";
pub const PARSE_JOB_DESCRIPTION_PATH: &str = "/parse-jd";
pub const GENERATE_PATH: &str = "/generate";

/// HTTP client for the interview prep service. Implements both adapters.
#[derive(Debug, Clone)]
pub struct ReqwestPrepClient {
    settings: EngineSettings,
    client: reqwest::Client,
}

impl ReqwestPrepClient {
    pub fn new(settings: EngineSettings) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RemoteError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, RemoteError> {
        let url = self.settings.endpoint(path);
        let payload = serde_json::to_vec(body)
            .map_err(|err| RemoteError::new(FailureKind::InvalidBody, err.to_string()))?;
        wizard_debug!("POST {} ({} bytes)", url, payload.len());

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let message = error_message(status, &text);
            wizard_warn!("POST {} returned {}: {}", url, status, message);
            return Err(RemoteError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        serde_json::from_str(&text).map_err(|err| {
            RemoteError::new(
                FailureKind::InvalidBody,
                format!("response is not valid JSON: {err}"),
            )
        })
    }
}

#[async_trait::async_trait]
impl ParsingAdapter for ReqwestPrepClient {
    async fn parse_resume(&self, resume_text: &str) -> Result<Value, RemoteError> {
        let body = ResumeParseRequest {
            resume_text: resume_text.to_string(),
        };
        self.post_json(PARSE_RESUME_PATH, &body).await
    }

    async fn parse_job_description(
        &self,
        description: &str,
        company_name: Option<&str>,
    ) -> Result<Value, RemoteError> {
        let body = JobDescriptionParseRequest {
            job_description_text: description.to_string(),
            company_name: company_name.map(str::to_string),
        };
        self.post_json(PARSE_JOB_DESCRIPTION_PATH, &body).await
    }
}

#[async_trait::async_trait]
impl GenerationAdapter for ReqwestPrepClient {
    async fn generate_guide(&self, request: &GuideRequest) -> Result<Value, RemoteError> {
        self.post_json(GENERATE_PATH, request).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        return RemoteError::new(FailureKind::Timeout, "request timed out");
    }
    RemoteError::new(FailureKind::Network, err.to_string())
}

/// Best human-readable message from an error response.
///
/// Looks for `detail` (FastAPI) or `message`, then falls back to the raw body
/// and finally to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "message"] {
            match value.get(key) {
                Some(Value::String(text)) if !text.trim().is_empty() => {
                    return text.trim().to_string()
                }
                Some(Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}
