use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Run tag echoed back on every completion so the caller can drop stale ones.
pub type RunId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ResumeParsed {
        run: RunId,
        result: Result<Value, RemoteError>,
    },
    JobDescriptionParsed {
        run: RunId,
        result: Result<Value, RemoteError>,
    },
    GuideGenerated {
        run: RunId,
        result: Result<Value, RemoteError>,
    },
}

impl EngineEvent {
    pub fn run(&self) -> RunId {
        match self {
            EngineEvent::ResumeParsed { run, .. }
            | EngineEvent::JobDescriptionParsed { run, .. }
            | EngineEvent::GuideGenerated { run, .. } => *run,
        }
    }
}

/// Body of `POST /parse-resume`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeParseRequest {
    pub resume_text: String,
}

/// Body of `POST /parse-jd`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDescriptionParseRequest {
    pub job_description_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Body of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideRequest {
    pub resume_structured: Value,
    pub jd_structured: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub job_description: String,
    pub raw_resume_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub kind: FailureKind,
    pub message: String,
}

impl RemoteError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for RemoteError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    HttpStatus(u16),
    Timeout,
    Network,
    /// 2xx response whose body is not JSON.
    InvalidBody,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::InvalidBody => write!(f, "invalid response body"),
        }
    }
}
