use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/interview-v2";

#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Prefix for the three endpoints, without a trailing slash.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Applies to each remote call on its own.
    pub request_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(180),
        }
    }
}

impl EngineSettings {
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
