use crate::errors::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TASKS_PATH: &str = "/api/tasks";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme, host and optional path prefix of the backend.
    pub base_url: String,
    /// Path of the collection endpoint, appended to `base_url`.
    pub tasks_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tasks_path: DEFAULT_TASKS_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ClientError::InvalidConfig(format!(
                "base url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if !self.tasks_path.starts_with('/') {
            return Err(ClientError::InvalidConfig(format!(
                "tasks path must start with '/', got '{}'",
                self.tasks_path
            )));
        }
        Ok(())
    }

    /// `base_url` without trailing slashes.
    pub(crate) fn base(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}
