use std::time::Duration;

pub const DEFAULT_ERROR_TTL_MS: u64 = 4_000;

#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// How long an error banner stays up. `None` keeps it until replaced or cleared.
    pub error_ttl: Option<Duration>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            error_ttl: Some(Duration::from_millis(DEFAULT_ERROR_TTL_MS)),
        }
    }
}

impl ViewConfig {
    /// `0` disables auto-dismiss.
    pub fn with_error_ttl_ms(ms: u64) -> Self {
        Self {
            error_ttl: (ms > 0).then(|| Duration::from_millis(ms)),
        }
    }
}
