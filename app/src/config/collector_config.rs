use std::time::Duration;

use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct CollectorConfig {
    pub url: String,
    pub token: String,
    pub tank_name: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl CollectorConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

// keeps the bearer token out of logs
impl std::fmt::Debug for CollectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectorConfig")
            .field("url", &self.url)
            .field("token", &"***")
            .field("tank_name", &self.tank_name)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

fn default_request_timeout_ms() -> u64 {
    10_000
}
