use anyhow::{Context, Result};
use internal::{
    domain::{envelope::Envelope, error::SendError},
    port::collector::CollectorDrivenPort,
};
use reqwest::{Client, Request, header::CONTENT_TYPE};

use crate::config::collector_config::CollectorConfig;

pub struct HttpCollector {
    client: Client,
    url: String,
    token: String,
}

impl HttpCollector {
    pub fn new(collector_config: &CollectorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(collector_config.request_timeout())
            .build()
            .context("Unable to build HTTP client")?;
        Ok(HttpCollector {
            client,
            url: collector_config.url.clone(),
            token: collector_config.token.clone(),
        })
    }

    fn request(&self, envelope: &Envelope) -> Result<Request, SendError> {
        self.client
            .post(&self.url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
            .body(envelope.to_json()?)
            .build()
            .map_err(|e| SendError::Transport(e.to_string()))
    }
}

impl CollectorDrivenPort for HttpCollector {
    async fn send(&self, envelope: Envelope) -> Result<(), SendError> {
        let request = self.request(&envelope)?;
        let response = self.client.execute(request).await.map_err(|e| {
            if e.is_timeout() {
                SendError::Timeout
            } else {
                SendError::Transport(e.to_string())
            }
        })?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SendError::Status(status.as_u16()))
        }
    }
}
