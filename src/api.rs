use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::AttemptError;
use crate::models::VideoInfo;

/// Remote metadata lookup for a video URL.
#[async_trait]
pub trait InfoApi: Send + Sync {
    async fn get_info(&self, url: &str) -> Result<VideoInfo, AttemptError>;
}

#[derive(Serialize)]
struct InfoRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub struct HttpInfoApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpInfoApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vidl-gui/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/get-info", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl InfoApi for HttpInfoApi {
    async fn get_info(&self, url: &str) -> Result<VideoInfo, AttemptError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&InfoRequest { url })
            .send()
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        decode_response(status.as_u16(), status.is_success(), &body)
    }
}

fn decode_response(status: u16, success: bool, body: &[u8]) -> Result<VideoInfo, AttemptError> {
    if !success {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error);
        return Err(AttemptError::Server { status, message });
    }
    serde_json::from_slice(body).map_err(|e| AttemptError::Decode(e.to_string()))
}
