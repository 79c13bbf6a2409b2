//! HTTP/JSON client for the standalone second-brain-service.

use second_brain_types::*;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Second brain service unavailable: {0}")]
    Unavailable(String),
    #[error("Second brain service returned {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("Invalid response from second brain service: {0}")]
    InvalidResponse(String),
}

pub struct SecondBrainClient {
    base_url: String,
    client: reqwest::Client,
}

impl SecondBrainClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn default_local() -> Self {
        Self::new("http://127.0.0.1:9103")
    }

    pub async fn list_memories(&self) -> Result<Vec<Memory>, ClientError> {
        let url = format!("{}/api/memories", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Unavailable(e.to_string()))?;
        let body: ListMemoriesResponse = read_json(response).await?;
        Ok(body.memories)
    }

    pub async fn create_memory(&self, draft: &MemoryDraft) -> Result<Memory, ClientError> {
        let url = format!("{}/api/memories", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(|e| ClientError::Unavailable(e.to_string()))?;
        let body: CreateMemoryResponse = read_json(response).await?;
        Ok(body.memory)
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        return Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}
