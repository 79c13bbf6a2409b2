//! Hosted `memories` table accessed through its PostgREST endpoint
//! (`{SUPABASE_URL}/rest/v1/{table}`), authenticated with the service key.

use super::MemoryTable;
use crate::config::Config;
use async_trait::async_trait;
use second_brain_types::{MEMORY_COLUMNS, Memory, NewMemory};
use serde::de::DeserializeOwned;

pub struct PostgrestTable {
    endpoint: String,
    service_key: String,
    client: reqwest::Client,
}

impl PostgrestTable {
    pub fn new(base_url: &str, table: &str, service_key: &str) -> Self {
        Self {
            endpoint: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table),
            service_key: service_key.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.supabase_url,
            &config.table,
            &config.supabase_service_key,
        )
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }
}

#[async_trait]
impl MemoryTable for PostgrestTable {
    async fn select_recent(&self, limit: usize) -> Result<Vec<Memory>, String> {
        let limit = limit.to_string();
        let response = self
            .authorized(self.client.get(&self.endpoint))
            .query(&[
                ("select", MEMORY_COLUMNS),
                ("order", "created_at.desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| format!("PostgREST request failed: {}", e))?;

        read_json(response).await
    }

    async fn insert_row(&self, row: &NewMemory) -> Result<Memory, String> {
        let response = self
            .authorized(self.client.post(&self.endpoint))
            .query(&[("select", MEMORY_COLUMNS)])
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(|e| format!("PostgREST request failed: {}", e))?;

        let rows: Vec<Memory> = read_json(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| "PostgREST insert returned no rows".to_string())
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| format!("Failed to read PostgREST response: {}", e))?;

    if !status.is_success() {
        return Err(format!("PostgREST error ({}): {}", status, body));
    }

    serde_json::from_str(&body).map_err(|e| format!("Failed to parse PostgREST response: {}", e))
}
