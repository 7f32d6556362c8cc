use super::types::*;
use crate::error::StoreError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Thin POST-JSON GraphQL transport shared by the roster store and the
/// spin-list directory.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
}

impl GraphQlClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Runs `query` and decodes `data.<field>` into `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
        field: &str,
    ) -> Result<T, StoreError> {
        let request = GraphQlRequest { query, variables };

        debug!("POST {} field={}", self.endpoint, field);
        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(StoreError::Status(response.status().as_u16()));
        }

        let body = response
            .json::<GraphQlResponse>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        if !body.errors.is_empty() {
            return Err(StoreError::GraphQl(
                body.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        let mut data = body
            .data
            .ok_or_else(|| StoreError::MissingData("data".to_string()))?;
        let value = data
            .get_mut(field)
            .map(serde_json::Value::take)
            .ok_or_else(|| StoreError::MissingData(field.to_string()))?;

        serde_json::from_value(value).map_err(|e| StoreError::Decode(e.to_string()))
    }
}
