use super::store::NameStore;
use super::types::*;
use crate::config::WheelConfig;
use crate::error::StoreError;
use crate::graphql::{queries, GraphQlClient};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

/// Roster persisted by the GraphQL server under one spin list.
///
/// The server only knows append and clear-all, so `replace_names` keeps the
/// trait's clear-then-re-add default.
pub struct GraphQlNameStore {
    client: GraphQlClient,
    list_id: ListId,
}

impl GraphQlNameStore {
    pub fn new(client: GraphQlClient, list_id: ListId) -> Self {
        Self { client, list_id }
    }

    pub fn from_config(config: &WheelConfig, list_id: ListId) -> Self {
        let client =
            GraphQlClient::with_timeout(&config.graphql_endpoint, config.request_timeout());
        Self::new(client, list_id)
    }
}

#[async_trait]
impl NameStore for GraphQlNameStore {
    fn mode(&self) -> StoreMode {
        StoreMode::Remote(self.list_id.clone())
    }

    async fn fetch_names(&self) -> Result<Vec<Name>, StoreError> {
        let names: Vec<Name> = self
            .client
            .execute(queries::GET_NAMES, json!({ "spinListId": self.list_id }), "getNames")
            .await?;
        debug!("Fetched {} names for list {}", names.len(), self.list_id);
        Ok(names)
    }

    async fn add_name(&self, value: &str) -> Result<Name, StoreError> {
        self.client
            .execute(
                queries::ADD_NAME,
                json!({ "spinListId": self.list_id, "value": value }),
                "addName",
            )
            .await
    }

    async fn clear_names(&self) -> Result<(), StoreError> {
        let _: serde_json::Value = self
            .client
            .execute(queries::CLEAR_NAMES, json!({ "spinListId": self.list_id }), "clearNames")
            .await?;
        Ok(())
    }
}
