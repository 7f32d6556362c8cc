use super::remote::GraphQlNameStore;
use super::types::*;
use crate::config::WheelConfig;
use crate::error::StoreError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

#[async_trait]
pub trait NameStore: Send + Sync {
    fn mode(&self) -> StoreMode;
    async fn fetch_names(&self) -> Result<Vec<Name>, StoreError>;
    async fn add_name(&self, value: &str) -> Result<Name, StoreError>;
    async fn clear_names(&self) -> Result<(), StoreError>;

    /// Replaces the whole roster with `names`, in order.
    ///
    /// The default clears and re-adds each value. It is not atomic: a failure
    /// part way leaves the names re-added so far. Stores that can swap the
    /// roster in one step should override it.
    async fn replace_names(&self, names: &[Name]) -> Result<(), StoreError> {
        self.clear_names().await?;
        for name in names {
            self.add_name(&name.value).await?;
        }
        Ok(())
    }
}

/// Session-only roster; nothing survives the process.
pub struct EphemeralNameStore {
    names: Arc<RwLock<Vec<Name>>>,
}

impl EphemeralNameStore {
    pub fn new() -> Self {
        Self {
            names: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for EphemeralNameStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NameStore for EphemeralNameStore {
    fn mode(&self) -> StoreMode {
        StoreMode::Ephemeral
    }

    async fn fetch_names(&self) -> Result<Vec<Name>, StoreError> {
        Ok(self.names.read().await.clone())
    }

    async fn add_name(&self, value: &str) -> Result<Name, StoreError> {
        let name = Name::new(Uuid::new_v4().to_string(), value);
        self.names.write().await.push(name.clone());
        Ok(name)
    }

    async fn clear_names(&self) -> Result<(), StoreError> {
        self.names.write().await.clear();
        Ok(())
    }

    async fn replace_names(&self, names: &[Name]) -> Result<(), StoreError> {
        *self.names.write().await = names.to_vec();
        Ok(())
    }
}

pub fn create_name_store(config: &WheelConfig) -> Arc<dyn NameStore> {
    match &config.list_id {
        Some(list_id) => {
            info!("Using GraphQL roster for list {} at {}", list_id, config.graphql_endpoint);
            Arc::new(GraphQlNameStore::from_config(config, ListId(list_id.clone())))
        }
        None => {
            info!("No list id supplied, using an in-memory roster");
            Arc::new(EphemeralNameStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ephemeral_add_assigns_unique_ids() {
        let store = EphemeralNameStore::new();
        let a = store.add_name("Ada").await.unwrap();
        let b = store.add_name("Ada").await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.fetch_names().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_ephemeral_replace_keeps_ids() {
        let store = EphemeralNameStore::new();
        let a = store.add_name("A").await.unwrap();
        let b = store.add_name("B").await.unwrap();

        store.replace_names(&[b.clone(), a.clone()]).await.unwrap();

        assert_eq!(store.fetch_names().await.unwrap(), vec![b, a]);
    }

    #[tokio::test]
    async fn test_ephemeral_clear() {
        let store = EphemeralNameStore::new();
        store.add_name("X").await.unwrap();
        store.clear_names().await.unwrap();

        assert!(store.fetch_names().await.unwrap().is_empty());
    }

    #[test]
    fn test_factory_selects_mode_from_list_id() {
        let ephemeral = create_name_store(&WheelConfig::default());
        assert_eq!(ephemeral.mode(), StoreMode::Ephemeral);

        let config = WheelConfig {
            list_id: Some("list-7".to_string()),
            ..WheelConfig::default()
        };
        let remote = create_name_store(&config);
        assert_eq!(remote.mode(), StoreMode::Remote(ListId::from("list-7")));
    }
}
