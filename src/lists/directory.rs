use super::types::*;
use crate::error::ControllerError;
use crate::graphql::{queries, GraphQlClient};
use serde_json::json;
use tracing::info;

/// Browses and creates the persisted wheels a controller can be opened on.
pub struct SpinListDirectory {
    client: GraphQlClient,
}

impl SpinListDirectory {
    pub fn new(client: GraphQlClient) -> Self {
        Self { client }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ControllerError> {
        Ok(self.client.execute(queries::GET_USERS, json!({}), "getUsers").await?)
    }

    pub async fn list_spin_lists(&self) -> Result<Vec<SpinList>, ControllerError> {
        Ok(self
            .client
            .execute(queries::GET_SPIN_LISTS, json!({}), "getSpinLists")
            .await?)
    }

    pub async fn create_user(&self, username: &str) -> Result<User, ControllerError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ControllerError::validation("Username is required"));
        }

        let user: User = self
            .client
            .execute(queries::CREATE_USER, json!({ "username": username }), "createUser")
            .await?;
        info!("Created user {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn create_spin_list(
        &self,
        user_id: &str,
        title: &str,
    ) -> Result<SpinList, ControllerError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ControllerError::validation("Please select a user"));
        }
        let title = title.trim();
        if title.is_empty() {
            return Err(ControllerError::validation("Title is required"));
        }

        let list: SpinList = self
            .client
            .execute(
                queries::CREATE_SPIN_LIST,
                json!({ "userId": user_id, "title": title }),
                "createSpinList",
            )
            .await?;
        info!("Created spin list {:?} ({})", list.title, list.id);
        Ok(list)
    }
}
