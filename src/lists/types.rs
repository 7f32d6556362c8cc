use crate::roster::ListId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpinList {
    pub id: String,
    pub title: String,
    pub user: User,
}

impl SpinList {
    pub fn list_id(&self) -> ListId {
        ListId(self.id.clone())
    }
}
