use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlErrorEntry {
    pub message: String,
}
