use serde::{Deserialize, Serialize};
use crate::models::{ApiId, ApiInfo, Test};

#[derive(Debug, Deserialize)]
pub struct RegisterApiRequest {
    pub id: ApiId,
    pub name: String,
    pub namespace: Option<String>,
    pub port: u16,
}

impl From<RegisterApiRequest> for ApiInfo {
    fn from(req: RegisterApiRequest) -> Self {
        ApiInfo {
            id: req.id,
            name: req.name,
            namespace: req.namespace.filter(|ns| !ns.is_empty()),
            port: req.port,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartTestResponse {
    #[serde(rename = "apiID")]
    pub api_id: ApiId,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TestListResponse {
    pub items: Vec<Test>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
