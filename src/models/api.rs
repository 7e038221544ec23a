use serde::{Deserialize, Serialize};
use super::test::Test;

pub type ApiId = u32;

/// Inventory record for a discovered API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub id: ApiId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub port: u16,
}

impl ApiInfo {
    /// Address the job runner fuzzes: `http://name[.namespace]:port`.
    pub fn target_uri(&self) -> String {
        match self.namespace.as_deref().filter(|ns| !ns.is_empty()) {
            Some(ns) => format!("http://{}.{}:{}", self.name, ns, self.port),
            None => format!("http://{}:{}", self.name, self.port),
        }
    }
}

/// An API together with its fuzzing history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Api {
    #[serde(flatten)]
    pub info: ApiInfo,
    pub in_fuzzing: bool,
    pub tests: Vec<Test>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(namespace: Option<&str>) -> ApiInfo {
        ApiInfo {
            id: 1,
            name: "catalogue".into(),
            namespace: namespace.map(String::from),
            port: 8080,
        }
    }

    #[test]
    fn test_target_uri_without_namespace() {
        assert_eq!(info(None).target_uri(), "http://catalogue:8080");
    }

    #[test]
    fn test_target_uri_with_namespace() {
        assert_eq!(info(Some("sock-shop")).target_uri(), "http://catalogue.sock-shop:8080");
    }

    #[test]
    fn test_target_uri_ignores_empty_namespace() {
        assert_eq!(info(Some("")).target_uri(), "http://catalogue:8080");
    }

    #[test]
    fn test_api_flattens_info() {
        let api = Api { info: info(None), in_fuzzing: true, tests: vec![] };
        let value = serde_json::to_value(&api).unwrap();
        assert_eq!(value["name"], "catalogue");
        assert_eq!(value["inFuzzing"], true);
    }
}
