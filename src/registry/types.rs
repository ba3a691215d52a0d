use serde::{Deserialize, Serialize};

/// A package as reported by the registry search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSummary {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PackageSummary {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            description: None,
        }
    }
}

/// Body of `GET /-/v1/search`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub objects: Vec<SearchObject>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchObject {
    pub package: PackageSummary,
}
