use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub code: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    #[serde(rename = "type")]
    pub label: String,
    #[serde(rename = "codes")]
    pub records: Vec<StatusRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub revision: u64,
    #[serde(rename = "code_types")]
    pub groups: Vec<CategoryGroup>,
}

impl Catalog {
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|group| group.records.len()).sum()
    }
}

/// At-rest wrapper written by the cache codec.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEnvelope {
    pub format: String,
    pub format_version: u32,
    pub catalog_sha256: String,
    pub catalog: Catalog,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheFileInfo {
    pub path: String,
    pub exists: bool,
    pub size_bytes: Option<u64>,
    pub modified_at: Option<String>,
}
