use serde::{Deserialize, Serialize};

/// Configuration from taskflow.toml. Every field has a default, so an
/// absent file behaves like an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store filename, relative to the data directory
    #[serde(default = "default_store_file")]
    pub file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            file: default_store_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Endpoint returning `[{title, completed}, ...]` records
    #[serde(default = "default_sync_url")]
    pub url: String,
    /// How many records to request per sync
    #[serde(default = "default_sync_limit")]
    pub limit: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            url: default_sync_url(),
            limit: default_sync_limit(),
        }
    }
}

fn default_store_file() -> String {
    "taskflow.json".to_string()
}

fn default_sync_url() -> String {
    "https://jsonplaceholder.typicode.com/todos".to_string()
}

fn default_sync_limit() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.store.file, "taskflow.json");
        assert_eq!(config.sync.url, "https://jsonplaceholder.typicode.com/todos");
        assert_eq!(config.sync.limit, 5);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[sync]
limit = 20
"#,
        )
        .unwrap();
        assert_eq!(config.sync.limit, 20);
        assert_eq!(config.sync.url, "https://jsonplaceholder.typicode.com/todos");
        assert_eq!(config.store.file, "taskflow.json");
    }

    #[test]
    fn test_full_override() {
        let config: Config = toml::from_str(
            r#"
[store]
file = "todos.json"

[sync]
url = "http://localhost:9000/todos"
limit = 3
"#,
        )
        .unwrap();
        assert_eq!(config.store.file, "todos.json");
        assert_eq!(config.sync.url, "http://localhost:9000/todos");
        assert_eq!(config.sync.limit, 3);
    }
}
