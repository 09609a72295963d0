//! Configuration
//!
//! Loads connection settings and credentials from JSON files and environment
//! variables into a nested key/value tree addressed with dotted keys
//! (`wordpress.url`). Environment variables use the `WP_CONNECT_` prefix:
//! `WP_CONNECT_WORDPRESS_URL` becomes `wordpress.url`.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::WpError;

/// Default prefix for environment-variable loading.
pub const DEFAULT_ENV_PREFIX: &str = "WP_CONNECT_";

/// Nested configuration store with dotted-key access.
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: Map<String, Value>,
}

impl ConfigManager {
    /// Create an empty configuration store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated from the process environment using the
    /// default prefix.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        config.load_from_env(DEFAULT_ENV_PREFIX);
        config
    }

    /// Merge a JSON configuration file into the store.
    ///
    /// Top-level keys from the file replace existing ones. A missing or
    /// malformed file is an error; configuration problems are fatal to the
    /// construction path rather than logged and ignored.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), WpError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let parsed: Value = serde_json::from_str(&raw)
            .map_err(|e| WpError::Config(format!("{}: {e}", path.display())))?;
        let Value::Object(object) = parsed else {
            return Err(WpError::Config(format!(
                "{}: top-level value must be a JSON object",
                path.display()
            )));
        };
        self.values.extend(object);
        tracing::info!(path = %path.display(), "loaded configuration file");
        Ok(())
    }

    /// Merge environment variables starting with `prefix` into the store.
    ///
    /// `PREFIX_WORDPRESS_URL` becomes the nested key `wordpress.url`; all
    /// values are stored as strings.
    pub fn load_from_env(&mut self, prefix: &str) {
        self.absorb_env(std::env::vars(), prefix);
        tracing::info!(prefix, "loaded configuration from environment");
    }

    /// Look up a value by dotted key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut current: &Value = self.values.get(key.split('.').next()?)?;
        for part in key.split('.').skip(1) {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Look up a string value by dotted key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Set a value by dotted key, creating intermediate objects as needed.
    /// An intermediate non-object value is replaced by an object.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let mut parts = key.split('.').peekable();
        let mut current = &mut self.values;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                current.insert(part.to_string(), value.into());
                return;
            }
            let entry = current
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = entry.as_object_mut().expect("just ensured object");
        }
    }

    /// Write the store to a JSON file, creating parent directories.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), WpError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let rendered = serde_json::to_string_pretty(&Value::Object(self.values.clone()))
            .map_err(|e| WpError::Config(e.to_string()))?;
        fs::write(path, rendered)?;
        tracing::info!(path = %path.display(), "saved configuration file");
        Ok(())
    }

    fn absorb_env<I>(&mut self, vars: I, prefix: &str)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            if let Some(rest) = name.strip_prefix(prefix) {
                let key = rest.to_lowercase().replace('_', ".");
                self.set(&key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn env_vars_become_nested_keys() {
        let mut config = ConfigManager::new();
        config.absorb_env(
            [
                ("WP_CONNECT_WORDPRESS_URL".to_string(), "https://blog.example/wp-json".to_string()),
                ("WP_CONNECT_WORDPRESS_USERNAME".to_string(), "admin".to_string()),
                ("UNRELATED".to_string(), "ignored".to_string()),
            ],
            DEFAULT_ENV_PREFIX,
        );

        assert_eq!(config.get_str("wordpress.url"), Some("https://blog.example/wp-json"));
        assert_eq!(config.get_str("wordpress.username"), Some("admin"));
        assert_eq!(config.get("unrelated"), None);
    }

    #[test]
    fn set_and_get_dotted_keys() {
        let mut config = ConfigManager::new();
        config.set("wordpress.url", "https://blog.example/wp-json");
        config.set("wordpress.timeout", 30);

        assert_eq!(config.get_str("wordpress.url"), Some("https://blog.example/wp-json"));
        assert_eq!(config.get("wordpress.timeout"), Some(&json!(30)));
        assert_eq!(config.get("wordpress.missing"), None);
        assert_eq!(config.get("other.url"), None);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");

        let mut config = ConfigManager::new();
        config.set("wordpress.url", "https://blog.example/wp-json");
        config.save_to_file(&path).unwrap();

        let mut loaded = ConfigManager::new();
        loaded.load_from_file(&path).unwrap();
        assert_eq!(loaded.get_str("wordpress.url"), Some("https://blog.example/wp-json"));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let mut config = ConfigManager::new();
        assert!(matches!(
            config.load_from_file(&path),
            Err(WpError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut config = ConfigManager::new();
        assert!(matches!(
            config.load_from_file("/nonexistent/config.json"),
            Err(WpError::Io(_))
        ));
    }
}
