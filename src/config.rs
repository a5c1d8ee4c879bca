//! Plugin settings persisted in document-session storage.

use anyhow::{anyhow, Result};
use icon_document::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage key for the persisted settings.
pub const SETTINGS_KEY: &str = "plugin-settings";

fn default_model() -> String {
    "gpt-4o".to_string()
}

/// User-configurable settings for the labeling tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSettings {
    /// API key for the model endpoint.
    #[serde(default)]
    pub api_key: String,

    /// Model identifier requested from the endpoint.
    #[serde(default = "default_model")]
    pub model: String,

    /// Optional override of the default system message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,

    /// Optional override of the default user prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_prompt: Option<String>,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            system_message: None,
            user_prompt: None,
        }
    }
}

impl PluginSettings {
    /// Load settings from storage; absent or corrupt values degrade to the
    /// defaults with a warning rather than failing the caller.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(err) => {
                warn!(error = %err, "failed to read settings, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %err, "failed to decode settings, using defaults");
                Self::default()
            }
        }
    }

    /// Persist these settings.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(self)
            .map_err(|e| anyhow!("Failed to serialize settings: {}", e))?;
        store.set(SETTINGS_KEY, &json)
    }

    /// Whether an API key has been configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icon_document::MemoryKeyValueStore;

    #[test]
    fn test_round_trip() {
        let store = MemoryKeyValueStore::new();
        let settings = PluginSettings {
            api_key: "sk-test".to_string(),
            model: "gpt-4o".to_string(),
            system_message: Some("be terse".to_string()),
            user_prompt: None,
        };
        settings.save(&store).unwrap();
        assert_eq!(PluginSettings::load(&store), settings);
    }

    #[test]
    fn test_absent_settings_default() {
        let store = MemoryKeyValueStore::new();
        let settings = PluginSettings::load(&store);
        assert_eq!(settings, PluginSettings::default());
        assert!(!settings.has_api_key());
        assert_eq!(settings.model, "gpt-4o");
    }

    #[test]
    fn test_corrupt_settings_degrade_to_default() {
        let store = MemoryKeyValueStore::new();
        store.set(SETTINGS_KEY, "{not json").unwrap();
        assert_eq!(PluginSettings::load(&store), PluginSettings::default());
    }
}
