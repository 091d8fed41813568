//! Tap configuration, read from the JSON file passed with `--config`.

use crate::error::{Result, TapError};
use crate::transform::RelationListPolicy;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Contents of `config.json`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TapConfig {
    /// Base URL of the metadata endpoint; the base id is appended
    pub metadata_url: String,

    /// Base URL of the records endpoint; `{base_id}/{table}` is appended
    pub records_url: String,

    /// Personal access token sent as a bearer token
    pub token: String,

    pub base_id: String,

    /// Whether discovered streams start out selected
    pub selected_by_default: bool,

    #[serde(default)]
    pub remove_emojis: bool,

    #[serde(default)]
    pub relation_list_policy: RelationListPolicy,
}

impl TapConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: TapConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("metadata_url", &self.metadata_url),
            ("records_url", &self.records_url),
            ("token", &self.token),
            ("base_id", &self.base_id),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(TapError::Config(format!("'{}' must not be empty", key)));
            }
        }
        Ok(())
    }

    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings {
            base_id: self.base_id.clone(),
            remove_emojis: self.remove_emojis,
            relation_list_policy: self.relation_list_policy,
        }
    }
}

/// The part of the configuration a sync run consumes
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSettings {
    pub base_id: String,
    pub remove_emojis: bool,
    pub relation_list_policy: RelationListPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_config(value: serde_json::Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", value).unwrap();
        file
    }

    #[test]
    fn test_load_with_defaults() {
        let file = write_config(json!({
            "metadata_url": "https://api.airtable.com/v0/meta/bases/",
            "records_url": "https://api.airtable.com/v0/",
            "token": "pat123",
            "base_id": "appXYZ",
            "selected_by_default": true
        }));

        let config = TapConfig::load(file.path()).unwrap();
        assert_eq!(config.base_id, "appXYZ");
        assert!(!config.remove_emojis);
        assert_eq!(config.relation_list_policy, RelationListPolicy::StopAtFirstNonId);

        let settings = config.sync_settings();
        assert_eq!(settings.base_id, "appXYZ");
        assert!(!settings.remove_emojis);
    }

    #[test]
    fn test_load_all_options() {
        let file = write_config(json!({
            "metadata_url": "m/",
            "records_url": "r/",
            "token": "t",
            "base_id": "b",
            "selected_by_default": false,
            "remove_emojis": true,
            "relation_list_policy": "skip_non_ids"
        }));

        let config = TapConfig::load(file.path()).unwrap();
        assert!(config.remove_emojis);
        assert_eq!(config.sync_settings().relation_list_policy, RelationListPolicy::SkipNonIds);
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let file = write_config(json!({
            "metadata_url": "m/",
            "records_url": "r/",
            "base_id": "b",
            "selected_by_default": true
        }));

        assert!(matches!(TapConfig::load(file.path()), Err(TapError::Json(_))));
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let file = write_config(json!({
            "metadata_url": "m/",
            "records_url": "r/",
            "token": " ",
            "base_id": "b",
            "selected_by_default": true
        }));

        match TapConfig::load(file.path()) {
            Err(TapError::Config(msg)) => assert!(msg.contains("token")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            TapConfig::load("/nonexistent/tap-config.json"),
            Err(TapError::Io(_))
        ));
    }
}
