use crate::error::{MedcatError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration for medcat, stored in the platform config dir as config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MedcatConfig {
    /// Base URL of the catalog API server
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Page size for the paginated medicine listing
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for MedcatConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl MedcatConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(MedcatError::Io)?;
        let config: MedcatConfig =
            serde_json::from_str(&content).map_err(MedcatError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(MedcatError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(MedcatError::Serialization)?;
        fs::write(config_path, content).map_err(MedcatError::Io)?;
        Ok(())
    }

    /// Set the API base URL (trailing slashes are stripped so paths can
    /// always be appended with a single `/`)
    pub fn set_api_url(&mut self, url: &str) {
        self.api_url = url.trim_end_matches('/').to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MedcatConfig::default();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_set_api_url_strips_trailing_slash() {
        let mut config = MedcatConfig::default();
        config.set_api_url("https://api.example.org/");
        assert_eq!(config.api_url, "https://api.example.org");
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = MedcatConfig::load(temp_dir.path().join("nope")).unwrap();
        assert_eq!(config, MedcatConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut config = MedcatConfig::default();
        config.set_api_url("http://10.0.0.5:8080");
        config.page_size = 25;
        config.save(temp_dir.path()).unwrap();

        let loaded = MedcatConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.api_url, "http://10.0.0.5:8080");
        assert_eq!(loaded.page_size, 25);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{"api_url":"http://host:9000"}"#;
        let parsed: MedcatConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.api_url, "http://host:9000");
        assert_eq!(parsed.page_size, 10);
    }
}
