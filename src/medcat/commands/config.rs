use crate::commands::{CmdMessage, CmdResult};
use crate::config::MedcatConfig;
use crate::error::{MedcatError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    SetApiUrl(String),
    SetPageSize(usize),
}

pub fn run<P: AsRef<Path>>(config_dir: P, action: ConfigAction) -> Result<CmdResult> {
    let config_dir = config_dir.as_ref();
    let mut config = MedcatConfig::load(config_dir)?;

    let mut result = CmdResult::default();
    match action {
        ConfigAction::ShowAll | ConfigAction::ShowKey(_) => {}
        ConfigAction::SetApiUrl(url) => {
            config.set_api_url(&url);
            config.save(config_dir)?;
            result.add_message(CmdMessage::success(format!("api-url = {}", config.api_url)));
        }
        ConfigAction::SetPageSize(size) => {
            if size == 0 {
                return Err(MedcatError::Api("page-size must be at least 1".to_string()));
            }
            config.page_size = size;
            config.save(config_dir)?;
            result.add_message(CmdMessage::success(format!("page-size = {}", size)));
        }
    }

    Ok(result.with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_returns_defaults_when_unset() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = run(temp_dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config.unwrap(), MedcatConfig::default());
    }

    #[test]
    fn set_api_url_persists() {
        let temp_dir = tempfile::tempdir().unwrap();
        run(
            temp_dir.path(),
            ConfigAction::SetApiUrl("http://api:9000/".into()),
        )
        .unwrap();

        let result = run(temp_dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config.unwrap().api_url, "http://api:9000");
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(run(temp_dir.path(), ConfigAction::SetPageSize(0)).is_err());
    }
}
