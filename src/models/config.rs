use crate::models::error::{Result, SelectError};
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "usize_two")]
    pub nr_full: usize,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default = "bool_false")]
    pub overwrite_existing: bool,
    #[serde(default = "default_max_threads")]
    pub max_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            nr_full: usize_two(),
            destination: None,
            overwrite_existing: bool_false(),
            max_threads: default_max_threads(),
        }
    }
}

const fn usize_two() -> usize { 2 }
const fn bool_false() -> bool { false }
fn default_max_threads() -> usize {
    num_cpus::get_physical()
}

/// Loads the config file if one was given, defaults otherwise
pub fn setup_config(config_file: Option<&str>) -> Result<Config> {
    let config = match config_file {
        Some(file) => read_config(PathBuf::from(file))?,
        None => Config::default(),
    };

    if config.max_threads == 0 {
        return Err(SelectError::ConfigInvalid(
            "max_threads must be greater than 0".to_string(),
        ));
    }

    Ok(config)
}

fn read_config(config_path: PathBuf) -> Result<Config> {
    info!("Loading config from: {}", config_path.display());

    let config_str = fs::read_to_string(&config_path).map_err(|cause| {
        SelectError::ConfigRead {
            path: config_path.clone(),
            cause,
        }
    })?;

    serde_json::from_str(&config_str).map_err(|cause| SelectError::ConfigParse {
        path: config_path,
        cause,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_load_valid_config_with_all_fields() {
        let temp_file = write_config(
            r#"{
            "nr_full": 4,
            "destination": "/mnt/offsite",
            "overwrite_existing": true,
            "max_threads": 3
        }"#,
        );

        let config = setup_config(temp_file.path().to_str()).unwrap();

        assert_eq!(config.nr_full, 4);
        assert_eq!(config.destination.as_deref(), Some("/mnt/offsite"));
        assert!(config.overwrite_existing);
        assert_eq!(config.max_threads, 3);
    }

    #[test]
    fn test_load_config_with_defaults() {
        let temp_file = write_config("{}");

        let config = setup_config(temp_file.path().to_str()).unwrap();

        assert_eq!(config.nr_full, 2);
        assert_eq!(config.destination, None);
        assert!(!config.overwrite_existing);
        assert_eq!(config.max_threads, num_cpus::get_physical());
    }

    #[test]
    fn test_no_config_file_uses_defaults() {
        let config = setup_config(None).unwrap();
        assert_eq!(config.nr_full, 2);
        assert_eq!(config.destination, None);
    }

    #[test]
    fn test_error_on_missing_config_file() {
        let result = setup_config(Some("/this/does/not/exist/config.json"));

        match result {
            Err(SelectError::ConfigRead { .. }) => {}
            _ => panic!("Expected ConfigRead error"),
        }
    }

    #[test]
    fn test_error_on_invalid_json() {
        let temp_file = write_config(r#"{ "nr_full": "two" "#);

        let result = setup_config(temp_file.path().to_str());

        match result {
            Err(SelectError::ConfigParse { .. }) => {}
            _ => panic!("Expected ConfigParse error"),
        }
    }

    #[test]
    fn test_rejects_zero_threads() {
        let temp_file = write_config(r#"{ "max_threads": 0 }"#);

        let result = setup_config(temp_file.path().to_str());

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("max_threads must be greater than 0"));
    }
}
