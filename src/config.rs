//! User configuration (config.toml).
//!
//! Loading never fails: problems are returned as warnings and defaults apply.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;
use tally_engine::engine::NumberFormat;

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    display: Option<DisplaySection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplaySection {
    decimals: Option<usize>,
    integer_limit: Option<f64>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub number_format: NumberFormat,
}

impl Config {
    fn from_file(file: ConfigFile) -> Config {
        let mut number_format = NumberFormat::default();
        if let Some(display) = file.display {
            if let Some(decimals) = display.decimals {
                number_format.decimals = decimals;
            }
            if let Some(limit) = display.integer_limit {
                number_format.integer_limit = limit;
            }
        }
        Config { number_format }
    }
}

/// Parse config.toml content.
pub fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    let file: ConfigFile = toml::from_str(content)?;
    Ok(Config::from_file(file))
}

/// Load the configuration from `config_file`, or from the user config dir.
pub fn load_config(config_file: Option<&PathBuf>) -> (Config, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let Some(path) = config_file.cloned().or_else(user_config_path) else {
        return (Config::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    let config = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match parse_config(&content) {
                Ok(config) => Some(config),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    };

    (config.unwrap_or_default(), warnings)
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "tally")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
