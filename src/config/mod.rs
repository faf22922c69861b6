use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::FilterConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub filters: Vec<FilterConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// M3U playlist location: http(s) URL or local path.
    pub playlist_url: String,
    /// XMLTV guide location: http(s) URL or local path.
    pub epg_url: String,
    /// Optional User-Agent header sent to remote sources.
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// When set, stream addresses in the published playlist are rewritten to
    /// `http://<base_address>/channel/<index>`.
    pub base_address: Option<String>,
    pub playlist_path: PathBuf,
    pub epg_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig {
                playlist_url: "http://localhost/playlist.m3u".to_string(),
                epg_url: "http://localhost/epg.xml".to_string(),
                user_agent: None,
            },
            output: OutputConfig {
                base_address: None,
                playlist_path: PathBuf::from("./data/playlist.m3u"),
                epg_path: PathBuf::from("./data/epg.xml"),
            },
            filters: Vec::new(),
        }
    }
}

impl Config {
    /// Load a config file, creating one with defaults when it does not exist.
    pub fn load_or_create(config_file: &Path) -> Result<Self> {
        if config_file.exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            if let Some(parent) = config_file.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(config_file, contents)?;
            Ok(default_config)
        }
    }
}
