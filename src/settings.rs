//! Startup configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Window and playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    1024.0
}

fn default_height() -> f32 {
    768.0
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub video: VideoConfig,
}

impl Config {
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let config = Config::from_json(r#"{ "video": { "width": 640, "height": 480 } }"#).unwrap();
        assert_eq!(config.video.width, 640.0);
        assert_eq!(config.video.height, 480.0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());

        let partial = Config::from_json(r#"{ "video": { "width": 800 } }"#).unwrap();
        assert_eq!(partial.video.width, 800.0);
        assert_eq!(partial.video.height, 768.0);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(matches!(
            Config::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
