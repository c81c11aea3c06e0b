//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub session: SessionConfig,
    pub adapters: AdaptersConfig,
    pub reconnect: ReconnectConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

/// Where the protocol library persists device credentials. Scanning the QR
/// once fills this directory; deleting it forces a fresh pairing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReconnectConfig {
    pub delay_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub whatsapp: Option<WhatsAppConfig>,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct WhatsAppConfig {
    pub enabled: bool,
    /// Device name shown in the phone's linked-devices list.
    pub device_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "wabot".to_string(),
                prefix: "!".to_string(),
            },
            session: SessionConfig {
                directory: PathBuf::from("auth_info"),
            },
            adapters: AdaptersConfig {
                whatsapp: Some(WhatsAppConfig {
                    enabled: true,
                    device_name: Some("WA Bot".to_string()),
                }),
                console: Some(ConsoleConfig { enabled: false }),
            },
            reconnect: ReconnectConfig { delay_seconds: 5 },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.into(), content)?;
        Ok(())
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();

        if let Ok(prefix) = std::env::var("WABOT_PREFIX") {
            config.bot.prefix = prefix;
        }

        if let Ok(dir) = std::env::var("WABOT_SESSION_DIR") {
            config.session.directory = PathBuf::from(dir);
        }

        if let Ok(name) = std::env::var("WABOT_DEVICE_NAME") {
            if let Some(ref mut wa) = config.adapters.whatsapp {
                wa.device_name = Some(name);
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefix_is_bang() {
        let config = Config::default();
        assert_eq!(config.bot.prefix, "!");
        assert_eq!(config.session.directory, PathBuf::from("auth_info"));
        assert_eq!(config.reconnect.delay_seconds, 5);
    }

    #[test]
    fn yaml_round_trip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.bot.name, config.bot.name);
        assert_eq!(parsed.bot.prefix, config.bot.prefix);
        assert!(parsed.adapters.whatsapp.unwrap().enabled);
    }

    #[test]
    fn parses_kebab_case_keys() {
        let yaml = "\
bot:
  name: testbot
  prefix: '.'
session:
  directory: sessions
adapters:
  whatsapp:
    enabled: true
    device-name: Test
  console:
    enabled: false
reconnect:
  delay-seconds: 10
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.bot.prefix, ".");
        assert_eq!(config.reconnect.delay_seconds, 10);
        assert_eq!(
            config.adapters.whatsapp.unwrap().device_name.as_deref(),
            Some("Test")
        );
    }
}
