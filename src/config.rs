//! Configuration for running this bot.

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;

/// The path to the config file
const CONFIG_PATH: &str = "config.toml";

/// Settings read from [CONFIG_PATH] that modify bot behavior.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Credentials. Only the Discord token for now.
    tokens: Tokens,

    /// Where telemetry rows go.
    database: DatabaseConfig,

    /// Optional overrides for the failure/success indicators.
    #[serde(default)]
    response_emojis: EmojiConfig,

    /// See [LoggingConfig]
    #[serde(default)]
    logging: LoggingConfig,
}

impl Config {
    /// Tries to read [CONFIG_PATH] to extract a [Config].
    /// If a file doesn't exist, create the default config file and return error.
    /// If a file exists but is empty, re-write the default values and return error.
    /// If a file exists but is incomplete, show error and don't change files.
    /// If a file exists and is complete, read file to create a config.
    /// If file existence is indeterminate (e.g. missing permissions), return error.
    pub fn read() -> Result<Config, ConfigError> {
        let file = std::fs::read_to_string(CONFIG_PATH);

        match file {
            // Config file found
            Ok(content) => {
                // Write default values to file if it's empty.
                if content.trim().is_empty() {
                    write_file(Config::default())?;
                    Err(ConfigError::InvalidConfig {
                        reason: format!("Empty config file! Rewriting {CONFIG_PATH} ..."),
                    })
                } else {
                    Config::parse(&content)
                }
            }
            // File not found or other filesystem error
            Err(file_error) => {
                match file_error.kind() {
                    // If file doesn't exist, create default config file.
                    std::io::ErrorKind::NotFound => {
                        let action = format!("Creating {CONFIG_PATH}...");
                        write_file(Config::default())?;
                        Err(ConfigError::MissingConfig { action_msg: action })
                    }
                    _ => Err(ConfigError::IoError(file_error)),
                }
            }
        }
    }

    /// Strict structured parse. If deserialization fails, the error names
    /// the exact key path that was wrong.
    fn parse(content: &str) -> Result<Config, ConfigError> {
        let to_toml = toml::Deserializer::new(content);
        let result: Result<Config, _> = serde_path_to_error::deserialize(to_toml);

        result.map_err(|error| ConfigError::InvalidConfig {
            reason: error.to_string(),
        })
    }

    /// Basic sanity check for if a token was given.
    pub fn token(&self) -> Result<&str, ConfigError> {
        let default_token = Config::default().tokens.discord;
        let given_token = &self.tokens.discord;

        let is_empty = given_token.is_empty();
        let contains_default = given_token.contains(&default_token);

        if !is_empty && !contains_default {
            Ok(given_token)
        } else {
            Err(ConfigError::InvalidConfig {
                reason: "Missing discord token".to_string(),
            })
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// The failure/success pair, with per-field defaults applied.
    pub fn response_emojis(&self) -> ResponseEmojis {
        let defaults = ResponseEmojis::default();
        ResponseEmojis {
            failure: self
                .response_emojis
                .failure
                .clone()
                .unwrap_or(defaults.failure),
            success: self
                .response_emojis
                .success
                .clone()
                .unwrap_or(defaults.success),
        }
    }

    /// Getter for log_dir.
    pub fn log_dir(&self) -> &str {
        &self.logging.log_dir
    }

    /// Is debug mode enabled for console logs
    pub fn console_debug(&self) -> bool {
        self.logging.console_debug
    }

    /// Is file logging enabled.
    pub fn logs_enabled(&self) -> bool {
        self.logging.logs_enabled
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tokens: Tokens {
                discord: "put_token_here".to_string(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/emote_manager".to_string(),
            },
            response_emojis: EmojiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Credential tokens.
#[derive(Debug, Serialize, Deserialize)]
struct Tokens {
    /// Token needed to use a bot account.
    discord: String,
}

/// Telemetry database settings.
#[derive(Debug, Serialize, Deserialize)]
struct DatabaseConfig {
    /// Postgres connection url.
    url: String,
}

/// Raw `[response_emojis]` section; both fields optional.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct EmojiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<String>,
}

/// Configs for logging behavior.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct LoggingConfig {
    /// Print debug traces to console?
    console_debug: bool,
    /// Enable writing to log file?
    logs_enabled: bool,
    /// Directory to store log files
    log_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_debug: false,
            logs_enabled: true,
            log_dir: "logs".to_string(),
        }
    }
}

/// The failure/success pair shown alongside command results.
///
/// Built once at config load and handed to [crate::Data] by value, so
/// command modules can signal outcomes without a client handle or any
/// access to the raw config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEmojis {
    pub failure: String,
    pub success: String,
}

impl Default for ResponseEmojis {
    fn default() -> Self {
        Self {
            failure: "❌".to_string(),
            success: "✅".to_string(),
        }
    }
}

/// Write the given config to [CONFIG_PATH].
fn write_file(config: Config) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(&config).map_err(|error| ConfigError::InvalidConfig {
        reason: error.to_string(),
    })?;
    std::fs::write(CONFIG_PATH, content).map_err(ConfigError::IoError)
}

#[cfg(test)]
mod test {
    use super::*;

    const MINIMAL: &str = r#"
        [tokens]
        discord = "MTIzNDU2Nzg5MDEyMzQ1Njc4.x.y"

        [database]
        url = "postgres://localhost/emote_manager_test"
    "#;

    #[test]
    fn minimal_config_gets_default_emojis() {
        let config = Config::parse(MINIMAL).unwrap();
        assert_eq!(config.response_emojis(), ResponseEmojis::default());
        assert_eq!(config.response_emojis().failure, "❌");
        assert_eq!(config.response_emojis().success, "✅");
    }

    #[test]
    fn partial_emoji_override_keeps_other_default() {
        let content = format!("{MINIMAL}\n[response_emojis]\nsuccess = \"👍\"\n");
        let config = Config::parse(&content).unwrap();
        assert_eq!(config.response_emojis().success, "👍");
        assert_eq!(config.response_emojis().failure, "❌");
    }

    #[test]
    fn missing_token_section_names_the_key() {
        let err = Config::parse("[database]\nurl = \"postgres://x\"\n").unwrap_err();
        assert!(err.to_string().contains("tokens"));
    }

    #[test]
    fn logging_defaults_apply() {
        let config = Config::parse(MINIMAL).unwrap();
        assert!(!config.console_debug());
        assert!(config.logs_enabled());
        assert_eq!(config.log_dir(), "logs");
    }

    #[test]
    fn placeholder_token_is_rejected() {
        assert!(Config::default().token().is_err());
        assert_eq!(
            Config::parse(MINIMAL).unwrap().token().unwrap(),
            "MTIzNDU2Nzg5MDEyMzQ1Njc4.x.y"
        );
    }
}
