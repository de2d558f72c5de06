use crate::error::{RepolangError, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const MAX_PER_PAGE: u8 = 100;

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, deserialize_with = "optional_text")]
    pub github_username: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub github_token: Option<String>,
    pub readme_path: PathBuf,
    pub api_base_url: Option<String>,
    #[serde(deserialize_with = "text")]
    pub section: String,
    pub per_page: u8,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("github_username", &self.github_username)
            .field("github_token", &self.github_token.as_ref().map(|_| "[REDACTED]"))
            .field("readme_path", &self.readme_path)
            .field("api_base_url", &self.api_base_url)
            .field("section", &self.section)
            .field("per_page", &self.per_page)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_username: None,
            github_token: None,
            readme_path: PathBuf::from("README.md"),
            api_base_url: None,
            section: "languages".to_string(),
            per_page: MAX_PER_PAGE,
        }
    }
}

/// Values given on the command line; each one wins over every other layer.
#[derive(Debug, Default)]
pub struct Overrides {
    pub username: Option<String>,
    pub readme_path: Option<PathBuf>,
    pub section: Option<String>,
    pub api_base_url: Option<String>,
}

/// Account identity and token, checked once and handed to each component.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Figment parses env values, so `REPOLANG_SECTION=2024` arrives as a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Unsigned(n) => n.to_string(),
            TextOrNumber::Signed(n) => n.to_string(),
            TextOrNumber::Float(n) => n.to_string(),
        }
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    TextOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(String::from))
}

impl Config {
    /// Layers defaults, the config file, `REPOLANG_*` and the command line.
    /// `GITHUB_TOKEN` and `GITHUB_USERNAME` are read verbatim, outside
    /// figment's value parsing, and only a CLI username beats them.
    pub fn load(overrides: Overrides) -> Result<Self> {
        let config_file = config_dir().join("repolang").join("config.toml");

        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if config_file.exists() {
            figment = figment.merge(Toml::file(&config_file));
        }

        figment = figment.merge(Env::prefixed("REPOLANG_"));

        if let Some(path) = overrides.readme_path {
            figment = figment.merge(Serialized::default("readme_path", path));
        }
        if let Some(section) = overrides.section {
            figment = figment.merge(Serialized::default("section", section));
        }
        if let Some(url) = overrides.api_base_url {
            figment = figment.merge(Serialized::default("api_base_url", url));
        }

        let mut config: Config = figment
            .extract()
            .map_err(|e| RepolangError::Configuration(e.to_string()))?;

        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            config.github_token = Some(token);
        }
        if let Ok(username) = std::env::var("GITHUB_USERNAME") {
            config.github_username = Some(username);
        }
        if let Some(username) = overrides.username {
            config.github_username = Some(username);
        }

        Ok(config.clamped())
    }

    fn clamped(mut self) -> Self {
        self.per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let username = non_empty(&self.github_username);
        let token = non_empty(&self.github_token);
        match (username, token) {
            (Some(username), Some(token)) => Ok(Credentials {
                username: username.to_string(),
                token: token.to_string(),
            }),
            (None, None) => Err(RepolangError::Configuration(
                "GITHUB_TOKEN and GITHUB_USERNAME are not set".to_string(),
            )),
            (None, Some(_)) => Err(RepolangError::Configuration(
                "GITHUB_USERNAME is not set".to_string(),
            )),
            (Some(_), None) => Err(RepolangError::Configuration(
                "GITHUB_TOKEN is not set".to_string(),
            )),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}
