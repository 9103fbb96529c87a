use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{AlexaError, Result};

/// Environment prefix for config overrides, e.g. `ALEXA_CONTROL_API__LOCALE`.
pub const ENV_PREFIX: &str = "ALEXA_CONTROL_";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/51.0.2704.103 Safari/537.36";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub log: LogConfig,
}

/// Where and how requests to the Alexa web console are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin of the Alexa web console, without a trailing slash.
    pub base_url: String,
    /// Locale embedded in behavior payloads.
    pub locale: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://alexa.amazon.com".to_string(),
            locale: "en-US".to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cookie file to use instead of searching the default locations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when neither RUST_LOG nor -v is given.
    pub level: String,
    /// Append logs to this file instead of stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Default config file: ~/.config/alexa-control/config.toml
    pub fn path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            AlexaError::Config("Could not determine config directory".to_string())
        })?;
        Ok(dir.join("alexa-control").join("config.toml"))
    }

    /// Load from the default config file (if any) and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load with an explicit config file. An explicit file must exist; the
    /// default one is optional.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(AlexaError::Config(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => Self::path().ok(),
        };

        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = &file {
            figment = figment.merge(Toml::file(file));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| AlexaError::Config(e.to_string()))?;
        config.normalize();
        Ok(config)
    }

    /// The config file `load_from` reads, if one exists.
    pub fn source_file(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| Self::path().ok())
            .filter(|path| path.is_file())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AlexaError::Config(e.to_string()))
    }

    fn normalize(&mut self) {
        while self.api.base_url.ends_with('/') {
            self.api.base_url.pop();
        }
        if let Some(path) = self.session.cookie_file.take() {
            self.session.cookie_file = Some(expand_path(&path));
        }
        if let Some(path) = self.log.file.take() {
            self.log.file = Some(expand_path(&path));
        }
    }

    pub fn set_base_url(&mut self, base_url: &str) {
        self.api.base_url = base_url.to_string();
        self.normalize();
    }

    pub fn set_cookie_file(&mut self, path: &Path) {
        self.session.cookie_file = Some(path.to_path_buf());
        self.normalize();
    }
}

/// Expand a leading `~` in a configured path.
pub fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}
