use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::commands;
use crate::config::Config;
use crate::error::Result;

/// Control Amazon Alexa devices using a session cookie exported from a browser
#[derive(Parser, Debug)]
#[command(name = "alexa-control", version, about)]
pub struct Cli {
    /// Cookie file (JSON) captured from a browser logged into the Alexa web console
    #[arg(long, global = true, env = "ALEXA_CONTROL_COOKIE")]
    pub cookie: Option<PathBuf>,

    /// Config file [default: ~/.config/alexa-control/config.toml]
    #[arg(long, global = true, env = "ALEXA_CONTROL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Alexa web console origin, e.g. https://alexa.amazon.co.uk
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Locale used in behavior payloads, e.g. en-GB
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Make a device say something
    #[command(name = "speak")]
    Speak {
        /// Device index as printed by listDevices (starts at 0)
        index: usize,
        /// Text to speak; multiple words are joined with spaces
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        message: Vec<String>,
    },

    /// Make a device read the weather forecast
    #[command(name = "getWeather", alias = "get-weather")]
    GetWeather {
        /// Device index as printed by listDevices (starts at 0)
        index: usize,
    },

    /// Print every device with all of its attributes as JSON
    #[command(name = "getDevices", alias = "get-devices")]
    GetDevices,

    /// Print devices as `#.) deviceName`
    #[command(name = "listDevices", alias = "list-devices")]
    ListDevices,

    /// Print a single attribute of a device (e.g. serialNumber, online)
    #[command(name = "getAttribute", alias = "get-attribute")]
    GetAttribute {
        /// Device index as printed by listDevices (starts at 0)
        index: usize,
        /// Attribute name as reported by the API
        attribute: String,
    },

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the default config file path
    Path,
}

impl Cli {
    /// Load configuration and apply command-line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_from(self.config.as_deref())?;
        if let Some(base_url) = &self.base_url {
            config.set_base_url(base_url);
        }
        if let Some(locale) = &self.locale {
            config.api.locale = locale.clone();
        }
        if let Some(cookie) = &self.cookie {
            config.set_cookie_file(cookie);
        }
        Ok(config)
    }

    pub async fn run(&self, config: &Config) -> Result<()> {
        match &self.command {
            Commands::Speak { index, message } => {
                commands::speak::run(self, config, *index, &message.join(" ")).await
            }
            Commands::GetWeather { index } => commands::weather::run(self, config, *index).await,
            Commands::GetDevices => commands::devices::get(self, config).await,
            Commands::ListDevices => commands::devices::list(self, config).await,
            Commands::GetAttribute { index, attribute } => {
                commands::attribute::run(self, config, *index, attribute).await
            }
            Commands::Config(command) => commands::config::run(self, config, command),
        }
    }
}
