pub mod attribute;
pub mod config;
pub mod devices;
pub mod speak;
pub mod weather;

use colored::Colorize;

use crate::api::{AlexaClient, CommandResult};
use crate::cli::Cli;
use crate::config::Config;
use crate::credentials::CookieBundle;
use crate::error::Result;

/// Load the cookie bundle and build a client for it.
pub(crate) fn connect(config: &Config) -> Result<AlexaClient> {
    let path = CookieBundle::locate(config.session.cookie_file.as_deref())?;
    let cookies = CookieBundle::load(&path)?;
    tracing::debug!("Loaded {} cookie(s) from {}", cookies.len(), path.display());
    AlexaClient::from_config(config, &cookies)
}

pub(crate) fn print_command_result(cli: &Cli, action: &str, result: &CommandResult) {
    if cli.json {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "action": action,
                "device": result.device,
                "payload": result.payload,
            })
        );
    } else {
        println!(
            "  {} {} sent to {}",
            "✓".green(),
            action,
            result.device.bold()
        );
    }
}
