use serde_json::Value;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{AlexaError, Result};

use super::connect;

pub async fn run(cli: &Cli, config: &Config, index: usize, attribute: &str) -> Result<()> {
    let client = connect(config)?;
    let devices = client.list_devices().await?;
    let device = devices.get(index)?;

    let value = device
        .attribute(attribute)
        .ok_or_else(|| AlexaError::UnknownAttribute {
            device: device.name().to_string(),
            attribute: attribute.to_string(),
        })?;

    if cli.json {
        println!(
            "{}",
            serde_json::json!({
                "device": device.name(),
                "attribute": attribute,
                "value": value,
            })
        );
        return Ok(());
    }

    // Strings print bare, everything else as JSON.
    match value {
        Value::String(s) => println!("{}", s),
        other => println!("{}", other),
    }

    Ok(())
}
