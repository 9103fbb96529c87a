use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;

use super::connect;

/// `getDevices`: every device with all of its attributes.
pub async fn get(_cli: &Cli, config: &Config) -> Result<()> {
    let client = connect(config)?;
    let devices = client.list_devices().await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({ "devices": devices.devices() }))?
    );

    Ok(())
}

/// `listDevices`: `#.) deviceName`, one per line.
pub async fn list(cli: &Cli, config: &Config) -> Result<()> {
    let client = connect(config)?;
    let devices = client.list_devices().await?;

    if cli.json {
        let entries: Vec<_> = devices
            .iter()
            .map(|(index, device)| serde_json::json!({ "index": index, "name": device.name() }))
            .collect();
        println!("{}", serde_json::Value::Array(entries));
        return Ok(());
    }

    for line in devices.listing() {
        println!("{}", line);
    }

    Ok(())
}
