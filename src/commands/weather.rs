use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;

use super::{connect, print_command_result};

pub async fn run(cli: &Cli, config: &Config, index: usize) -> Result<()> {
    let client = connect(config)?;
    let devices = client.list_devices().await?;

    let result = client.get_weather(&devices, index).await?;
    tracing::info!(device = %result.device, "Weather command accepted");

    print_command_result(cli, "Weather command", &result);
    Ok(())
}
