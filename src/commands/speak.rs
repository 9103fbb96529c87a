use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;

use super::{connect, print_command_result};

pub async fn run(cli: &Cli, config: &Config, index: usize, message: &str) -> Result<()> {
    let client = connect(config)?;
    // Indexes refer to this run's listing; nothing is kept between runs.
    let devices = client.list_devices().await?;

    let result = client.speak(&devices, index, message).await?;
    tracing::info!(device = %result.device, "Speak command accepted");

    print_command_result(cli, "Speak command", &result);
    Ok(())
}
