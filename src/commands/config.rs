use crate::cli::{Cli, ConfigCommands};
use crate::config::Config;
use crate::error::Result;

pub fn run(cli: &Cli, config: &Config, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(cli, config),
        ConfigCommands::Path => path(cli),
    }
}

fn show(cli: &Cli, config: &Config) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", config.to_toml()?);
    }
    Ok(())
}

fn path(cli: &Cli) -> Result<()> {
    let path = Config::path()?;
    if cli.json {
        println!(
            "{}",
            serde_json::json!({
                "path": path.display().to_string(),
                "exists": path.is_file(),
            })
        );
    } else {
        println!("{}", path.display());
    }
    Ok(())
}
