use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use alexa_control::cli::Cli;
use alexa_control::config::Config;
use alexa_control::error::AlexaError;
use alexa_control::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => return report(&cli, &e),
    };

    if let Err(e) = logging::init(&config.log, cli.verbose) {
        eprintln!("  {} Failed to initialize logging: {}", "!".yellow(), e);
    }
    match Config::source_file(cli.config.as_deref()) {
        Some(path) => tracing::debug!("Read config from {}", path.display()),
        None => tracing::debug!("No config file; using defaults and environment"),
    }

    match cli.run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // the report below already goes to stderr
            if config.log.file.is_some() {
                tracing::error!(kind = e.kind(), "Command failed: {}", e);
            } else {
                tracing::debug!(kind = e.kind(), "Command failed: {}", e);
            }
            report(&cli, &e)
        }
    }
}

fn report(cli: &Cli, error: &AlexaError) -> ExitCode {
    if cli.json {
        eprintln!(
            "{}",
            serde_json::json!({ "error": error.to_string(), "kind": error.kind() })
        );
    } else {
        eprintln!("{} {}", "error:".red().bold(), error);
    }
    ExitCode::FAILURE
}
