use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogConfig;
use crate::error::Result;

/// Install the global tracing subscriber.
///
/// Filter precedence: `RUST_LOG`, then `-v`/`-vv`, then `log.level`. When
/// `log.file` is set, output is appended there instead of stderr.
pub fn init(config: &LogConfig, verbose: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(config, verbose)));

    subscriber(config, filter)?.init();
    Ok(())
}

fn subscriber(config: &LogConfig, filter: EnvFilter) -> Result<impl Subscriber + Send + Sync> {
    let (stderr_layer, file_layer) = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file));
            (None, Some(layer))
        }
        None => (Some(fmt::layer().with_writer(std::io::stderr)), None),
    };

    Ok(tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .with(filter))
}

fn level_directive(config: &LogConfig, verbose: u8) -> String {
    match verbose {
        0 => config.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}
