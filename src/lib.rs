// Library re-exports for integration testing.
// The main binary is in main.rs; it drives everything through `cli::Cli`.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
