//! Interactive mode for the server.
//!
//! Prompts for the bind address, port, and data source before starting
//! the server.

use dialoguer::{Confirm, Input};
use emergency_map_dashboard::DashboardConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// The answers override the matching fields of `config` before it is
/// handed to [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(mut config: DashboardConfig) -> std::io::Result<()> {
    println!("Emergency Map Server");
    println!();

    config.server.bind_addr = Input::new()
        .with_prompt("Bind address")
        .default(config.server.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| config.server.bind_addr.clone());

    config.server.port = Input::new()
        .with_prompt("Port")
        .default(config.server.port)
        .interact_text()
        .unwrap_or(config.server.port);

    config.offline = Confirm::new()
        .with_prompt("Use bundled seed data instead of the backend?")
        .default(config.offline)
        .interact()
        .unwrap_or(config.offline);

    if !config.offline {
        config.api_url = Input::new()
            .with_prompt("Backend URL")
            .default(config.api_url.clone())
            .interact_text()
            .unwrap_or_else(|_| config.api_url.clone());
    }

    if !Confirm::new()
        .with_prompt(format!(
            "Start server on {}:{}?",
            config.server.bind_addr, config.server.port
        ))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(config).await
}
