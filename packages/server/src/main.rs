//! Emergency map view server.
//!
//! Reads configuration from the file named by `EMERGENCY_MAP_CONFIG`
//! when set, plus environment overrides.
//! Pass `--interactive` to be prompted for the bind address and source.

use std::path::PathBuf;

use emergency_map_dashboard::DashboardConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let path = std::env::var_os("EMERGENCY_MAP_CONFIG").map(PathBuf::from);
    let config = DashboardConfig::load(path.as_deref()).map_err(std::io::Error::other)?;

    if std::env::args().any(|arg| arg == "--interactive") {
        emergency_map_server::interactive::run(config).await
    } else {
        emergency_map_server::run_server(config).await
    }
}
