//! Velocity grapher: live plots of drive-train telemetry.
//!
//! Usage: `velgraph [config.yaml]`. Set `VELGRAPH_HEADLESS=1` to run the loop
//! without a window (label changes are logged at debug level).

use tracing_subscriber::{fmt, EnvFilter};

use velgraph::{DashboardConfig, DashboardSession, LoggingSurface, TableSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,velgraph=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };

    let table = TableSource::new();
    #[cfg(feature = "net")]
    let _client = velgraph::WsTelemetryClient::spawn(
        &config.server_url,
        config.reconnect_interval(),
        table.clone(),
    );
    #[cfg(feature = "net")]
    tracing::info!(url = %config.server_url, "telemetry client started");

    let mut session = DashboardSession::new(config, table)?;

    if std::env::var_os("VELGRAPH_HEADLESS").is_some() {
        let mut surface = LoggingSurface::new();
        velgraph::run_headless(&mut session, &mut surface, |outcome| {
            tracing::trace!(?outcome.transition, sampled = outcome.sampled, "tick");
            true
        });
        return Ok(());
    }

    velgraph::run_dashboard(session)?;
    Ok(())
}
