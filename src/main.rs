use anyhow::{Context, Result};
use shiprevenue::mysql::MySqlConnector;
use shiprevenue::viewer::SystemViewer;
use shiprevenue::Settings;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("failed to load settings")?;
    let summary = shiprevenue::run(&settings, &MySqlConnector, &SystemViewer)
        .context("revenue report failed")?;

    info!(
        "report finished, rows: {}, countries: {}, total: {}",
        summary.rows, summary.countries, summary.total
    );
    Ok(())
}
