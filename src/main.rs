use anyhow::Context;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::EnvFilter;

use wanderplan::{ConsoleSession, Planner, PlannerConfig, StdinLines};

// Prints the loaded catalog as XML instead of starting a session
const EXPORT_XML_FLAG: &str = "--export-xml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PlannerConfig::from_env().context("Invalid configuration")?;

    // Logs go to stderr so they never interleave with the prompts
    tracing_subscriber::fmt()
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_new(&config.log_filter).context("Invalid log filter")?)
        .init();

    let data = config
        .load_catalog()
        .context("Failed to load the destination catalog")?;

    if std::env::args().skip(1).any(|arg| arg == EXPORT_XML_FLAG) {
        let xml = data.to_xml().context("Failed to export the catalog")?;
        println!("{}", xml);
        return Ok(());
    }

    let planner = Planner::from_data(data).context("Failed to build the planner")?;
    let mut console = ConsoleSession::new(
        &planner,
        StdinLines::new(),
        std::io::stdout(),
        &config.restart_keyword,
    );

    let completed = console.run().await?;
    info!(completed, "Session finished");
    Ok(())
}
