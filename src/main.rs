use freelance_planner::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting freelance planner");

    // Load configuration
    let config = startup::load_config()?;

    // Serve until SIGINT/SIGTERM
    startup::start_server(config).await
}
