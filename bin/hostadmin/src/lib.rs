pub mod cli;
pub mod commands;
pub mod utility;

use crate::cli::Cli;
use crate::utility::logging::setup_logging;
use crate::utility::tasks::{load_env, start_session};
use clap::Parser;
use eyre::Report;
use hostadmin_primitives::models::AppConfig;
use tracing::{info, warn};

pub async fn run() -> Result<(), Report> {
    // 1. parse arguments before anything touches the network
    let cli = Cli::parse();

    // 2. load environment variables
    load_env();

    // 3. initialize logging
    setup_logging();

    // 4. load configuration
    let config = AppConfig::from_env()?;

    // 5. log in
    let session = start_session(&config).await?;

    // 6. run the command
    let result = commands::execute(cli.command, &session, &config).await;

    // 7. tear the session down whatever the outcome
    if let Err(e) = session.logout().await {
        warn!(error = %e, "Logout failed");
    }

    info!("hostadmin finished");
    result
}
