//! CLI entry point for Ghostwriter assistant deployment.
//!
//! ```text
//! ghostwriter-deploy            # deploy
//! ghostwriter-deploy --dry-run  # compute intended action only
//! ```

use std::process::ExitCode;

use clap::Parser;
use ghostwriter_deploy::{
    reconcile, AssistantConfig, DeployConfig, ReconcileOutcome, Result, VapiClient,
};
use tracing::{error, info};

/// Deploy the Ghostwriter assistant to Vapi.
#[derive(Debug, Parser)]
#[command(name = "ghostwriter-deploy", version)]
struct Cli {
    /// Compute the intended action without creating, updating, or linking
    /// anything.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli.dry_run).await {
        Ok(ReconcileOutcome::Applied { assistant_id }) => {
            info!(assistant_id = %assistant_id, "Deployment complete");
            println!("{assistant_id}");
            ExitCode::SUCCESS
        },
        Ok(ReconcileOutcome::DryRun) => {
            info!("Dry run complete, no changes applied");
            ExitCode::SUCCESS
        },
        Err(e) => {
            error!(error = %e, "Deployment failed");
            ExitCode::FAILURE
        },
    }
}

async fn run(dry_run: bool) -> Result<ReconcileOutcome> {
    let config = DeployConfig::load()?;
    let client = VapiClient::new(&config.api_key, &config.base_url)?;
    let desired = AssistantConfig::build(&config.server_url);

    reconcile(&client, &desired, &config.phone_number_id, dry_run).await
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .expect("Invalid RUST_LOG environment variable");

    tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(false)).init();
}
