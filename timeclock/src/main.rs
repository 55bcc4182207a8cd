use anyhow::Result;
use clap::Parser;
use timeclock::{cli::Cli, config::TimeclockConfig, runtime, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = TimeclockConfig::load()?;
    telemetry::init_tracing(&config.log_level);

    runtime::run(cli, config).await
}
