mod commands;
mod watch;

use std::{io::Write, sync::Arc};

use anyhow::{Context, Result};

use crate::{
    cli::{Cli, Commands},
    config::TimeclockConfig,
    domain::{
        models::Session,
        services::{ListenerHandle, SessionCoordinator},
    },
    factory,
};

pub use commands::*;
pub use watch::watch;

/// Attach as a view that only needs the rehydrated session.
fn mount(coordinator: &SessionCoordinator) -> ListenerHandle {
    coordinator.attach(Arc::new(|_: &Session| {}))
}

pub async fn run(cli: Cli, config: TimeclockConfig) -> Result<()> {
    if let Commands::ConfigPath = cli.command {
        return print_config_path();
    }

    let coordinator = factory::build_coordinator(&config)?;
    let mut stdout = std::io::stdout();

    if let Commands::Watch = cli.command {
        return watch(&coordinator, &mut stdout).await;
    }

    let handle = mount(&coordinator);
    let result = match cli.command {
        Commands::Status => status(&coordinator, &mut stdout),
        Commands::In => match factory::build_gateway(&config, coordinator.clone()) {
            Ok(gateway) => time_in(&gateway, &mut stdout).await,
            Err(e) => {
                tracing::warn!("Skipping profile check: {:#}", e);
                time_in_offline(&coordinator, &mut stdout)
            }
        },
        Commands::Out(args) => {
            let gateway = factory::build_gateway(&config, coordinator.clone())?;
            time_out(&gateway, args, &mut stdout).await
        }
        Commands::Categories => {
            let gateway = factory::build_gateway(&config, coordinator.clone())?;
            list_categories(&gateway, &mut stdout).await
        }
        Commands::Shifts => {
            let gateway = factory::build_gateway(&config, coordinator.clone())?;
            list_shifts(&gateway, &mut stdout).await
        }
        Commands::Users => {
            let gateway = factory::build_gateway(&config, coordinator.clone())?;
            list_users(&gateway, &mut stdout).await
        }
        Commands::Timesheets { json } => {
            let gateway = factory::build_gateway(&config, coordinator.clone())?;
            list_timesheets(&gateway, json, &mut stdout).await
        }
        Commands::Watch | Commands::ConfigPath => Ok(()),
    };
    coordinator.detach(handle);
    result
}

fn print_config_path() -> Result<()> {
    let path = TimeclockConfig::config_path()?;
    if !path.exists() {
        TimeclockConfig::default()
            .save_to(&path)
            .with_context(|| format!("Failed to create config at {}", path.display()))?;
    }

    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", path.display())?;
    Ok(())
}
