//! Composition root. The only place that picks concrete outbound adapters.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::{
    adapters::outbound::{FileKeyValueStore, TimesheetApiAdapter},
    config::TimeclockConfig,
    domain::{
        ports::outbound::SystemClock,
        services::{SessionCoordinator, SessionSnapshotStore, SubmissionGateway},
    },
};

/// Coordinator backed by the file snapshot store in the configured state directory.
pub fn build_coordinator(config: &TimeclockConfig) -> Result<SessionCoordinator> {
    let state_dir = config
        .state_dir()
        .context("Cannot determine session state directory")?;
    tracing::debug!("Session state directory: {}", state_dir.display());

    let store = SessionSnapshotStore::new(Arc::new(FileKeyValueStore::new(state_dir)));
    Ok(SessionCoordinator::with_tick_interval(
        store,
        Arc::new(SystemClock),
        config.tick_interval(),
    ))
}

/// Storage adapter for the configured service. Fails without an access token.
pub fn build_storage(config: &TimeclockConfig) -> Result<TimesheetApiAdapter> {
    let token = config.access_token().with_context(|| {
        format!(
            "No access token configured. Set {} or access_token in {}",
            crate::config::ACCESS_TOKEN_ENV,
            TimeclockConfig::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "config.toml".to_string())
        )
    })?;

    Ok(TimesheetApiAdapter::new(
        config.api_url.clone(),
        timesheet_api::Credentials::new(token),
    ))
}

pub fn build_gateway(
    config: &TimeclockConfig,
    coordinator: SessionCoordinator,
) -> Result<SubmissionGateway<TimesheetApiAdapter>> {
    let storage = build_storage(config)?;
    Ok(SubmissionGateway::new(Arc::new(storage), coordinator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_needs_a_token() {
        assert!(build_storage(&TimeclockConfig::default()).is_err());

        let config = TimeclockConfig {
            access_token: Some("abc".to_string()),
            ..TimeclockConfig::default()
        };
        assert!(build_storage(&config).is_ok());
    }

    #[test]
    fn coordinator_uses_configured_state_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = TimeclockConfig {
            state_dir: Some(dir.path().to_path_buf()),
            ..TimeclockConfig::default()
        };

        let coordinator = build_coordinator(&config).unwrap();
        coordinator.start().unwrap();

        assert!(dir.path().join("isTracking").exists());
    }
}
