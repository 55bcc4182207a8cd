mod conversions;

use async_trait::async_trait;

use crate::domain::{
    models::{Category, NewTimesheet, Shift, Submitter, Timesheet, UserSummary},
    ports::outbound::TimesheetStorage,
    StorageError,
};

use self::conversions::{
    to_domain_category, to_domain_shift, to_domain_submitter, to_domain_timesheet,
    to_domain_user, to_payload,
};

/// Adapter that wraps the timesheet API client to implement the TimesheetStorage port.
pub struct TimesheetApiAdapter {
    client: timesheet_api::TimesheetClient,
}

impl TimesheetApiAdapter {
    pub fn new(base_url: impl Into<String>, credentials: timesheet_api::Credentials) -> Self {
        Self {
            client: timesheet_api::TimesheetClient::new(base_url, credentials),
        }
    }
}

#[async_trait]
impl TimesheetStorage for TimesheetApiAdapter {
    async fn create_timesheet(
        &self,
        request: &NewTimesheet,
    ) -> Result<Option<Timesheet>, StorageError> {
        let payload = to_payload(request);
        let created = self
            .client
            .create_timesheet(&payload)
            .await
            .map_err(map_api_error)?;

        // Already stored at this point, so an unreadable echo is not an error.
        Ok(created.and_then(|t| {
            to_domain_timesheet(t)
                .map_err(|e| tracing::warn!("Stored timesheet echo is unreadable: {}", e))
                .ok()
        }))
    }

    async fn list_timesheets(&self) -> Result<Vec<Timesheet>, StorageError> {
        let timesheets = self
            .client
            .fetch_timesheets()
            .await
            .map_err(map_api_error)?;

        Ok(timesheets
            .into_iter()
            .filter_map(|t| {
                to_domain_timesheet(t)
                    .map_err(|e| tracing::warn!("Skipping unreadable timesheet: {}", e))
                    .ok()
            })
            .collect())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let categories = self
            .client
            .fetch_task_categories()
            .await
            .map_err(map_api_error)?;
        Ok(categories.into_iter().map(to_domain_category).collect())
    }

    async fn list_shifts(&self) -> Result<Vec<Shift>, StorageError> {
        let shifts = self.client.fetch_shifts().await.map_err(map_api_error)?;
        Ok(shifts.into_iter().map(to_domain_shift).collect())
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, StorageError> {
        let users = self.client.fetch_users().await.map_err(map_api_error)?;
        Ok(users.into_iter().map(to_domain_user).collect())
    }

    async fn current_submitter(&self) -> Result<Submitter, StorageError> {
        let user = self
            .client
            .fetch_current_user()
            .await
            .map_err(map_api_error)?;
        Ok(to_domain_submitter(&user))
    }
}

fn map_api_error(e: timesheet_api::TimesheetApiError) -> StorageError {
    if e.is_unauthorized() {
        tracing::debug!("Access denied: {}", e);
        return StorageError::AccessDenied;
    }

    match e {
        timesheet_api::TimesheetApiError::Status { status, body } => {
            StorageError::Rejected { status, body }
        }
        timesheet_api::TimesheetApiError::ResponseError(msg) => StorageError::Transport(msg),
        timesheet_api::TimesheetApiError::ParsingError(msg) => StorageError::InvalidResponse(msg),
    }
}
