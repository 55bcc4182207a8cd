use async_trait::async_trait;

use crate::domain::{
    models::{Category, NewTimesheet, Shift, Submitter, Timesheet, UserSummary},
    StorageError,
};

/// Outbound port for the remote timesheet storage service.
///
/// Implementations are created with the caller's credentials, so the
/// authenticated user is implied rather than passed to each method.
#[async_trait]
pub trait TimesheetStorage: Send + Sync + 'static {
    /// Create a timesheet record.
    ///
    /// `Ok` means the record was stored. The stored record is returned when
    /// the service echoes it back.
    async fn create_timesheet(
        &self,
        request: &NewTimesheet,
    ) -> Result<Option<Timesheet>, StorageError>;

    /// Timesheets visible to the caller.
    async fn list_timesheets(&self) -> Result<Vec<Timesheet>, StorageError>;

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;

    async fn list_shifts(&self) -> Result<Vec<Shift>, StorageError>;

    /// Every account. Only admins are allowed to list them.
    async fn list_users(&self) -> Result<Vec<UserSummary>, StorageError>;

    /// Role and profile of the authenticated user.
    async fn current_submitter(&self) -> Result<Submitter, StorageError>;
}
