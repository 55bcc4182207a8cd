use std::sync::Arc;

use crate::domain::{
    models::{Category, CompletedSession, Shift, Submitter, Timesheet, UserSummary},
    ports::outbound::TimesheetStorage,
    SessionError, StorageError, SubmissionError,
};

use super::SessionCoordinator;

/// Submits finished sessions to remote timesheet storage.
///
/// The session is cleared only after storage confirms the write. Any failure
/// leaves the frozen session and its snapshot in place so the user can retry.
/// A success status counts as confirmation even without a readable body.
pub struct SubmissionGateway<T> {
    storage: Arc<T>,
    coordinator: SessionCoordinator,
}

impl<T> Clone for SubmissionGateway<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            coordinator: self.coordinator.clone(),
        }
    }
}

impl<T: TimesheetStorage> SubmissionGateway<T> {
    pub fn new(storage: Arc<T>, coordinator: SessionCoordinator) -> Self {
        Self {
            storage,
            coordinator,
        }
    }

    pub fn coordinator(&self) -> &SessionCoordinator {
        &self.coordinator
    }

    /// Send `completed` to storage and, on success, reset the session.
    ///
    /// Each stop can be submitted once: the coordinator's pending session is
    /// claimed here and handed back only if storage did not take it. The
    /// request runs on its own task, so dropping the returned future does
    /// not cancel a submission that is already in flight.
    ///
    /// Returns the stored timesheet when the service echoes it back.
    pub async fn submit(
        &self,
        submitter: &Submitter,
        completed: CompletedSession,
    ) -> Result<Option<Timesheet>, SubmissionError> {
        let pending = self.coordinator.take_pending()?;
        if pending.hours_worked() != completed.hours_worked {
            tracing::debug!(
                "Rejected submit of {}: pending session is {}",
                completed.hours_worked,
                pending.hours_worked()
            );
            self.coordinator.restore_pending(pending);
            return Err(SessionError::NothingToSubmit.into());
        }

        let request = match completed.into_new_timesheet(submitter) {
            Ok(request) => request,
            Err(e) => {
                self.coordinator.restore_pending(pending);
                return Err(e);
            }
        };
        tracing::info!(
            "Submitting {} for {} (category {}, shift {})",
            request.hours_worked,
            request.work_date,
            request.category_id,
            request.shift_id
        );

        let storage = self.storage.clone();
        let coordinator = self.coordinator.clone();
        let claimed = pending.clone();
        let task = tokio::spawn(async move {
            match storage.create_timesheet(&request).await {
                Ok(timesheet) => {
                    match &timesheet {
                        Some(t) => tracing::info!("Timesheet {} saved", t.id),
                        None => tracing::info!("Timesheet saved"),
                    }
                    coordinator.settle_submitted();
                    Ok(timesheet)
                }
                Err(e) => {
                    tracing::error!("Failed to save timesheet: {}", e);
                    coordinator.restore_pending(claimed);
                    Err(SubmissionError::from(e))
                }
            }
        });

        task.await.map_err(|e| {
            self.coordinator.restore_pending(pending);
            SubmissionError::Aborted(e.to_string())
        })?
    }

    pub async fn submitter(&self) -> Result<Submitter, StorageError> {
        self.storage.current_submitter().await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, StorageError> {
        self.storage.list_categories().await
    }

    pub async fn shifts(&self) -> Result<Vec<Shift>, StorageError> {
        self.storage.list_shifts().await
    }

    /// Every account, for admins choosing whom to file for.
    pub async fn users(&self) -> Result<Vec<UserSummary>, StorageError> {
        self.storage.list_users().await
    }

    /// Timesheets visible to the caller, newest work date first.
    pub async fn timesheets(&self) -> Result<Vec<Timesheet>, StorageError> {
        let mut timesheets = self.storage.list_timesheets().await?;
        timesheets.sort_by(|a, b| b.work_date.cmp(&a.work_date).then(b.id.cmp(&a.id)));
        Ok(timesheets)
    }
}
