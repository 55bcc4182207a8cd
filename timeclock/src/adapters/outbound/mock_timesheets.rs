//! In-memory timesheet storage for unit tests.

use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::{
    models::{
        Category, CategoryId, NewTimesheet, Role, Shift, ShiftId, Submitter, Timesheet,
        TimesheetId, UserId, UserSummary,
    },
    ports::outbound::TimesheetStorage,
    StorageError,
};

#[derive(Debug, Clone)]
enum Failure {
    Rejected { status: u16, body: String },
    Transport(String),
}

/// Mock storage that records every create request.
///
/// Created timesheets are kept and returned by `list_timesheets`, so a
/// submit-then-list flow behaves like the real service.
pub struct MockTimesheetStorage {
    requests: Mutex<Vec<NewTimesheet>>,
    stored: Mutex<Vec<Timesheet>>,
    categories: Vec<Category>,
    shifts: Vec<Shift>,
    users: Vec<UserSummary>,
    submitter: Submitter,
    failure: Option<Failure>,
    echo: bool,
    gate: Option<Arc<Notify>>,
    next_id: AtomicI64,
}

impl Default for MockTimesheetStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTimesheetStorage {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            stored: Mutex::new(Vec::new()),
            categories: vec![
                Category {
                    id: CategoryId::new(1),
                    name: "Development".to_string(),
                },
                Category {
                    id: CategoryId::new(2),
                    name: "Documentation".to_string(),
                },
            ],
            shifts: vec![
                Shift {
                    id: ShiftId::new(1),
                    name: "Day".to_string(),
                },
                Shift {
                    id: ShiftId::new(2),
                    name: "Night".to_string(),
                },
            ],
            users: vec![
                UserSummary {
                    id: UserId::new(7),
                    name: "Ada".to_string(),
                },
                UserSummary {
                    id: UserId::new(9),
                    name: "User 9".to_string(),
                },
            ],
            submitter: Submitter::new(Role::User, Some(UserId::new(7))),
            failure: None,
            echo: true,
            gate: None,
            next_id: AtomicI64::new(1),
        }
    }

    /// Fail every create with the given status and body.
    pub fn with_rejection(mut self, status: u16, body: impl Into<String>) -> Self {
        self.failure = Some(Failure::Rejected {
            status,
            body: body.into(),
        });
        self
    }

    /// Fail every create as if the service were unreachable.
    pub fn with_transport_failure(mut self, msg: impl Into<String>) -> Self {
        self.failure = Some(Failure::Transport(msg.into()));
        self
    }

    /// Store creates without echoing the stored record back.
    pub fn without_echo(mut self) -> Self {
        self.echo = false;
        self
    }

    /// Hold each create until `gate` is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn with_submitter(mut self, submitter: Submitter) -> Self {
        self.submitter = submitter;
        self
    }

    /// Every create request received, in order, including failed ones.
    pub fn requests(&self) -> Vec<NewTimesheet> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl TimesheetStorage for MockTimesheetStorage {
    async fn create_timesheet(
        &self,
        request: &NewTimesheet,
    ) -> Result<Option<Timesheet>, StorageError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.failure {
            Some(Failure::Rejected { status, body }) => {
                return Err(StorageError::Rejected {
                    status: *status,
                    body: body.clone(),
                })
            }
            Some(Failure::Transport(msg)) => return Err(StorageError::Transport(msg.clone())),
            None => {}
        }

        let timesheet = Timesheet {
            id: TimesheetId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            work_date: request.work_date,
            hours_worked: Some(request.hours_worked),
            details: request.details.clone(),
            category_id: Some(request.category_id),
            shift_id: Some(request.shift_id),
            user_id: request.user_id,
        };
        self.stored
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(timesheet.clone());
        Ok(self.echo.then_some(timesheet))
    }

    async fn list_timesheets(&self) -> Result<Vec<Timesheet>, StorageError> {
        Ok(self
            .stored
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        Ok(self.categories.clone())
    }

    async fn list_shifts(&self) -> Result<Vec<Shift>, StorageError> {
        Ok(self.shifts.clone())
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, StorageError> {
        if !self.submitter.role.is_admin() {
            return Err(StorageError::AccessDenied);
        }
        Ok(self.users.clone())
    }

    async fn current_submitter(&self) -> Result<Submitter, StorageError> {
        Ok(self.submitter)
    }
}
