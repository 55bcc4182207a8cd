use strum::{Display, EnumString};
use time::Date;

use super::{CategoryId, HoursWorked, ShiftId, UserId};
use crate::domain::{SessionError, SubmissionError};

/// What the coordinator hands back when a session is stopped.
///
/// Only the coordinator creates these. The coordinator also keeps its own
/// copy as the one pending submission, so holding a `FinishedSession` does
/// not by itself allow a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedSession {
    hours_worked: HoursWorked,
    work_date: Date,
}

impl FinishedSession {
    pub(crate) fn new(hours_worked: HoursWorked, work_date: Date) -> Self {
        Self {
            hours_worked,
            work_date,
        }
    }

    pub fn hours_worked(&self) -> HoursWorked {
        self.hours_worked
    }

    /// Local calendar date of the stop.
    pub fn work_date(&self) -> Date {
        self.work_date
    }
}

/// A finished session plus the metadata the user filled in at time out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSession {
    pub work_date: Date,
    pub hours_worked: HoursWorked,
    pub details: String,
    pub category_id: Option<CategoryId>,
    pub shift_id: Option<ShiftId>,
    pub user_id: Option<UserId>,
}

impl CompletedSession {
    pub fn new(finished: FinishedSession) -> Self {
        Self {
            work_date: finished.work_date,
            hours_worked: finished.hours_worked,
            details: String::new(),
            category_id: None,
            shift_id: None,
            user_id: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn with_category(mut self, id: impl Into<CategoryId>) -> Self {
        self.category_id = Some(id.into());
        self
    }

    pub fn with_shift(mut self, id: impl Into<ShiftId>) -> Self {
        self.shift_id = Some(id.into());
        self
    }

    pub fn with_user(mut self, id: impl Into<UserId>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    pub fn with_work_date(mut self, work_date: Date) -> Self {
        self.work_date = work_date;
        self
    }

    /// Validate required fields and resolve the target user for `submitter`.
    pub fn into_new_timesheet(self, submitter: &Submitter) -> Result<NewTimesheet, SubmissionError> {
        let details = self.details.trim().to_string();

        let mut missing = Vec::new();
        if details.is_empty() {
            missing.push("Details");
        }
        if self.category_id.is_none() {
            missing.push("Category");
        }
        if self.shift_id.is_none() {
            missing.push("Shift");
        }
        let (Some(category_id), Some(shift_id), true) =
            (self.category_id, self.shift_id, missing.is_empty())
        else {
            return Err(SubmissionError::validation(format!(
                "Please fill all fields (Details, Category, Shift) before Time Out. Missing: {}",
                missing.join(", ")
            )));
        };

        let user_id = submitter.resolve_target(self.user_id);
        if user_id.is_none() && !submitter.role.is_admin() {
            return Err(SubmissionError::validation(
                "User ID is required. Please create a profile or log in again.",
            ));
        }

        Ok(NewTimesheet {
            work_date: self.work_date,
            hours_worked: self.hours_worked,
            details,
            category_id,
            shift_id,
            user_id,
        })
    }
}

/// A validated timesheet creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimesheet {
    pub work_date: Date,
    pub hours_worked: HoursWorked,
    pub details: String,
    pub category_id: CategoryId,
    pub shift_id: ShiftId,
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
pub enum Role {
    #[default]
    #[strum(ascii_case_insensitive, serialize = "ROLE_USER")]
    User,
    #[strum(ascii_case_insensitive, serialize = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// Parse a role claim, treating missing or unknown roles as a plain user.
    pub fn from_claim(claim: Option<&str>) -> Self {
        claim.and_then(|c| c.parse().ok()).unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// The person timing in and out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submitter {
    pub role: Role,
    pub profile_user_id: Option<UserId>,
}

impl Submitter {
    pub fn new(role: Role, profile_user_id: Option<UserId>) -> Self {
        Self {
            role,
            profile_user_id,
        }
    }

    /// Users need a profile before tracking time; admins may track without one.
    pub fn ensure_can_track(&self) -> Result<(), SessionError> {
        if self.profile_user_id.is_none() && !self.role.is_admin() {
            return Err(SessionError::MissingProfile);
        }
        Ok(())
    }

    /// Admins file for the selected user or themselves; users always file for themselves.
    pub fn resolve_target(&self, selected: Option<UserId>) -> Option<UserId> {
        match self.role {
            Role::Admin => selected.or(self.profile_user_id),
            Role::User => self.profile_user_id,
        }
    }
}
