use time::Date;

use super::{CategoryId, HoursWorked, ShiftId, TimesheetId, UserId};

/// A timesheet record stored by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timesheet {
    pub id: TimesheetId,
    pub work_date: Date,
    pub hours_worked: Option<HoursWorked>,
    pub details: String,
    pub category_id: Option<CategoryId>,
    pub shift_id: Option<ShiftId>,
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub id: ShiftId,
    pub name: String,
}

/// An account an admin can file a timesheet for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
}
