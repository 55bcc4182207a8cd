use time::{macros::format_description, Date};

use crate::domain::{
    models::{
        Category, CategoryId, HoursWorked, NewTimesheet, Role, Shift, ShiftId, Submitter,
        Timesheet, TimesheetId, UserId, UserSummary,
    },
    StorageError,
};

fn parse_work_date(raw: &str) -> Result<Date, StorageError> {
    // Some records carry a full timestamp; only the date part matters.
    let date_part = raw.get(..10).unwrap_or(raw);
    Date::parse(date_part, format_description!("[year]-[month]-[day]"))
        .map_err(|e| StorageError::InvalidResponse(format!("invalid work date {:?}: {}", raw, e)))
}

pub fn to_domain_timesheet(t: timesheet_api::Timesheet) -> Result<Timesheet, StorageError> {
    Ok(Timesheet {
        id: TimesheetId::new(t.timesheet_id),
        work_date: parse_work_date(&t.work_date)?,
        hours_worked: t.hours_worked.and_then(|h| h.parse::<HoursWorked>().ok()),
        details: t.details,
        category_id: t.category_id.map(CategoryId::new),
        shift_id: t.shift_id.map(ShiftId::new),
        user_id: t.user_id.map(UserId::new),
    })
}

pub fn to_domain_category(c: timesheet_api::TaskCategory) -> Category {
    Category {
        id: CategoryId::new(c.category_id),
        name: c.category_name,
    }
}

pub fn to_domain_shift(s: timesheet_api::Shift) -> Shift {
    Shift {
        id: ShiftId::new(s.shift_id),
        name: s.shift_name,
    }
}

/// Label a user by first name, then email, then id.
pub fn to_domain_user(u: timesheet_api::UserSummary) -> UserSummary {
    let name = [u.first_name, u.email]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or_else(|| format!("User {}", u.user_id));

    UserSummary {
        id: UserId::new(u.user_id),
        name,
    }
}

pub fn to_domain_submitter(user: &timesheet_api::CurrentUser) -> Submitter {
    Submitter::new(
        Role::from_claim(user.role.as_deref()),
        user.profile_user_id().map(UserId::new),
    )
}

pub fn to_payload(request: &NewTimesheet) -> timesheet_api::TimesheetPayload {
    let work_date = request
        .work_date
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| request.work_date.to_string());

    timesheet_api::TimesheetPayload::new(
        work_date,
        request.hours_worked.to_string(),
        request.details.clone(),
        request.category_id.as_i64(),
        request.shift_id.as_i64(),
        request.user_id.map(|id| id.as_i64()),
    )
}
