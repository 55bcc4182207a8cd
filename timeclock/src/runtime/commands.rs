use std::io::Write;

use anyhow::{anyhow, Context, Result};
use time::{macros::format_description, OffsetDateTime};

use crate::{
    cli::OutArgs,
    domain::{
        models::{CompletedSession, HoursWorked},
        ports::outbound::TimesheetStorage,
        services::{SessionCoordinator, SubmissionGateway},
        SessionError, StorageError, SubmissionError,
    },
    time_utils::to_local_time,
};

fn ordering(e: SessionError) -> anyhow::Error {
    anyhow!(e.user_message())
}

fn clock_time(dt: OffsetDateTime) -> String {
    to_local_time(dt)
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| dt.to_string())
}

/// Time in after checking that the user may track time.
pub async fn time_in<T: TimesheetStorage>(
    gateway: &SubmissionGateway<T>,
    out: &mut impl Write,
) -> Result<()> {
    let submitter = gateway
        .submitter()
        .await
        .context("Failed to load user profile")?;
    submitter.ensure_can_track().map_err(ordering)?;

    time_in_offline(gateway.coordinator(), out)
}

/// Time in without a profile check, for when the service is not configured.
pub fn time_in_offline(coordinator: &SessionCoordinator, out: &mut impl Write) -> Result<()> {
    let started_at = coordinator.start().map_err(ordering)?;
    writeln!(out, "Timed in at {}", clock_time(started_at))?;
    Ok(())
}

/// Time out and submit. A session stopped earlier but not yet saved is resubmitted.
pub async fn time_out<T: TimesheetStorage>(
    gateway: &SubmissionGateway<T>,
    args: OutArgs,
    out: &mut impl Write,
) -> Result<()> {
    let coordinator = gateway.coordinator();
    let finished = if coordinator.is_running() {
        let finished = coordinator.stop().map_err(ordering)?;
        writeln!(out, "Timed out after {}", finished.hours_worked())?;
        finished
    } else if let Some(pending) = coordinator.pending() {
        writeln!(
            out,
            "Resubmitting {} from the stopped session",
            pending.hours_worked()
        )?;
        pending
    } else {
        return Err(ordering(SessionError::NotRunning));
    };

    let submitter = gateway
        .submitter()
        .await
        .context("Failed to load user profile")?;

    let hours = finished.hours_worked();
    let work_date = args.date.unwrap_or(finished.work_date());
    let mut completed = CompletedSession::new(finished)
        .with_details(args.details)
        .with_category(args.category)
        .with_shift(args.shift);
    if let Some(user) = args.user {
        completed = completed.with_user(user);
    }
    if let Some(date) = args.date {
        completed = completed.with_work_date(date);
    }

    match gateway.submit(&submitter, completed).await {
        Ok(Some(timesheet)) => {
            writeln!(
                out,
                "Saved timesheet {} for {} ({})",
                timesheet.id,
                timesheet.work_date,
                timesheet.hours_worked.unwrap_or(hours)
            )?;
            Ok(())
        }
        Ok(None) => {
            writeln!(out, "Saved timesheet for {} ({})", work_date, hours)?;
            Ok(())
        }
        Err(e) => {
            if coordinator.pending().is_some() {
                writeln!(
                    out,
                    "Session kept at {}. Run `timeclock out` again to retry.",
                    hours
                )?;
            }
            Err(match e {
                SubmissionError::Ordering(e) => ordering(e),
                other => other.into(),
            })
        }
    }
}

pub fn status(coordinator: &SessionCoordinator, out: &mut impl Write) -> Result<()> {
    let session = coordinator.session();
    match session.started_at {
        Some(started_at) if session.running => writeln!(
            out,
            "Timed in at {}, {} elapsed",
            clock_time(started_at),
            session.elapsed_display
        )?,
        _ if coordinator.pending().is_some() => writeln!(
            out,
            "Timed out at {}, not yet submitted",
            session.elapsed_display
        )?,
        _ => writeln!(out, "Not timed in")?,
    }
    Ok(())
}

pub async fn list_categories<T: TimesheetStorage>(
    gateway: &SubmissionGateway<T>,
    out: &mut impl Write,
) -> Result<()> {
    let categories = gateway
        .categories()
        .await
        .context("Failed to load categories")?;
    for category in categories {
        writeln!(out, "{:>4}  {}", category.id, category.name)?;
    }
    Ok(())
}

pub async fn list_shifts<T: TimesheetStorage>(
    gateway: &SubmissionGateway<T>,
    out: &mut impl Write,
) -> Result<()> {
    let shifts = gateway.shifts().await.context("Failed to load shifts")?;
    for shift in shifts {
        writeln!(out, "{:>4}  {}", shift.id, shift.name)?;
    }
    Ok(())
}

/// Accounts an admin can pass to `out --user`.
pub async fn list_users<T: TimesheetStorage>(
    gateway: &SubmissionGateway<T>,
    out: &mut impl Write,
) -> Result<()> {
    let users = match gateway.users().await {
        Ok(users) => users,
        Err(StorageError::AccessDenied) => {
            return Err(anyhow!(
                "Access denied. Please check your authentication token or permissions."
            ))
        }
        Err(e) => return Err(anyhow!("Failed to fetch users: {}", e)),
    };

    for user in users {
        writeln!(out, "{:>4}  {}", user.id, user.name)?;
    }
    Ok(())
}

pub async fn list_timesheets<T: TimesheetStorage>(
    gateway: &SubmissionGateway<T>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let timesheets = gateway
        .timesheets()
        .await
        .context("Failed to load timesheets")?;

    if json {
        let rows: Vec<_> = timesheets
            .iter()
            .map(|t| {
                serde_json::json!({
                    "id": t.id,
                    "workDate": t.work_date.to_string(),
                    "hoursWorked": t.hours_worked.map(|h| h.to_string()),
                    "details": t.details,
                    "categoryId": t.category_id,
                    "shiftId": t.shift_id,
                    "userId": t.user_id,
                })
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    if timesheets.is_empty() {
        writeln!(out, "No timesheets")?;
        return Ok(());
    }
    for t in &timesheets {
        let hours = t
            .hours_worked
            .map(|h: HoursWorked| h.to_string())
            .unwrap_or_else(|| "--:--:--".to_string());
        writeln!(out, "{:>6}  {}  {}  {}", t.id, t.work_date, hours, t.details)?;
    }
    Ok(())
}
