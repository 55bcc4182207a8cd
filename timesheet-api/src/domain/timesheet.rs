use serde::{Deserialize, Serialize};

/// Body of `POST /api/timesheets/posttimesheet`.
///
/// `hours_worked` is `HH:MM:SS`; `user_id` is sent as `null` when an admin
/// submits for themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetPayload {
    pub work_date: String,
    pub hours_worked: String,
    pub details: String,
    pub category_id: i64,
    pub shift_id: i64,
    pub user_id: Option<i64>,
}

impl TimesheetPayload {
    pub fn new(
        work_date: String,
        hours_worked: String,
        details: String,
        category_id: i64,
        shift_id: i64,
        user_id: Option<i64>,
    ) -> Self {
        Self {
            work_date,
            hours_worked,
            details,
            category_id,
            shift_id,
            user_id,
        }
    }
}

/// A timesheet record as stored by the service.
///
/// Older records may lack category, shift or user, so those are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timesheet {
    pub timesheet_id: i64,
    pub work_date: String,
    #[serde(default)]
    pub hours_worked: Option<String>,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub shift_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_camel_case_with_null_user() {
        let payload = TimesheetPayload::new(
            "2024-03-01".to_string(),
            "00:00:03".to_string(),
            "wrote spec".to_string(),
            2,
            1,
            None,
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["workDate"], "2024-03-01");
        assert_eq!(json["hoursWorked"], "00:00:03");
        assert_eq!(json["categoryId"], 2);
        assert_eq!(json["shiftId"], 1);
        assert!(json["userId"].is_null());
    }

    #[test]
    fn timesheet_tolerates_missing_optional_fields() {
        let raw = r#"{"timesheetId": 11, "workDate": "2024-03-01"}"#;
        let timesheet: Timesheet = serde_json::from_str(raw).unwrap();

        assert_eq!(timesheet.timesheet_id, 11);
        assert_eq!(timesheet.hours_worked, None);
        assert_eq!(timesheet.details, "");
        assert_eq!(timesheet.user_id, None);
    }
}
