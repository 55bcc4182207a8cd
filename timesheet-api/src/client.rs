use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    domain::{CurrentUser, Shift, TaskCategory, Timesheet, TimesheetPayload, UserSummary},
    TimesheetURL,
};

use super::Credentials;

/// Typed client for the remote timesheet storage service.
#[derive(Debug, Clone)]
pub struct TimesheetClient {
    client: reqwest::Client,
    base_url: TimesheetURL,
    credentials: Credentials,
}

impl TimesheetClient {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: TimesheetURL::new(base_url),
            credentials,
        }
    }

    fn url(&self, path: &str) -> TimesheetURL {
        self.base_url.append_path(path)
    }

    /// Send `request` and return the body of a success response as text.
    async fn send_raw(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<String, TimesheetApiError> {
        let resp = request
            .header("Authorization", self.credentials.as_bearer_header())
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| TimesheetApiError::ResponseError(format!("{}: {}", call_name, e)))?;

        let status = resp.status();
        if !status.is_success() {
            // Body is passed through verbatim so callers can show exactly
            // what the service said.
            let body = resp.text().await.unwrap_or_default();
            tracing::debug!("{} returned {}: {}", call_name, status, body);
            return Err(TimesheetApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        resp.text()
            .await
            .map_err(|e| TimesheetApiError::ResponseError(format!("{}: {}", call_name, e)))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, TimesheetApiError> {
        let body = self.send_raw(request, call_name).await?;
        serde_json::from_str(&body).map_err(|e| {
            TimesheetApiError::ParsingError(format!(
                "Failed to parse {} response as JSON: {}",
                call_name, e
            ))
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, TimesheetApiError> {
        let call_name = format!("GET {}", path);
        self.send(self.client.get(self.url(path).as_ref()), &call_name)
            .await
    }

    pub async fn fetch_current_user(&self) -> Result<CurrentUser, TimesheetApiError> {
        self.fetch("/api/users/me").await
    }

    pub async fn fetch_timesheets(&self) -> Result<Vec<Timesheet>, TimesheetApiError> {
        self.fetch("/api/timesheets").await
    }

    pub async fn fetch_task_categories(&self) -> Result<Vec<TaskCategory>, TimesheetApiError> {
        self.fetch("/api/task-categories").await
    }

    pub async fn fetch_shifts(&self) -> Result<Vec<Shift>, TimesheetApiError> {
        self.fetch("/api/shifts").await
    }

    /// Every account, for admins filing on someone else's behalf.
    pub async fn fetch_users(&self) -> Result<Vec<UserSummary>, TimesheetApiError> {
        self.fetch("/api/users/all").await
    }

    /// Create a timesheet.
    ///
    /// A success status means the row was stored. The service does not always
    /// echo it back as JSON, so the created timesheet is returned only when
    /// the body parses as one.
    pub async fn create_timesheet(
        &self,
        payload: &TimesheetPayload,
    ) -> Result<Option<Timesheet>, TimesheetApiError> {
        let path = "/api/timesheets/posttimesheet";
        let call_name = format!("POST {}", path);
        let body = self
            .send_raw(
                self.client.post(self.url(path).as_ref()).json(payload),
                &call_name,
            )
            .await?;

        match serde_json::from_str::<Timesheet>(&body) {
            Ok(timesheet) => Ok(Some(timesheet)),
            Err(e) => {
                tracing::debug!("{} stored without a timesheet echo: {}", call_name, e);
                Ok(None)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum TimesheetApiError {
    #[error("{status} - {body}")]
    Status { status: u16, body: String },
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
}

impl TimesheetApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Status { status, .. }
                if *status == StatusCode::UNAUTHORIZED.as_u16()
                    || *status == StatusCode::FORBIDDEN.as_u16()
        )
    }
}
