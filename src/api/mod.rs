pub mod auth;
pub mod dto;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::AppError;
use crate::models::{AttendanceRecord, AttendanceSubmission};

/// Client-side contract of the external attendance service. The backend
/// owns the one-record-per-day rule; this client never enforces it.
#[async_trait]
pub trait AttendanceService: Send + Sync {
    /// Records today's attendance for the authenticated student.
    async fn submit(
        &self,
        submission: &AttendanceSubmission,
    ) -> Result<AttendanceRecord, AppError>;

    /// Fetches today's record, or `None` when nothing is recorded yet.
    async fn today(&self) -> Result<Option<AttendanceRecord>, AppError>;

    /// Daily report, visible to counselors and admins.
    async fn daily_report(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, AppError>;
}

/// Extracts a human-readable message from a non-2xx response: the JSON
/// `message` field where present, the raw body otherwise.
pub(crate) async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<dto::ErrorBody>(&body) {
        Ok(parsed) => parsed.message,
        Err(_) if !body.is_empty() => body,
        Err(_) => status.to_string(),
    }
}

pub struct AttendanceHttpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl AttendanceHttpClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("failed to build http client: {}", e)))?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AttendanceService for AttendanceHttpClient {
    async fn submit(
        &self,
        submission: &AttendanceSubmission,
    ) -> Result<AttendanceRecord, AppError> {
        let response = self
            .client
            .post(self.url("/attendance/submit"))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(submission)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Submit(error_message(response).await));
        }

        let parsed: dto::SubmitAttendanceResponse = response.json().await?;
        debug!("attendance service: {}", parsed.message);
        Ok(parsed.data)
    }

    async fn today(&self) -> Result<Option<AttendanceRecord>, AppError> {
        let response = self
            .client
            .get(self.url("/attendance/today"))
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;

        // No record yet for the current day.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AppError::Submit(error_message(response).await));
        }

        Ok(Some(response.json().await?))
    }

    async fn daily_report(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, AppError> {
        let response = self
            .client
            .get(self.url("/attendance/report/daily"))
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Submit(error_message(response).await));
        }

        Ok(response.json().await?)
    }
}

/// Accepts every submission without touching the network. Used for dry
/// runs and offline tests.
pub struct NoopAttendanceService;

#[async_trait]
impl AttendanceService for NoopAttendanceService {
    async fn submit(
        &self,
        submission: &AttendanceSubmission,
    ) -> Result<AttendanceRecord, AppError> {
        Ok(AttendanceRecord {
            status: submission.status.as_str().to_string(),
            mode: Some(submission.mode),
            notes: submission.reason.clone(),
            latitude: submission.latitude,
            longitude: submission.longitude,
            ..Default::default()
        })
    }

    async fn today(&self) -> Result<Option<AttendanceRecord>, AppError> {
        Ok(None)
    }

    async fn daily_report(&self, _date: NaiveDate) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(Vec::new())
    }
}
