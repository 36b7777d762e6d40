use std::sync::Arc;

use tracing::{info, warn};

use crate::api::AttendanceService;
use crate::error::{AppError, LocationError};
use crate::geo::{CampusArea, Coordinate};
use crate::location::LocationProvider;
use crate::models::{AttendanceMode, AttendanceStatus, AttendanceSubmission};

/// Observable phase of one attendance attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    ChoosingMode,
    AcquiringLocation,
    ReadyToAct,
    Submitting,
    Submitted,
    LocationFailed,
    SubmitFailed,
}

/// Sequences one attendance attempt: mode selection, location acquisition,
/// proximity gating, status choice and submission.
///
/// One instance per page visit; nothing outside the instance observes its
/// state. Dropping the instance, or a method future mid-await, abandons the
/// in-flight request without further state updates.
pub struct CheckInFlow {
    service: Arc<dyn AttendanceService>,
    locations: Arc<dyn LocationProvider>,
    campus: CampusArea,
    state: FlowState,
    mode: Option<AttendanceMode>,
    coordinate: Option<Coordinate>,
    within_campus: bool,
    location_error: Option<LocationError>,
    confirmed_status: Option<String>,
}

impl CheckInFlow {
    pub fn new(
        service: Arc<dyn AttendanceService>,
        locations: Arc<dyn LocationProvider>,
        campus: CampusArea,
    ) -> Self {
        Self {
            service,
            locations,
            campus,
            state: FlowState::ChoosingMode,
            mode: None,
            coordinate: None,
            within_campus: false,
            location_error: None,
            confirmed_status: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn mode(&self) -> Option<AttendanceMode> {
        self.mode
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    pub fn is_within_campus(&self) -> bool {
        self.within_campus
    }

    pub fn location_error(&self) -> Option<&LocationError> {
        self.location_error.as_ref()
    }

    /// The day's confirmed status, once submitted or loaded.
    pub fn confirmed_status(&self) -> Option<&str> {
        self.confirmed_status.as_deref()
    }

    /// Loads today's record from the service; an existing one ends the flow
    /// immediately, before any location work.
    pub async fn load_today(&mut self) -> Result<Option<String>, AppError> {
        if let Some(record) = self.service.today().await? {
            info!("attendance already recorded today: {}", record.status);
            self.confirmed_status = Some(record.status.clone());
            self.mode = record.mode;
            self.state = FlowState::Submitted;
            return Ok(Some(record.status));
        }
        Ok(None)
    }

    /// Picks the attendance mode and acquires the current position. The
    /// acquirer runs for both modes: remote mode records the coordinate for
    /// audit, on-site mode also gates on it.
    pub async fn select_mode(&mut self, mode: AttendanceMode) -> Result<(), AppError> {
        if self.state != FlowState::ChoosingMode {
            return Err(AppError::Validation(
                "mode already chosen for this attempt".to_string(),
            ));
        }

        info!("attendance mode selected: {}", mode);
        self.mode = Some(mode);
        self.state = FlowState::AcquiringLocation;
        self.acquire_location().await
    }

    /// Re-invokes the acquirer after a location failure.
    pub async fn retry_location(&mut self) -> Result<(), AppError> {
        if self.state != FlowState::LocationFailed {
            return Err(AppError::Validation(
                "no location failure to retry".to_string(),
            ));
        }
        self.state = FlowState::AcquiringLocation;
        self.acquire_location().await
    }

    async fn acquire_location(&mut self) -> Result<(), AppError> {
        match self.locations.acquire().await {
            Ok(coordinate) => {
                self.coordinate = Some(coordinate);
                self.within_campus = self.campus.contains(coordinate);
                self.location_error = None;
                self.state = FlowState::ReadyToAct;
                info!(
                    "location acquired ({}, {}), within campus: {}",
                    coordinate.latitude, coordinate.longitude, self.within_campus
                );
                Ok(())
            }
            Err(err) => {
                warn!("location acquisition failed: {}", err);
                self.coordinate = None;
                self.within_campus = false;
                self.location_error = Some(err.clone());
                self.state = FlowState::LocationFailed;
                Err(AppError::Location(err))
            }
        }
    }

    /// Returns to mode selection, discarding the acquired coordinate.
    pub fn reset_mode(&mut self) -> Result<(), AppError> {
        match self.state {
            FlowState::Submitting | FlowState::Submitted => Err(AppError::Validation(
                "attempt already submitted".to_string(),
            )),
            _ => {
                self.mode = None;
                self.coordinate = None;
                self.within_campus = false;
                self.location_error = None;
                self.state = FlowState::ChoosingMode;
                Ok(())
            }
        }
    }

    /// Chooses a status and submits it to the service.
    ///
    /// Local rejections (`OutOfRange`, `Validation`, a retained location
    /// failure for `Present`) never reach the network. A failed submission
    /// keeps the acquired coordinate so the retry skips re-acquisition.
    pub async fn choose_status(
        &mut self,
        status: AttendanceStatus,
        reason: Option<&str>,
    ) -> Result<String, AppError> {
        let mode = match (self.state, self.mode) {
            (
                FlowState::ReadyToAct | FlowState::LocationFailed | FlowState::SubmitFailed,
                Some(mode),
            ) => mode,
            _ => {
                return Err(AppError::Validation(
                    "no attendance attempt in progress".to_string(),
                ));
            }
        };

        let reason = match status {
            AttendanceStatus::Present => {
                if let Some(err) = &self.location_error {
                    // PRESENT needs a verifiable coordinate; only excused
                    // and sick may proceed without one.
                    return Err(AppError::Location(err.clone()));
                }
                if mode == AttendanceMode::OnSite && !self.within_campus {
                    return Err(AppError::OutOfRange);
                }
                None
            }
            AttendanceStatus::Excused | AttendanceStatus::Sick => match reason.map(str::trim) {
                Some(text) if !text.is_empty() => Some(text.to_string()),
                _ => {
                    return Err(AppError::Validation(format!(
                        "a reason is required for {}",
                        status
                    )));
                }
            },
        };

        let submission = AttendanceSubmission::new(status, mode, reason, self.coordinate);

        self.state = FlowState::Submitting;
        info!("submitting attendance: {} ({})", status, mode);

        match self.service.submit(&submission).await {
            Ok(record) => {
                info!("attendance recorded: {}", record.status);
                self.confirmed_status = Some(record.status.clone());
                self.state = FlowState::Submitted;
                Ok(record.status)
            }
            Err(err) => {
                warn!("attendance submission failed: {}", err);
                self.state = FlowState::SubmitFailed;
                Err(err)
            }
        }
    }
}
