use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// How the student attends today. Chosen once per attendance attempt and
/// decides which proximity rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceMode {
    OnSite,
    Remote,
}

impl AttendanceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceMode::OnSite => "ON_SITE",
            AttendanceMode::Remote => "REMOTE",
        }
    }
}

impl fmt::Display for AttendanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Excused,
    Sick,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::Excused => "EXCUSED",
            AttendanceStatus::Sick => "SICK",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload sent to the attendance service. Built once per submission and
/// discarded afterwards; unset optionals are omitted from the wire, not
/// sent as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceSubmission {
    pub status: AttendanceStatus,
    pub mode: AttendanceMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl AttendanceSubmission {
    pub fn new(
        status: AttendanceStatus,
        mode: AttendanceMode,
        reason: Option<String>,
        coordinate: Option<Coordinate>,
    ) -> Self {
        Self {
            status,
            mode,
            reason,
            latitude: coordinate.map(|c| c.latitude),
            longitude: coordinate.map(|c| c.longitude),
        }
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        }
    }
}

/// A stored attendance record as reported by the backend.
///
/// `status` is kept as the backend's string: reports may carry statuses the
/// client never submits (e.g. an unexcused absence entered by staff).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub status: String,
    #[serde(default)]
    pub mode: Option<AttendanceMode>,
    #[serde(default)]
    pub clock_in_time: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn present_on_site_payload_carries_coordinates() {
        let submission = AttendanceSubmission::new(
            AttendanceStatus::Present,
            AttendanceMode::OnSite,
            None,
            Some(Coordinate::new(-7.633, 111.5415)),
        );

        assert_eq!(
            serde_json::to_value(&submission).unwrap(),
            json!({
                "status": "PRESENT",
                "mode": "ON_SITE",
                "latitude": -7.633,
                "longitude": 111.5415,
            })
        );
    }

    #[test]
    fn excused_payload_omits_unset_optionals() {
        let submission = AttendanceSubmission::new(
            AttendanceStatus::Excused,
            AttendanceMode::OnSite,
            Some("family emergency".to_string()),
            None,
        );

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["status"], "EXCUSED");
        assert_eq!(value["reason"], "family emergency");
        assert!(value.get("latitude").is_none());
        assert!(value.get("longitude").is_none());
    }

    #[test]
    fn record_parses_with_minimal_fields() {
        let record: AttendanceRecord =
            serde_json::from_value(json!({ "status": "PRESENT" })).unwrap();

        assert_eq!(record.status, "PRESENT");
        assert_eq!(record.mode, None);
    }

    #[test]
    fn record_parses_mode_spelling() {
        let record: AttendanceRecord =
            serde_json::from_value(json!({ "status": "PRESENT", "mode": "REMOTE" })).unwrap();

        assert_eq!(record.mode, Some(AttendanceMode::Remote));
    }
}
