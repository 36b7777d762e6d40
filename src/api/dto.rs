use serde::{Deserialize, Serialize};

use crate::models::AttendanceRecord;
use crate::session::User;

/// Success envelope returned by the submit endpoint.
#[derive(Debug, Deserialize)]
pub struct SubmitAttendanceResponse {
    pub message: String,
    pub data: AttendanceRecord,
}

/// Error body the backend returns on non-2xx responses, when it is JSON.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub data: LoginData,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct MeResponse {
    pub data: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submit_envelope_parses() {
        let parsed: SubmitAttendanceResponse = serde_json::from_value(json!({
            "message": "ok",
            "data": { "status": "PRESENT", "mode": "ON_SITE" },
        }))
        .unwrap();

        assert_eq!(parsed.message, "ok");
        assert_eq!(parsed.data.status, "PRESENT");
    }

    #[test]
    fn error_body_parses_message() {
        let parsed: ErrorBody =
            serde_json::from_value(json!({ "message": "attendance already recorded" })).unwrap();
        assert_eq!(parsed.message, "attendance already recorded");
    }
}
