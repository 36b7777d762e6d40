use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Portal roles, as issued inside the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Counselor,
    Student,
}

/// Routed pages of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Dashboard,
    Attendance,
    StudentProfile,
    CaseJournal,
    Aspirations,
    Consultation,
    StudentDirectory,
    AttendanceReport,
    UserManagement,
}

impl Destination {
    pub fn path(self) -> &'static str {
        match self {
            Destination::Dashboard => "/dashboard",
            Destination::Attendance => "/attendance",
            Destination::StudentProfile => "/profile",
            Destination::CaseJournal => "/case-journal",
            Destination::Aspirations => "/aspirations",
            Destination::Consultation => "/consultation",
            Destination::StudentDirectory => "/students",
            Destination::AttendanceReport => "/reports/attendance",
            Destination::UserManagement => "/user-management",
        }
    }
}

impl Role {
    /// Which pages each role may navigate to.
    pub fn allowed_destinations(self) -> &'static [Destination] {
        match self {
            Role::Admin => &[
                Destination::Dashboard,
                Destination::UserManagement,
                Destination::AttendanceReport,
            ],
            Role::Counselor => &[
                Destination::Dashboard,
                Destination::StudentDirectory,
                Destination::CaseJournal,
                Destination::Aspirations,
                Destination::Consultation,
                Destination::AttendanceReport,
            ],
            Role::Student => &[
                Destination::Dashboard,
                Destination::Attendance,
                Destination::StudentProfile,
                Destination::CaseJournal,
                Destination::Aspirations,
                Destination::Consultation,
            ],
        }
    }

    pub fn can_access(self, destination: Destination) -> bool {
        self.allowed_destinations().contains(&destination)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// JWT payload issued by the portal backend.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    name: String,
    username: String,
    email: String,
    role: Role,
    exp: usize,
}

/// Explicit session context handed to controllers at construction time,
/// instead of an ambient global auth store.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    /// Builds a session from a bearer token by decoding its claims.
    ///
    /// The client holds no signing secret, so the signature is not checked
    /// here; the backend re-validates the token on every request. Expired
    /// tokens are rejected locally.
    pub fn from_token(token: impl Into<String>) -> Result<Self, AppError> {
        let token = token.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();

        let data = decode::<Claims>(&token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|e| AppError::Auth(format!("invalid bearer token: {}", e)))?;

        let claims = data.claims;
        Ok(Self {
            token,
            user: User {
                id: claims.sub,
                name: claims.name,
                username: claims.username,
                email: claims.email,
                role: claims.role,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn token_with_exp(exp: i64) -> String {
        let claims = Claims {
            sub: "u-17".to_string(),
            name: "Siti Rahma".to_string(),
            username: "siti".to_string(),
            email: "siti@sekolah.sch.id".to_string(),
            role: Role::Student,
            exp: exp.max(0) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("token encoding failed")
    }

    #[test]
    fn session_decodes_user_from_token() {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let session = Session::from_token(token_with_exp(exp)).expect("valid session");

        assert_eq!(session.user.id, "u-17");
        assert_eq!(session.user.username, "siti");
        assert_eq!(session.user.role, Role::Student);
    }

    #[test]
    fn expired_token_is_rejected() {
        let exp = chrono::Utc::now().timestamp() - 3600;
        assert!(Session::from_token(token_with_exp(exp)).is_err());
    }

    #[test]
    fn students_reach_attendance_but_not_user_management() {
        assert!(Role::Student.can_access(Destination::Attendance));
        assert!(!Role::Student.can_access(Destination::UserManagement));
    }

    #[test]
    fn staff_roles_do_not_record_attendance() {
        assert!(!Role::Counselor.can_access(Destination::Attendance));
        assert!(!Role::Admin.can_access(Destination::Attendance));
        assert!(Role::Admin.can_access(Destination::UserManagement));
        assert!(Role::Counselor.can_access(Destination::AttendanceReport));
    }
}
