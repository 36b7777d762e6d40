pub mod attendance;

pub use attendance::{AttendanceMode, AttendanceRecord, AttendanceStatus, AttendanceSubmission};
