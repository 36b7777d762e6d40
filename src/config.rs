use std::env;

use tracing::info;

use crate::error::AppError;
use crate::geo::{CampusArea, Coordinate};

/// Campus reference point for the current deployment.
pub const DEFAULT_CAMPUS_LATITUDE: f64 = -7.633;
pub const DEFAULT_CAMPUS_LONGITUDE: f64 = 111.5415;
pub const DEFAULT_CAMPUS_RADIUS_M: f64 = 250.0;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub campus: CampusArea,
}

impl AppConfig {
    /// Loads configuration from the environment. The API base URL is
    /// required; the campus reference point falls back to the deployment
    /// defaults above.
    pub fn from_env() -> Result<Self, AppError> {
        let api_base_url = env::var("DIGILING_API_URL")
            .map_err(|_| AppError::Config("DIGILING_API_URL is not set".to_string()))?;

        let campus = CampusArea::new(
            Coordinate::new(
                parse_or("DIGILING_CAMPUS_LAT", DEFAULT_CAMPUS_LATITUDE)?,
                parse_or("DIGILING_CAMPUS_LON", DEFAULT_CAMPUS_LONGITUDE)?,
            ),
            parse_or("DIGILING_CAMPUS_RADIUS_M", DEFAULT_CAMPUS_RADIUS_M)?,
        );

        Ok(Self {
            api_base_url,
            campus,
        })
    }

    /// Bearer token for authenticated commands.
    pub fn token_from_env() -> Result<String, AppError> {
        env::var("DIGILING_TOKEN")
            .map_err(|_| AppError::Config("DIGILING_TOKEN is not set".to_string()))
    }

    /// Configured position source, when one is present.
    pub fn position_from_env() -> Result<Option<Coordinate>, AppError> {
        match (env::var("DIGILING_LATITUDE"), env::var("DIGILING_LONGITUDE")) {
            (Ok(lat), Ok(lon)) => {
                let latitude = lat.parse().map_err(|_| {
                    AppError::Config("DIGILING_LATITUDE is not a number".to_string())
                })?;
                let longitude = lon.parse().map_err(|_| {
                    AppError::Config("DIGILING_LONGITUDE is not a number".to_string())
                })?;
                Ok(Some(Coordinate::new(latitude, longitude)))
            }
            _ => Ok(None),
        }
    }
}

fn parse_or(key: &str, default: f64) -> Result<f64, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("{} is not a number", key))),
        Err(_) => {
            info!("{} not set, using default {}", key, default);
            Ok(default)
        }
    }
}
