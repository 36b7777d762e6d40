use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, as used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A latitude/longitude pair in degrees.
///
/// Ephemeral: held only for the duration of one attendance attempt, never
/// persisted client-side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two coordinates in meters (haversine).
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// A campus reference point plus the radius around it that counts as
/// "on campus". The radius comes from configuration, not from this module.
#[derive(Debug, Clone, Copy)]
pub struct CampusArea {
    pub center: Coordinate,
    pub radius_m: f64,
}

impl CampusArea {
    pub fn new(center: Coordinate, radius_m: f64) -> Self {
        Self { center, radius_m }
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        distance_meters(point, self.center) <= self.radius_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campus_center() -> Coordinate {
        Coordinate::new(-7.633, 111.5415)
    }

    fn campus() -> CampusArea {
        CampusArea::new(campus_center(), 250.0)
    }

    #[test]
    fn identical_points_are_zero_meters_apart() {
        let p = campus_center();
        assert_eq!(distance_meters(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = campus_center();
        let b = Coordinate::new(-6.2, 106.816);
        assert!((distance_meters(a, b) - distance_meters(b, a)).abs() < 1e-9);
    }

    #[test]
    fn campus_center_is_within_campus() {
        assert!(campus().contains(campus_center()));
    }

    #[test]
    fn point_ten_kilometers_north_is_outside() {
        let center = campus_center();
        // Moving along a meridian, haversine reduces to R * delta_lat.
        let d_lat = (10_000.0 / EARTH_RADIUS_M).to_degrees();
        let point = Coordinate::new(center.latitude + d_lat, center.longitude);

        let distance = distance_meters(point, center);
        assert!((distance - 10_000.0).abs() < 1.0, "got {distance}");
        assert!(!campus().contains(point));
    }

    #[test]
    fn point_just_inside_the_radius_is_within() {
        let center = campus_center();
        let d_lat = (200.0 / EARTH_RADIUS_M).to_degrees();
        assert!(
            campus().contains(Coordinate::new(center.latitude + d_lat, center.longitude))
        );
    }

    #[test]
    fn antipodal_points_stay_finite() {
        let north = Coordinate::new(90.0, 0.0);
        let south = Coordinate::new(-90.0, 0.0);
        let distance = distance_meters(north, south);

        assert!(distance.is_finite());
        assert!((distance - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1.0);
    }
}
