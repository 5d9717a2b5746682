/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A single GPS fix: latitude/longitude in decimal degrees, elevation in
/// meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub ele: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64, ele: f64) -> Self {
        Self { lat, lon, ele }
    }

    /// True iff all three fields are exactly zero.
    pub fn is_unset(&self) -> bool {
        self.lat == 0.0 && self.lon == 0.0 && self.ele == 0.0
    }

    /// The elevation reading, treating exactly zero as "no reading".
    ///
    /// GPX producers that have no altitude fix tend to emit `<ele>0</ele>`,
    /// so a zero elevation is skipped when computing ascent/descent deltas.
    /// A point genuinely at zero meters therefore contributes no delta to
    /// its successor.
    pub fn elevation(&self) -> Option<f64> {
        if self.ele == 0.0 { None } else { Some(self.ele) }
    }

    /// Great-circle (haversine) distance to `other` in kilometers.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let a = GeoPoint::new(0.0, 0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0, 0.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert!((a.distance_to(&b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoPoint::new(48.8566, 2.3522, 35.0);
        let b = GeoPoint::new(51.5074, -0.1278, 11.0);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-9);
        // Paris to London is roughly 344 km
        assert!((a.distance_to(&b) - 344.0).abs() < 1.0);
    }

    #[test]
    fn test_zero_distance_to_self() {
        let p = GeoPoint::new(35.6762, 139.6503, 40.5);
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn test_is_unset() {
        assert!(GeoPoint::default().is_unset());
        assert!(!GeoPoint::new(0.0, 0.0, 1.0).is_unset());
        assert!(!GeoPoint::new(0.1, 0.0, 0.0).is_unset());
    }

    #[test]
    fn test_zero_elevation_reads_as_no_reading() {
        assert_eq!(GeoPoint::new(10.0, 20.0, 0.0).elevation(), None);
        assert_eq!(GeoPoint::new(10.0, 20.0, -5.0).elevation(), Some(-5.0));
        assert_eq!(GeoPoint::new(0.0, 0.0, 100.0).elevation(), Some(100.0));
    }
}
