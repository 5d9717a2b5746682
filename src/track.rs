use chrono::{DateTime, TimeDelta, Utc};

use crate::geo::GeoPoint;

/// A timestamped GPS fix decoded from one `<trkpt>` element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WayPoint {
    pub time: DateTime<Utc>,
    pub point: GeoPoint,
}

/// Running summary of one track file, built by folding waypoints in
/// document order.
#[derive(Debug, Clone)]
pub struct TrackInfo {
    file_path: String,
    start_time: Option<DateTime<Utc>>,
    duration: TimeDelta,
    distance: f64,
    ascent: u32,
    descent: u32,
    last_point: Option<GeoPoint>,
}

impl TrackInfo {
    pub fn new(file_path: String) -> Self {
        Self {
            file_path,
            start_time: None,
            duration: TimeDelta::zero(),
            distance: 0.0,
            ascent: 0,
            descent: 0,
            last_point: None,
        }
    }

    /// Fold one waypoint into the summary.
    ///
    /// Duration is always recomputed from the start time, so a waypoint
    /// that is out of time order overwrites it with a smaller (possibly
    /// negative) value. Distance, ascent and descent only ever grow.
    pub fn append(&mut self, wp: WayPoint) {
        let start = *self.start_time.get_or_insert(wp.time);
        self.duration = wp.time - start;

        if let Some(last) = self.last_point {
            self.distance += last.distance_to(&wp.point);

            // No delta when the previous point carried no elevation fix
            // (reads as exactly zero). Truncated to whole meters per step.
            if let Some(prev_ele) = last.elevation() {
                let diff = (wp.point.ele - prev_ele).abs() as u32;
                if wp.point.ele > prev_ele {
                    self.ascent += diff;
                } else {
                    self.descent += diff;
                }
            }
        }

        self.last_point = Some(wp.point);
    }

    /// Path of the file this summary was extracted from.
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Timestamp of the first waypoint, `None` for an empty track.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Elapsed time from the first to the most recent waypoint.
    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    /// Total distance in kilometers.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Cumulative ascent in meters.
    pub fn ascent(&self) -> u32 {
        self.ascent
    }

    /// Cumulative descent in meters.
    pub fn descent(&self) -> u32 {
        self.descent
    }

    /// Average speed in km/h. Not guarded: a zero duration yields NaN or
    /// infinity, which flows through to the report as-is.
    pub fn speed(&self) -> f64 {
        self.distance / (self.duration.num_milliseconds() as f64 / 3_600_000.0)
    }

    /// Average pace in min/km. Same non-guarding as [`TrackInfo::speed`].
    pub fn pace(&self) -> f64 {
        (self.duration.num_milliseconds() as f64 / 60_000.0) / self.distance
    }
}
