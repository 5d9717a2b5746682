pub mod error;
pub mod geo;
pub mod parser;
pub mod report;
pub mod track;

use std::fs;
use std::path::Path;

use tracing::debug;

pub use crate::error::SummaryError;
pub use crate::geo::GeoPoint;
pub use crate::parser::WayPointReader;
pub use crate::report::write_report;
pub use crate::track::{TrackInfo, WayPoint};

/// Extract the track summary from the GPX file at `path`.
///
/// Reads the whole file, decodes every `<trkpt>` in document order and folds
/// it into a fresh [`TrackInfo`]. The first decode or I/O failure aborts and
/// propagates; there is no partial result.
pub fn process(path: &Path) -> Result<TrackInfo, SummaryError> {
    let xml = fs::read_to_string(path).map_err(|e| SummaryError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut info = TrackInfo::new(path.display().to_string());
    for wp in WayPointReader::new(&xml) {
        info.append(wp?);
    }

    debug!(
        file = %path.display(),
        distance_km = info.distance(),
        ascent_m = info.ascent(),
        descent_m = info.descent(),
        "summarized track"
    );

    Ok(info)
}
