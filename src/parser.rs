use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::SummaryError;
use crate::geo::GeoPoint;
use crate::track::WayPoint;

type Result<T> = std::result::Result<T, SummaryError>;

/// Timestamp layout used by GPX `<time>` elements, millisecond-precision UTC.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Lazy decoder yielding one [`WayPoint`] per `<trkpt>` element, in document
/// order and at any nesting depth. Elements with other names produce nothing.
///
/// Unlike a schema-driven reader this is fail-fast: a `<trkpt>` with a
/// missing or malformed `lat`, `lon`, `ele` or `time` ends the iteration
/// with an error.
pub struct WayPointReader<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> WayPointReader<'a> {
    pub fn new(xml: &'a str) -> Self {
        Self {
            reader: Reader::from_str(xml),
        }
    }
}

impl<'a> Iterator for WayPointReader<'a> {
    type Item = Result<WayPoint>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"trkpt" => {
                    return Some(parse_waypoint(&e, &mut self.reader));
                }
                // A self-closing <trkpt/> cannot carry <ele>/<time>
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"trkpt" => {
                    return Some(Err(SummaryError::MissingElement {
                        element: "trkpt",
                        child: "ele",
                    }));
                }
                Ok(Event::Eof) => return None,
                Err(e) => return Some(Err(SummaryError::XmlParse(e))),
                _ => {}
            }
        }
    }
}

/// Parse lat/lon attributes from a trkpt element's start tag.
fn parse_lat_lon(e: &BytesStart<'_>) -> Result<(f64, f64)> {
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| SummaryError::XmlParse(e.into()))?;
        let key = attr.key.local_name();
        let val = std::str::from_utf8(&attr.value).unwrap_or_default();
        match key.as_ref() {
            b"lat" => {
                lat = Some(val.parse::<f64>().map_err(|_| {
                    SummaryError::InvalidAttribute {
                        element: "trkpt",
                        attribute: "lat",
                        value: val.to_string(),
                    }
                })?);
            }
            b"lon" => {
                lon = Some(val.parse::<f64>().map_err(|_| {
                    SummaryError::InvalidAttribute {
                        element: "trkpt",
                        attribute: "lon",
                        value: val.to_string(),
                    }
                })?);
            }
            _ => {}
        }
    }

    let lat = lat.ok_or(SummaryError::MissingAttribute {
        element: "trkpt",
        attribute: "lat",
    })?;
    let lon = lon.ok_or(SummaryError::MissingAttribute {
        element: "trkpt",
        attribute: "lon",
    })?;

    Ok((lat, lon))
}

/// Parse a `<trkpt>` element and its children.
/// Called after receiving `Event::Start` for the element.
fn parse_waypoint<'a>(
    start: &BytesStart<'a>,
    reader: &mut Reader<&'a [u8]>,
) -> Result<WayPoint> {
    let (lat, lon) = parse_lat_lon(start)?;

    let mut ele: Option<f64> = None;
    let mut time: Option<DateTime<Utc>> = None;
    let end_name = start.name().0.to_vec(); // own the end tag name for comparison

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"ele" => {
                    let text = reader
                        .read_text(e.name())
                        .map_err(SummaryError::XmlParse)?;
                    let val = text.trim();
                    ele = Some(val.parse::<f64>().map_err(|_| {
                        SummaryError::InvalidElement {
                            element: "ele",
                            value: val.to_string(),
                        }
                    })?);
                }
                b"time" => {
                    let text = reader
                        .read_text(e.name())
                        .map_err(SummaryError::XmlParse)?;
                    time = Some(parse_timestamp(text.trim())?);
                }
                _ => {
                    // Skip unknown/extensions elements
                    reader
                        .read_to_end(e.name())
                        .map_err(SummaryError::XmlParse)?;
                }
            },
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(SummaryError::XmlParse(e)),
            _ => {}
        }
    }

    let ele = ele.ok_or(SummaryError::MissingElement {
        element: "trkpt",
        child: "ele",
    })?;
    let time = time.ok_or(SummaryError::MissingElement {
        element: "trkpt",
        child: "time",
    })?;

    Ok(WayPoint {
        time,
        point: GeoPoint::new(lat, lon, ele),
    })
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, TIME_FORMAT)
        .map(|dt| dt.and_utc())
        .map_err(|_| SummaryError::InvalidElement {
            element: "time",
            value: s.to_string(),
        })
}
