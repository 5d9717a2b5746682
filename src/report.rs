use std::io::{self, Write};

use chrono::{DateTime, Local, TimeDelta, Utc};

use crate::track::TrackInfo;

/// Render all track summaries to `out`, sorted by ascending start time.
///
/// The sort is stable, so tracks with identical start times keep their
/// input order. Tracks with no waypoints have no start time and sort first.
pub fn write_report<W: Write>(
    mut tracks: Vec<TrackInfo>,
    as_table: bool,
    out: &mut W,
) -> io::Result<()> {
    tracks.sort_by_key(|t| t.start_time());

    for (i, info) in tracks.iter().enumerate() {
        if as_table {
            if i == 0 {
                writeln!(out, "{}", table_header())?;
            }
            writeln!(out, "{}", table_row(info))?;
        } else {
            if i > 0 {
                writeln!(out, "---")?;
            }
            writeln!(out, "{}", text_block(info))?;
        }
    }

    Ok(())
}

fn text_block(info: &TrackInfo) -> String {
    format!(
        "File: {}\nTime: {}\nDuration: {}\nDistance: {:.1}km\nAscent: {}m\nDescent: {}m\nSpeed: {:.1}km/h\nPace: {:.1}min/km",
        info.file_path(),
        format_start(info.start_time(), "%a, %d %b %Y %H:%M:%S %Z"),
        format_duration(info.duration()),
        info.distance(),
        info.ascent(),
        info.descent(),
        info.speed(),
        info.pace(),
    )
}

fn table_header() -> String {
    format!(
        "{:<24}  {:<19}  {:>8}  {:>12}  {:>9}  {:>10}  {:>11}  {:>12}",
        "File",
        "Start",
        "Duration",
        "Distance[km]",
        "Ascent[m]",
        "Descent[m]",
        "Speed[km/h]",
        "Pace[min/km]",
    )
}

fn table_row(info: &TrackInfo) -> String {
    format!(
        "{:<24}  {:<19}  {:>8}  {:>12.1}  {:>9}  {:>10}  {:>11.1}  {:>12.1}",
        info.file_path(),
        format_start(info.start_time(), "%Y-%m-%d %H:%M:%S"),
        format_duration(info.duration()),
        info.distance(),
        info.ascent(),
        info.descent(),
        info.speed(),
        info.pace(),
    )
}

/// Start time in local time, or `-` for a track with no waypoints.
fn format_start(start: Option<DateTime<Utc>>, fmt: &str) -> String {
    match start {
        Some(t) => t.with_timezone(&Local).format(fmt).to_string(),
        None => "-".to_string(),
    }
}

fn format_duration(d: TimeDelta) -> String {
    let total = d.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!("{sign}{}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::track::WayPoint;
    use chrono::TimeZone;

    fn track(path: &str, start_hour: u32) -> TrackInfo {
        let mut info = TrackInfo::new(path.to_string());
        info.append(WayPoint {
            time: Utc.with_ymd_and_hms(2025, 6, 1, start_hour, 0, 0).unwrap(),
            point: GeoPoint::new(45.0, 7.0, 300.0),
        });
        info
    }

    fn render(tracks: Vec<TrackInfo>, as_table: bool) -> String {
        let mut buf = Vec::new();
        write_report(tracks, as_table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn file_lines(output: &str) -> Vec<&str> {
        output
            .lines()
            .filter(|l| l.starts_with("File: "))
            .collect()
    }

    #[test]
    fn test_text_blocks_sorted_by_start_time() {
        let out = render(
            vec![track("late.gpx", 18), track("early.gpx", 6), track("noon.gpx", 12)],
            false,
        );
        assert_eq!(
            file_lines(&out),
            vec!["File: early.gpx", "File: noon.gpx", "File: late.gpx"]
        );
    }

    #[test]
    fn test_equal_start_times_keep_input_order() {
        let out = render(
            vec![track("first.gpx", 9), track("second.gpx", 9), track("third.gpx", 9)],
            false,
        );
        assert_eq!(
            file_lines(&out),
            vec!["File: first.gpx", "File: second.gpx", "File: third.gpx"]
        );
    }

    #[test]
    fn test_separator_between_blocks_only() {
        let out = render(vec![track("a.gpx", 6), track("b.gpx", 7)], false);
        assert!(!out.starts_with("---"));
        assert_eq!(out.lines().filter(|l| *l == "---").count(), 1);

        let single = render(vec![track("a.gpx", 6)], false);
        assert_eq!(single.lines().filter(|l| *l == "---").count(), 0);
    }

    #[test]
    fn test_text_block_fields() {
        let out = render(vec![track("a.gpx", 6)], false);
        assert!(out.contains("File: a.gpx"));
        assert!(out.contains("Duration: 0:00:00"));
        assert!(out.contains("Distance: 0.0km"));
        assert!(out.contains("Ascent: 0m"));
        assert!(out.contains("Descent: 0m"));
        // A single waypoint has zero distance over zero time
        assert!(out.contains("Speed: NaNkm/h"));
        assert!(out.contains("Pace: NaNmin/km"));
    }

    #[test]
    fn test_table_header_printed_once() {
        let out = render(vec![track("a.gpx", 6), track("b.gpx", 7)], true);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("File"));
        assert!(lines[0].contains("Distance[km]"));
        assert!(lines[1].starts_with("a.gpx"));
        assert!(lines[2].starts_with("b.gpx"));
    }

    #[test]
    fn test_empty_track_sorts_first_and_renders_dash() {
        let out = render(
            vec![track("b.gpx", 6), TrackInfo::new("empty.gpx".to_string())],
            false,
        );
        assert_eq!(file_lines(&out), vec!["File: empty.gpx", "File: b.gpx"]);
        assert!(out.contains("Time: -"));
    }

    #[test]
    fn test_no_tracks_no_output() {
        assert_eq!(render(Vec::new(), false), "");
        assert_eq!(render(Vec::new(), true), "");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::zero()), "0:00:00");
        assert_eq!(format_duration(TimeDelta::seconds(3661)), "1:01:01");
        assert_eq!(format_duration(TimeDelta::seconds(45)), "0:00:45");
        assert_eq!(format_duration(TimeDelta::hours(26)), "26:00:00");
        assert_eq!(format_duration(TimeDelta::seconds(-90)), "-0:01:30");
    }
}
