//! Turns timetable records into something to print
use itertools::Itertools;

use crate::model::timetable_record::TimetableRecord;

/// A heading line followed by one card per trip, or a single `Fel:` line
pub fn render_text(records: &[TimetableRecord], heading: &str) -> String {
    let body = records
        .iter()
        .map(|record| match record {
            TimetableRecord::Trip(trip) => format!(
                "Linje: {}\nRiktning: {}\nAvgång: {}\nAnkomst: {}",
                trip.line, trip.direction, trip.departure, trip.arrival
            ),
            TimetableRecord::Error { error } => format!("Fel: {error}"),
        })
        .join("\n\n");

    format!("{heading}\n\n{body}")
}

pub fn render_json(records: &[TimetableRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
