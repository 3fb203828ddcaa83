use serde::Serialize;

use super::trip_leg::TripLeg;
use crate::trip_fetcher::FetchError;

/// What the timetable hands to whoever renders it.
/// A failed fetch is a list with exactly one `Error` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TimetableRecord {
    Trip(TripLeg),
    Error { error: String },
}

impl TimetableRecord {
    pub fn from_result(result: Result<Vec<TripLeg>, FetchError>) -> Vec<Self> {
        match result {
            Ok(trips) => trips.into_iter().map(TimetableRecord::Trip).collect(),
            Err(e) => vec![TimetableRecord::Error {
                error: e.to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TimetableRecord;
    use crate::{model::trip_leg::TripLeg, trip_fetcher::FetchError};

    #[test]
    fn test_error_is_single_record() -> Result<(), anyhow::Error> {
        let records = TimetableRecord::from_result(Err(FetchError::EmptyResult));

        assert_eq!(records.len(), 1);
        assert_eq!(
            serde_json::to_value(&records)?,
            serde_json::json!([{
                "error": "Inga resor hittades för den valda dagen. Kontrollera loggarna för mer information."
            }])
        );

        Ok(())
    }

    #[test]
    fn test_trips_serialize_flat() -> Result<(), anyhow::Error> {
        let records = TimetableRecord::from_result(Ok(vec![TripLeg {
            line: "281".to_string(),
            direction: "Saltholmen".to_string(),
            departure: "2024-06-01 08:05:00".to_string(),
            arrival: "2024-06-01 08:35:00".to_string(),
        }]));

        assert_eq!(
            serde_json::to_value(&records)?,
            serde_json::json!([{
                "line": "281",
                "direction": "Saltholmen",
                "departure": "2024-06-01 08:05:00",
                "arrival": "2024-06-01 08:35:00"
            }])
        );

        Ok(())
    }
}
