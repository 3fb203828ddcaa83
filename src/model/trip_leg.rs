use anyhow::anyhow;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use super::resrobot_api_model::ResRobotLeg;

/// One scheduled ride on the target line.
/// Two legs are the same trip when all four fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TripLeg {
    pub line: String,
    pub direction: String,
    /// "YYYY-MM-DD HH:MM:SS" at the origin stop
    pub departure: String,
    /// "YYYY-MM-DD HH:MM:SS" at the destination stop
    pub arrival: String,
}

impl TripLeg {
    pub fn try_from_resrobot_leg(leg: &ResRobotLeg) -> anyhow::Result<Self> {
        let line = leg
            .line_number()
            .ok_or_else(|| anyhow!("Journey leg without a line number"))?
            .to_string();

        let departure = leg
            .origin
            .as_ref()
            .ok_or_else(|| anyhow!("Journey leg of line {line} without an origin"))?
            .date_time();

        let arrival = leg
            .destination
            .as_ref()
            .ok_or_else(|| anyhow!("Journey leg of line {line} without a destination"))?
            .date_time();

        Ok(Self {
            direction: leg.direction.clone().unwrap_or_else(|| "N/A".to_string()),
            line,
            departure,
            arrival,
        })
    }

    /// Departure first so that sorting is chronological. The rest only keeps the order stable.
    pub fn sort_key(&self) -> (&str, &str, &str, &str) {
        (&self.departure, &self.line, &self.direction, &self.arrival)
    }
}

/// Parameters of a single request to the trip endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWindow {
    pub origin_id: String,
    pub dest_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub result_limit: u8,
}

impl QueryWindow {
    pub fn query_params(&self, access_id: &str) -> Vec<(&'static str, String)> {
        vec![
            ("format", "json".to_string()),
            ("originId", self.origin_id.clone()),
            ("destId", self.dest_id.clone()),
            ("date", self.date.format("%Y-%m-%d").to_string()),
            ("time", self.time.format("%H:%M").to_string()),
            ("numF", self.result_limit.to_string()),
            ("passlist", "1".to_string()),
            ("accessId", access_id.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::{QueryWindow, TripLeg};
    use crate::model::resrobot_api_model::ResRobotLeg;

    #[test]
    fn test_trip_leg_from_journey() -> Result<(), anyhow::Error> {
        let leg: ResRobotLeg = serde_json::from_str(
            r#"{
                "type": "JNY",
                "Product": [{ "num": "281" }, { "num": "999" }],
                "Origin": { "date": "2024-06-01", "time": "08:05:00" },
                "Destination": { "date": "2024-06-01", "time": "08:35:00" }
            }"#,
        )?;

        let trip = TripLeg::try_from_resrobot_leg(&leg)?;

        assert_eq!(
            trip,
            TripLeg {
                line: "281".to_string(),
                direction: "N/A".to_string(),
                departure: "2024-06-01 08:05:00".to_string(),
                arrival: "2024-06-01 08:35:00".to_string(),
            }
        );

        Ok(())
    }

    #[test]
    fn test_trip_leg_without_destination() -> Result<(), anyhow::Error> {
        let leg: ResRobotLeg = serde_json::from_str(
            r#"{
                "type": "JNY",
                "Product": [{ "num": "281" }],
                "Origin": { "date": "2024-06-01", "time": "08:05:00" }
            }"#,
        )?;

        assert!(TripLeg::try_from_resrobot_leg(&leg).is_err());

        Ok(())
    }

    #[test]
    fn test_query_params() -> Result<(), anyhow::Error> {
        let window = QueryWindow {
            origin_id: "740001382".to_string(),
            dest_id: "740001206".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).ok_or_else(|| anyhow::anyhow!("date"))?,
            time: NaiveTime::from_hms_opt(8, 0, 0).ok_or_else(|| anyhow::anyhow!("time"))?,
            result_limit: 3,
        };

        let params = window.query_params("key");

        assert!(params.contains(&("date", "2024-06-01".to_string())));
        assert!(params.contains(&("time", "08:00".to_string())));
        assert!(params.contains(&("numF", "3".to_string())));
        assert!(params.contains(&("accessId", "key".to_string())));

        Ok(())
    }
}
