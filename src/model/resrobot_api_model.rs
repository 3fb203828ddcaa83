use serde::{Deserialize, Serialize};

/// Body of a ResRobot `trip` search. The API leaves `Trip` out entirely when nothing was found.
#[derive(Debug, Deserialize, Serialize)]
pub struct ResRobotTripResponse {
    #[serde(rename = "Trip", default)]
    pub trips: Vec<ResRobotTrip>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ResRobotTrip {
    #[serde(rename = "LegList", default)]
    pub leg_list: ResRobotLegList,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ResRobotLegList {
    #[serde(rename = "Leg", default)]
    pub legs: Vec<ResRobotLeg>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResRobotLeg {
    /// "JNY" is a ride on a vehicle. "WALK" and "TRSF" are on foot.
    #[serde(rename = "type")]
    pub leg_type: String,
    #[serde(rename = "Product", default)]
    pub products: Vec<ResRobotProduct>,
    pub direction: Option<String>,
    /// Walking legs don't always carry times, so these are only checked for legs we keep
    #[serde(rename = "Origin")]
    pub origin: Option<ResRobotStop>,
    #[serde(rename = "Destination")]
    pub destination: Option<ResRobotStop>,
}

impl ResRobotLeg {
    pub fn is_journey(&self) -> bool {
        self.leg_type == "JNY"
    }

    /// Line number of the first product, if the leg has one
    pub fn line_number(&self) -> Option<&str> {
        self.products.first()?.num.as_deref()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResRobotProduct {
    pub num: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResRobotStop {
    pub name: Option<String>,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM:SS
    pub time: String,
}

impl ResRobotStop {
    pub fn date_time(&self) -> String {
        format!("{} {}", self.date, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::ResRobotTripResponse;

    #[test]
    fn test_parse_example_response() -> Result<(), anyhow::Error> {
        let json = include_str!("../../documentation/example_responses/resrobot_trip_0800.json");
        let response: ResRobotTripResponse = serde_json::from_str(json)?;

        assert_eq!(response.trips.len(), 2);

        let first_leg = &response.trips[0].leg_list.legs[0];
        assert!(first_leg.is_journey());
        assert_eq!(first_leg.line_number(), Some("281"));
        assert_eq!(
            first_leg.origin.as_ref().map(|o| o.date_time()).as_deref(),
            Some("2024-06-01 08:05:00")
        );

        let walk = &response.trips[1].leg_list.legs[1];
        assert!(!walk.is_journey());
        assert_eq!(walk.line_number(), None);

        Ok(())
    }

    #[test]
    fn test_parse_response_without_trips() -> Result<(), anyhow::Error> {
        let response: ResRobotTripResponse =
            serde_json::from_str(r#"{"serverVersion":"2.45","dialectVersion":"2.45"}"#)?;

        assert!(response.trips.is_empty());

        Ok(())
    }
}
