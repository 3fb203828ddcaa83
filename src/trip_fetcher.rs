//! Responsible for fetching the target line's trips between two stops from ResRobot
use std::collections::HashSet;

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use itertools::Itertools;
use reqwest::Client;
use tracing::{Instrument, error, info, info_span};

use crate::{
    config::FetcherConfig,
    model::{
        resrobot_api_model::ResRobotTripResponse,
        trip_leg::{QueryWindow, TripLeg},
    },
    utils::str_prefix,
};

/// Start hours of the windows used when no time is given.
/// Trips past a window's result limit are missed, so this doesn't always cover the whole day.
const DAY_WINDOW_HOURS: [u32; 4] = [0, 6, 12, 18];
const SINGLE_WINDOW_LIMIT: u8 = 3;
/// ResRobot answers 400 Bad Request for larger values here
const DAY_WINDOW_LIMIT: u8 = 6;
const LOGGED_BODY_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct TripFetcher {
    client: Client,
    config: FetcherConfig,
}

impl TripFetcher {
    pub fn new(config: FetcherConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: FetcherConfig) -> Self {
        Self { client, config }
    }

    pub fn target_line(&self) -> &str {
        &self.config.target_line
    }

    /// Gets the trips of the target line leaving `origin_id` for `dest_id` on `date`.
    /// Without a `time` the day is covered by several windows whose results are merged.
    /// The returned trips are unique and sorted by departure.
    /// A failing window fails the whole fetch, nothing fetched before it is returned.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_trips(
        &self,
        origin_id: &str,
        dest_id: &str,
        date: NaiveDate,
        time: Option<NaiveTime>,
    ) -> Result<Vec<TripLeg>, FetchError> {
        if origin_id.trim().is_empty() || dest_id.trim().is_empty() {
            error!("missing stop, origin '{origin_id}' destination '{dest_id}'");
            return Err(FetchError::InvalidQuery(format!(
                "both stops are required, got origin '{origin_id}' and destination '{dest_id}'"
            )));
        }

        let mut results: HashSet<TripLeg> = HashSet::new();

        for window in query_windows(origin_id, dest_id, date, time) {
            let response = self.fetch_window(&window).await?;

            if response.trips.is_empty() {
                info!("no trips found for {}", window.time.format("%H:%M"));
                continue;
            }

            let matched = collect_target_legs(&response, &self.config.target_line, &mut results)?;
            info!(
                "{} legs of line {} in window {}",
                matched,
                self.config.target_line,
                window.time.format("%H:%M")
            );
        }

        info!("got {} unique trips", results.len());

        if results.is_empty() {
            info!("no trips of line {} on {}", self.config.target_line, date);
            return Err(FetchError::EmptyResult);
        }

        Ok(results
            .into_iter()
            .sorted_by(|a, b| a.sort_key().cmp(&b.sort_key()))
            .collect_vec())
    }

    #[tracing::instrument(err, skip(self))]
    async fn fetch_window(&self, window: &QueryWindow) -> Result<ResRobotTripResponse, FetchError> {
        let response = self
            .client
            .get(&self.config.trip_url)
            .query(&window.query_params(&self.config.access_id))
            .send()
            .instrument(info_span!("Fetching trips"))
            .await
            .map_err(reqwest::Error::without_url)?
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;

        let body = response
            .text()
            .instrument(info_span!("Reading body of response"))
            .await
            .map_err(reqwest::Error::without_url)?;

        info!(
            "raw response for {}: {}...",
            window.time.format("%H:%M"),
            str_prefix(&body, LOGGED_BODY_CHARS)
        );

        let trips: ResRobotTripResponse =
            serde_json::from_str(&body).context("Error parsing trips")?;

        Ok(trips)
    }
}

/// The windows to query. One at `time` if given, otherwise one per entry of `DAY_WINDOW_HOURS`.
pub fn query_windows(
    origin_id: &str,
    dest_id: &str,
    date: NaiveDate,
    time: Option<NaiveTime>,
) -> Vec<QueryWindow> {
    let window = |time: NaiveTime, result_limit: u8| QueryWindow {
        origin_id: origin_id.to_string(),
        dest_id: dest_id.to_string(),
        date,
        time,
        result_limit,
    };

    match time {
        Some(time) => vec![window(time, SINGLE_WINDOW_LIMIT)],
        None => DAY_WINDOW_HOURS
            .iter()
            .filter_map(|hour| NaiveTime::from_hms_opt(*hour, 0, 0))
            .map(|time| window(time, DAY_WINDOW_LIMIT))
            .collect_vec(),
    }
}

/// Adds the journey legs whose line number contains `target_line` to `results`.
/// Returns how many legs matched, duplicates included.
fn collect_target_legs(
    response: &ResRobotTripResponse,
    target_line: &str,
    results: &mut HashSet<TripLeg>,
) -> anyhow::Result<usize> {
    let mut matched = 0;

    for leg in response.trips.iter().flat_map(|t| &t.leg_list.legs) {
        if !leg.is_journey() {
            continue;
        }

        let Some(line) = leg.line_number() else {
            continue;
        };

        if !line.contains(target_line) {
            continue;
        }

        let trip = TripLeg::try_from_resrobot_leg(leg)?;
        info!("found trip: line {}, departure {}", trip.line, trip.departure);

        results.insert(trip);
        matched += 1;
    }

    Ok(matched)
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The url is stripped before it gets here since it carries the access id
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response from the trip planner: {0:#}")]
    MalformedResponse(#[from] anyhow::Error),

    #[error("Inga resor hittades för den valda dagen. Kontrollera loggarna för mer information.")]
    EmptyResult,
}

impl FetchError {
    /// Nothing went wrong, there just wasn't anything to show
    pub fn is_informational(&self) -> bool {
        matches!(self, FetchError::EmptyResult)
    }
}
