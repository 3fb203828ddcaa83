use chrono::{Days, NaiveDate, NaiveTime};
use clap::{Parser, ValueEnum};

use crate::config::Config;

/// How many days ahead of today a timetable is usually asked for
pub const DAYS_AHEAD: u64 = 6;

#[derive(Parser, Debug)]
#[command(version, about = "Tidtabell för färjelinjen mellan Vrångö och Saltholmen")]
pub struct Cli {
    #[arg(long, value_enum, default_value = "vrango-to-saltholmen")]
    pub direction: Direction,

    /// YYYY-MM-DD, today if left out
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// HH:MM, the whole day is fetched if left out
    #[arg(long, value_parser = parse_time)]
    pub time: Option<NaiveTime>,

    /// Print the timetable as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    VrangoToSaltholmen,
    SaltholmenToVrango,
}

impl Direction {
    /// (origin, destination)
    pub fn stops(self, config: &Config) -> (&str, &str) {
        match self {
            Direction::VrangoToSaltholmen => (
                config.vrango_stop_id.as_str(),
                config.saltholmen_stop_id.as_str(),
            ),
            Direction::SaltholmenToVrango => (
                config.saltholmen_stop_id.as_str(),
                config.vrango_stop_id.as_str(),
            ),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::VrangoToSaltholmen => "Vrångö till Saltholmen",
            Direction::SaltholmenToVrango => "Saltholmen till Vrångö",
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}

fn parse_time(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(s, "%H:%M")
}

/// True if `date` is between today and `DAYS_AHEAD` days from now
pub fn is_within_days_ahead(date: NaiveDate, today: NaiveDate) -> bool {
    match today.checked_add_days(Days::new(DAYS_AHEAD)) {
        Some(last) => today <= date && date <= last,
        None => today <= date,
    }
}
