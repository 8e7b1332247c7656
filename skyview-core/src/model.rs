use anyhow::{Result, anyhow};
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    animation,
    condition::ConditionCategory,
    time_of_day::{self, TimeOfDay},
};

/// One successful current-weather lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country: String,
    /// Primary category as sent by the service, e.g. "Clear".
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub wind_speed_mps: f64,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub observed_at: DateTime<Utc>,
    /// Shift of the location's local time from UTC, in seconds.
    pub utc_offset_s: i32,
}

impl WeatherSnapshot {
    pub fn category(&self) -> ConditionCategory {
        ConditionCategory::parse(&self.condition)
    }

    pub fn time_of_day(&self, now: DateTime<Utc>) -> TimeOfDay {
        time_of_day::resolve_at(now, self.sunrise, self.sunset)
    }

    pub fn icon_url(&self) -> String {
        animation::icon_url(&self.icon)
    }

    /// Location's local offset; UTC when the service sent nonsense.
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_s).unwrap_or_else(|| Utc.fix())
    }

    pub fn animation(&self) -> &'static str {
        animation::resolve(self.category())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(anyhow!("Latitude {latitude} is outside the range -90..=90"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(anyhow!("Longitude {longitude} is outside the range -180..=180"));
        }
        Ok(Self { latitude, longitude })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One day of the multi-day outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub condition: String,
    pub description: String,
    pub icon: String,
}

impl ForecastEntry {
    pub fn icon_url(&self) -> String {
        animation::icon_url(&self.icon)
    }
}
