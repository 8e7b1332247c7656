use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Timelike, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::collections::BTreeMap;

use crate::model::{Coordinates, ForecastEntry, WeatherSnapshot};

use super::{GatewayError, Lookup, WeatherGateway};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Days kept by [`OpenWeatherGateway::fetch_forecast_by_city`].
pub const FORECAST_DAYS: usize = 5;

#[derive(Debug, Clone)]
pub struct OpenWeatherGateway {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherGateway {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Five-day outlook, one entry per local calendar day.
    pub async fn fetch_forecast_by_city(
        &self,
        name: &str,
    ) -> Result<Vec<ForecastEntry>, GatewayError> {
        let parsed: OwForecastResponse =
            self.get_json("forecast", &[("q", name.to_string())], Lookup::City).await?;

        Ok(daily_outlook(parsed, FORECAST_DAYS))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        lookup: Lookup,
    ) -> Result<T, GatewayError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, ?lookup, "sending OpenWeather request");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "failed to send request to OpenWeather");
                GatewayError::unexpected(e)
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            tracing::warn!(error = %e, "failed to read OpenWeather response body");
            GatewayError::unexpected(e)
        })?;

        if !status.is_success() {
            tracing::warn!(
                %status,
                body = %truncate_body(&body),
                ?lookup,
                "OpenWeather request failed"
            );
            return Err(classify_status(status, lookup));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, "failed to parse OpenWeather JSON");
            GatewayError::unexpected(e)
        })
    }
}

#[async_trait]
impl WeatherGateway for OpenWeatherGateway {
    async fn fetch_by_city(&self, name: &str) -> Result<WeatherSnapshot, GatewayError> {
        let parsed: OwCurrentResponse =
            self.get_json("weather", &[("q", name.to_string())], Lookup::City).await?;

        parsed.into_snapshot()
    }

    async fn fetch_by_coordinates(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherSnapshot, GatewayError> {
        let query = [("lat", coords.latitude.to_string()), ("lon", coords.longitude.to_string())];
        let parsed: OwCurrentResponse =
            self.get_json("weather", &query, Lookup::Coordinates).await?;

        parsed.into_snapshot()
    }
}

fn classify_status(status: StatusCode, lookup: Lookup) -> GatewayError {
    if status == StatusCode::NOT_FOUND && lookup == Lookup::City {
        GatewayError::NotFound
    } else {
        GatewayError::Service { lookup, status: status.as_u16() }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize, Default)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
    #[serde(default)]
    timezone: i32,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, GatewayError> {
        let weather = self.weather.into_iter().next().unwrap_or_default();

        Ok(WeatherSnapshot {
            location_name: self.name,
            country: self.sys.country,
            condition: weather.main,
            description: weather.description,
            icon: weather.icon,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            humidity_pct: self.main.humidity,
            pressure_hpa: self.main.pressure,
            wind_speed_mps: self.wind.speed,
            sunrise: required_timestamp(self.sys.sunrise, "sunrise")?,
            sunset: required_timestamp(self.sys.sunset, "sunset")?,
            observed_at: unix_to_utc(self.dt).unwrap_or_else(Utc::now),
            utc_offset_s: self.timezone,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    /// Shift from UTC in seconds.
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

/// Reduce the 3-hourly list to one entry per local day, the one nearest noon.
fn daily_outlook(parsed: OwForecastResponse, days: usize) -> Vec<ForecastEntry> {
    const NOON: i64 = 12 * 3600;

    let offset = FixedOffset::east_opt(parsed.city.timezone).unwrap_or_else(|| Utc.fix());
    let mut by_day: BTreeMap<NaiveDate, (i64, OwForecastEntry, DateTime<Utc>)> = BTreeMap::new();

    for entry in parsed.list {
        let Some(time) = unix_to_utc(entry.dt) else {
            continue;
        };
        let local = time.with_timezone(&offset);
        let distance = (i64::from(local.num_seconds_from_midnight()) - NOON).abs();

        let date = local.date_naive();
        if by_day.get(&date).is_none_or(|(best, _, _)| distance < *best) {
            by_day.insert(date, (distance, entry, time));
        }
    }

    by_day
        .into_iter()
        .take(days)
        .map(|(date, (_, entry, time))| {
            let weather = entry.weather.into_iter().next().unwrap_or_default();
            ForecastEntry {
                date,
                time,
                temperature_c: entry.main.temp,
                temp_min_c: entry.main.temp_min,
                temp_max_c: entry.main.temp_max,
                condition: weather.main,
                description: weather.description,
                icon: weather.icon,
            }
        })
        .collect()
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn required_timestamp(ts: i64, field: &str) -> Result<DateTime<Utc>, GatewayError> {
    unix_to_utc(ts)
        .ok_or_else(|| GatewayError::unexpected(format!("{field} timestamp {ts} is out of range")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast_entry(dt: i64, temp: f64) -> OwForecastEntry {
        OwForecastEntry {
            dt,
            main: OwForecastMain { temp, temp_min: temp - 2.0, temp_max: temp + 2.0 },
            weather: vec![OwWeather {
                main: "Clouds".into(),
                description: "broken clouds".into(),
                icon: "04d".into(),
            }],
        }
    }

    #[test]
    fn status_404_is_not_found_only_for_city() {
        assert_eq!(classify_status(StatusCode::NOT_FOUND, Lookup::City), GatewayError::NotFound);
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND, Lookup::Coordinates),
            GatewayError::Service { lookup: Lookup::Coordinates, status: 404 }
        );
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, Lookup::City),
            GatewayError::Service { lookup: Lookup::City, status: 500 }
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let gw = OpenWeatherGateway::with_base_url("KEY".into(), "http://localhost:1234/");
        assert_eq!(gw.base_url(), "http://localhost:1234");
    }

    #[test]
    fn daily_outlook_picks_entry_nearest_noon_per_day() {
        // 2024-01-01T00:00:00Z
        let day0 = 1_704_067_200;
        let list = (0..16).map(|i| forecast_entry(day0 + i * 3 * 3600, i as f64)).collect();
        let parsed = OwForecastResponse { city: OwCity { timezone: 0 }, list };

        let outlook = daily_outlook(parsed, FORECAST_DAYS);

        assert_eq!(outlook.len(), 2);
        assert_eq!(outlook[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(outlook[0].temperature_c, 4.0);
        assert_eq!(outlook[1].temperature_c, 12.0);
        assert_eq!(outlook[0].condition, "Clouds");
    }

    #[test]
    fn daily_outlook_respects_city_offset_and_limit() {
        let day0 = 1_704_067_200;
        let list = (0..56).map(|i| forecast_entry(day0 + i * 3 * 3600, i as f64)).collect();
        // UTC+3: local noon is 09:00 UTC.
        let parsed = OwForecastResponse { city: OwCity { timezone: 3 * 3600 }, list };

        let outlook = daily_outlook(parsed, FORECAST_DAYS);

        assert_eq!(outlook.len(), FORECAST_DAYS);
        assert_eq!(outlook[0].time.hour(), 9);
        assert!(outlook.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn truncate_body_limits_length() {
        let long = "x".repeat(500);
        assert_eq!(truncate_body(&long).len(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
