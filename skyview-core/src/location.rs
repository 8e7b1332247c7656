//! Device location lookup.
//!
//! A terminal has no geolocation capability of its own, so the providers here
//! stand in for one: an IP-based lookup, fixed coordinates from the config
//! file, or a provider that always reports the capability as switched off.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::{fmt::Debug, sync::Arc, time::Duration};

use crate::{
    config::{LocationConfig, LocationMode},
    model::Coordinates,
};

/// Single timeout applied to one location lookup.
pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_IP_ENDPOINT: &str = "http://ip-api.com/json";

/// Failures of a location lookup. `Display` is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Location access denied. Please enable location services.")]
    PermissionDenied,
    #[error("Location information is unavailable.")]
    PositionUnavailable,
    #[error("Location request timed out.")]
    Timeout,
    #[error("Geolocation is not supported by this browser.")]
    Unsupported,
    #[error("Failed to get your location.")]
    Other,
}

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    /// One-shot position query, no tracking.
    async fn current_location(&self) -> Result<Coordinates, LocationError>;
}

/// Locates the machine by its public IP address.
#[derive(Debug, Clone)]
pub struct IpLocationProvider {
    endpoint: String,
    timeout: Duration,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpLocationProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), timeout: LOCATION_TIMEOUT, http: Client::new() }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn lookup(&self) -> Result<Coordinates, LocationError> {
        tracing::debug!(endpoint = %self.endpoint, "looking up location by IP");

        let res = self.http.get(&self.endpoint).send().await.map_err(classify_transport)?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(%status, "location service refused the request");
            return Err(LocationError::PermissionDenied);
        }
        if !status.is_success() {
            tracing::warn!(%status, "location service returned an error status");
            return Err(LocationError::PositionUnavailable);
        }

        let body: IpApiResponse = res.json().await.map_err(|e| {
            tracing::warn!(error = %e, "failed to parse location response");
            LocationError::Other
        })?;

        if body.status != "success" {
            tracing::warn!(message = ?body.message, "location service could not place this address");
            return Err(LocationError::PositionUnavailable);
        }

        let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
            return Err(LocationError::PositionUnavailable);
        };

        Coordinates::new(lat, lon).map_err(|e| {
            tracing::warn!(error = %e, "location service returned invalid coordinates");
            LocationError::PositionUnavailable
        })
    }
}

fn classify_transport(err: reqwest::Error) -> LocationError {
    tracing::warn!(error = %err, "location request failed");
    if err.is_timeout() {
        LocationError::Timeout
    } else if err.is_connect() {
        LocationError::PositionUnavailable
    } else {
        LocationError::Other
    }
}

#[async_trait]
impl LocationProvider for IpLocationProvider {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        match tokio::time::timeout(self.timeout, self.lookup()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "location lookup timed out");
                Err(LocationError::Timeout)
            }
        }
    }
}

/// Always answers with the configured coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    coords: Coordinates,
}

impl FixedLocationProvider {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coords)
    }
}

/// Location switched off by the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocationProvider;

#[async_trait]
impl LocationProvider for DeniedLocationProvider {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

/// Construct the provider selected by the `[location]` config section.
pub fn provider_from_config(config: &LocationConfig) -> Result<Arc<dyn LocationProvider>> {
    let provider: Arc<dyn LocationProvider> = match config.mode {
        LocationMode::Ip => Arc::new(IpLocationProvider::new(config.endpoint.clone())),
        LocationMode::Fixed => {
            let (Some(lat), Some(lon)) = (config.latitude, config.longitude) else {
                return Err(anyhow!(
                    "Location mode 'fixed' needs both latitude and longitude.\n\
                     Hint: run `skyview configure` or set them under [location] in the config file."
                ));
            };
            Arc::new(FixedLocationProvider::new(Coordinates::new(lat, lon)?))
        }
        LocationMode::Off => Arc::new(DeniedLocationProvider),
    };

    Ok(provider)
}
