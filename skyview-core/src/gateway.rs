use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::{Coordinates, WeatherSnapshot};

pub mod openweather;

pub use openweather::OpenWeatherGateway;

/// Which kind of lookup failed; selects the user-facing wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    City,
    Coordinates,
}

impl Lookup {
    fn service_message(&self) -> &'static str {
        match self {
            Lookup::City => "Failed to fetch weather data. Please try again later.",
            Lookup::Coordinates => "Failed to fetch weather data for your location.",
        }
    }
}

/// Failures of a weather lookup. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("City not found. Please check the spelling and try again.")]
    NotFound,

    #[error("{}", .lookup.service_message())]
    Service { lookup: Lookup, status: u16 },

    /// Transport or decoding failure. `detail` is for logs only.
    #[error("An unexpected error occurred.")]
    Unexpected { detail: String },
}

impl GatewayError {
    pub(crate) fn unexpected(detail: impl std::fmt::Display) -> Self {
        GatewayError::Unexpected { detail: detail.to_string() }
    }
}

/// Boundary to the weather service. Each call performs exactly one request.
#[async_trait]
pub trait WeatherGateway: Send + Sync + Debug {
    /// `name` must already be trimmed and non-empty.
    async fn fetch_by_city(&self, name: &str) -> Result<WeatherSnapshot, GatewayError>;

    async fn fetch_by_coordinates(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherSnapshot, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        assert_eq!(
            GatewayError::NotFound.to_string(),
            "City not found. Please check the spelling and try again."
        );
    }

    #[test]
    fn service_message_depends_on_lookup() {
        let city = GatewayError::Service { lookup: Lookup::City, status: 500 };
        assert_eq!(city.to_string(), "Failed to fetch weather data. Please try again later.");

        let coords = GatewayError::Service { lookup: Lookup::Coordinates, status: 404 };
        assert_eq!(coords.to_string(), "Failed to fetch weather data for your location.");
    }

    #[test]
    fn unexpected_hides_detail() {
        let err = GatewayError::unexpected("connection reset by peer");
        assert_eq!(err.to_string(), "An unexpected error occurred.");
    }
}
