//! Core library for the `skyview` weather app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather gateway (OpenWeatherMap) and location providers
//! - Pure resolvers turning a snapshot into time of day, theme and animation
//! - The session controller sequencing loading / error / success states
//!
//! It is used by `skyview-cli`, but can also drive any other front-end.

pub mod animation;
pub mod condition;
pub mod config;
pub mod controller;
pub mod gateway;
pub mod location;
pub mod model;
pub mod theme;
pub mod time_of_day;

pub use condition::ConditionCategory;
pub use config::{Config, LocationConfig, LocationMode};
pub use controller::{Controller, SessionState, Status, View};
pub use gateway::{GatewayError, Lookup, OpenWeatherGateway, WeatherGateway};
pub use location::{LocationError, LocationProvider};
pub use model::{Coordinates, ForecastEntry, WeatherSnapshot};
pub use theme::ThemeDescriptor;
pub use time_of_day::TimeOfDay;
