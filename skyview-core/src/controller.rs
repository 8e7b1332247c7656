//! Session controller: the single owner of mutable UI state.
//!
//! Renderers never touch [`SessionState`] directly. They read a cloned
//! [`View`] and call back into the transition methods on [`Controller`].
//!
//! Every dispatched request takes a ticket from a monotonically increasing
//! counter. A completion is applied only while its ticket is still the latest
//! one issued, so a slow request can never overwrite the result of a request
//! the user made after it.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    animation,
    gateway::WeatherGateway,
    location::{LocationError, LocationProvider},
    model::WeatherSnapshot,
    theme::{self, ThemeDescriptor},
    time_of_day::TimeOfDay,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub snapshot: Option<WeatherSnapshot>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

/// Dominant condition at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Loading,
    Success,
    Failure,
}

impl SessionState {
    /// Loading wins over an error, an error wins over a snapshot.
    pub fn status(&self) -> Status {
        if self.is_loading {
            Status::Loading
        } else if self.error_message.is_some() {
            Status::Failure
        } else if self.snapshot.is_some() {
            Status::Success
        } else {
            Status::Idle
        }
    }
}

/// Read-only bundle handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub status: Status,
    pub state: SessionState,
    pub theme: ThemeDescriptor,
    pub time_of_day: Option<TimeOfDay>,
    pub animation: Option<&'static str>,
    pub icon_url: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    state: SessionState,
    latest_ticket: u64,
}

impl Inner {
    fn begin(&mut self) -> u64 {
        self.state.error_message = None;
        self.state.is_loading = true;
        self.latest_ticket += 1;
        self.latest_ticket
    }

    fn accept(&mut self, snapshot: WeatherSnapshot) {
        self.state.snapshot = Some(snapshot);
    }

    /// Name to re-query on retry: only while an error is shown over a kept
    /// snapshot.
    fn retry_target(&self) -> Option<String> {
        self.state.error_message.as_ref()?;
        self.state.snapshot.as_ref().map(|s| s.location_name.clone())
    }
}

/// An issued ticket. Dropping it before [`Pending::complete`] runs, e.g. when
/// the caller abandons the request future, clears the loading flag if no
/// newer request has started.
struct Pending<'a> {
    inner: &'a Mutex<Inner>,
    ticket: u64,
    done: bool,
}

impl Pending<'_> {
    fn complete(mut self, apply: impl FnOnce(&mut Inner)) {
        self.done = true;
        let mut inner = self.inner.lock();
        if inner.latest_ticket != self.ticket {
            tracing::debug!(
                ticket = self.ticket,
                latest = inner.latest_ticket,
                "dropping result of superseded request"
            );
            return;
        }
        apply(&mut inner);
        inner.state.is_loading = false;
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let mut inner = self.inner.lock();
        if inner.latest_ticket == self.ticket {
            tracing::debug!(ticket = self.ticket, "request abandoned before completion");
            inner.state.is_loading = false;
        }
    }
}

#[derive(Debug)]
pub struct Controller {
    gateway: Arc<dyn WeatherGateway>,
    location: Option<Arc<dyn LocationProvider>>,
    default_city: String,
    inner: Mutex<Inner>,
}

impl Controller {
    /// `location = None` means the platform has no geolocation capability.
    pub fn new(
        gateway: Arc<dyn WeatherGateway>,
        location: Option<Arc<dyn LocationProvider>>,
        default_city: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            location,
            default_city: default_city.into(),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    /// Startup search for the default city.
    pub async fn start(&self) {
        let city = self.default_city.clone();
        self.submit_city(&city).await;
    }

    /// Search by city name. Ignored for blank input or while a request is in
    /// flight. A failure blanks any previously shown result.
    pub async fn submit_city(&self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("ignoring blank city search");
            return;
        }

        let Some(pending) = self.try_begin() else {
            tracing::debug!(city = name, "ignoring city search while a request is in flight");
            return;
        };

        tracing::info!(city = name, ticket = pending.ticket, "searching weather by city");
        let result = self.gateway.fetch_by_city(name).await;

        pending.complete(|inner| match result {
            Ok(snapshot) => inner.accept(snapshot),
            Err(err) => {
                tracing::warn!(city = name, error = ?err, "city search failed");
                inner.state.error_message = Some(err.to_string());
                inner.state.snapshot = None;
            }
        });
    }

    /// Search by the device position. A failure keeps the result already
    /// shown.
    pub async fn request_location(&self) {
        let pending = self.begin();
        tracing::info!(ticket = pending.ticket, "searching weather by current location");

        let result = match &self.location {
            None => Err(LocationError::Unsupported.to_string()),
            Some(provider) => match provider.current_location().await {
                Ok(coords) => {
                    tracing::debug!(%coords, "resolved current location");
                    self.gateway.fetch_by_coordinates(coords).await.map_err(|err| {
                        tracing::warn!(error = ?err, "weather lookup for location failed");
                        err.to_string()
                    })
                }
                Err(err) => {
                    tracing::warn!(error = ?err, "location lookup failed");
                    Err(err.to_string())
                }
            },
        };

        pending.complete(|inner| match result {
            Ok(snapshot) => inner.accept(snapshot),
            Err(message) => inner.state.error_message = Some(message),
        });
    }

    /// Re-run the search for the snapshot still held behind the error.
    /// No-op without an error or when the failure discarded the snapshot.
    pub async fn retry(&self) {
        let city = self.inner.lock().retry_target();

        match city {
            Some(city) => self.submit_city(&city).await,
            None => tracing::debug!("nothing to retry"),
        }
    }

    /// Whether [`Controller::retry`] would issue a request right now.
    pub fn can_retry(&self) -> bool {
        self.inner.lock().retry_target().is_some()
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state.clone()
    }

    pub fn status(&self) -> Status {
        self.inner.lock().state.status()
    }

    pub fn theme(&self) -> ThemeDescriptor {
        self.theme_at(Utc::now())
    }

    /// Fresh on every call; the default theme unless the status is Success.
    pub fn theme_at(&self, now: DateTime<Utc>) -> ThemeDescriptor {
        self.view_at(now).theme
    }

    pub fn view(&self) -> View {
        self.view_at(Utc::now())
    }

    pub fn view_at(&self, now: DateTime<Utc>) -> View {
        let state = self.state();
        let status = state.status();

        let shown = state.snapshot.as_ref().filter(|_| status == Status::Success);
        let time_of_day = shown.map(|s| s.time_of_day(now));
        let theme = match (shown, time_of_day) {
            (Some(snapshot), Some(tod)) => theme::resolve(snapshot.category(), tod),
            _ => theme::DEFAULT,
        };

        View {
            status,
            theme,
            time_of_day,
            animation: match status {
                Status::Loading => Some(animation::LOADING),
                _ => shown.map(WeatherSnapshot::animation),
            },
            icon_url: shown.map(WeatherSnapshot::icon_url),
            state,
        }
    }

    fn begin(&self) -> Pending<'_> {
        let ticket = self.inner.lock().begin();
        Pending { inner: &self.inner, ticket, done: false }
    }

    fn try_begin(&self) -> Option<Pending<'_>> {
        let ticket = {
            let mut inner = self.inner.lock();
            if inner.state.is_loading {
                return None;
            }
            inner.begin()
        };
        Some(Pending { inner: &self.inner, ticket, done: false })
    }
}
