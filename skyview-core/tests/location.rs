//! Integration tests for IpLocationProvider using wiremock.

use std::time::Duration;

use skyview_core::location::{IpLocationProvider, LOCATION_TIMEOUT};
use skyview_core::{LocationError, LocationProvider};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> IpLocationProvider {
    IpLocationProvider::new(format!("{}/json", server.uri()))
}

#[test]
fn default_timeout_is_ten_seconds() {
    assert_eq!(LOCATION_TIMEOUT, Duration::from_secs(10));
}

#[tokio::test]
async fn success_yields_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "country": "United Kingdom",
            "city": "London",
            "lat": 51.5074,
            "lon": -0.1278
        })))
        .expect(1)
        .mount(&server)
        .await;

    let coords = provider(&server).current_location().await.unwrap();

    assert_eq!(coords.latitude, 51.5074);
    assert_eq!(coords.longitude, -0.1278);
}

#[tokio::test]
async fn failed_status_is_position_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "private range"
        })))
        .mount(&server)
        .await;

    let err = provider(&server).current_location().await.unwrap_err();
    assert_eq!(err, LocationError::PositionUnavailable);
}

#[tokio::test]
async fn forbidden_is_permission_denied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = provider(&server).current_location().await.unwrap_err();
    assert_eq!(err, LocationError::PermissionDenied);
}

#[tokio::test]
async fn server_error_is_position_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = provider(&server).current_location().await.unwrap_err();
    assert_eq!(err, LocationError::PositionUnavailable);
}

#[tokio::test]
async fn garbage_body_is_other() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .mount(&server)
        .await;

    let err = provider(&server).current_location().await.unwrap_err();
    assert_eq!(err, LocationError::Other);
    assert_eq!(err.to_string(), "Failed to get your location.");
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "success", "lat": 1.0, "lon": 1.0 }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = provider(&server)
        .with_timeout(Duration::from_millis(100))
        .current_location()
        .await
        .unwrap_err();

    assert_eq!(err, LocationError::Timeout);
    assert_eq!(err.to_string(), "Location request timed out.");
}
