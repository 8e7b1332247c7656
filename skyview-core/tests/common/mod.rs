#![allow(dead_code)]

/// Sunrise used by the fixtures: 2023-11-14T22:13:20Z.
pub const SUNRISE: i64 = 1_700_000_000;
pub const SUNSET: i64 = SUNRISE + 9 * 3600;

/// Current-weather body in the shape OpenWeatherMap returns.
pub fn current_weather(name: &str, country: &str, main: &str) -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -0.1257, "lat": 51.5085 },
        "weather": [
            { "id": 800, "main": main, "description": "clear sky", "icon": "01d" }
        ],
        "base": "stations",
        "main": {
            "temp": 18.42,
            "feels_like": 17.91,
            "temp_min": 16.8,
            "temp_max": 19.9,
            "pressure": 1014,
            "humidity": 61
        },
        "visibility": 10000,
        "wind": { "speed": 3.6, "deg": 240 },
        "clouds": { "all": 0 },
        "dt": SUNRISE + 3 * 3600,
        "sys": {
            "type": 2,
            "id": 2075535,
            "country": country,
            "sunrise": SUNRISE,
            "sunset": SUNSET
        },
        "timezone": 0,
        "id": 2643743,
        "name": name,
        "cod": 200
    })
}

pub fn not_found_body() -> serde_json::Value {
    serde_json::json!({ "cod": "404", "message": "city not found" })
}
