use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a unix timestamp against a sunrise/sunset pair.
///
/// Both bounds are inclusive. A degenerate pair (sunset before sunrise)
/// classifies every instant as night.
pub fn resolve(now: i64, sunrise: i64, sunset: i64) -> TimeOfDay {
    if sunrise <= now && now <= sunset {
        TimeOfDay::Day
    } else {
        TimeOfDay::Night
    }
}

pub fn resolve_at(now: DateTime<Utc>, sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> TimeOfDay {
    resolve(now.timestamp(), sunrise.timestamp(), sunset.timestamp())
}
