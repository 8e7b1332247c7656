use serde::{Deserialize, Serialize};

/// Coarse weather classification as reported in `weather[0].main`.
///
/// Categories the app has no dedicated presentation for land in `Unknown`,
/// so every lookup table keyed by this enum is a total `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionCategory {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    Unknown,
}

impl ConditionCategory {
    /// Case-insensitive parse; never fails.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "rain" => Self::Rain,
            "drizzle" => Self::Drizzle,
            "thunderstorm" => Self::Thunderstorm,
            "snow" => Self::Snow,
            "mist" => Self::Mist,
            "fog" => Self::Fog,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Clouds => "clouds",
            Self::Rain => "rain",
            Self::Drizzle => "drizzle",
            Self::Thunderstorm => "thunderstorm",
            Self::Snow => "snow",
            Self::Mist => "mist",
            Self::Fog => "fog",
            Self::Unknown => "unknown",
        }
    }

    pub const fn all() -> &'static [ConditionCategory] {
        &[
            Self::Clear,
            Self::Clouds,
            Self::Rain,
            Self::Drizzle,
            Self::Thunderstorm,
            Self::Snow,
            Self::Mist,
            Self::Fog,
            Self::Unknown,
        ]
    }
}

impl std::fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ConditionCategory {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(ConditionCategory::parse("Clear"), ConditionCategory::Clear);
        assert_eq!(ConditionCategory::parse("CLOUDS"), ConditionCategory::Clouds);
        assert_eq!(ConditionCategory::parse("thunderStorm"), ConditionCategory::Thunderstorm);
        assert_eq!(ConditionCategory::parse(" snow "), ConditionCategory::Snow);
    }

    #[test]
    fn unrecognized_and_empty_are_unknown() {
        assert_eq!(ConditionCategory::parse(""), ConditionCategory::Unknown);
        assert_eq!(ConditionCategory::parse("Haze"), ConditionCategory::Unknown);
        assert_eq!(ConditionCategory::parse("tornado"), ConditionCategory::Unknown);
    }

    #[test]
    fn as_str_roundtrip() {
        for category in ConditionCategory::all() {
            assert_eq!(ConditionCategory::parse(category.as_str()), *category);
        }
    }
}
