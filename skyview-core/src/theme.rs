//! Weather- and time-driven visual theming.
//!
//! The tokens are opaque style classes handed to whatever renders the
//! weather view; the core never interprets them.

use serde::Serialize;

use crate::{condition::ConditionCategory, time_of_day::TimeOfDay};

/// Which table entry a descriptor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    Night,
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeDescriptor {
    pub kind: ThemeKind,
    pub gradient: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
}

pub const NIGHT: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Night,
    gradient: "from-slate-900 via-purple-900 to-slate-900",
    card: "bg-slate-800/40 border-slate-700/50",
    text: "text-white",
    accent: "text-purple-300",
};

pub const CLEAR: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Clear,
    gradient: "from-yellow-400 via-orange-500 to-red-500",
    card: "bg-white/20 border-white/30",
    text: "text-white",
    accent: "text-yellow-100",
};

pub const CLOUDS: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Clouds,
    gradient: "from-gray-400 via-gray-500 to-gray-600",
    card: "bg-white/25 border-white/35",
    text: "text-white",
    accent: "text-gray-100",
};

pub const RAIN: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Rain,
    gradient: "from-blue-400 via-blue-500 to-indigo-600",
    card: "bg-white/20 border-white/30",
    text: "text-white",
    accent: "text-blue-100",
};

pub const THUNDERSTORM: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Thunderstorm,
    gradient: "from-gray-700 via-gray-800 to-black",
    card: "bg-white/15 border-white/25",
    text: "text-white",
    accent: "text-gray-200",
};

pub const SNOW: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Snow,
    gradient: "from-blue-100 via-white to-blue-200",
    card: "bg-white/40 border-white/50",
    text: "text-gray-800",
    accent: "text-blue-600",
};

/// Used for unrecognized conditions and whenever there is no snapshot.
pub const DEFAULT: ThemeDescriptor = ThemeDescriptor {
    kind: ThemeKind::Default,
    gradient: "from-blue-400 via-blue-500 to-blue-600",
    card: "bg-white/20 border-white/30",
    text: "text-white",
    accent: "text-blue-100",
};

/// Night overrides every condition-based theme.
pub fn resolve(category: ConditionCategory, time_of_day: TimeOfDay) -> ThemeDescriptor {
    if time_of_day == TimeOfDay::Night {
        return NIGHT;
    }

    match category {
        ConditionCategory::Clear => CLEAR,
        ConditionCategory::Clouds => CLOUDS,
        ConditionCategory::Rain | ConditionCategory::Drizzle => RAIN,
        ConditionCategory::Thunderstorm => THUNDERSTORM,
        ConditionCategory::Snow => SNOW,
        ConditionCategory::Mist | ConditionCategory::Fog | ConditionCategory::Unknown => DEFAULT,
    }
}

pub fn resolve_str(category: &str, time_of_day: TimeOfDay) -> ThemeDescriptor {
    resolve(ConditionCategory::parse(category), time_of_day)
}
