use crate::condition::ConditionCategory;

const SUN: &str = "https://assets3.lottiefiles.com/packages/lf20_puciaact.json";
const CLOUDS: &str = "https://assets2.lottiefiles.com/packages/lf20_V9t630.json";
const RAIN: &str = "https://assets9.lottiefiles.com/packages/lf20_raiw2hcs.json";
const THUNDER: &str = "https://assets4.lottiefiles.com/packages/lf20_ydo1amjm.json";
const SNOW: &str = "https://assets4.lottiefiles.com/packages/lf20_fy7rj4bb.json";

/// Shown by the loading indicator while a request is in flight.
pub const LOADING: &str =
    "https://lottie.host/9i0j1k2l-3m4n-5o6p-7q8r-9s0t1u2v3w4x/loading-weather.json";

const ICON_BASE: &str = "https://openweathermap.org/img/wn";

/// Animation asset for a condition. `Unknown` gets the clear-sky asset.
pub fn resolve(category: ConditionCategory) -> &'static str {
    match category {
        ConditionCategory::Clear | ConditionCategory::Unknown => SUN,
        ConditionCategory::Clouds | ConditionCategory::Mist | ConditionCategory::Fog => CLOUDS,
        ConditionCategory::Rain | ConditionCategory::Drizzle => RAIN,
        ConditionCategory::Thunderstorm => THUNDER,
        ConditionCategory::Snow => SNOW,
    }
}

pub fn resolve_str(category: &str) -> &'static str {
    resolve(ConditionCategory::parse(category))
}

/// Static icon for a service icon code such as `"10d"`.
pub fn icon_url(code: &str) -> String {
    format!("{ICON_BASE}/{code}@2x.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_have_assets() {
        assert_eq!(resolve_str("Rain"), resolve_str("drizzle"));
        assert_eq!(resolve_str("Mist"), resolve_str("Clouds"));
        assert_ne!(resolve_str("Snow"), resolve_str("Clear"));
        assert_ne!(resolve_str("Thunderstorm"), resolve_str("Rain"));
    }

    #[test]
    fn unrecognized_maps_to_clear_asset() {
        let clear = resolve_str("clear");
        for raw in ["", "Haze", "Tornado", "sand"] {
            assert_eq!(resolve_str(raw), clear, "category {raw:?}");
        }
    }

    #[test]
    fn catalog_is_total_and_stable() {
        for category in ConditionCategory::all() {
            let first = resolve(*category);
            assert!(first.ends_with(".json"));
            assert_eq!(first, resolve(*category));
        }
    }

    #[test]
    fn icon_url_uses_code() {
        assert_eq!(icon_url("01d"), "https://openweathermap.org/img/wn/01d@2x.png");
    }
}
