//! Terminal rendering of the controller's view.
//!
//! Everything here builds plain `String`s; printing happens at the call site.

use chrono::{DateTime, FixedOffset, Utc};
use colored::{Color, ColoredString, Colorize};
use skyview_core::{
    ForecastEntry, Status, TimeOfDay, View, WeatherSnapshot, animation,
    theme::{self, ThemeDescriptor, ThemeKind},
};

/// Terminal stand-in for the theme's accent token.
pub fn accent(theme: &ThemeDescriptor) -> Color {
    match theme.kind {
        ThemeKind::Night => Color::Magenta,
        ThemeKind::Clear => Color::Yellow,
        ThemeKind::Clouds => Color::White,
        ThemeKind::Rain => Color::Blue,
        ThemeKind::Thunderstorm => Color::BrightBlack,
        ThemeKind::Snow => Color::BrightCyan,
        ThemeKind::Default => Color::Cyan,
    }
}

fn tint(text: &str, theme: &ThemeDescriptor) -> ColoredString {
    text.color(accent(theme))
}

pub fn banner(theme: &ThemeDescriptor) -> String {
    format!("{}\n{}", "Weather".bold().color(accent(theme)), tint("Forecast", theme))
}

pub fn loading(theme: &ThemeDescriptor) -> String {
    format!(
        "{} {}\n  {} {}",
        tint("…", theme),
        "Loading weather data".italic(),
        tint("Animation", theme),
        animation::LOADING
    )
}

pub fn error_panel(message: &str, theme: &ThemeDescriptor, can_retry: bool) -> String {
    let mut out = format!(
        "{}\n  {}",
        "Oops! Something went wrong".red().bold(),
        tint(message, theme)
    );
    if can_retry {
        out.push_str(&format!("\n  Type {} to try again.", ":retry".bold()));
    }
    out
}

pub fn idle(theme: &ThemeDescriptor) -> String {
    tint("Search for a city to see its weather.", theme).to_string()
}

/// Half-up rounding for displayed figures: 2.5 shows as 3, -2.5 as -2.
fn whole(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn local_time(ts: DateTime<Utc>, offset: FixedOffset) -> String {
    ts.with_timezone(&offset).format("%H:%M").to_string()
}

pub fn card(snapshot: &WeatherSnapshot, view: &View) -> String {
    let theme = &view.theme;
    let offset = snapshot.local_offset();

    let heading = if snapshot.country.is_empty() {
        snapshot.location_name.clone()
    } else {
        format!("{}, {}", snapshot.location_name, snapshot.country)
    };

    let mut lines = vec![
        heading.bold().color(accent(theme)).to_string(),
        format!(
            "  {}  {}",
            format!("{}°C", whole(snapshot.temperature_c)).bold(),
            snapshot.description
        ),
        format!("  Feels like {}°C", whole(snapshot.feels_like_c)),
        format!(
            "  {} {} m/s   {} {}%   {} {} hPa",
            tint("Wind", theme),
            whole(snapshot.wind_speed_mps),
            tint("Humidity", theme),
            snapshot.humidity_pct,
            tint("Pressure", theme),
            whole(snapshot.pressure_hpa),
        ),
        format!(
            "  {} {}   {} {}",
            tint("Sunrise", theme),
            local_time(snapshot.sunrise, offset),
            tint("Sunset", theme),
            local_time(snapshot.sunset, offset),
        ),
    ];

    if let Some(time_of_day) = view.time_of_day {
        lines.push(format!("  {} {} · {}", tint("Theme", theme), time_of_day, theme.gradient));
    }
    if let Some(asset) = view.animation {
        lines.push(format!("  {} {}", tint("Animation", theme), asset));
    }
    if let Some(icon) = &view.icon_url {
        lines.push(format!("  {} {}", tint("Icon", theme), icon));
    }

    lines.join("\n")
}

/// Human-readable rendering of whatever state dominates.
pub fn view(view: &View, can_retry: bool) -> String {
    match (view.status, &view.state.snapshot, &view.state.error_message) {
        (Status::Loading, _, _) => loading(&view.theme),
        (Status::Failure, _, Some(message)) => error_panel(message, &view.theme, can_retry),
        (Status::Success, Some(snapshot), _) => card(snapshot, view),
        _ => idle(&view.theme),
    }
}

pub fn forecast(city: &str, entries: &[ForecastEntry]) -> String {
    if entries.is_empty() {
        return format!("No forecast available for {city}.");
    }

    let mut out = format!("{}", format!("{}-Day Forecast for {city}", entries.len()).bold());
    for entry in entries {
        let theme = theme::resolve_str(&entry.condition, TimeOfDay::Day);
        out.push_str(&format!(
            "\n  {}  {:>4}  {:<20} H: {}°  L: {}°",
            entry.date.format("%a %b %-d").to_string().color(accent(&theme)),
            format!("{}°", whole(entry.temperature_c)),
            entry.description,
            whole(entry.temp_max_c),
            whole(entry.temp_min_c),
        ));
    }
    out
}
