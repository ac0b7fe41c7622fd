//! Conversion and formatting engine.
//!
//! Turns one [`WeatherSnapshot`] plus the active [`UnitPreference`] into a
//! [`DisplayModel`]. Pure and synchronous: no I/O, no wall clock, no hidden
//! state, so rendering the same inputs twice yields identical output.

use chrono::{DateTime, Timelike};

use crate::model::{DisplayModel, UnitPreference, WeatherSnapshot};
use crate::provider;

const KELVIN_OFFSET: f64 = 273.15;
const MPS_TO_KMH: f64 = 3.6;
const MPS_TO_MPH: f64 = 2.23694;
const REGIONAL_INDICATOR_BASE: u32 = 0x1F1E6;

/// Kelvin to the displayable scale for `unit`, at full precision.
///
/// Rounding is a formatting concern and happens exactly once, in the
/// `format_*` helpers.
pub fn convert_temperature(kelvin: f64, unit: UnitPreference) -> f64 {
    let celsius = kelvin - KELVIN_OFFSET;
    match unit {
        UnitPreference::Celsius => celsius,
        UnitPreference::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    }
}

/// Meters per second to the wind scale paired with `unit`: km/h alongside
/// Celsius, mph alongside Fahrenheit. There is no independent wind unit.
pub fn convert_wind_speed(meters_per_second: f64, unit: UnitPreference) -> f64 {
    match unit {
        UnitPreference::Celsius => meters_per_second * MPS_TO_KMH,
        UnitPreference::Fahrenheit => meters_per_second * MPS_TO_MPH,
    }
}

pub fn unit_symbol(unit: UnitPreference) -> &'static str {
    match unit {
        UnitPreference::Celsius => "°C",
        UnitPreference::Fahrenheit => "°F",
    }
}

pub fn wind_label(unit: UnitPreference) -> &'static str {
    match unit {
        UnitPreference::Celsius => "km/h",
        UnitPreference::Fahrenheit => "mph",
    }
}

/// "H:MM AM/PM" for a unix instant with a pre-applied zone offset.
///
/// The shifted instant must be read with UTC clock fields; going through the
/// machine's local zone would apply an offset twice.
pub fn local_time_from_unix(unix_seconds: i64, timezone_offset_secs: i64) -> String {
    let shifted =
        DateTime::from_timestamp(unix_seconds + timezone_offset_secs, 0).unwrap_or_default();

    let hour = shifted.hour();
    let minute = shifted.minute();
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let clock_hour = match hour % 12 {
        0 => 12,
        h => h,
    };

    format!("{clock_hour}:{minute:02} {meridiem}")
}

/// Uppercase the first character, leave the rest untouched. Char-based, so a
/// multi-byte first character is handled correctly.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Two-letter ISO country code to a regional-indicator pair. An empty or
/// absent code yields an empty string, never an error.
pub fn flag_glyph(country_code: &str) -> String {
    country_code
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(char::is_ascii_uppercase)
        .filter_map(|c| char::from_u32(REGIONAL_INDICATOR_BASE + (c as u32 - 'A' as u32)))
        .collect()
}

/// "27.0°C" style temperature with its unit suffix.
pub fn format_temperature(kelvin: f64, unit: UnitPreference) -> String {
    format!(
        "{:.1}{}",
        round_one_decimal(convert_temperature(kelvin, unit)),
        unit_symbol(unit)
    )
}

/// "18.0 km/h" style wind speed with the label paired to `unit`.
pub fn format_wind_speed(meters_per_second: f64, unit: UnitPreference) -> String {
    format!(
        "{:.1} {}",
        round_one_decimal(convert_wind_speed(meters_per_second, unit)),
        wind_label(unit)
    )
}

/// Assemble the full display model for one snapshot under one unit.
pub fn render(snapshot: &WeatherSnapshot, unit: UnitPreference) -> DisplayModel {
    DisplayModel {
        city_line: format!("{}, {}", snapshot.city, snapshot.country),
        flag: flag_glyph(&snapshot.country),
        icon_url: provider::icon_url(&snapshot.icon),
        condition: capitalize_first(&snapshot.description),
        temperature: format_temperature(snapshot.temperature_k, unit),
        feels_like: format_temperature(snapshot.feels_like_k, unit),
        temp_min: format_temperature(snapshot.temp_min_k, unit),
        temp_max: format_temperature(snapshot.temp_max_k, unit),
        humidity: format!("{}%", snapshot.humidity_pct),
        wind_speed: format_wind_speed(snapshot.wind_speed_mps, unit),
        sunrise: local_time_from_unix(snapshot.sunrise_unix, snapshot.timezone_offset_secs),
        sunset: local_time_from_unix(snapshot.sunset_unix, snapshot.timezone_offset_secs),
    }
}

/// Round half away from zero at one decimal.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Shimla".to_string(),
            country: "IN".to_string(),
            temperature_k: 300.15,
            feels_like_k: 299.0,
            temp_min_k: 295.15,
            temp_max_k: 303.15,
            humidity_pct: 78,
            wind_speed_mps: 5.0,
            icon: "01d".to_string(),
            description: "clear sky".to_string(),
            sunrise_unix: 1_700_000_000,
            sunset_unix: 1_700_040_000,
            timezone_offset_secs: 19_800,
        }
    }

    #[test]
    fn kelvin_to_celsius_and_fahrenheit() {
        let k = 285.4;
        assert!((convert_temperature(k, UnitPreference::Celsius) - (k - 273.15)).abs() < 1e-9);
        assert!(
            (convert_temperature(k, UnitPreference::Fahrenheit) - ((k - 273.15) * 9.0 / 5.0 + 32.0))
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn freezing_point_formats_exactly() {
        assert_eq!(format_temperature(273.15, UnitPreference::Celsius), "0.0°C");
        assert_eq!(
            format_temperature(273.15, UnitPreference::Fahrenheit),
            "32.0°F"
        );
    }

    #[test]
    fn wind_speed_conversion_pairs_with_the_temperature_unit() {
        assert_eq!(
            format_wind_speed(10.0, UnitPreference::Celsius),
            "36.0 km/h"
        );
        assert_eq!(
            format_wind_speed(10.0, UnitPreference::Fahrenheit),
            "22.4 mph"
        );
    }

    #[test]
    fn unit_symbols_and_wind_labels() {
        assert_eq!(unit_symbol(UnitPreference::Celsius), "°C");
        assert_eq!(unit_symbol(UnitPreference::Fahrenheit), "°F");
        assert_eq!(wind_label(UnitPreference::Celsius), "km/h");
        assert_eq!(wind_label(UnitPreference::Fahrenheit), "mph");
    }

    #[test]
    fn midnight_wraps_to_twelve() {
        assert_eq!(local_time_from_unix(0, 0), "12:00 AM");
    }

    #[test]
    fn afternoon_uses_pm() {
        assert_eq!(local_time_from_unix(3600 * 13, 0), "1:00 PM");
    }

    #[test]
    fn noon_is_twelve_pm() {
        assert_eq!(local_time_from_unix(3600 * 12, 0), "12:00 PM");
    }

    #[test]
    fn minutes_are_zero_padded() {
        assert_eq!(local_time_from_unix(5 * 60, 0), "12:05 AM");
    }

    #[test]
    fn offset_is_applied_once_not_twice() {
        // Noon UTC, one hour west: the wall clock there reads 11 AM.
        assert_eq!(local_time_from_unix(43_200, -3_600), "11:00 AM");
        // And the offset may carry the instant across a date boundary.
        assert_eq!(local_time_from_unix(0, -3_600), "11:00 PM");
    }

    #[test]
    fn flag_glyph_builds_regional_indicator_pairs() {
        assert_eq!(flag_glyph("IN"), "\u{1F1EE}\u{1F1F3}");
        assert_eq!(flag_glyph("us"), "\u{1F1FA}\u{1F1F8}");
        assert_eq!(flag_glyph(""), "");
    }

    #[test]
    fn capitalize_first_leaves_the_rest_alone() {
        assert_eq!(capitalize_first("clear sky"), "Clear sky");
        assert_eq!(capitalize_first("überwiegend bewölkt"), "Überwiegend bewölkt");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("Broken clouds"), "Broken clouds");
    }

    #[test]
    fn render_is_idempotent() {
        let snap = snapshot();
        let first = render(&snap, UnitPreference::Fahrenheit);
        let second = render(&snap, UnitPreference::Fahrenheit);
        assert_eq!(first, second);
    }

    #[test]
    fn render_celsius_scenario() {
        let model = render(&snapshot(), UnitPreference::Celsius);
        assert_eq!(model.city_line, "Shimla, IN");
        assert_eq!(model.flag, "\u{1F1EE}\u{1F1F3}");
        assert_eq!(model.condition, "Clear sky");
        assert_eq!(model.temperature, "27.0°C");
        assert_eq!(model.feels_like, "25.9°C");
        assert_eq!(model.humidity, "78%");
        assert_eq!(model.wind_speed, "18.0 km/h");
        assert_eq!(
            model.icon_url,
            "https://openweathermap.org/img/wn/01d@2x.png"
        );
    }

    #[test]
    fn render_fahrenheit_scenario_same_snapshot_no_refetch_needed() {
        let model = render(&snapshot(), UnitPreference::Fahrenheit);
        assert_eq!(model.temperature, "80.6°F");
        assert_eq!(model.feels_like, "78.5°F");
        assert_eq!(model.wind_speed, "11.2 mph");
        // Unit-independent fields are untouched by the toggle.
        assert_eq!(model.humidity, "78%");
        assert_eq!(model.condition, "Clear sky");
    }

    #[test]
    fn sunrise_sunset_use_the_snapshot_offset() {
        let snap = snapshot();
        let model = render(&snap, UnitPreference::Celsius);
        assert_eq!(
            model.sunrise,
            local_time_from_unix(snap.sunrise_unix, snap.timezone_offset_secs)
        );
        assert_eq!(
            model.sunset,
            local_time_from_unix(snap.sunset_unix, snap.timezone_offset_secs)
        );
    }
}
