use serde::{Deserialize, Serialize};

/// One immutable weather reading for a city, parsed from a single upstream
/// response.
///
/// Temperatures stay in kelvin and sunrise/sunset in unix seconds; every
/// display concern (units, clocks, glyphs) is applied later by
/// [`crate::display::render`]. A new fetch replaces the snapshot wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub temperature_k: f64,
    pub feels_like_k: f64,
    pub temp_min_k: f64,
    pub temp_max_k: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub icon: String,
    pub description: String,
    pub sunrise_unix: i64,
    pub sunset_unix: i64,
    pub timezone_offset_secs: i64,
}

/// User-selected measurement system, applied only at render time.
///
/// Changing it re-renders the last snapshot; it never triggers a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    Celsius,
    Fahrenheit,
}

impl UnitPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitPreference::Celsius => "celsius",
            UnitPreference::Fahrenheit => "fahrenheit",
        }
    }

    pub const fn all() -> &'static [UnitPreference] {
        &[UnitPreference::Celsius, UnitPreference::Fahrenheit]
    }
}

impl std::fmt::Display for UnitPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitPreference {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "c" | "celsius" | "metric" => Ok(UnitPreference::Celsius),
            "f" | "fahrenheit" | "imperial" => Ok(UnitPreference::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

/// Fully formatted values for one render of the detail surface.
///
/// Recomputed deterministically from a ([`WeatherSnapshot`], [`UnitPreference`])
/// pair; nothing here is cached past the current render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
    /// "City, CC" headline.
    pub city_line: String,
    /// Regional-indicator flag for the country code, possibly empty.
    pub flag: String,
    pub icon_url: String,
    pub condition: String,
    pub temperature: String,
    pub feels_like: String,
    pub temp_min: String,
    pub temp_max: String,
    pub humidity: String,
    pub wind_speed: String,
    pub sunrise: String,
    pub sunset: String,
}
