use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::Config;
use crate::error::FetchError;
use crate::location::Coordinates;
use crate::model::WeatherSnapshot;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Icon substituted when a featured tile could not be fetched.
pub const DEFAULT_ICON: &str = "01d";

/// Detail-surface icon asset (2x raster) derived from the condition code.
pub fn icon_url(code: &str) -> String {
    format!("{ICON_BASE_URL}/{code}@2x.png")
}

/// Small icon variant used by the featured-city grid.
pub fn icon_url_small(code: &str) -> String {
    format!("{ICON_BASE_URL}/{code}.png")
}

/// What to ask the upstream for: a city by name, or a coordinate pair.
#[derive(Debug, Clone, Copy)]
pub enum Place<'a> {
    City(&'a str),
    Coords(Coordinates),
}

/// Metric reading backing one featured tile.
#[derive(Debug, Clone)]
pub struct MetricGlance {
    pub temp_c: f64,
    pub icon: String,
}

/// Client for the OpenWeatherMap current-conditions endpoint.
///
/// Deliberately concrete: this crate assumes exactly one upstream response
/// shape and does not abstract over weather providers.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint; tests aim it at a stub server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Current conditions in upstream-standard units (kelvin, m/s).
    pub async fn current(&self, place: Place<'_>) -> Result<WeatherSnapshot, FetchError> {
        let body = self.fetch(place, false).await?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_snapshot())
    }

    /// Reading for a featured tile, requested with `units=metric`; only the
    /// temperature and icon matter to the caller.
    pub async fn metric_glance(&self, city: &str) -> Result<MetricGlance, FetchError> {
        let body = self.fetch(Place::City(city), true).await?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        let icon = parsed.primary_icon();
        Ok(MetricGlance {
            temp_c: parsed.main.temp,
            icon,
        })
    }

    async fn fetch(&self, place: Place<'_>, metric: bool) -> Result<String, FetchError> {
        let mut query: Vec<(&str, String)> = match place {
            Place::City(name) => vec![("q", name.to_string())],
            Place::Coords(c) => vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())],
        };
        query.push(("appid", self.api_key.clone()));
        if metric {
            query.push(("units", "metric".to_string()));
        }

        tracing::debug!(?place, metric, "requesting current conditions");

        let res = self.http.get(&self.base_url).query(&query).send().await?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(res.text().await?)
    }
}

/// Construct a client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `skycast configure` and enter your OpenWeatherMap API key."
        )
    })?;

    Ok(OpenWeatherClient::new(api_key.to_owned()))
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    icon: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    timezone: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

impl OwCurrentResponse {
    fn primary_icon(&self) -> String {
        self.weather
            .first()
            .map(|w| w.icon.clone())
            .unwrap_or_else(|| DEFAULT_ICON.to_string())
    }

    fn into_snapshot(self) -> WeatherSnapshot {
        let icon = self.primary_icon();
        let description = self
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "unknown".to_string());

        WeatherSnapshot {
            city: self.name,
            country: self.sys.country.unwrap_or_default(),
            temperature_k: self.main.temp,
            feels_like_k: self.main.feels_like,
            temp_min_k: self.main.temp_min,
            temp_max_k: self.main.temp_max,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            icon,
            description,
            sunrise_unix: self.sys.sunrise,
            sunset_unix: self.sys.sunset,
            timezone_offset_secs: self.timezone,
        }
    }
}
