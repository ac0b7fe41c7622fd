//! City lookup and the featured-cities panel.

use futures::future::join_all;

use crate::error::LookupError;
use crate::location::LocationSource;
use crate::provider::{self, DEFAULT_ICON, OpenWeatherClient, Place};

/// One entry in the featured-cities panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityTile {
    pub name: String,
    pub temperature: String,
    pub icon_url: String,
}

impl CityTile {
    /// Stand-in shown when a city's fetch fails, so the panel never goes ragged.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temperature: "--".to_string(),
            icon_url: provider::icon_url_small(DEFAULT_ICON),
        }
    }
}

/// Normalizes a typed city query. Whitespace-only input is rejected before
/// any request goes out.
pub fn validate_city(input: &str) -> Result<&str, LookupError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LookupError::EmptyQuery);
    }
    Ok(trimmed)
}

/// Resolves the device position to a city name by reverse geocoding through
/// the weather endpoint.
pub async fn city_from_location(
    source: &dyn LocationSource,
    client: &OpenWeatherClient,
) -> Result<String, LookupError> {
    let coords = source.current_position().await?;
    let snapshot = client
        .current(Place::Coords(coords))
        .await
        .map_err(LookupError::ReverseGeocode)?;
    Ok(snapshot.city)
}

/// Fetches the panel tiles concurrently. A failed city logs a warning and
/// falls back to the placeholder without sinking its neighbours.
pub async fn featured_panel(client: &OpenWeatherClient, cities: &[String]) -> Vec<CityTile> {
    let fetches = cities.iter().map(|city| async move {
        match client.metric_glance(city).await {
            Ok(glance) => CityTile {
                name: city.clone(),
                temperature: whole_degrees(glance.temp_c),
                icon_url: provider::icon_url_small(&glance.icon),
            },
            Err(err) => {
                tracing::warn!(%city, error = %err, "featured city fetch failed");
                CityTile::placeholder(city.clone())
            }
        }
    });
    join_all(fetches).await
}

/// Panel temperatures are whole degrees, halves rounding away from zero.
fn whole_degrees(temp_c: f64) -> String {
    format!("{}", temp_c.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_city_trims_surrounding_whitespace() {
        assert_eq!(validate_city("  Shimla  ").expect("valid"), "Shimla");
    }

    #[test]
    fn validate_city_rejects_empty_input() {
        assert!(matches!(validate_city(""), Err(LookupError::EmptyQuery)));
        assert!(matches!(validate_city("   "), Err(LookupError::EmptyQuery)));
    }

    #[test]
    fn whole_degrees_rounds_halves_away_from_zero() {
        assert_eq!(whole_degrees(26.5), "27");
        assert_eq!(whole_degrees(-5.5), "-6");
        assert_eq!(whole_degrees(27.0), "27");
        assert_eq!(whole_degrees(-0.4), "0");
    }

    #[test]
    fn placeholder_tile_keeps_the_city_name() {
        let tile = CityTile::placeholder("Bhopal");
        assert_eq!(tile.name, "Bhopal");
        assert_eq!(tile.temperature, "--");
        assert_eq!(
            tile.icon_url,
            "https://openweathermap.org/img/wn/01d.png"
        );
    }
}
