//! Detail surface session.
//!
//! All surface state lives here: the active unit and the last fetched
//! snapshot. A unit toggle re-renders the stored snapshot through the
//! formatting engine; it never refetches.

use crate::display;
use crate::handoff;
use crate::model::{DisplayModel, UnitPreference, WeatherSnapshot};
use crate::provider::{OpenWeatherClient, Place};

/// Shown when the surface is opened without a hand-off city.
pub const NO_CITY_GUIDANCE: &str =
    "No city specified. Please return to the home page to search.";

/// Where the session pushes its output. The terminal front end implements
/// this; tests plug in a recording sink.
pub trait RenderSink {
    fn show_weather(&mut self, model: &DisplayModel);
    fn show_error(&mut self, message: &str);
}

/// One open detail surface.
pub struct DetailSession<'a, S: RenderSink> {
    client: &'a OpenWeatherClient,
    sink: S,
    unit: UnitPreference,
    snapshot: Option<WeatherSnapshot>,
}

impl<'a, S: RenderSink> DetailSession<'a, S> {
    pub fn new(client: &'a OpenWeatherClient, sink: S, unit: UnitPreference) -> Self {
        Self {
            client,
            sink,
            unit,
            snapshot: None,
        }
    }

    /// Opens the surface with the raw hand-off query string. A missing or
    /// blank city is guidance territory, not an error.
    pub async fn open(&mut self, handoff_query: Option<&str>) {
        match handoff_query.and_then(handoff::city_from_query) {
            Some(city) => self.load(&city).await,
            None => self.sink.show_error(NO_CITY_GUIDANCE),
        }
    }

    /// Fetches `city` and renders it. On failure the previous snapshot is
    /// kept, so a later unit toggle still has something to show.
    pub async fn load(&mut self, city: &str) {
        match self.client.current(Place::City(city)).await {
            Ok(snapshot) => {
                let model = display::render(&snapshot, self.unit);
                self.snapshot = Some(snapshot);
                self.sink.show_weather(&model);
            }
            Err(err) => {
                tracing::warn!(%city, error = %err, "detail fetch failed");
                self.sink.show_error(&err.user_message());
            }
        }
    }

    /// Switches the active unit and re-renders the stored snapshot.
    /// Selecting the already-active unit does nothing.
    pub fn set_unit(&mut self, unit: UnitPreference) {
        if unit == self.unit {
            return;
        }
        self.unit = unit;
        if let Some(snapshot) = &self.snapshot {
            let model = display::render(snapshot, self.unit);
            self.sink.show_weather(&model);
        }
    }

    pub fn unit(&self) -> UnitPreference {
        self.unit
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
