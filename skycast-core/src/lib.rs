//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and the device-position seam
//! - The conversion & formatting engine shared by every surface
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod detail;
pub mod display;
pub mod error;
pub mod handoff;
pub mod location;
pub mod lookup;
pub mod model;
pub mod provider;

pub use config::Config;
pub use detail::{DetailSession, RenderSink};
pub use error::{FetchError, LocationError, LookupError};
pub use location::{Coordinates, IpLocationSource, LocationSource};
pub use lookup::CityTile;
pub use model::{DisplayModel, UnitPreference, WeatherSnapshot};
pub use provider::OpenWeatherClient;
