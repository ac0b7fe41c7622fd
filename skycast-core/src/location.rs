//! Device-position seam.
//!
//! The geolocation facility is an external collaborator, so it sits behind a
//! trait. The shipped implementation geolocates by IP, which is as close as a
//! terminal client gets to a position fix without platform location services.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::LocationError;

const DEFAULT_ENDPOINT: &str = "http://ip-api.com/json";
const POSITION_TIMEOUT: Duration = Duration::from_secs(10);

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Source of the device's current position.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position fix via keyless IP geolocation.
#[derive(Debug, Clone)]
pub struct IpLocationSource {
    http: Client,
    endpoint: String,
}

impl IpLocationSource {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point the source at a different endpoint; tests aim it at a stub server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn query(&self) -> Result<Coordinates, LocationError> {
        let res = self.http.get(&self.endpoint).send().await.map_err(|e| {
            if e.is_timeout() {
                LocationError::Timeout
            } else {
                LocationError::Other(e.to_string())
            }
        })?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LocationError::PermissionDenied);
        }
        if !status.is_success() {
            return Err(LocationError::PositionUnavailable);
        }

        let body: IpApiResponse = res
            .json()
            .await
            .map_err(|_| LocationError::PositionUnavailable)?;
        body.into_coordinates()
    }
}

impl Default for IpLocationSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocationSource for IpLocationSource {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        match tokio::time::timeout(POSITION_TIMEOUT, self.query()).await {
            Ok(result) => result,
            Err(_) => Err(LocationError::Timeout),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

impl IpApiResponse {
    fn into_coordinates(self) -> Result<Coordinates, LocationError> {
        if self.status != "success" {
            let reason = self.message.unwrap_or_else(|| "lookup failed".to_string());
            tracing::debug!(%reason, "ip geolocation refused");
            return Err(LocationError::PositionUnavailable);
        }

        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
            _ => Err(LocationError::PositionUnavailable),
        }
    }
}
