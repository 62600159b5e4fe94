use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, instrument};
use waymark_core::{error::RouteError, route_query::RouteQuery, route_result::RouteResult};

use crate::directions_response::DirectionsResponse;

pub const GOOGLE_DIRECTIONS_API_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

pub const API_KEY_ENV_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const DIRECTIONS_URL_ENV_VAR: &str = "WAYMARK_DIRECTIONS_URL";
pub const HTTP_TIMEOUT_ENV_VAR: &str = "WAYMARK_HTTP_TIMEOUT_MS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum DirectionsError {
    #[error("GOOGLE_MAPS_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Built with the request URL stripped, since its query string carries the
    /// API key.
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Route(#[from] RouteError),
}

pub struct DirectionsClientParams {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl DirectionsError {
    fn request(error: reqwest::Error) -> Self {
        DirectionsError::Request(error.without_url())
    }
}

impl DirectionsClientParams {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: GOOGLE_DIRECTIONS_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_env() -> Result<Self, DirectionsError> {
        let api_key = std::env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(DirectionsError::MissingApiKey)?;

        let mut params = Self::new(api_key);

        if let Ok(base_url) = std::env::var(DIRECTIONS_URL_ENV_VAR) {
            params.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var(HTTP_TIMEOUT_ENV_VAR) {
            let millis = timeout.parse::<u64>().map_err(|_| {
                DirectionsError::Config(format!(
                    "{HTTP_TIMEOUT_ENV_VAR} must be a number of milliseconds, got {timeout:?}"
                ))
            })?;
            params.timeout = Duration::from_millis(millis);
        }

        Ok(params)
    }
}

/// Query string for one directions request. `avoid` is only present when tolls
/// are avoided, `departure_time` only when a departure was chosen.
pub fn build_query_params(query: &RouteQuery, api_key: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("origin", query.origin().to_string()),
        ("destination", query.destination().to_string()),
        ("mode", query.mode().to_string()),
        ("key", api_key.to_string()),
    ];

    if query.avoid_tolls() {
        params.push(("avoid", String::from("tolls")));
    }

    params.push(("traffic_model", query.traffic_model().to_string()));

    if let Some(departure) = query.departure() {
        params.push(("departure_time", departure.as_unix_seconds().to_string()));
    }

    params
}

pub struct DirectionsClient {
    params: DirectionsClientParams,
    client: reqwest::Client,
}

impl DirectionsClient {
    pub fn new(params: DirectionsClientParams) -> Result<Self, DirectionsError> {
        let client = reqwest::Client::builder()
            .timeout(params.timeout)
            .build()
            .map_err(DirectionsError::request)?;

        Ok(Self { params, client })
    }

    pub fn from_env() -> Result<Self, DirectionsError> {
        Self::new(DirectionsClientParams::from_env()?)
    }

    /// Sends the request and returns the parsed answer. Only transport failures
    /// and non-success statuses are errors here; an unreadable body comes back
    /// as an empty response.
    #[instrument(
        skip(self, query),
        fields(origin = query.origin(), destination = query.destination(), mode = %query.mode())
    )]
    pub async fn fetch_directions(
        &self,
        query: &RouteQuery,
    ) -> Result<DirectionsResponse, DirectionsError> {
        let params = build_query_params(query, &self.params.api_key);

        debug!(
            "Directions: requesting route, avoid_tolls={}, traffic_model={}",
            query.avoid_tolls(),
            query.traffic_model()
        );

        let response = self
            .client
            .get(&self.params.base_url)
            .query(&params)
            .send()
            .await
            .map_err(DirectionsError::request)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Api { status, message });
        }

        let body = response.text().await.map_err(DirectionsError::request)?;
        let directions = DirectionsResponse::parse(&body);

        debug!(
            "Directions: status {}, {} route(s)",
            directions.status.as_deref().unwrap_or("none"),
            directions.routes.as_ref().map_or(0, Vec::len)
        );

        Ok(directions)
    }

    /// Fetches and extracts the first leg of the first route.
    pub async fn fetch_route(&self, query: &RouteQuery) -> Result<RouteResult, DirectionsError> {
        let route = self.fetch_directions(query).await?.into_route_result()?;

        info!(
            "Directions: {} in {} from {} to {}",
            route.distance_text,
            route.duration_text,
            query.origin(),
            query.destination()
        );

        Ok(route)
    }
}
