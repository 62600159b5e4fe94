use serde::Deserialize;
use tracing::warn;
use waymark_core::{coordinate::Coordinate, error::RouteError, route_result::RouteResult};

/// Google Directions API answer. Every field is optional so that a partial answer
/// still parses; `into_route_result` decides what is missing.
#[derive(Deserialize, Debug, Default)]
pub struct DirectionsResponse {
    /// `OK`, `ZERO_RESULTS`, `NOT_FOUND`, `REQUEST_DENIED`, ...
    pub status: Option<String>,
    pub error_message: Option<String>,
    pub routes: Option<Vec<DirectionsRoute>>,
}

#[derive(Deserialize, Debug)]
pub struct DirectionsRoute {
    pub legs: Option<Vec<DirectionsLeg>>,
    pub overview_polyline: Option<OverviewPolyline>,
}

#[derive(Deserialize, Debug)]
pub struct DirectionsLeg {
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
    pub duration_in_traffic: Option<TextValue>,
    pub start_location: Option<LatLng>,
    pub end_location: Option<LatLng>,
    pub start_address: Option<String>,
    pub end_address: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct TextValue {
    pub text: Option<String>,
    pub value: Option<u64>,
}

#[derive(Deserialize, Debug)]
pub struct LatLng {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Deserialize, Debug)]
pub struct OverviewPolyline {
    pub points: Option<String>,
}

impl LatLng {
    fn to_coordinate(&self, field: &str) -> Result<Coordinate, RouteError> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Coordinate::new(lat, lng)
                .map_err(|error| RouteError::cannot_plot(format!("{field}: {error}"))),
            _ => Err(RouteError::cannot_plot(format!("{field} is incomplete"))),
        }
    }
}

impl DirectionsResponse {
    /// Parses a response body. An empty or malformed body becomes an empty
    /// response, which has no route.
    pub fn parse(body: &str) -> Self {
        if body.trim().is_empty() {
            warn!("Directions: empty response body");
            return Self::default();
        }

        match serde_json::from_str(body) {
            Ok(response) => response,
            Err(error) => {
                warn!("Directions: malformed response body: {}", error);
                Self::default()
            }
        }
    }

    pub fn has_routes(&self) -> bool {
        self.routes.as_ref().is_some_and(|routes| !routes.is_empty())
    }

    /// Status and provider message, e.g. `REQUEST_DENIED: The provided API key is
    /// invalid.`
    pub fn diagnostic(&self) -> String {
        let status = self.status.as_deref().unwrap_or("no status");
        match self.error_message.as_deref() {
            Some(message) => format!("{status}: {message}"),
            None => status.to_string(),
        }
    }

    /// Extracts the first leg of the first route.
    ///
    /// No routes list, or an empty one, is [`RouteError::NoRoute`]. A route
    /// without its overview polyline, its first leg or any of that leg's
    /// distance, duration and locations is [`RouteError::CannotPlot`].
    pub fn into_route_result(self) -> Result<RouteResult, RouteError> {
        if !self.has_routes() {
            warn!("Directions: no route, {}", self.diagnostic());
        }

        let status = self.status;

        let route = self
            .routes
            .and_then(|routes| routes.into_iter().next())
            .ok_or(RouteError::NoRoute { status })?;

        let encoded_polyline = route
            .overview_polyline
            .and_then(|polyline| polyline.points)
            .ok_or_else(|| RouteError::cannot_plot("route has no overview_polyline"))?;

        let leg = route
            .legs
            .and_then(|legs| legs.into_iter().next())
            .ok_or_else(|| RouteError::cannot_plot("route has no legs"))?;

        let start = leg
            .start_location
            .ok_or_else(|| RouteError::cannot_plot("leg has no start_location"))?
            .to_coordinate("start_location")?;
        let end = leg
            .end_location
            .ok_or_else(|| RouteError::cannot_plot("leg has no end_location"))?
            .to_coordinate("end_location")?;

        let (distance_text, distance_meters) = split_text_value(leg.distance, "distance")?;
        let (duration_text, duration_seconds) = split_text_value(leg.duration, "duration")?;

        Ok(RouteResult {
            distance_text,
            duration_text,
            distance_meters,
            duration_seconds,
            duration_in_traffic_text: leg.duration_in_traffic.and_then(|value| value.text),
            start,
            end,
            start_address: leg.start_address,
            end_address: leg.end_address,
            encoded_polyline,
        })
    }
}

fn split_text_value(
    value: Option<TextValue>,
    field: &str,
) -> Result<(String, Option<u64>), RouteError> {
    let value = value.ok_or_else(|| RouteError::cannot_plot(format!("leg has no {field}")))?;
    let text = value
        .text
        .ok_or_else(|| RouteError::cannot_plot(format!("leg {field} has no text")))?;

    Ok((text, value.value))
}
