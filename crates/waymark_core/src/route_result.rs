use serde::Serialize;

use crate::{coordinate::Coordinate, error::RouteError, polyline};

/// Trip summary of the first leg of the first route, plus the route's overview
/// geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub distance_text: String,
    pub duration_text: String,

    // Not every provider answer carries the numeric values
    pub distance_meters: Option<u64>,
    pub duration_seconds: Option<u64>,
    pub duration_in_traffic_text: Option<String>,

    pub start: Coordinate,
    pub end: Coordinate,
    /// Addresses the provider resolved the origin and destination to.
    pub start_address: Option<String>,
    pub end_address: Option<String>,
    pub encoded_polyline: String,
}

impl RouteResult {
    /// Decodes the overview polyline. A polyline that does not decode, or that
    /// holds no point at all, cannot be plotted.
    pub fn decode_path(&self) -> Result<Vec<Coordinate>, RouteError> {
        let path = polyline::decode(&self.encoded_polyline)
            .map_err(|error| RouteError::cannot_plot(error.to_string()))?;

        if path.is_empty() {
            return Err(RouteError::cannot_plot("overview polyline is empty"));
        }

        Ok(path)
    }
}
