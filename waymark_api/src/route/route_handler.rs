use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use geojson::GeoJson;
use serde::Serialize;
use tracing::info;
use waymark_core::{coordinate::Coordinate, route_result::RouteResult};
use waymark_map::route_map::RouteMap;

use crate::{error::ApiError, route::route_params::RouteParams, state::AppState};

#[derive(Serialize)]
pub struct RouteResponse {
    distance: String,
    duration: String,
    duration_in_traffic: Option<String>,
    distance_meters: Option<u64>,
    duration_seconds: Option<u64>,
    start: Coordinate,
    end: Coordinate,
    start_address: Option<String>,
    end_address: Option<String>,
    path_length_meters: f64,
    path: GeoJson,
}

impl IntoResponse for RouteResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Fetches the route and builds its map. Nothing is rendered unless both steps
/// succeed.
pub async fn plan_route(
    state: &AppState,
    params: &RouteParams,
) -> Result<(RouteResult, RouteMap), ApiError> {
    let query = params.to_query(&jiff::Zoned::now())?;

    info!(
        "Planning a route for {}",
        params.traveller().unwrap_or("anonymous")
    );

    let route = state.directions_client.fetch_route(&query).await?;
    let map = RouteMap::from_route(&route)?;

    Ok((route, map))
}

pub async fn route_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RouteParams>,
) -> Result<RouteResponse, ApiError> {
    let (route, map) = plan_route(&state, &params).await?;

    Ok(RouteResponse {
        distance: route.distance_text,
        duration: route.duration_text,
        duration_in_traffic: route.duration_in_traffic_text,
        distance_meters: route.distance_meters,
        duration_seconds: route.duration_seconds,
        start: route.start,
        end: route.end,
        start_address: route.start_address,
        end_address: route.end_address,
        path_length_meters: map.path_length_meters(),
        path: map.to_geojson(),
    })
}
