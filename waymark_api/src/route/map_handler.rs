use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
};
use waymark_map::{
    html::{MapPage, PAGE_TITLE},
    statistics::trip_statistics,
};

use crate::{
    error::ApiError,
    route::{route_handler::plan_route, route_params::RouteParams},
    state::AppState,
};

pub async fn map_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RouteParams>,
) -> Result<Html<String>, ApiError> {
    let (route, map) = plan_route(&state, &params).await?;

    let mut page = MapPage::new(PAGE_TITLE).with_tiles(state.tiles.clone());
    if let Some(name) = params.traveller() {
        page = page.with_heading(format!("Hello, {name}!"));
    }

    for (label, value) in trip_statistics(&route, &map) {
        page = page.with_statistic(label, value);
    }

    if let Some(hour) = params.preferred_hour {
        page = page.with_statistic("Preferred time", hour.to_string());
    }

    Ok(Html(map.to_html(&page)?))
}
