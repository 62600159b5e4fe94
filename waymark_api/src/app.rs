use std::sync::Arc;

use axum::{Router, http::Method, routing::get};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    index::index_handler,
    route::{map_handler::map_handler, route_handler::route_handler},
    state::AppState,
};

pub fn app(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/route", get(route_handler))
        .route("/map", get(map_handler))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}
