use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};
use waymark_core::error::{InputError, RouteError};
use waymark_google::directions_client::DirectionsError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    UnprocessableEntity(String),
    BadGateway(String),
    InternalServerError(String),
}

impl From<InputError> for ApiError {
    fn from(error: InputError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

impl From<RouteError> for ApiError {
    fn from(error: RouteError) -> Self {
        warn!("{}", error);
        match error {
            RouteError::NoRoute { .. } => ApiError::NotFound(error.user_message().to_string()),
            RouteError::CannotPlot { .. } => {
                ApiError::UnprocessableEntity(error.user_message().to_string())
            }
        }
    }
}

impl From<DirectionsError> for ApiError {
    fn from(error: DirectionsError) -> Self {
        match error {
            DirectionsError::Route(error) => error.into(),
            DirectionsError::Request(_) | DirectionsError::Api { .. } => {
                error!("{}", error);
                ApiError::BadGateway(String::from("The directions service is unavailable."))
            }
            DirectionsError::MissingApiKey | DirectionsError::Config(_) => {
                error!("{}", error);
                ApiError::InternalServerError(String::from("The server is misconfigured."))
            }
        }
    }
}

impl From<minijinja::Error> for ApiError {
    fn from(error: minijinja::Error) -> Self {
        error!("Cannot render page: {}", error);
        ApiError::InternalServerError(String::from("The page could not be rendered."))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            ApiError::UnprocessableEntity(message) => {
                (StatusCode::UNPROCESSABLE_ENTITY, message).into_response()
            }
            ApiError::BadGateway(message) => (StatusCode::BAD_GATEWAY, message).into_response(),
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}
