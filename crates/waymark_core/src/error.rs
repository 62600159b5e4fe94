use thiserror::Error;

pub const NO_ROUTE_MESSAGE: &str =
    "Invalid addresses or no route data available. Please check the inputs.";
pub const CANNOT_PLOT_MESSAGE: &str = "Could not plot the route.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("Latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("Longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolylineError {
    #[error("Invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
    #[error("Polyline ends in the middle of a value at position {position}")]
    Truncated { position: usize },
    #[error("Value starting at position {position} is too long")]
    Overflow { position: usize },
    #[error("Unsupported precision {0}")]
    Precision(u32),
    #[error("Decoded point {index} is invalid: {source}")]
    Coordinate {
        index: usize,
        #[source]
        source: CoordinateError,
    },
}

/// The two ways a directions answer can fail to become a map.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    /// No routes list, or an empty one. `status` is the provider's status code,
    /// e.g. `ZERO_RESULTS` or `REQUEST_DENIED`, when it sent one.
    #[error("No route found (status: {})", .status.as_deref().unwrap_or("unknown"))]
    NoRoute { status: Option<String> },

    #[error("Cannot plot route: {reason}")]
    CannotPlot { reason: String },
}

impl RouteError {
    pub fn cannot_plot(reason: impl Into<String>) -> Self {
        RouteError::CannotPlot {
            reason: reason.into(),
        }
    }

    /// Message meant for the person who filled in the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            RouteError::NoRoute { .. } => NO_ROUTE_MESSAGE,
            RouteError::CannotPlot { .. } => CANNOT_PLOT_MESSAGE,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("Preferred hour must be between 0 and 23, got {0}")]
    Hour(i64),
    #[error("Unknown travel mode {0:?}")]
    Mode(String),
    #[error("Cannot compute departure time: {0}")]
    Departure(String),
}
