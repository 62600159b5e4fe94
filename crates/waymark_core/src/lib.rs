pub mod coordinate;
pub mod error;
pub mod polyline;
pub mod route_query;
pub mod route_result;
