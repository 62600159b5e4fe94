pub mod map_handler;
pub mod route_handler;
pub mod route_params;
