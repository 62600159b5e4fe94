pub mod html;
pub mod route_map;
pub mod statistics;
