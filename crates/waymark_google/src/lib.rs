pub mod directions_client;
pub mod directions_response;
