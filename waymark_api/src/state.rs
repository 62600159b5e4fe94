use waymark_google::directions_client::DirectionsClient;
use waymark_map::html::TileLayer;

pub struct AppState {
    pub directions_client: DirectionsClient,
    pub tiles: TileLayer,
}
