use waymark_core::route_result::RouteResult;

use crate::route_map::RouteMap;

/// Labelled trip figures in display order: the resolved addresses when the
/// provider sent them, distance, ETA, ETA in traffic when estimated, and the
/// length of the drawn path.
pub fn trip_statistics(route: &RouteResult, map: &RouteMap) -> Vec<(String, String)> {
    let mut statistics = Vec::new();

    if let Some(start_address) = &route.start_address {
        statistics.push((String::from("From"), start_address.clone()));
    }
    if let Some(end_address) = &route.end_address {
        statistics.push((String::from("To"), end_address.clone()));
    }

    statistics.push((String::from("Distance"), route.distance_text.clone()));
    statistics.push((String::from("ETA"), route.duration_text.clone()));

    if let Some(in_traffic) = &route.duration_in_traffic_text {
        statistics.push((String::from("ETA in traffic"), in_traffic.clone()));
    }

    statistics.push((
        String::from("Path length"),
        format_kilometers(map.path_length_meters()),
    ));

    statistics
}

pub fn format_kilometers(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}
