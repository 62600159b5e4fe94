use geo::{BoundingRect, Distance, Haversine};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde_json::json;
use tracing::debug;
use waymark_core::{coordinate::Coordinate, error::RouteError, route_result::RouteResult};

pub const DEFAULT_ZOOM: u8 = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkerColor {
    Green,
    Red,
}

impl MarkerColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerColor::Green => "green",
            MarkerColor::Red => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub label: String,
    pub color: MarkerColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub weight: u32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: String::from("blue"),
            weight: 5,
        }
    }
}

/// A route ready to be drawn: the path, an origin and a destination marker, and
/// the initial view (centered on the origin).
#[derive(Debug, Clone)]
pub struct RouteMap {
    center: Coordinate,
    zoom: u8,
    path: Vec<Coordinate>,
    line: LineStyle,
    markers: Vec<Marker>,
}

impl RouteMap {
    pub fn new(
        path: Vec<Coordinate>,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Self, RouteError> {
        if path.is_empty() {
            return Err(RouteError::cannot_plot("route path has no points"));
        }

        Ok(Self {
            center: origin,
            zoom: DEFAULT_ZOOM,
            path,
            line: LineStyle::default(),
            markers: vec![
                Marker {
                    position: origin,
                    label: String::from("Origin"),
                    color: MarkerColor::Green,
                },
                Marker {
                    position: destination,
                    label: String::from("Destination"),
                    color: MarkerColor::Red,
                },
            ],
        })
    }

    /// Decodes the route's overview polyline and places the markers on the leg's
    /// start and end locations.
    pub fn from_route(route: &RouteResult) -> Result<Self, RouteError> {
        let path = route.decode_path()?;
        debug!("RouteMap: decoded {} points", path.len());

        Self::new(path, route.start, route.end)
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    pub fn line(&self) -> &LineStyle {
        &self.line
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Smallest rectangle holding the path and both markers.
    pub fn bounds(&self) -> Option<geo_types::Rect<f64>> {
        let points: Vec<geo_types::Point<f64>> = self
            .path
            .iter()
            .chain(self.markers.iter().map(|marker| &marker.position))
            .map(geo_types::Point::from)
            .collect();

        geo_types::MultiPoint::from(points).bounding_rect()
    }

    pub fn path_length_meters(&self) -> f64 {
        self.path
            .windows(2)
            .map(|pair| {
                Haversine.distance(
                    geo_types::Point::from(&pair[0]),
                    geo_types::Point::from(&pair[1]),
                )
            })
            .sum()
    }

    /// One `LineString` feature for the path followed by one `Point` feature per
    /// marker, styled with simplestyle properties. The collection's `bbox` is
    /// [`RouteMap::bounds`] as `[west, south, east, north]`.
    pub fn to_geojson(&self) -> GeoJson {
        let mut features = Vec::with_capacity(1 + self.markers.len());

        features.push(feature(
            Value::LineString(self.path.iter().map(Coordinate::to_lng_lat).collect()),
            properties(json!({
                "stroke": self.line.color,
                "stroke-width": self.line.weight,
                "length_meters": self.path_length_meters(),
            })),
        ));

        for marker in &self.markers {
            features.push(feature(
                Value::Point(marker.position.to_lng_lat()),
                properties(json!({
                    "label": marker.label,
                    "marker-color": marker.color.as_str(),
                })),
            ));
        }

        let bbox = self
            .bounds()
            .map(|rect| vec![rect.min().x, rect.min().y, rect.max().x, rect.max().y]);

        GeoJson::FeatureCollection(FeatureCollection {
            bbox,
            foreign_members: None,
            features,
        })
    }
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        id: None,
        properties: Some(properties),
        foreign_members: None,
        geometry: Some(Geometry::new(value)),
    }
}

fn properties(value: serde_json::Value) -> JsonObject {
    match value {
        serde_json::Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(encoded_polyline: &str) -> RouteResult {
        RouteResult {
            distance_text: String::from("346 km"),
            duration_text: String::from("3 hours 52 mins"),
            distance_meters: Some(345_985),
            duration_seconds: Some(13_920),
            duration_in_traffic_text: None,
            start: Coordinate::new(38.5, -120.2).unwrap(),
            end: Coordinate::new(43.252, -126.453).unwrap(),
            start_address: None,
            end_address: None,
            encoded_polyline: encoded_polyline.to_string(),
        }
    }

    #[test]
    fn test_from_route() {
        let map = RouteMap::from_route(&route("_p~iF~ps|U_ulLnnqC_mqNvxq`@")).unwrap();

        assert_eq!(map.path().len(), 3);
        assert_eq!(map.center(), Coordinate::new(38.5, -120.2).unwrap());
        assert_eq!(map.zoom(), 10);
        assert_eq!(map.line(), &LineStyle::default());

        let markers = map.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].label, "Origin");
        assert_eq!(markers[0].color, MarkerColor::Green);
        assert_eq!(markers[1].label, "Destination");
        assert_eq!(markers[1].color, MarkerColor::Red);
        assert_eq!(
            markers[1].position,
            Coordinate::new(43.252, -126.453).unwrap()
        );
    }

    #[test]
    fn test_cannot_plot_without_points() {
        assert!(matches!(
            RouteMap::from_route(&route("")),
            Err(RouteError::CannotPlot { .. })
        ));
        assert!(matches!(
            RouteMap::from_route(&route("_p~iF~ps|U_ulL")),
            Err(RouteError::CannotPlot { .. })
        ));
    }

    #[test]
    fn test_bounds_include_markers() {
        let path = vec![
            Coordinate::new(1.0, 1.0).unwrap(),
            Coordinate::new(2.0, 2.0).unwrap(),
        ];
        let map = RouteMap::new(
            path,
            Coordinate::new(0.0, 0.5).unwrap(),
            Coordinate::new(3.0, 2.5).unwrap(),
        )
        .unwrap();

        let bounds = map.bounds().unwrap();
        assert_eq!(bounds.min().x, 0.5);
        assert_eq!(bounds.min().y, 0.0);
        assert_eq!(bounds.max().x, 2.5);
        assert_eq!(bounds.max().y, 3.0);
    }

    #[test]
    fn test_path_length() {
        // one degree of latitude is roughly 111 km
        let path = vec![
            Coordinate::new(0.0, 0.0).unwrap(),
            Coordinate::new(1.0, 0.0).unwrap(),
        ];
        let map = RouteMap::new(
            path,
            Coordinate::new(0.0, 0.0).unwrap(),
            Coordinate::new(1.0, 0.0).unwrap(),
        )
        .unwrap();

        let length = map.path_length_meters();
        assert!((length - 111_195.0).abs() < 100.0, "length {length}");
    }

    #[test]
    fn test_geojson() {
        let map = RouteMap::from_route(&route("_p~iF~ps|U_ulLnnqC_mqNvxq`@")).unwrap();

        let GeoJson::FeatureCollection(collection) = map.to_geojson() else {
            panic!("expected a feature collection");
        };

        assert_eq!(collection.features.len(), 3);
        assert_eq!(
            collection.bbox,
            Some(vec![-126.453, 38.5, -120.2, 43.252])
        );

        let line = &collection.features[0];
        let Some(Geometry {
            value: Value::LineString(positions),
            ..
        }) = &line.geometry
        else {
            panic!("expected a line string");
        };
        assert_eq!(positions.len(), 3);
        assert_eq!(positions[0], vec![-120.2, 38.5]);
        assert_eq!(
            line.property("stroke").and_then(|v| v.as_str()),
            Some("blue")
        );

        let origin = &collection.features[1];
        assert_eq!(
            origin.property("label").and_then(|v| v.as_str()),
            Some("Origin")
        );
        assert_eq!(
            origin.property("marker-color").and_then(|v| v.as_str()),
            Some("green")
        );

        let destination = &collection.features[2];
        assert_eq!(
            destination.property("label").and_then(|v| v.as_str()),
            Some("Destination")
        );
    }
}
