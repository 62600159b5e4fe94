use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

/// A WGS84 position. Latitude is kept within [-90, 90] and longitude within
/// [-180, 180].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct UncheckedCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<UncheckedCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: UncheckedCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(value.lat, value.lng)
    }
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }

        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::Longitude(lng));
        }

        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// `[lng, lat]`, the axis order of GeoJSON positions.
    pub fn to_lng_lat(&self) -> Vec<f64> {
        vec![self.lng, self.lat]
    }
}

impl From<Coordinate> for geo_types::Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        geo_types::Point::new(coordinate.lng, coordinate.lat)
    }
}

impl From<&Coordinate> for geo_types::Point<f64> {
    fn from(coordinate: &Coordinate) -> Self {
        geo_types::Point::new(coordinate.lng, coordinate.lat)
    }
}

impl From<&Coordinate> for geo_types::Coord<f64> {
    fn from(coordinate: &Coordinate) -> Self {
        geo_types::Coord {
            x: coordinate.lng,
            y: coordinate.lat,
        }
    }
}

impl TryFrom<geo_types::Point<f64>> for Coordinate {
    type Error = CoordinateError;

    fn try_from(point: geo_types::Point<f64>) -> Result<Self, Self::Error> {
        Coordinate::new(point.y(), point.x())
    }
}

impl TryFrom<(f64, f64)> for Coordinate {
    type Error = CoordinateError;

    /// `(lat, lng)`
    fn try_from((lat, lng): (f64, f64)) -> Result<Self, Self::Error> {
        Coordinate::new(lat, lng)
    }
}
