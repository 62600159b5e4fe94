//! Encoded polyline codec.
//!
//! Each coordinate is scaled to a fixed-point integer, delta-encoded against the
//! previous point and zig-zag signed. The result is split into 5-bit chunks,
//! least significant first; every chunk except the last carries the `0x20`
//! continuation bit. Chunks are offset by 63 to land in printable ASCII.

use crate::{coordinate::Coordinate, error::PolylineError};

/// Precision used by the Google Directions API.
pub const GOOGLE_PRECISION: u32 = 5;

/// Precision used by OSRM and Valhalla ("polyline6").
pub const POLYLINE6_PRECISION: u32 = 6;

const MAX_PRECISION: u32 = 8;
const CHUNK_OFFSET: u8 = 63;
const CHUNK_MASK: i64 = 0x1f;
const CONTINUATION_BIT: i64 = 0x20;
const MAX_SHIFT: u32 = 60;

pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    decode_with_precision(encoded, GOOGLE_PRECISION)
}

pub fn encode(coordinates: &[Coordinate]) -> String {
    // GOOGLE_PRECISION is always in range
    encode_with_precision(coordinates, GOOGLE_PRECISION).unwrap_or_default()
}

pub fn decode_with_precision(
    encoded: &str,
    precision: u32,
) -> Result<Vec<Coordinate>, PolylineError> {
    let factor = scale_factor(precision)?;
    let bytes = encoded.as_bytes();

    let mut coordinates = Vec::with_capacity(bytes.len() / 4);
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        lat += decode_value(encoded, &mut index)?;
        lng += decode_value(encoded, &mut index)?;

        let coordinate = Coordinate::new(lat as f64 / factor, lng as f64 / factor).map_err(
            |source| PolylineError::Coordinate {
                index: coordinates.len(),
                source,
            },
        )?;

        coordinates.push(coordinate);
    }

    Ok(coordinates)
}

pub fn encode_with_precision(
    coordinates: &[Coordinate],
    precision: u32,
) -> Result<String, PolylineError> {
    let factor = scale_factor(precision)?;

    let mut encoded = String::with_capacity(coordinates.len() * 8);
    let mut previous_lat: i64 = 0;
    let mut previous_lng: i64 = 0;

    for coordinate in coordinates {
        let lat = (coordinate.lat() * factor).round() as i64;
        let lng = (coordinate.lng() * factor).round() as i64;

        encode_value(lat - previous_lat, &mut encoded);
        encode_value(lng - previous_lng, &mut encoded);

        previous_lat = lat;
        previous_lng = lng;
    }

    Ok(encoded)
}

fn scale_factor(precision: u32) -> Result<f64, PolylineError> {
    if precision == 0 || precision > MAX_PRECISION {
        return Err(PolylineError::Precision(precision));
    }

    Ok(10f64.powi(precision as i32))
}

/// Reads one signed value starting at `index` and advances `index` past it.
fn decode_value(encoded: &str, index: &mut usize) -> Result<i64, PolylineError> {
    let bytes = encoded.as_bytes();
    let start = *index;
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let position = *index;
        let byte = *bytes
            .get(position)
            .ok_or(PolylineError::Truncated { position })?;

        if !(CHUNK_OFFSET..=CHUNK_OFFSET + 63).contains(&byte) {
            // every byte before `position` was ASCII, so this is a char boundary
            let character = encoded[position..].chars().next().unwrap_or('\u{fffd}');
            return Err(PolylineError::InvalidCharacter {
                character,
                position,
            });
        }

        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { position: start });
        }

        let chunk = i64::from(byte - CHUNK_OFFSET);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;
        *index += 1;

        if chunk < CONTINUATION_BIT {
            break;
        }
    }

    if result & 1 == 1 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}

fn encode_value(value: i64, output: &mut String) {
    let mut value = if value < 0 {
        !(value << 1)
    } else {
        value << 1
    };

    while value >= CONTINUATION_BIT {
        let chunk = (CONTINUATION_BIT | (value & CHUNK_MASK)) as u8 + CHUNK_OFFSET;
        output.push(char::from(chunk));
        value >>= 5;
    }

    output.push(char::from(value as u8 + CHUNK_OFFSET));
}
