use anyhow::Context;
use clap::Args;
use waymark_core::{
    coordinate::Coordinate,
    polyline::{GOOGLE_PRECISION, decode_with_precision, encode_with_precision},
};

#[derive(Args)]
pub struct PolylineArgs {
    /// Encoded polyline, or a JSON array of [lat, lng] pairs when encoding
    input: String,

    /// Number of decimal digits (5 for Google, 6 for OSRM and Valhalla)
    #[arg(short, long, default_value_t = GOOGLE_PRECISION)]
    precision: u32,
}

pub fn decode(args: PolylineArgs) -> anyhow::Result<()> {
    let coordinates = decode_with_precision(&args.input, args.precision)?;

    let pairs: Vec<[f64; 2]> = coordinates
        .iter()
        .map(|coordinate| [coordinate.lat(), coordinate.lng()])
        .collect();

    println!("{}", serde_json::to_string(&pairs)?);

    Ok(())
}

pub fn encode(args: PolylineArgs) -> anyhow::Result<()> {
    println!("{}", encode_json(&args.input, args.precision)?);

    Ok(())
}

fn encode_json(input: &str, precision: u32) -> anyhow::Result<String> {
    let pairs: Vec<(f64, f64)> =
        serde_json::from_str(input).context("Expected a JSON array of [lat, lng] pairs")?;

    let coordinates = pairs
        .into_iter()
        .map(Coordinate::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(encode_with_precision(&coordinates, precision)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_json() {
        let encoded =
            encode_json("[[38.5, -120.2], [40.7, -120.95], [43.252, -126.453]]", 5).unwrap();
        assert_eq!(encoded, "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
    }

    #[test]
    fn test_encode_json_rejects_bad_input() {
        assert!(encode_json("not json", 5).is_err());
        assert!(encode_json("[[95.0, 0.0]]", 5).is_err());
    }
}
