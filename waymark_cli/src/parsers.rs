use waymark_core::route_query::{PreferredHour, TravelMode};

pub fn parse_hour(input: &str) -> Result<PreferredHour, String> {
    let hour = input
        .trim()
        .trim_end_matches(":00")
        .parse::<i64>()
        .map_err(|_| format!("Invalid hour {input:?}"))?;

    PreferredHour::new(hour).map_err(|e| e.to_string())
}

pub fn parse_mode(input: &str) -> Result<TravelMode, String> {
    input.parse::<TravelMode>().map_err(|e| e.to_string())
}
