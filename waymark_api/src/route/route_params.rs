use jiff::Zoned;
use serde::Deserialize;
use waymark_core::{
    error::InputError,
    route_query::{PreferredHour, RouteQuery, TravelMode},
};

/// Form fields, as sent in the query string by the page at `/`.
#[derive(Deserialize, Debug)]
pub struct RouteParams {
    pub name: Option<String>,
    #[serde(default)]
    pub mode: TravelMode,
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub avoid_tolls: bool,
    #[serde(default)]
    pub fastest_route: bool,
    pub preferred_hour: Option<PreferredHour>,
}

impl RouteParams {
    pub fn to_query(&self, now: &Zoned) -> Result<RouteQuery, InputError> {
        let departure = self
            .preferred_hour
            .map(|hour| hour.next_departure(now))
            .transpose()?;

        RouteQuery::builder(&self.origin, &self.destination)
            .mode(self.mode)
            .avoid_tolls(self.avoid_tolls)
            .fastest_route(self.fastest_route)
            .departure(departure)
            .build()
    }

    /// The traveller's name, if one was given.
    pub fn traveller(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::Query, http::Uri};
    use waymark_core::route_query::TrafficModel;

    use super::*;

    fn parse(uri: &str) -> RouteParams {
        let uri: Uri = uri.parse().unwrap();
        Query::<RouteParams>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_form_fields() {
        let params = parse(
            "/map?name=Jane&mode=transit&origin=New+York%2C+NY&destination=Boston%2C+MA&avoid_tolls=true&fastest_route=true&preferred_hour=8",
        );

        assert_eq!(params.traveller(), Some("Jane"));
        assert_eq!(params.origin, "New York, NY");

        let now = jiff::civil::date(2024, 3, 4)
            .at(9, 0, 0, 0)
            .to_zoned(jiff::tz::TimeZone::UTC)
            .unwrap();
        let query = params.to_query(&now).unwrap();

        assert_eq!(query.mode(), TravelMode::Transit);
        assert!(query.avoid_tolls());
        assert_eq!(query.traffic_model(), TrafficModel::BestGuess);

        let tomorrow_at_eight = jiff::civil::date(2024, 3, 5)
            .at(8, 0, 0, 0)
            .to_zoned(jiff::tz::TimeZone::UTC)
            .unwrap();
        assert_eq!(
            query.departure().map(|departure| departure.as_unix_seconds()),
            Some(tomorrow_at_eight.timestamp().as_second())
        );
    }

    #[test]
    fn test_defaults() {
        let params = parse("/route?origin=a&destination=b&name=+");

        assert_eq!(params.mode, TravelMode::Driving);
        assert!(!params.avoid_tolls);
        assert!(!params.fastest_route);
        assert_eq!(params.preferred_hour, None);
        assert_eq!(params.traveller(), None);
    }

    #[test]
    fn test_out_of_range_hour_is_rejected() {
        let uri: Uri = "/route?origin=a&destination=b&preferred_hour=25".parse().unwrap();
        assert!(Query::<RouteParams>::try_from_uri(&uri).is_err());
    }
}
