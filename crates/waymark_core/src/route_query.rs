use std::{fmt::Display, str::FromStr};

use jiff::{ToSpan, Zoned};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Driving,
        TravelMode::Walking,
        TravelMode::Bicycling,
        TravelMode::Transit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }

    /// Capitalised name for display in forms.
    pub fn label(&self) -> &'static str {
        match self {
            TravelMode::Driving => "Driving",
            TravelMode::Walking => "Walking",
            TravelMode::Bicycling => "Bicycling",
            TravelMode::Transit => "Transit",
        }
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TravelMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InputError::Mode(s.to_string()))
    }
}

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrafficModel {
    BestGuess,
    #[default]
    Pessimistic,
}

impl TrafficModel {
    /// The fastest route uses the best-guess estimate, anything else plans for
    /// heavy traffic.
    pub fn from_fastest_route(fastest_route: bool) -> Self {
        if fastest_route {
            TrafficModel::BestGuess
        } else {
            TrafficModel::Pessimistic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficModel::BestGuess => "best_guess",
            TrafficModel::Pessimistic => "pessimistic",
        }
    }
}

impl Display for TrafficModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hour of the day, 0 to 23.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PreferredHour(u8);

impl PreferredHour {
    pub fn new(hour: i64) -> Result<Self, InputError> {
        match u8::try_from(hour) {
            Ok(hour) if hour <= 23 => Ok(Self(hour)),
            _ => Err(InputError::Hour(hour)),
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// The next time the clock shows this hour on the hour, strictly after `now`,
    /// in `now`'s time zone.
    pub fn next_departure(&self, now: &Zoned) -> Result<DepartureTime, InputError> {
        let today = now
            .with()
            .hour(self.0 as i8)
            .minute(0)
            .second(0)
            .subsec_nanosecond(0)
            .build()
            .map_err(|e| InputError::Departure(e.to_string()))?;

        let departure = if today > *now {
            today
        } else {
            today
                .checked_add(1.day())
                .map_err(|e| InputError::Departure(e.to_string()))?
        };

        Ok(DepartureTime(departure.timestamp().as_second()))
    }
}

impl<'de> Deserialize<'de> for PreferredHour {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hour = i64::deserialize(deserializer)?;
        PreferredHour::new(hour).map_err(serde::de::Error::custom)
    }
}

impl Display for PreferredHour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

/// Departure as unix seconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartureTime(i64);

impl DepartureTime {
    pub fn from_unix_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    pub fn as_unix_seconds(&self) -> i64 {
        self.0
    }
}

/// One directions request, built from the form and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    origin: String,
    destination: String,
    mode: TravelMode,
    avoid_tolls: bool,
    traffic_model: TrafficModel,
    departure: Option<DepartureTime>,
}

impl RouteQuery {
    pub fn builder(origin: impl Into<String>, destination: impl Into<String>) -> RouteQueryBuilder {
        RouteQueryBuilder {
            origin: origin.into(),
            destination: destination.into(),
            mode: TravelMode::default(),
            avoid_tolls: false,
            traffic_model: TrafficModel::default(),
            departure: None,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub fn avoid_tolls(&self) -> bool {
        self.avoid_tolls
    }

    pub fn traffic_model(&self) -> TrafficModel {
        self.traffic_model
    }

    pub fn departure(&self) -> Option<DepartureTime> {
        self.departure
    }
}

pub struct RouteQueryBuilder {
    origin: String,
    destination: String,
    mode: TravelMode,
    avoid_tolls: bool,
    traffic_model: TrafficModel,
    departure: Option<DepartureTime>,
}

impl RouteQueryBuilder {
    pub fn mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn avoid_tolls(mut self, avoid_tolls: bool) -> Self {
        self.avoid_tolls = avoid_tolls;
        self
    }

    pub fn fastest_route(mut self, fastest_route: bool) -> Self {
        self.traffic_model = TrafficModel::from_fastest_route(fastest_route);
        self
    }

    pub fn departure(mut self, departure: Option<DepartureTime>) -> Self {
        self.departure = departure;
        self
    }

    pub fn build(self) -> Result<RouteQuery, InputError> {
        let origin = self.origin.trim();
        let destination = self.destination.trim();

        if origin.is_empty() {
            return Err(InputError::Empty { field: "origin" });
        }

        if destination.is_empty() {
            return Err(InputError::Empty {
                field: "destination",
            });
        }

        Ok(RouteQuery {
            origin: origin.to_string(),
            destination: destination.to_string(),
            mode: self.mode,
            avoid_tolls: self.avoid_tolls,
            traffic_model: self.traffic_model,
            departure: self.departure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: i8, hour: i8, minute: i8) -> Zoned {
        jiff::civil::date(2024, 3, day)
            .at(hour, minute, 0, 0)
            .to_zoned(jiff::tz::TimeZone::UTC)
            .unwrap()
    }

    #[test]
    fn test_mode_is_lowercase() {
        let names: Vec<String> = TravelMode::ALL.iter().map(|m| m.to_string()).collect();
        assert_eq!(names, vec!["driving", "walking", "bicycling", "transit"]);

        assert_eq!("Bicycling".parse::<TravelMode>().unwrap(), TravelMode::Bicycling);
        assert_eq!(
            "boat".parse::<TravelMode>(),
            Err(InputError::Mode("boat".to_string()))
        );
    }

    #[test]
    fn test_traffic_model_from_fastest_route() {
        assert_eq!(TrafficModel::from_fastest_route(true).as_str(), "best_guess");
        assert_eq!(
            TrafficModel::from_fastest_route(false).as_str(),
            "pessimistic"
        );
    }

    #[test]
    fn test_preferred_hour_range() {
        assert_eq!(PreferredHour::new(0).unwrap().get(), 0);
        assert_eq!(PreferredHour::new(23).unwrap().to_string(), "23:00");
        assert_eq!(PreferredHour::new(24), Err(InputError::Hour(24)));
        assert_eq!(PreferredHour::new(-1), Err(InputError::Hour(-1)));

        assert!(serde_json::from_str::<PreferredHour>("12").is_ok());
        assert!(serde_json::from_str::<PreferredHour>("30").is_err());
    }

    #[test]
    fn test_next_departure_later_today() {
        let now = at(4, 8, 30);
        let departure = PreferredHour::new(12).unwrap().next_departure(&now).unwrap();

        let expected = at(4, 12, 0).timestamp().as_second();
        assert_eq!(departure.as_unix_seconds(), expected);
    }

    #[test]
    fn test_next_departure_rolls_over_to_tomorrow() {
        let now = at(4, 12, 0);
        let departure = PreferredHour::new(12).unwrap().next_departure(&now).unwrap();

        let expected = at(5, 12, 0).timestamp().as_second();
        assert_eq!(departure.as_unix_seconds(), expected);
    }

    #[test]
    fn test_builder_trims_and_validates() {
        let query = RouteQuery::builder("  New York, NY ", "Boston, MA")
            .mode(TravelMode::Transit)
            .avoid_tolls(true)
            .fastest_route(true)
            .build()
            .unwrap();

        assert_eq!(query.origin(), "New York, NY");
        assert_eq!(query.mode(), TravelMode::Transit);
        assert!(query.avoid_tolls());
        assert_eq!(query.traffic_model(), TrafficModel::BestGuess);
        assert_eq!(query.departure(), None);

        assert_eq!(
            RouteQuery::builder("New York, NY", "   ").build(),
            Err(InputError::Empty {
                field: "destination"
            })
        );
    }
}
