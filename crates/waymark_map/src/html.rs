use minijinja::{AutoEscape, Environment, context};

use crate::route_map::RouteMap;

pub const TILE_URL_ENV_VAR: &str = "WAYMARK_TILE_URL";

pub const PAGE_TITLE: &str = "Real-Time Traffic Analysis & Route Optimization";

const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

const MAP_TEMPLATE: &str = "map.html";

#[derive(Debug, Clone)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

impl TileLayer {
    /// OpenStreetMap tiles unless `WAYMARK_TILE_URL` names another template.
    pub fn from_env() -> Self {
        match std::env::var(TILE_URL_ENV_VAR) {
            Ok(url_template) if !url_template.trim().is_empty() => Self {
                url_template,
                attribution: String::new(),
            },
            _ => Self::default(),
        }
    }
}

/// Everything around the map itself: title, heading and the trip statistics
/// shown above it.
#[derive(Debug, Clone, Default)]
pub struct MapPage {
    pub title: String,
    pub heading: Option<String>,
    pub statistics: Vec<(String, String)>,
    pub tiles: TileLayer,
}

impl MapPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn with_statistic(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.statistics.push((label.into(), value.into()));
        self
    }

    pub fn with_tiles(mut self, tiles: TileLayer) -> Self {
        self.tiles = tiles;
        self
    }
}

impl RouteMap {
    /// Standalone Leaflet page drawing this map.
    pub fn to_html(&self, page: &MapPage) -> Result<String, minijinja::Error> {
        let environment = html_environment(MAP_TEMPLATE, include_str!("../templates/map.html"))?;
        let template = environment.get_template(MAP_TEMPLATE)?;

        let html = template.render(context! {
            title => &page.title,
            heading => &page.heading,
            statistics => &page.statistics,
            tile_url => &page.tiles.url_template,
            attribution => &page.tiles.attribution,
            route => self.to_geojson(),
            center => self.center(),
            zoom => self.zoom(),
        })?;

        Ok(html)
    }
}

/// Environment holding a single template, with HTML auto-escaping whatever the
/// template name.
pub fn html_environment(
    name: &'static str,
    source: &'static str,
) -> Result<Environment<'static>, minijinja::Error> {
    let mut environment = Environment::new();
    environment.set_auto_escape_callback(|_| AutoEscape::Html);
    environment.add_template(name, source)?;

    Ok(environment)
}

#[cfg(test)]
mod tests {
    use waymark_core::coordinate::Coordinate;

    use super::*;

    fn map() -> RouteMap {
        let path = waymark_core::polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
        RouteMap::new(
            path,
            Coordinate::new(38.5, -120.2).unwrap(),
            Coordinate::new(43.252, -126.453).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_html_page() {
        let page = MapPage::new("Route")
            .with_heading("Hello, Jane <Doe>")
            .with_statistic("Distance", "346 km")
            .with_statistic("ETA", "3 hours 52 mins");

        let html = map().to_html(&page).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Route</title>"));
        assert!(html.contains("<h1>Hello, Jane &lt;Doe&gt;</h1>"));
        assert!(html.contains("<dt>Distance</dt><dd>346 km</dd>"));
        assert!(html.contains("<dt>ETA</dt><dd>3 hours 52 mins</dd>"));
        assert!(html.contains("setView([38.5, -120.2], 10)"));
        assert!(html.contains("\"FeatureCollection\""));
        assert!(html.contains("tile.openstreetmap.org"));
    }

    #[test]
    fn test_script_content_is_escaped() {
        let page = MapPage::new("Route").with_tiles(TileLayer {
            url_template: String::from("https://tiles.example/{z}/{x}/{y}.png"),
            attribution: String::from("</script><script>alert(1)</script>"),
        });

        let html = map().to_html(&page).unwrap();

        assert!(!html.contains("</script><script>alert(1)"));
        assert!(html.contains(r"\u003c/script\u003e"));
        assert!(html.contains(r#""https://tiles.example/{z}/{x}/{y}.png""#));
    }

    #[test]
    fn test_statistics_are_escaped() {
        let page = MapPage::new("Tom & Jerry")
            .with_statistic("From", "<img src=x onerror=alert(1)>");

        let html = map().to_html(&page).unwrap();

        assert!(html.contains("<title>Tom &amp; Jerry</title>"));
        assert!(html.contains("<dd>&lt;img src=x onerror=alert(1)&gt;</dd>"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_without_heading() {
        let html = map().to_html(&MapPage::new("Route")).unwrap();

        assert!(!html.contains("<h1>"));
        assert!(html.contains("<dl></dl>"));
    }
}
