//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::km_to_miles_rounded;
use crate::report::NearbyReport;

/// Departures and neighbours of one resolved station.
#[derive(Template)]
#[template(path = "nearby.html")]
pub struct NearbyTemplate {
    pub station_id: String,
    pub station_name: String,
    pub synonyms: String,
    pub routes: Vec<String>,
    pub departures: Vec<DepartureView>,
    pub neighbours: Vec<NeighbourView>,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

/// One route and direction row.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartureView {
    pub route: String,
    pub direction: &'static str,
    pub times: Vec<String>,
}

/// One neighbour row.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighbourView {
    pub name: String,
    pub station_id: String,
    pub routes: String,
    pub miles: String,
}

impl NearbyTemplate {
    pub fn from_report(report: &NearbyReport) -> Self {
        let departures = report
            .departures
            .iter()
            .flat_map(|dep| {
                dep.directions.iter().map(|(direction, times)| DepartureView {
                    route: dep.route.to_string(),
                    direction: direction.label(),
                    times: times.iter().map(ToString::to_string).collect(),
                })
            })
            .collect();

        let neighbours = report
            .neighbours
            .iter()
            .map(|n| NeighbourView {
                name: n.record.display_name().to_string(),
                station_id: n.station_id().to_string(),
                routes: join(&n.routes),
                miles: format!("{:.2}", km_to_miles_rounded(n.distance_km)),
            })
            .collect();

        Self {
            station_id: report.station.id.to_string(),
            station_name: report.station.name.clone(),
            synonyms: join(&report.synonym_ids),
            routes: report.routes.iter().map(ToString::to_string).collect(),
            departures,
            neighbours,
        }
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RouteMembership, StationCatalog, Timetable};
    use crate::domain::{ClockTime, Coordinate, RouteId, StationId, StationRecord};
    use crate::report::ReportOptions;
    use crate::resolve::Resolver;

    fn record(id: &str, name: &str, lat: f64, lon: f64) -> StationRecord {
        StationRecord::new(StationId::parse(id).unwrap(), name, Coordinate::new(lat, lon))
    }

    fn report() -> NearbyReport {
        let catalog = StationCatalog::new(vec![
            record("101", "Union Sq - 14 St", 40.7359, -73.9911),
            record("250", "Grand Central", 40.7527, -73.9772),
        ])
        .unwrap();
        let membership: RouteMembership = [
            (RouteId::parse("L").unwrap(), vec![StationId::parse("101").unwrap()]),
            (RouteId::parse("4").unwrap(), vec![StationId::parse("250").unwrap()]),
        ]
        .into_iter()
        .collect();
        let timetable: Timetable =
            serde_json::from_str(r#"{"L": {"101": {"S": ["12:15", "12:45"]}}}"#).unwrap();
        let resolver = Resolver::new(&catalog, &membership);
        let anchor = catalog.get(&StationId::parse("101").unwrap()).unwrap();

        NearbyReport::build(
            &resolver,
            anchor,
            &timetable,
            ClockTime::parse_hhmm("12:00").unwrap(),
            &ReportOptions::default(),
        )
    }

    #[test]
    fn view_from_report() {
        let view = NearbyTemplate::from_report(&report());

        assert_eq!(view.station_id, "101");
        assert_eq!(view.synonyms, "101");
        assert_eq!(view.routes, vec!["L"]);
        assert_eq!(
            view.departures,
            vec![DepartureView {
                route: "L".into(),
                direction: "South-Bound",
                times: vec!["12:15".into(), "12:45".into()],
            }]
        );
        assert_eq!(
            view.neighbours,
            vec![NeighbourView {
                name: "Grand Central".into(),
                station_id: "250".into(),
                routes: "4".into(),
                miles: "1.37".into(),
            }]
        );
    }

    #[test]
    fn renders_station_page() {
        let html = NearbyTemplate::from_report(&report()).render().unwrap();

        assert!(html.contains("Union Sq - 14 St"));
        assert!(html.contains("South-Bound"));
        assert!(html.contains("12:45"));
        assert!(html.contains("Grand Central"));
        assert!(html.contains("1.37"));
    }

    #[test]
    fn renders_error_page() {
        let html = ErrorTemplate {
            title: "Not found".into(),
            message: "Invalid station ID.".into(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Invalid station ID."));
    }
}
