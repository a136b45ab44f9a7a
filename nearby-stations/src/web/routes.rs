//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{ClockTime, StationId};
use crate::refresh::StopListingSource;
use crate::report::NearbyReport;
use crate::resolve::{self, ResolveError, Resolver};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: StopListingSource + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/nearby", get(nearby::<S>))
        .route("/stations/:id", get(station::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Station nearest to a position.
async fn nearby<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Query(req): Query<NearbyRequest>,
) -> Result<Response, AppError>
where
    S: StopListingSource + Send + Sync + 'static,
{
    let html = accepts_html(&headers);
    let position = req.position().ok_or_else(|| AppError::BadRequest {
        message: format!("Invalid position: {},{}", req.lat, req.lon),
        html,
    })?;

    let report = build_report(&state, resolve::Query::Position(position), html).await?;
    respond(&report, html)
}

/// A station by id.
async fn station<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    S: StopListingSource + Send + Sync + 'static,
{
    let html = accepts_html(&headers);
    let id = StationId::parse_normalized(&id).map_err(|_| AppError::BadRequest {
        message: format!("Invalid station ID: {id}"),
        html,
    })?;

    let report = build_report(&state, resolve::Query::Id(id), html).await?;
    respond(&report, html)
}

async fn build_report<S>(
    state: &AppState<S>,
    query: resolve::Query,
    html: bool,
) -> Result<NearbyReport, AppError>
where
    S: StopListingSource + Send + Sync + 'static,
{
    let resolver = Resolver::new(&state.catalog, &state.membership);
    let anchor = resolver
        .resolve(&query)
        .map_err(|e| AppError::from_resolve(e, html))?;

    let routes = resolver.routes_for(anchor);
    let timetable = state.timetables.timetable_for(&routes).await;

    Ok(NearbyReport::build(
        &resolver,
        anchor,
        &timetable,
        ClockTime::now_local(),
        &state.options,
    ))
}

/// Return HTML or JSON based on the Accept header.
fn respond(report: &NearbyReport, html: bool) -> Result<Response, AppError> {
    if html {
        let page = NearbyTemplate::from_report(report)
            .render()
            .map_err(|e| AppError::Internal {
                message: format!("Template error: {}", e),
                html,
            })?;
        Ok(Html(page).into_response())
    } else {
        Ok(Json(NearbyResponse::from(report)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String, html: bool },
    NotFound { message: String, html: bool },
    Internal { message: String, html: bool },
}

impl AppError {
    fn from_resolve(err: ResolveError, html: bool) -> Self {
        match err {
            ResolveError::NotFound(_) => AppError::NotFound {
                message: "Invalid station ID.".to_string(),
                html,
            },
            ResolveError::EmptyCatalog => AppError::Internal {
                message: err.to_string(),
                html,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, html) = match self {
            AppError::BadRequest { message, html } => (StatusCode::BAD_REQUEST, message, html),
            AppError::NotFound { message, html } => (StatusCode::NOT_FOUND, message, html),
            AppError::Internal { message, html } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message, html)
            }
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        if html {
            let page = ErrorTemplate {
                title: status
                    .canonical_reason()
                    .unwrap_or("Error")
                    .to_string(),
                message,
            };
            let body = page
                .render()
                .unwrap_or_else(|e| format!("Template error: {}", e));
            return (status, Html(body)).into_response();
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, TimetableCache};
    use crate::catalog::{RouteMembership, StationCatalog};
    use crate::domain::{Coordinate, RouteId, StationRecord};
    use crate::refresh::MockSource;
    use crate::report::ReportOptions;
    use axum::http::HeaderValue;

    fn record(id: &str, name: &str, lat: f64, lon: f64) -> StationRecord {
        StationRecord::new(StationId::parse(id).unwrap(), name, Coordinate::new(lat, lon))
    }

    fn state(source: MockSource) -> AppState<MockSource> {
        let catalog = StationCatalog::new(vec![
            record("101", "Union Sq", 40.7359, -73.9911),
            record("101N", "Union Sq", 40.73591, -73.99109),
            record("250", "Grand Central", 40.7527, -73.9772),
        ])
        .unwrap();
        let membership: RouteMembership = [
            (RouteId::parse("L").unwrap(), vec![StationId::parse("101").unwrap()]),
            (RouteId::parse("4").unwrap(), vec![StationId::parse("250").unwrap()]),
        ]
        .into_iter()
        .collect();

        AppState::new(
            catalog,
            membership,
            TimetableCache::new(source, &CacheConfig::default()),
            ReportOptions::default(),
        )
    }

    fn html_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
        headers
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn accepts_html_detection() {
        assert!(accepts_html(&html_headers()));
        assert!(!accepts_html(&HeaderMap::new()));

        let mut json = HeaderMap::new();
        json.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!accepts_html(&json));
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn station_by_id_as_json() {
        let source = MockSource::new([("L", "h\n101N 23:59\n\nf\n")]);
        let response = station(
            State(state(source.clone())),
            HeaderMap::new(),
            Path("101n".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["station_id"], "101N");
        assert_eq!(body["synonymous_station_ids"], serde_json::json!(["101", "101N"]));
        assert_eq!(body["routes"], serde_json::json!(["L"]));
        assert!(body["station_name"]["Union Sq"].is_object());
        assert_eq!(
            body["4_other_closest_stations"]["Grand Central"]["station_id"],
            "250"
        );
        assert_eq!(source.calls(), vec![RouteId::parse("L").unwrap()]);
    }

    #[tokio::test]
    async fn nearby_as_html() {
        let response = nearby(
            State(state(MockSource::default())),
            html_headers(),
            Query(NearbyRequest {
                lat: 40.7528,
                lon: -73.9771,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("<h1>Grand Central</h1>"));
        assert!(body.contains("Union Sq"));
    }

    #[tokio::test]
    async fn unknown_station_is_not_found() {
        let Err(err) = station(
            State(state(MockSource::default())),
            HeaderMap::new(),
            Path("999".to_string()),
        )
        .await
        else {
            panic!("expected an error");
        };

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Invalid station ID.");
    }

    #[tokio::test]
    async fn unknown_station_html_page() {
        let Err(err) = station(
            State(state(MockSource::default())),
            html_headers(),
            Path("999".to_string()),
        )
        .await
        else {
            panic!("expected an error");
        };

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_text(response).await;
        assert!(body.contains("Not Found"));
        assert!(body.contains("Invalid station ID."));
    }

    #[tokio::test]
    async fn invalid_position_is_bad_request() {
        let Err(err) = nearby(
            State(state(MockSource::default())),
            HeaderMap::new(),
            Query(NearbyRequest {
                lat: 123.0,
                lon: 0.0,
            }),
        )
        .await
        else {
            panic!("expected an error");
        };

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn router_builds() {
        let _router = create_router(state(MockSource::default()));
    }
}
