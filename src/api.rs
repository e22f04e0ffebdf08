use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    config::SearchConfig,
    error::FinderError,
    listings::{ContactLinks, DISCLAIMER_BODY, DISCLAIMER_TITLE, InvalidListing, ListingRanker},
    models::{Coordinates, Listing, RankedListing},
};

/// Shared, read-only state for the API handlers
#[derive(Clone)]
pub struct AppState {
    pub listings: Arc<Vec<Listing>>,
    pub search: SearchConfig,
}

impl AppState {
    pub fn new(listings: Vec<Listing>, search: SearchConfig) -> Self {
        Self {
            listings: Arc::new(listings),
            search,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub q: Option<String>,
    pub radius_km: Option<f64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Serialize)]
pub struct ApiListing {
    #[serde(flatten)]
    pub ranked: RankedListing,
    pub links: ContactLinks,
}

impl From<RankedListing> for ApiListing {
    fn from(ranked: RankedListing) -> Self {
        let links = ContactLinks::for_listing(&ranked.listing);
        Self { ranked, links }
    }
}

#[derive(Serialize)]
pub struct ListingsResponse {
    pub center: Coordinates,
    pub count: usize,
    pub results: Vec<ApiListing>,
    pub skipped: Vec<InvalidListing>,
}

#[derive(Serialize)]
pub struct DisclaimerResponse {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub listings: usize,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Error returned by API handlers
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request<S: Into<String>>(message: S) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<FinderError> for ApiError {
    fn from(err: FinderError) -> Self {
        match err {
            FinderError::Validation { message } => Self::bad_request(message),
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: other.user_message(),
            },
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listings", get(get_listings))
        .route("/disclaimer", get(get_disclaimer))
        .route("/health", get(get_health))
}

async fn get_listings(
    State(state): State<AppState>,
    params: Result<Query<ListingQuery>, QueryRejection>,
) -> Result<Json<ListingsResponse>, ApiError> {
    let Query(params) = params?;
    let center = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => Coordinates::new(lat, lng),
        (None, None) => state.search.default_center(),
        _ => return Err(ApiError::bad_request("lat and lng must be given together")),
    };

    if let Some(radius) = params.radius_km {
        if radius > state.search.max_radius_km {
            return Err(ApiError::bad_request(format!(
                "radius_km cannot exceed {} km",
                state.search.max_radius_km
            )));
        }
    }

    let ranking = ListingRanker::rank(
        &state.listings,
        &center,
        params.q.as_deref().unwrap_or_default(),
        params.radius_km,
    )?;

    for invalid in &ranking.skipped {
        warn!("Skipped listing {}: {}", invalid.id, invalid.reason);
    }

    let results: Vec<ApiListing> = ranking
        .results
        .into_iter()
        .take(state.search.max_results)
        .map(ApiListing::from)
        .collect();

    Ok(Json(ListingsResponse {
        center,
        count: results.len(),
        results,
        skipped: ranking.skipped,
    }))
}

async fn get_disclaimer() -> Json<DisclaimerResponse> {
    Json(DisclaimerResponse {
        title: DISCLAIMER_TITLE,
        body: DISCLAIMER_BODY,
    })
}

async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        listings: state.listings.len(),
    })
}
