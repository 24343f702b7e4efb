//! HTTP request handlers for the helpboard API

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use crate::core::{AppState, Result};
use crate::query::{self, ListQuery, Listed};
use crate::storage::Store;
use crate::system::health::HealthStatus;
use crate::system::metrics::{self, Metrics, Timer};
use crate::types::{Business, Entity, HelpRequest, NewHelpRequest, UpdateHelpRequest};
use super::error::ApiError;
use super::extract::{Format, Payload, QueryParams};

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Run a listing and record it in the metrics
fn run_listing<E: Entity>(store: &Store<E>, query: &ListQuery) -> Result<Vec<Listed<E>>> {
    let metrics = Metrics::global();
    let timer = Timer::start(metrics.query_duration.clone());
    let results = query::list(store, query);
    timer.finish();
    metrics.operations.queries.inc();
    results
}

fn fetch<E: Entity>(store: &Store<E>, id: &str) -> Result<E> {
    Metrics::global().operations.lookups.inc();
    store.get(id)
}

/// Redirect the bare root to the help request listing
pub async fn root_handler() -> Redirect {
    Redirect::to("/requests")
}

// Business Handlers

/// HTML listing of businesses
pub async fn list_businesses(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Html<String>> {
    let businesses = run_listing(&state.businesses, &query)?;
    Ok(Html(state.views.businesses(&businesses, &query)?))
}

/// JSON listing of businesses
pub async fn list_businesses_json(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Json<Vec<Listed<Business>>>> {
    Ok(Json(run_listing(&state.businesses, &query)?))
}

/// Single business as HTML, or raw JSON for a `.json` id
pub async fn get_business(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> ApiResult<Response> {
    let (id, format) = Format::from_path(&segment);
    let business = fetch(&state.businesses, id)?;
    Ok(match format {
        Format::Json => Json(business).into_response(),
        Format::Html => Html(state.views.business(id, &business)?).into_response(),
    })
}

// Help Request Handlers

/// HTML listing of help requests
pub async fn list_requests(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Html<String>> {
    let requests = run_listing(&state.help_requests, &query)?;
    Ok(Html(state.views.help_requests(&requests, &query)?))
}

/// JSON listing of help requests
pub async fn list_requests_json(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<Json<Vec<Listed<HelpRequest>>>> {
    Ok(Json(run_listing(&state.help_requests, &query)?))
}

/// Single help request as HTML, or raw JSON for a `.json` id
pub async fn get_request(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> ApiResult<Response> {
    let (id, format) = Format::from_path(&segment);
    let request = fetch(&state.help_requests, id)?;
    Ok(match format {
        Format::Json => Json(request).into_response(),
        Format::Html => Html(state.views.help_request(id, &request)?).into_response(),
    })
}

/// Create a help request and respond with the default listing
pub async fn create_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Payload(fields): Payload<NewHelpRequest>,
) -> ApiResult<Response> {
    let request = fields.into_request()?;
    let id = state
        .help_requests
        .insert_new(request, state.config.ids.max_attempts)?;

    tracing::info!("Created help request {}", id);
    Metrics::global().operations.created.inc();
    state.record_store_sizes();

    let query = ListQuery::default();
    let requests = run_listing(&state.help_requests, &query)?;
    let body = match Format::from_headers(&headers) {
        Format::Json => Json(requests).into_response(),
        Format::Html => Html(state.views.help_requests(&requests, &query)?).into_response(),
    };
    Ok((StatusCode::CREATED, body).into_response())
}

/// Reassign priority and optionally append a comment
pub async fn update_request(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    headers: HeaderMap,
    Payload(update): Payload<UpdateHelpRequest>,
) -> ApiResult<Response> {
    let (id, path_format) = Format::from_path(&segment);
    let request = state.help_requests.update(id, |request| {
        request.apply_update(&update)?;
        Ok(request.clone())
    })?;

    tracing::info!("Updated help request {} (priority {})", id, request.priority);
    Metrics::global().operations.updated.inc();

    let format = match path_format {
        Format::Json => Format::Json,
        Format::Html => Format::from_headers(&headers),
    };
    Ok(match format {
        Format::Json => Json(request).into_response(),
        Format::Html => Html(state.views.help_request(id, &request)?).into_response(),
    })
}

// System Handlers

/// Liveness and record counts
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        version: crate::VERSION,
        businesses: state.businesses.len(),
        help_requests: state.help_requests.len(),
    })
}

/// Prometheus text exposition
pub async fn metrics_handler() -> String {
    metrics::collect_metrics()
}
