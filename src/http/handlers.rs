//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AvailabilityParams, AvailabilityResponse, CancelRequest, CreateEventRequest,
    EventListQuery, EventListResponse, HealthResponse, MonthGridDto,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::{DateSort, EventFilter};
use crate::models::{Charge, Discount, Event, EventId, EventPatch, FoodItem, Package, Venue};
use crate::services::availability::AvailabilityQuery;
use crate::services::month_view;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Verify the service is running and the storage backend is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Event CRUD
// =============================================================================

/// GET /v1/events
///
/// List events, optionally filtered by status, month, or client.
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> HandlerResult<EventListResponse> {
    let mut filter = EventFilter::new();
    if let Some(status) = query.status {
        filter = filter.with_status(status);
    }
    if query.active.unwrap_or(false) {
        filter = filter.non_terminal();
    }
    match (query.year, query.month) {
        (Some(year), Some(month)) => filter = filter.in_month(year, month),
        (None, None) => {}
        _ => {
            return Err(AppError::BadRequest(
                "year and month must be provided together".to_string(),
            ))
        }
    }
    if let Some(date) = query.date {
        filter = filter.on_date(date);
    }
    if let Some(time) = query.time {
        filter = filter.at_time(time);
    }
    if let Some(venue) = query.venue {
        filter = filter.at_venue(venue);
    }
    if let Some(client) = query.client {
        filter = filter.for_client(client);
    }
    let sort = match query.sort.as_deref() {
        None | Some("asc") => DateSort::Ascending,
        Some("desc") => DateSort::Descending,
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "Unknown sort order '{}'. Supported: asc, desc",
                other
            )))
        }
    };
    filter = filter.sorted(sort);

    let events = state.repository.find(&filter).await?;
    let total = events.len();
    Ok(Json(EventListResponse { events, total }))
}

/// POST /v1/events
///
/// Create an event in `booked` or `reserved` status.
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let created = state
        .lifecycle
        .create(request.event, request.status)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Event> {
    let event = state.repository.get(EventId::new(id)).await?;
    Ok(Json(event))
}

/// PUT /v1/events/{id}
///
/// Partially update a non-terminal event. A changed date, slot, or
/// venue set is re-validated for availability; changed selections are
/// re-priced.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<EventPatch>,
) -> HandlerResult<Event> {
    let updated = state.lifecycle.update(EventId::new(id), patch).await?;
    Ok(Json(updated))
}

// =============================================================================
// Lifecycle Transitions
// =============================================================================

/// POST /v1/events/{id}/reserve
///
/// Promote a pencil booking to a confirmed reservation.
pub async fn reserve_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Event> {
    let event = state.lifecycle.promote(EventId::new(id)).await?;
    Ok(Json(event))
}

/// POST /v1/events/{id}/cancel
///
/// Cancel a non-terminal event, recording the reason.
pub async fn cancel_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CancelRequest>,
) -> HandlerResult<Event> {
    let event = state
        .lifecycle
        .cancel(EventId::new(id), &request.reason)
        .await?;
    Ok(Json(event))
}

/// POST /v1/events/{id}/finish
///
/// Mark a non-terminal event as finished.
pub async fn finish_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Event> {
    let event = state.lifecycle.finish(EventId::new(id)).await?;
    Ok(Json(event))
}

// =============================================================================
// Availability and Calendar
// =============================================================================

/// GET /v1/availability
///
/// Advisory availability check for a (date, slot, venue set) tuple.
pub async fn check_availability(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> HandlerResult<AvailabilityResponse> {
    let venues = parse_venues(&params.venues)?;
    let query = AvailabilityQuery {
        date: params.date,
        time: params.time,
        venues,
    };
    let exclude = params.exclude.map(EventId::new);

    let answer = state
        .lifecycle
        .availability()
        .check(&query, exclude)
        .await?;
    Ok(Json(AvailabilityResponse {
        available: answer.available,
        conflicting: answer.conflicting,
    }))
}

fn parse_venues(raw: &str) -> Result<Vec<Venue>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Venue>()
                .map_err(|e| AppError::BadRequest(e.to_string()))
        })
        .collect()
}

/// GET /v1/calendar/{year}/{month}
///
/// Month grid with per-(venue, slot) occupancy. Active events only.
pub async fn get_calendar(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> HandlerResult<MonthGridDto> {
    let repo: std::sync::Arc<dyn crate::db::EventRepository> = state.repository.clone();
    let grid = month_view(&repo, year, month).await?;
    Ok(Json(grid.into()))
}

// =============================================================================
// Catalog
// =============================================================================

/// GET /v1/catalog/packages
pub async fn list_packages(State(state): State<AppState>) -> HandlerResult<Vec<Package>> {
    Ok(Json(state.repository.list_packages().await?))
}

/// GET /v1/catalog/foods
pub async fn list_food_items(State(state): State<AppState>) -> HandlerResult<Vec<FoodItem>> {
    Ok(Json(state.repository.list_food_items().await?))
}

/// GET /v1/catalog/charges
pub async fn list_charges(State(state): State<AppState>) -> HandlerResult<Vec<Charge>> {
    Ok(Json(state.repository.list_charges().await?))
}

/// GET /v1/catalog/discounts
pub async fn list_discounts(State(state): State<AppState>) -> HandlerResult<Vec<Discount>> {
    Ok(Json(state.repository.list_discounts().await?))
}
