//! History API routes
//!
//! `GET /history` returns the day-grouped list; `GET /history/events`
//! streams store changes so a client can re-query when something changes.

use crate::error::ApiError;
use crate::services::{HistoryEntry, HistoryService};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use futures_util::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use topweight_shared::types::{HistoryEntryResponse, HistoryQuery, HistoryResponse, HistorySectionResponse};
use tracing::{info, warn};

/// Create history routes
pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_history))
        .route("/events", get(history_events))
}

fn entry_response(entry: HistoryEntry) -> HistoryEntryResponse {
    HistoryEntryResponse {
        id: entry.id.to_string(),
        user_id: entry.user_id.map(|id| id.to_string()),
        user_name: entry.user_name,
        exercise_name: entry.exercise_name,
        time: entry.time,
        detail: entry.detail,
        date: entry.date,
        is_distance_entry: entry.is_distance_entry,
    }
}

/// GET /api/v1/history - Records grouped by day in the viewer's time zone
async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    // Read before querying so a change racing this request bumps the revision past it
    let revision = state.events().revision();

    let zone = HistoryService::viewer_zone(
        query.tz.as_deref(),
        query.utc_offset_minutes,
        &state.config().history,
    )?;

    let sections = HistoryService::history(state.db(), zone, Utc::now()).await?;
    let total_count = sections.iter().map(|s| s.items.len()).sum();

    let sections = sections
        .into_iter()
        .map(|section| HistorySectionResponse {
            day: section.day,
            title: section.title,
            records: section.items.into_iter().map(entry_response).collect(),
        })
        .collect();

    Ok(Json(HistoryResponse {
        sections,
        total_count,
        revision,
    }))
}

/// GET /api/v1/history/events - Server-Sent Events stream of store changes
async fn history_events(State(state): State<AppState>) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut receiver = state.events().subscribe();
    let revision = state.events().revision();
    info!(revision, "History event stream opened");

    let stream = async_stream::stream! {
        yield Ok(Event::default()
            .event("connected")
            .id(revision.to_string())
            .data(revision.to_string()));

        loop {
            match receiver.recv().await {
                Ok(change) => match Event::default()
                    .event("change")
                    .id(change.revision.to_string())
                    .json_data(&change)
                {
                    Ok(event) => {
                        yield Ok(event);
                    }
                    Err(e) => {
                        warn!("Failed to encode store event: {}", e);
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    // The client re-queries on any change, so one resync covers every missed event
                    warn!(skipped, "History event stream lagged");
                    yield Ok(Event::default().event("resync").data(skipped.to_string()));
                }
                Err(RecvError::Closed) => {
                    info!("History event stream closed");
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keepalive"),
    )
}
