// HTTP request handlers
use crate::infrastructure::http_response::respond_json;
use crate::presentation::app_state::AppState;
use crate::domain::dashboard::DetailTable;
use crate::domain::hover::HoverState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct PointerMove {
    pub timestamp: i64,
}

#[derive(Deserialize)]
pub struct HoverTarget {
    pub timestamp: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverResponse {
    pub changed: bool,
    pub revision: u64,
    pub state: HoverState,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// All chart panels with their current highlight
pub async fn list_charts(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let charts = state.session().charts();
    respond_json(&charts, &headers).await
}

pub async fn get_chart(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let chart = state.session().chart(&id);
    match chart {
        Some(chart) => respond_json(&chart, &headers).await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Pointer moved over a chart
pub async fn hover_chart(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(event): Json<PointerMove>,
) -> Response {
    let outcome = state.session().pointer_move(&id, event.timestamp);
    match outcome {
        Some(outcome) => Json(outcome).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Pointer left a chart
pub async fn leave_hover(State(state): State<Arc<AppState>>) -> Json<HoverResponse> {
    let mut session = state.session();
    let changed = session.pointer_leave();
    Json(HoverResponse {
        changed,
        revision: session.hover_revision(),
        state: *session.hover_state(),
    })
}

pub async fn get_hover(State(state): State<Arc<AppState>>) -> Json<HoverResponse> {
    let session = state.session();
    Json(HoverResponse {
        changed: false,
        revision: session.hover_revision(),
        state: *session.hover_state(),
    })
}

/// Select a timestamp directly, or clear with `null`
pub async fn set_hover(
    State(state): State<Arc<AppState>>,
    Json(target): Json<HoverTarget>,
) -> Json<HoverResponse> {
    let mut session = state.session();
    let changed = session.set_timestamp(target.timestamp);
    Json(HoverResponse {
        changed,
        revision: session.hover_revision(),
        state: *session.hover_state(),
    })
}

/// Detail table for the hovered sample
pub async fn get_details(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let table = state.session().detail_table();
    respond_json(&table, &headers).await
}

/// Detail table pushed on every hover change
pub async fn detail_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut updates = state.hover_updates();

    let stream = async_stream::stream! {
        loop {
            let table = DetailTable::from_hover(&updates.borrow_and_update());
            match Event::default().event("details").json_data(&table) {
                Ok(event) => yield Ok::<Event, Infallible>(event),
                Err(e) => tracing::warn!("Could not encode detail event: {}", e),
            }
            if updates.changed().await.is_err() {
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Retrieve both series now
pub async fn refresh(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let applied = state.refresh().await;
    respond_json(&applied, &headers).await
}
