//! Read-only monitoring endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ServerError;
use crate::server::room::{GameServer, RoomSummary};

/// Routes mounted under the monitor path.
#[must_use]
pub fn router() -> Router<Arc<GameServer>> {
    Router::new()
        .route("/", get(list_rooms))
        .route("/rooms/{room}", get(room_detail))
}

async fn list_rooms(State(server): State<Arc<GameServer>>) -> Json<Vec<RoomSummary>> {
    let mut summaries = Vec::new();
    for room in server.rooms() {
        summaries.push(room.summary().await);
    }
    Json(summaries)
}

async fn room_detail(
    State(server): State<Arc<GameServer>>,
    Path(room): Path<String>,
) -> Result<Json<RoomSummary>, ServerError> {
    let handle = server.room(&room)?;
    Ok(Json(handle.summary().await))
}
