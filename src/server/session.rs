//! HTTP handlers for matchmaking and WebSocket sessions.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, Query, State, WebSocketUpgrade};
use axum::response::Response;
use axum::Json;
use futures::{SinkExt, StreamExt};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::ServerError;
use crate::server::room::{GameServer, Reservation, RoomHandle, SessionId};

/// Query string presented when opening a room socket.
#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    /// Id returned by the matchmaking call.
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
}

/// `POST /matchmake/joinOrCreate/{room}`: reserves a seat.
///
/// The JSON body carries client join options and is handed to the room when
/// the socket connects.
pub async fn join_or_create(
    State(server): State<Arc<GameServer>>,
    Path(room): Path<String>,
    Json(options): Json<Value>,
) -> Result<Json<Reservation>, ServerError> {
    server.reserve(&room, options).await.map(Json)
}

/// `GET /rooms/{room}?sessionId=…`: upgrades a reserved seat to a socket.
pub async fn room_socket(
    State(server): State<Arc<GameServer>>,
    Path(room): Path<String>,
    Query(params): Query<ConnectParams>,
    ws: WebSocketUpgrade,
) -> Result<Response, ServerError> {
    let handle = server.room(&room)?.clone();
    if !handle.is_reserved(&params.session_id).await {
        return Err(ServerError::UnknownSession {
            room,
            session: params.session_id,
        });
    }
    Ok(ws.on_upgrade(move |socket| run_session(socket, handle, params.session_id)))
}

async fn run_session(socket: WebSocket, room: RoomHandle, session: SessionId) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    if let Err(e) = room.join(&session, tx).await {
        warn!("rejecting socket: {e}");
        return;
    }

    let writer = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => match serde_json::from_str::<Value>(text.as_str()) {
                Ok(message) => room.dispatch(&session, message).await,
                Err(e) => warn!("ignoring malformed message from {session}: {e}"),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("socket error for {session}: {e}");
                break;
            }
        }
    }

    room.leave(&session).await;
    writer.abort();
}
