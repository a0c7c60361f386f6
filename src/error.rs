//! Error type for the room server.

use std::io;
use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::server::SessionId;

/// Failures raised while bootstrapping or serving rooms.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: SocketAddr,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// The accept loop stopped with an I/O error.
    #[error("server stopped: {0}")]
    Serve(#[source] io::Error),
    /// No room handler is registered under the name.
    #[error("no room registered as `{0}`")]
    UnknownRoom(String),
    /// A client tried to connect without a seat reservation.
    #[error("session `{session}` has no reservation in room `{room}`")]
    UnknownSession {
        /// Room the client tried to join.
        room: String,
        /// Session id presented by the client.
        session: SessionId,
    },
}

impl ServerError {
    /// HTTP status reported to clients for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::UnknownRoom(_) => StatusCode::NOT_FOUND,
            Self::UnknownSession { .. } => StatusCode::BAD_REQUEST,
            Self::Bind { .. } | Self::Serve(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
