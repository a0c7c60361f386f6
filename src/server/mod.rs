//! Room server bootstrap.
//!
//! [`router`] builds the HTTP surface around a [`GameServer`]: permissive
//! CORS, JSON matchmaking, the WebSocket room endpoint, and the monitor.
//! [`serve`] binds it to a [`ServerConfig`] address and runs until the
//! listener fails.

pub mod mece_room;
pub mod monitor;
pub mod room;
pub mod session;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::constants::{DEFAULT_PORT, MONITOR_PATH, ROOM_NAME};
use crate::error::ServerError;

pub use mece_room::MeceRoom;
pub use room::{GameServer, Reservation, Room, RoomContext, RoomHandle, RoomSummary, SessionId};

/// Listen address of the room server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: IpAddr,
    /// TCP port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Socket address built from host and port.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Registry with the office room defined under its public name.
#[must_use]
pub fn office_server() -> GameServer {
    let mut server = GameServer::new();
    server.define(ROOM_NAME, MeceRoom::default());
    server
}

/// Builds the HTTP application for `server`.
///
/// Accepts an owned registry or an [`Arc`] the caller keeps for inspection.
#[must_use]
pub fn router(server: impl Into<Arc<GameServer>>) -> Router {
    Router::new()
        .route(
            "/matchmake/joinOrCreate/{room}",
            post(session::join_or_create),
        )
        .route("/rooms/{room}", get(session::room_socket))
        .nest(MONITOR_PATH, monitor::router())
        .layer(CorsLayer::permissive())
        .with_state(server.into())
}

/// Binds `config` and serves `server` until the listener fails.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the address cannot be bound and
/// [`ServerError::Serve`] if the accept loop stops with an I/O error.
pub async fn serve(config: ServerConfig, server: GameServer) -> Result<(), ServerError> {
    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!("Listening on ws://localhost:{}", config.port);
    axum::serve(listener, router(server))
        .await
        .map_err(ServerError::Serve)
}
