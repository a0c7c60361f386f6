//! Room registry and per-room session bookkeeping.
//!
//! A [`GameServer`] owns one live instance per registered room name. Clients
//! first reserve a seat over HTTP, then redeem the reservation when their
//! WebSocket connects. Reservations that are not redeemed within
//! [`SEAT_RESERVATION_TTL`] are dropped. Each instance sits behind a `tokio`
//! mutex so the room callbacks run one at a time.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hashbrown::HashMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{mpsc, Mutex};
use tokio::time::Instant;

use crate::constants::SEAT_RESERVATION_TTL;
use crate::error::ServerError;

/// Identifier handed to a client when it reserves a seat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outgoing half of a client connection.
pub type ClientSender = mpsc::UnboundedSender<String>;

/// Connected clients of one room, exposed to [`Room`] callbacks.
#[derive(Debug, Default)]
pub struct RoomContext {
    clients: HashMap<SessionId, ClientSender>,
}

impl RoomContext {
    /// Sends `message` to one client. Returns `false` if it is gone.
    #[must_use]
    pub fn send(&self, to: &SessionId, message: &Value) -> bool {
        let Some(client) = self.clients.get(to) else {
            return false;
        };
        client.send(message.to_string()).is_ok()
    }

    /// Sends `message` to every client except `except`.
    pub fn broadcast(&self, message: &Value, except: Option<&SessionId>) {
        let text = message.to_string();
        for (session, client) in &self.clients {
            if Some(session) == except {
                continue;
            }
            if client.send(text.clone()).is_err() {
                debug!("dropping message for closed session {session}");
            }
        }
    }

    /// Number of connected clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether no client is connected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

/// Server-side behaviour of a room.
///
/// Callbacks run with the room locked, so they must not block.
pub trait Room: Send + 'static {
    /// A client redeemed its reservation and is now connected.
    fn on_join(&mut self, _ctx: &mut RoomContext, _session: &SessionId, _options: &Value) {}

    /// A connected client sent a JSON message.
    fn on_message(&mut self, ctx: &mut RoomContext, session: &SessionId, message: Value);

    /// A client disconnected. It has already been removed from `ctx`.
    fn on_leave(&mut self, _ctx: &mut RoomContext, _session: &SessionId) {}

    /// Room state exposed by the monitor.
    fn snapshot(&self) -> Value {
        Value::Null
    }
}

/// Monitor and matchmaking view of a room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSummary {
    /// Registered name.
    pub name: String,
    /// Connected clients.
    pub clients: usize,
    /// Reservations not yet redeemed.
    pub reserved: usize,
    /// Room-specific state.
    pub state: Value,
}

/// Reply to a successful seat reservation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    /// Room the seat was reserved in.
    pub room: RoomSummary,
    /// Id to present when connecting.
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
}

struct PendingSeat {
    options: Value,
    expires_at: Instant,
}

struct RoomInstance {
    room: Box<dyn Room>,
    ctx: RoomContext,
    reservations: HashMap<SessionId, PendingSeat>,
}

impl RoomInstance {
    fn prune_expired(&mut self, name: &str) {
        let now = Instant::now();
        let before = self.reservations.len();
        self.reservations.retain(|_, seat| seat.expires_at > now);
        let dropped = before.saturating_sub(self.reservations.len());
        if dropped > 0 {
            debug!("dropped {dropped} expired reservation(s) in room {name}");
        }
    }
}

/// Shared handle to a live room instance.
#[derive(Clone)]
pub struct RoomHandle {
    name: Arc<str>,
    inner: Arc<Mutex<RoomInstance>>,
}

impl fmt::Debug for RoomHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomHandle").field("name", &self.name).finish_non_exhaustive()
    }
}

impl RoomHandle {
    fn new(name: &str, room: Box<dyn Room>) -> Self {
        Self {
            name: Arc::from(name),
            inner: Arc::new(Mutex::new(RoomInstance {
                room,
                ctx: RoomContext::default(),
                reservations: HashMap::new(),
            })),
        }
    }

    /// Registered name of the room.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stores a reservation for `session` with the client's join options.
    ///
    /// The reservation lapses after [`SEAT_RESERVATION_TTL`].
    pub async fn reserve(&self, session: SessionId, options: Value) -> Reservation {
        let mut instance = self.inner.lock().await;
        instance.prune_expired(&self.name);
        let seat = PendingSeat {
            options,
            expires_at: Instant::now() + SEAT_RESERVATION_TTL,
        };
        instance.reservations.insert(session.clone(), seat);
        Reservation {
            room: summarize(&self.name, &instance),
            session_id: session,
        }
    }

    /// Whether `session` holds an unredeemed, unexpired reservation.
    #[must_use]
    pub async fn is_reserved(&self, session: &SessionId) -> bool {
        let mut instance = self.inner.lock().await;
        instance.prune_expired(&self.name);
        instance.reservations.contains_key(session)
    }

    /// Redeems the reservation of `session` and attaches its sender.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::UnknownSession`] when no reservation exists or
    /// it has expired.
    pub async fn join(&self, session: &SessionId, sender: ClientSender) -> Result<(), ServerError> {
        let mut guard = self.inner.lock().await;
        guard.prune_expired(&self.name);
        let RoomInstance {
            room,
            ctx,
            reservations,
        } = &mut *guard;
        let seat = reservations
            .remove(session)
            .ok_or_else(|| ServerError::UnknownSession {
                room: self.name.to_string(),
                session: session.clone(),
            })?;
        ctx.clients.insert(session.clone(), sender);
        info!("session {session} joined room {}", self.name);
        room.on_join(ctx, session, &seat.options);
        Ok(())
    }

    /// Forwards a client message to the room.
    pub async fn dispatch(&self, session: &SessionId, message: Value) {
        let mut guard = self.inner.lock().await;
        let RoomInstance { room, ctx, .. } = &mut *guard;
        if !ctx.clients.contains_key(session) {
            warn!("message from detached session {session} in room {}", self.name);
            return;
        }
        room.on_message(ctx, session, message);
    }

    /// Detaches `session` and notifies the room.
    pub async fn leave(&self, session: &SessionId) {
        let mut guard = self.inner.lock().await;
        let RoomInstance { room, ctx, .. } = &mut *guard;
        if ctx.clients.remove(session).is_none() {
            return;
        }
        info!("session {session} left room {}", self.name);
        room.on_leave(ctx, session);
    }

    /// Current monitor view of the room.
    #[must_use]
    pub async fn summary(&self) -> RoomSummary {
        let mut instance = self.inner.lock().await;
        instance.prune_expired(&self.name);
        summarize(&self.name, &instance)
    }
}

fn summarize(name: &str, instance: &RoomInstance) -> RoomSummary {
    RoomSummary {
        name: name.to_owned(),
        clients: instance.ctx.len(),
        reserved: instance.reservations.len(),
        state: instance.room.snapshot(),
    }
}

/// Registry of room handlers keyed by name.
#[derive(Debug, Default)]
pub struct GameServer {
    rooms: HashMap<String, RoomHandle>,
    next_session: AtomicU64,
}

impl GameServer {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `room` under `name`, replacing any previous handler.
    pub fn define(&mut self, name: &str, room: impl Room) -> &mut Self {
        let handle = RoomHandle::new(name, Box::new(room));
        if self.rooms.insert(name.to_owned(), handle).is_some() {
            warn!("room `{name}` was already defined; replacing its handler");
        } else {
            info!("defined room `{name}`");
        }
        self
    }

    /// Looks up a room by name.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::UnknownRoom`] when nothing is registered.
    pub fn room(&self, name: &str) -> Result<&RoomHandle, ServerError> {
        self.rooms
            .get(name)
            .ok_or_else(|| ServerError::UnknownRoom(name.to_owned()))
    }

    /// Registered rooms sorted by name.
    #[must_use]
    pub fn rooms(&self) -> Vec<&RoomHandle> {
        let mut rooms: Vec<_> = self.rooms.values().collect();
        rooms.sort_by(|a, b| a.name().cmp(b.name()));
        rooms
    }

    /// Allocates a fresh session id.
    #[must_use]
    pub fn next_session_id(&self) -> SessionId {
        let n = self.next_session.fetch_add(1, Ordering::Relaxed);
        SessionId(format!("{n:08x}"))
    }

    /// Reserves a seat in `name` for a new session.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::UnknownRoom`] when nothing is registered.
    pub async fn reserve(&self, name: &str, options: Value) -> Result<Reservation, ServerError> {
        let room = self.room(name)?;
        let session = self.next_session_id();
        debug!("reserving seat {session} in room {name}");
        Ok(room.reserve(session, options).await)
    }
}
