//! The office room: a relay between the avatars sharing one floor.
//!
//! Clients own their avatar state, so the room only stamps each message with
//! the sender's session id and forwards it to everyone else.

use serde_json::{json, Value};

use crate::server::room::{Room, RoomContext, SessionId};

/// Room registered under [`crate::constants::ROOM_NAME`].
#[derive(Debug, Default)]
pub struct MeceRoom {
    sessions: Vec<SessionId>,
}

impl MeceRoom {
    /// Sessions currently in the room, in join order.
    #[must_use]
    pub fn sessions(&self) -> &[SessionId] {
        &self.sessions
    }
}

impl Room for MeceRoom {
    fn on_join(&mut self, ctx: &mut RoomContext, session: &SessionId, _options: &Value) {
        self.sessions.push(session.clone());
        ctx.broadcast(&json!({ "type": "join", "sessionId": session }), Some(session));
    }

    fn on_message(&mut self, ctx: &mut RoomContext, session: &SessionId, message: Value) {
        let relayed = json!({
            "type": "message",
            "sessionId": session,
            "payload": message,
        });
        ctx.broadcast(&relayed, Some(session));
    }

    fn on_leave(&mut self, ctx: &mut RoomContext, session: &SessionId) {
        self.sessions.retain(|s| s != session);
        ctx.broadcast(&json!({ "type": "leave", "sessionId": session }), None);
    }

    fn snapshot(&self) -> Value {
        json!({ "sessions": self.sessions })
    }
}
