//! Gameplay and server constants shared across modules.
//!
//! Distances are in pixels and apply equally in screen and world space.

use std::time::Duration;

/// Avatar walking speed in pixels per second.
pub const PLAYER_SPEED: f32 = 200.0;
/// Distance from the avatar's origin to its selector, along the facing axis.
pub const SELECTOR_REACH: f32 = 16.0;
/// Radius around the selector within which an interactable can be selected.
pub const SELECTION_RADIUS: f32 = 16.0;
/// Longest frame time, in seconds, applied to avatar movement.
pub const MAX_FRAME_DELTA: f32 = 0.1;
/// Fraction of the sprite's width and height used for the collision body.
pub const COLLISION_SCALE: (f32, f32) = (0.5, 0.2);

/// Prompt shown on a seat the avatar is standing in front of.
pub const SIT_PROMPT: &str = "Press E to sit";
/// Prompt shown on a seat while the avatar is sitting on it.
pub const STAND_PROMPT: &str = "Press E to stand up";

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 2567;
/// Name the office room is registered under.
pub const ROOM_NAME: &str = "mece";
/// Mount point of the monitoring endpoint.
pub const MONITOR_PATH: &str = "/colyseus";
/// How long a matchmaking reservation waits for its socket.
pub const SEAT_RESERVATION_TTL: Duration = Duration::from_secs(15);
