//! Structured animation keys for the player avatar.
//!
//! Clips are named `player_<motion>_<facing>` in the sprite atlas. Keeping the
//! two parts as separate fields lets systems swap the motion while keeping the
//! facing without touching the rendered name.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction the avatar (or a seat) faces.
///
/// Seats reuse this as their category: a seat facing `Up` is sat on from
/// below, and its shift entry is looked up by the same value.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Towards negative y.
    Up,
    /// Towards positive y.
    #[default]
    Down,
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
}

impl Facing {
    /// Every facing in input priority order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Unit vector in screen space (y grows downward).
    #[must_use]
    pub const fn unit(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Whether moving this way changes the avatar's y coordinate.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Lowercase token used in clip names and map properties.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facing {
    type Err = ParseAnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(ParseAnimationError::UnknownFacing(other.to_owned())),
        }
    }
}

/// What the avatar is doing in a clip.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Motion {
    /// Standing still.
    #[default]
    Idle,
    /// Walking in the facing direction.
    Run,
    /// Seated on an interactable.
    Sit,
}

impl Motion {
    /// Lowercase token used in clip names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Run => "run",
            Self::Sit => "sit",
        }
    }
}

impl FromStr for Motion {
    type Err = ParseAnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "run" => Ok(Self::Run),
            "sit" => Ok(Self::Sit),
            other => Err(ParseAnimationError::UnknownMotion(other.to_owned())),
        }
    }
}

/// Errors raised when parsing clip names or facing labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAnimationError {
    /// The name did not have the `player_<motion>_<facing>` shape.
    #[error("malformed animation key `{0}`")]
    Malformed(String),
    /// The motion token is not one of `idle`, `run`, `sit`.
    #[error("unknown motion `{0}`")]
    UnknownMotion(String),
    /// The facing token is not one of `up`, `down`, `left`, `right`.
    #[error("unknown facing `{0}`")]
    UnknownFacing(String),
}

/// Current animation clip of the avatar.
///
/// # Examples
///
/// ```
/// use mece::animation::{AnimationKey, Facing, Motion};
///
/// let key = AnimationKey::new(Facing::Left, Motion::Run);
/// assert_eq!(key.to_string(), "player_run_left");
/// assert_eq!(key.with_motion(Motion::Idle).to_string(), "player_idle_left");
/// ```
#[derive(
    Component, Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[reflect(Component, Default)]
pub struct AnimationKey {
    /// Direction the avatar faces in the clip.
    pub facing: Facing,
    /// Motion played by the clip.
    pub motion: Motion,
}

impl AnimationKey {
    /// Prefix shared by every avatar clip.
    pub const PREFIX: &'static str = "player";

    /// Creates a key from its parts.
    #[must_use]
    pub const fn new(facing: Facing, motion: Motion) -> Self {
        Self { facing, motion }
    }

    /// Returns the same facing with a different motion.
    #[must_use]
    pub const fn with_motion(self, motion: Motion) -> Self {
        Self {
            facing: self.facing,
            motion,
        }
    }
}

impl fmt::Display for AnimationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            Self::PREFIX,
            self.motion.as_str(),
            self.facing.as_str()
        )
    }
}

impl FromStr for AnimationKey {
    type Err = ParseAnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('_');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Self::PREFIX), Some(motion), Some(facing), None) => {
                Ok(Self::new(facing.parse()?, motion.parse()?))
            }
            _ => Err(ParseAnimationError::Malformed(s.to_owned())),
        }
    }
}
