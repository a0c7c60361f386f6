//! ECS component types used by the office client.
//! Covers the local avatar, its selector, and the seats it can interact with.
use bevy::prelude::*;
use serde::Serialize;

use crate::animation::Facing;
use crate::constants::COLLISION_SCALE;

/// Marks the locally controlled avatar.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    /// Selector entity that tracks what the avatar is facing.
    pub selector: Entity,
}

/// Interaction mode of the avatar.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[reflect(Component, Default)]
pub enum PlayerMode {
    /// Free to walk around.
    #[default]
    Roaming,
    /// Seated on an interactable; movement keys are ignored.
    Engaged,
}

/// Velocity in world units per second (y-up).
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq, Deref, DerefMut)]
#[reflect(Component, Default)]
pub struct Velocity(pub Vec2);

/// Something the avatar can sit on.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct Interactable {
    /// Seat category, used to look up the sitting shift.
    pub category: Facing,
}

/// Short text bubble shown above an interactable.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    text: Option<String>,
}

impl Prompt {
    /// Replaces the prompt text.
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Hides the prompt.
    pub fn clear(&mut self) {
        self.text = None;
    }

    /// Text currently shown, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Invisible marker placed in front of the avatar.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerSelector {
    /// Interactable currently under the marker.
    pub selected: Option<Entity>,
}

/// Axis-aligned collision body relative to the sprite's top-left corner.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct Collider {
    /// Width and height of the body.
    pub size: Vec2,
    /// Offset of the body from the sprite's top-left corner.
    pub offset: Vec2,
}

impl Collider {
    /// Derives the avatar's body from its sprite size.
    ///
    /// The body covers the middle half of the sprite's width and the bottom
    /// fifth of its height so that only the feet collide.
    ///
    /// # Examples
    ///
    /// ```
    /// use bevy::math::Vec2;
    /// use mece::components::Collider;
    ///
    /// let body = Collider::for_sprite(Vec2::new(40.0, 50.0));
    /// assert_eq!(body.size, Vec2::new(20.0, 10.0));
    /// assert_eq!(body.offset, Vec2::new(10.0, 40.0));
    /// ```
    #[must_use]
    pub fn for_sprite(sprite_size: Vec2) -> Self {
        let scale = Vec2::new(COLLISION_SCALE.0, COLLISION_SCALE.1);
        let size = sprite_size * scale;
        let offset = Vec2::new(
            sprite_size.x * (1.0 - scale.x) * 0.5,
            sprite_size.y * (1.0 - scale.y),
        );
        Self { size, offset }
    }
}
