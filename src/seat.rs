//! Seat shift table.
//!
//! Sprites are anchored at their centre, so a seated avatar needs a small
//! nudge to line up with the chair art, plus a depth tweak so that it draws
//! behind chairs facing up and in front of the rest.

use bevy::math::Vec2;

use crate::animation::Facing;

/// Offset applied to the avatar when it sits on a seat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SittingShift {
    /// Horizontal offset from the seat position.
    pub x: f32,
    /// Vertical offset from the seat position.
    pub y: f32,
    /// Offset added to the seat depth.
    pub depth: f32,
}

impl SittingShift {
    /// Positional part of the shift.
    #[must_use]
    pub const fn offset(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Looks up the shift for a seat category.
///
/// # Examples
///
/// ```
/// use mece::animation::Facing;
/// use mece::seat::sitting_shift;
///
/// let shift = sitting_shift(Facing::Up);
/// assert_eq!((shift.x, shift.y, shift.depth), (0.0, 3.0, -1.0));
/// ```
#[must_use]
pub const fn sitting_shift(category: Facing) -> SittingShift {
    match category {
        Facing::Up => SittingShift {
            x: 0.0,
            y: 3.0,
            depth: -1.0,
        },
        Facing::Down => SittingShift {
            x: 0.0,
            y: 3.0,
            depth: 1.0,
        },
        Facing::Left | Facing::Right => SittingShift {
            x: 0.0,
            y: -8.0,
            depth: 1.0,
        },
    }
}
