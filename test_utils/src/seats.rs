//! Seat snapshots for controller tests.

use bevy::math::Vec2;
use mece::animation::Facing;
use mece::controller::SeatSnapshot;

/// Seat at `(x, y)` with `depth`, facing `category`.
///
/// # Examples
/// ```
/// use mece::animation::Facing;
/// let seat = test_utils::seats::seat(100.0, 80.0, 80.0, Facing::Up);
/// assert_eq!(seat.position.y, 80.0);
/// ```
#[must_use]
pub fn seat(x: f32, y: f32, depth: f32, category: Facing) -> SeatSnapshot {
    SeatSnapshot {
        position: Vec2::new(x, y),
        depth,
        category,
    }
}

/// One seat of each category around the origin, depth matching y.
#[must_use]
pub fn ring(radius: f32) -> [SeatSnapshot; 4] {
    [
        seat(0.0, -radius, -radius, Facing::Down),
        seat(0.0, radius, radius, Facing::Up),
        seat(-radius, 0.0, 0.0, Facing::Right),
        seat(radius, 0.0, 0.0, Facing::Left),
    ]
}
