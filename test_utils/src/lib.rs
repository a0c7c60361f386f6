//! Utility helpers for tests.
pub mod input;
pub mod seats;

use bevy::math::Vec2;

/// Assert that two vectors are within `tolerance` of each other.
///
/// # Panics
/// Panics with both vectors in the message when they differ by more.
pub fn assert_vec2_near(actual: Vec2, expected: Vec2, tolerance: f32) {
    assert!(
        actual.distance(expected) <= tolerance,
        "expected {expected:?} (±{tolerance}), got {actual:?}"
    );
}
