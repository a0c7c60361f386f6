//! Mapping between screen space and Bevy world space.
//!
//! Office maps are authored in screen space: y grows downward and an avatar
//! walking vertically takes its screen y as render depth, so whatever stands
//! lower on screen draws on top. Bevy transforms are y-up. The controller
//! works in screen space and the ECS systems convert at the boundary by
//! mirroring y; depth is carried on `z` unchanged.

use bevy::math::{Vec2, Vec3};

/// Mirrors a vector across the x axis.
///
/// The mapping is its own inverse, so it converts positions and velocities in
/// either direction.
#[must_use]
pub const fn mirror_y(v: Vec2) -> Vec2 {
    Vec2::new(v.x, -v.y)
}

/// Splits a world translation into a screen position and a render depth.
///
/// # Examples
///
/// ```
/// use bevy::math::{Vec2, Vec3};
/// use mece::screen::to_screen;
///
/// let (position, depth) = to_screen(Vec3::new(10.0, 40.0, -40.0));
/// assert_eq!(position, Vec2::new(10.0, -40.0));
/// assert_eq!(depth, -40.0);
/// ```
#[must_use]
pub const fn to_screen(translation: Vec3) -> (Vec2, f32) {
    (mirror_y(Vec2::new(translation.x, translation.y)), translation.z)
}

/// Builds a world translation from a screen position and a render depth.
#[must_use]
pub const fn to_world(position: Vec2, depth: f32) -> Vec3 {
    let world = mirror_y(position);
    Vec3::new(world.x, world.y, depth)
}
