//! Per-frame decision logic for the player avatar.
//!
//! [`ControlledEntity::advance`] is a pure function of the avatar's current
//! state, a snapshot of the keyboard, and the seat in front of the avatar.
//! The ECS systems in [`crate::player`] copy component data in and out of it
//! so the rules can be exercised without a running `App`. Positions here are
//! in screen space; [`crate::screen`] maps them onto Bevy transforms.

use bevy::input::ButtonInput;
use bevy::prelude::*;
use log::debug;

use crate::animation::{AnimationKey, Facing, Motion};
use crate::components::PlayerMode;
use crate::screen::to_screen;
use crate::seat::sitting_shift;

/// Keyboard state relevant to the avatar for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Four held directions plus one edge-triggered action key."
)]
pub struct FrameInput {
    /// Left arrow is held.
    pub left: bool,
    /// Right arrow is held.
    pub right: bool,
    /// Up arrow is held.
    pub up: bool,
    /// Down arrow is held.
    pub down: bool,
    /// Interact key went from released to pressed this frame.
    pub interact_pressed: bool,
}

impl FrameInput {
    /// Samples the arrow keys (held) and `interact` (rising edge).
    #[must_use]
    pub fn from_keyboard(keyboard: &ButtonInput<KeyCode>, interact: KeyCode) -> Self {
        Self {
            left: keyboard.pressed(KeyCode::ArrowLeft),
            right: keyboard.pressed(KeyCode::ArrowRight),
            up: keyboard.pressed(KeyCode::ArrowUp),
            down: keyboard.pressed(KeyCode::ArrowDown),
            interact_pressed: keyboard.just_pressed(interact),
        }
    }

    /// First held direction in left, right, up, down order.
    #[must_use]
    pub const fn direction(self) -> Option<Facing> {
        if self.left {
            Some(Facing::Left)
        } else if self.right {
            Some(Facing::Right)
        } else if self.up {
            Some(Facing::Up)
        } else if self.down {
            Some(Facing::Down)
        } else {
            None
        }
    }
}

/// World-space view of the seat selected this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeatSnapshot {
    /// Seat position.
    pub position: Vec2,
    /// Seat render depth.
    pub depth: f32,
    /// Seat category.
    pub category: Facing,
}

impl SeatSnapshot {
    /// Reads a seat from its world transform and category.
    ///
    /// The position is converted to screen space; `z` is taken as depth.
    #[must_use]
    pub const fn from_transform(transform: &Transform, category: Facing) -> Self {
        let (position, depth) = to_screen(transform.translation);
        Self {
            position,
            depth,
            category,
        }
    }
}

/// Outcome of one [`ControlledEntity::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Mode did not change.
    None,
    /// The avatar sat down on the selected seat.
    Engaged,
    /// The avatar stood up.
    Released,
}

/// State of the controlled avatar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlledEntity {
    /// Position in screen space.
    pub position: Vec2,
    /// Render depth; larger draws on top.
    pub depth: f32,
    /// Current velocity in pixels per second.
    pub velocity: Vec2,
    /// Clip currently playing.
    pub animation: AnimationKey,
    /// Interaction mode.
    pub mode: PlayerMode,
}

impl Default for ControlledEntity {
    fn default() -> Self {
        Self::at(Vec2::ZERO)
    }
}

impl ControlledEntity {
    /// A roaming, idle avatar facing down at `position`.
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self {
            position,
            depth: 0.0,
            velocity: Vec2::ZERO,
            animation: AnimationKey::new(Facing::Down, Motion::Idle),
            mode: PlayerMode::Roaming,
        }
    }

    /// Applies one frame of input.
    ///
    /// While roaming, a fresh interact press with a seat selected sits the
    /// avatar down and skips movement for the frame. Without a seat the press
    /// is ignored and the arrow keys are evaluated as usual. While engaged,
    /// only an interact press has any effect.
    ///
    /// # Examples
    ///
    /// ```
    /// use bevy::math::Vec2;
    /// use mece::animation::Facing;
    /// use mece::components::PlayerMode;
    /// use mece::controller::{ControlledEntity, FrameInput, SeatSnapshot, Transition};
    ///
    /// let mut avatar = ControlledEntity::at(Vec2::new(100.0, 100.0));
    /// let seat = SeatSnapshot {
    ///     position: Vec2::new(100.0, 80.0),
    ///     depth: 80.0,
    ///     category: Facing::Up,
    /// };
    /// let press = FrameInput { interact_pressed: true, ..Default::default() };
    ///
    /// assert_eq!(avatar.advance(press, Some(&seat), 200.0), Transition::Engaged);
    /// assert_eq!(avatar.mode, PlayerMode::Engaged);
    /// assert_eq!(avatar.position, Vec2::new(100.0, 83.0));
    /// assert_eq!(avatar.depth, 79.0);
    /// assert_eq!(avatar.animation.to_string(), "player_sit_up");
    /// ```
    pub fn advance(
        &mut self,
        input: FrameInput,
        seat: Option<&SeatSnapshot>,
        speed: f32,
    ) -> Transition {
        match self.mode {
            PlayerMode::Roaming => {
                if input.interact_pressed {
                    if let Some(target) = seat {
                        self.sit_on(target);
                        return Transition::Engaged;
                    }
                }
                self.roam(input, speed);
                Transition::None
            }
            PlayerMode::Engaged => {
                if !input.interact_pressed {
                    return Transition::None;
                }
                self.animation = self.animation.with_motion(Motion::Idle);
                self.mode = PlayerMode::Roaming;
                debug!("avatar stood up at {:?}", self.position);
                Transition::Released
            }
        }
    }

    fn sit_on(&mut self, seat: &SeatSnapshot) {
        let shift = sitting_shift(seat.category);
        // Velocity must be zero before the snap.
        self.velocity = Vec2::ZERO;
        self.position = seat.position + shift.offset();
        self.depth = seat.depth + shift.depth;
        self.animation = AnimationKey::new(seat.category, Motion::Sit);
        self.mode = PlayerMode::Engaged;
        debug!(
            "avatar sat on {} seat at {:?}",
            seat.category, seat.position
        );
    }

    fn roam(&mut self, input: FrameInput, speed: f32) {
        let Some(facing) = input.direction() else {
            self.animation = self.animation.with_motion(Motion::Idle);
            self.velocity = Vec2::ZERO;
            return;
        };
        self.animation = AnimationKey::new(facing, Motion::Run);
        self.velocity = facing.unit() * speed;
        if facing.is_vertical() {
            self.depth = self.position.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const SPEED: f32 = 200.0;

    fn press() -> FrameInput {
        FrameInput {
            interact_pressed: true,
            ..Default::default()
        }
    }

    #[fixture]
    fn avatar() -> ControlledEntity {
        ControlledEntity::at(Vec2::new(100.0, 100.0))
    }

    #[fixture]
    fn seat() -> SeatSnapshot {
        SeatSnapshot {
            position: Vec2::new(100.0, 80.0),
            depth: 80.0,
            category: Facing::Up,
        }
    }

    #[rstest]
    fn interact_without_seat_keeps_roaming(mut avatar: ControlledEntity) {
        let outcome = avatar.advance(press(), None, SPEED);
        assert_eq!(outcome, Transition::None);
        assert_eq!(avatar.mode, PlayerMode::Roaming);
    }

    #[rstest]
    fn interact_without_seat_still_moves(mut avatar: ControlledEntity) {
        let input = FrameInput {
            right: true,
            ..press()
        };
        avatar.advance(input, None, SPEED);
        assert_eq!(avatar.velocity, Vec2::new(SPEED, 0.0));
        assert_eq!(avatar.animation.to_string(), "player_run_right");
    }

    #[rstest]
    #[case::up(Facing::Up, Vec2::new(100.0, 83.0), 79.0)]
    #[case::down(Facing::Down, Vec2::new(100.0, 83.0), 81.0)]
    #[case::left(Facing::Left, Vec2::new(100.0, 72.0), 81.0)]
    #[case::right(Facing::Right, Vec2::new(100.0, 72.0), 81.0)]
    fn sitting_applies_shift(
        mut avatar: ControlledEntity,
        mut seat: SeatSnapshot,
        #[case] category: Facing,
        #[case] position: Vec2,
        #[case] depth: f32,
    ) {
        seat.category = category;
        avatar.velocity = Vec2::new(SPEED, 0.0);

        let outcome = avatar.advance(press(), Some(&seat), SPEED);

        assert_eq!(outcome, Transition::Engaged);
        assert_eq!(avatar.mode, PlayerMode::Engaged);
        assert_eq!(avatar.position, position);
        assert_eq!(avatar.velocity, Vec2::ZERO);
        assert!((avatar.depth - depth).abs() < f32::EPSILON);
        assert_eq!(avatar.animation, AnimationKey::new(category, Motion::Sit));
    }

    #[rstest]
    fn sitting_ignores_held_arrows_that_frame(mut avatar: ControlledEntity, seat: SeatSnapshot) {
        let input = FrameInput {
            left: true,
            ..press()
        };
        avatar.advance(input, Some(&seat), SPEED);
        assert_eq!(avatar.velocity, Vec2::ZERO);
        assert_eq!(avatar.animation.motion, Motion::Sit);
    }

    #[rstest]
    fn holding_interact_does_not_retrigger(mut avatar: ControlledEntity, seat: SeatSnapshot) {
        avatar.advance(FrameInput::default(), Some(&seat), SPEED);
        assert_eq!(avatar.mode, PlayerMode::Roaming);
    }

    #[rstest]
    #[case::with_seat(true)]
    #[case::without_seat(false)]
    fn interact_while_engaged_stands_up(
        mut avatar: ControlledEntity,
        seat: SeatSnapshot,
        #[case] seat_present: bool,
    ) {
        avatar.advance(press(), Some(&seat), SPEED);
        let target = seat_present.then_some(&seat);

        let outcome = avatar.advance(press(), target, SPEED);

        assert_eq!(outcome, Transition::Released);
        assert_eq!(avatar.mode, PlayerMode::Roaming);
        assert_eq!(avatar.animation.to_string(), "player_idle_up");
    }

    #[rstest]
    fn engaged_ignores_arrows(mut avatar: ControlledEntity, seat: SeatSnapshot) {
        avatar.advance(press(), Some(&seat), SPEED);
        let seated = avatar;

        let input = FrameInput {
            left: true,
            up: true,
            ..Default::default()
        };
        let outcome = avatar.advance(input, Some(&seat), SPEED);

        assert_eq!(outcome, Transition::None);
        assert_eq!(avatar, seated);
    }

    #[rstest]
    #[case::left_beats_up(FrameInput { left: true, up: true, ..Default::default() }, Facing::Left)]
    #[case::left_beats_right(FrameInput { left: true, right: true, ..Default::default() }, Facing::Left)]
    #[case::right_beats_down(FrameInput { right: true, down: true, ..Default::default() }, Facing::Right)]
    #[case::up_beats_down(FrameInput { up: true, down: true, ..Default::default() }, Facing::Up)]
    #[case::all(FrameInput { left: true, right: true, up: true, down: true, ..Default::default() }, Facing::Left)]
    fn direction_priority(
        mut avatar: ControlledEntity,
        #[case] input: FrameInput,
        #[case] expected: Facing,
    ) {
        avatar.advance(input, None, SPEED);
        assert_eq!(avatar.animation, AnimationKey::new(expected, Motion::Run));
        assert_eq!(avatar.velocity, expected.unit() * SPEED);
    }

    #[rstest]
    #[case::up(FrameInput { up: true, ..Default::default() }, true)]
    #[case::down(FrameInput { down: true, ..Default::default() }, true)]
    #[case::left(FrameInput { left: true, ..Default::default() }, false)]
    #[case::right(FrameInput { right: true, ..Default::default() }, false)]
    fn vertical_movement_sorts_by_y(
        mut avatar: ControlledEntity,
        #[case] input: FrameInput,
        #[case] sorts: bool,
    ) {
        avatar.depth = 5.0;
        avatar.advance(input, None, SPEED);
        let expected = if sorts { avatar.position.y } else { 5.0 };
        assert!((avatar.depth - expected).abs() < f32::EPSILON);
    }

    #[rstest]
    fn releasing_arrows_idles_in_last_facing(mut avatar: ControlledEntity) {
        let input = FrameInput {
            left: true,
            ..Default::default()
        };
        avatar.advance(input, None, SPEED);
        avatar.advance(FrameInput::default(), None, SPEED);

        assert_eq!(avatar.velocity, Vec2::ZERO);
        assert_eq!(avatar.animation.to_string(), "player_idle_left");
    }

    #[rstest]
    fn idle_frames_are_idempotent(mut avatar: ControlledEntity) {
        avatar.advance(FrameInput::default(), None, SPEED);
        let settled = avatar;
        for _ in 0..5 {
            avatar.advance(FrameInput::default(), None, SPEED);
        }
        assert_eq!(avatar, settled);
    }

    #[test]
    fn seat_snapshot_reads_world_transform() {
        let transform = Transform::from_xyz(100.0, -80.0, 80.0);
        let snapshot = SeatSnapshot::from_transform(&transform, Facing::Up);
        assert_eq!(snapshot.position, Vec2::new(100.0, 80.0));
        assert!((snapshot.depth - 80.0).abs() < f32::EPSILON);
    }

    #[test]
    fn keyboard_sampling_uses_edge_for_interact() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyE);
        keyboard.press(KeyCode::ArrowUp);
        let first = FrameInput::from_keyboard(&keyboard, KeyCode::KeyE);
        assert!(first.interact_pressed);
        assert!(first.up);

        keyboard.clear();
        let held = FrameInput::from_keyboard(&keyboard, KeyCode::KeyE);
        assert!(!held.interact_pressed);
        assert!(held.up);
    }
}
