//! Bevy plugin driving the local avatar.
//!
//! [`PlayerControllerPlugin`] runs three chained systems in `Update`:
//! selection of the seat in front of the avatar, the controller itself, and a
//! simple velocity integrator standing in for the physics backend. Avatars and
//! seats are created through [`spawn_player`] and [`spawn_seat`] rather than
//! through any global registry.
//!
//! Components hold Bevy world coordinates (y-up). The controller runs in
//! screen space, so the systems convert through [`crate::screen`] on the way
//! in and out.

use bevy::input::ButtonInput;
use bevy::prelude::*;
use log::debug;

use crate::animation::{AnimationKey, Facing, Motion};
use crate::components::{Collider, Interactable, Player, PlayerMode, PlayerSelector, Prompt, Velocity};
use crate::constants::{
    MAX_FRAME_DELTA, PLAYER_SPEED, SELECTION_RADIUS, SELECTOR_REACH, SIT_PROMPT, STAND_PROMPT,
};
use crate::controller::{ControlledEntity, FrameInput, SeatSnapshot, Transition};
use crate::screen::{mirror_y, to_screen, to_world};

/// Runtime configuration for the avatar controller.
///
/// Insert a customised value before adding [`PlayerControllerPlugin`] to
/// override the defaults.
///
/// # Examples
///
/// ```no_run
/// use bevy::prelude::*;
/// use mece::player::{ControllerSettings, PlayerControllerPlugin};
///
/// let mut app = App::new();
/// app.insert_resource(ControllerSettings {
///     speed: 120.0,
///     ..default()
/// });
/// app.add_plugins(PlayerControllerPlugin);
/// ```
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct ControllerSettings {
    /// Walking speed in pixels per second.
    pub speed: f32,
    /// Key that sits down and stands up.
    pub interact_key: KeyCode,
    /// Prompt shown on the selected seat while roaming.
    pub sit_prompt: String,
    /// Prompt shown on the occupied seat.
    pub stand_prompt: String,
    /// Distance from the avatar to its selector.
    pub selector_reach: f32,
    /// How close a seat must be to the selector to be selected.
    pub selection_radius: f32,
    /// Longest frame time integrated in one step.
    ///
    /// Frame hitches are clamped to this so the avatar cannot jump through
    /// walls or past seats.
    pub max_delta_seconds: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            interact_key: KeyCode::KeyE,
            sit_prompt: SIT_PROMPT.to_owned(),
            stand_prompt: STAND_PROMPT.to_owned(),
            selector_reach: SELECTOR_REACH,
            selection_radius: SELECTION_RADIUS,
            max_delta_seconds: MAX_FRAME_DELTA,
        }
    }
}

/// Plugin wiring the avatar controller into an app.
///
/// Keyboard state is read from `ButtonInput<KeyCode>`; when that resource is
/// missing the controller leaves the avatar untouched.
#[derive(Default)]
pub struct PlayerControllerPlugin;

impl Plugin for PlayerControllerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControllerSettings>()
            .register_type::<AnimationKey>()
            .register_type::<PlayerMode>()
            .register_type::<Velocity>()
            .register_type::<Interactable>()
            .register_type::<Collider>()
            .add_systems(
                Update,
                (
                    select_interactable_system,
                    player_controller_system,
                    integrate_velocity_system,
                )
                    .chain(),
            );
    }
}

/// Spawns the avatar and its selector.
///
/// The avatar starts roaming, idle and facing down at the world `position`
/// with depth zero. Its collision body is derived from `sprite_size`. Returns the avatar
/// entity; the selector is reachable through [`Player::selector`].
pub fn spawn_player(commands: &mut Commands, position: Vec2, sprite_size: Vec2) -> Entity {
    let selector = commands
        .spawn((PlayerSelector::default(), Transform::default()))
        .id();
    commands
        .spawn((
            Player { selector },
            PlayerMode::Roaming,
            AnimationKey::new(Facing::Down, Motion::Idle),
            Velocity::default(),
            Collider::for_sprite(sprite_size),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

/// Spawns a seat facing `category` at the world `position` with an empty
/// prompt. `depth` becomes the seat's `z`.
pub fn spawn_seat(commands: &mut Commands, position: Vec2, depth: f32, category: Facing) -> Entity {
    commands
        .spawn((
            Interactable { category },
            Prompt::default(),
            Transform::from_translation(position.extend(depth)),
        ))
        .id()
}

type SeatQuery<'w, 's> = Query<
    'w,
    's,
    (Entity, &'static Interactable, &'static Transform, &'static mut Prompt),
    (Without<Player>, Without<PlayerSelector>),
>;

/// Moves each roaming avatar's selector in front of it and picks the nearest
/// seat within reach.
///
/// A newly selected seat shows the sit prompt and a deselected one is cleared.
/// Selection is frozen while the avatar is seated so the occupied seat keeps
/// its stand-up prompt.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn select_interactable_system(
    settings: Res<ControllerSettings>,
    players: Query<(&Player, &PlayerMode, &AnimationKey, &Transform)>,
    mut selectors: Query<(&mut PlayerSelector, &mut Transform), Without<Player>>,
    mut seats: SeatQuery<'_, '_>,
) {
    for (player, mode, animation, body) in &players {
        if *mode == PlayerMode::Engaged {
            continue;
        }
        let Ok((mut selector, mut marker)) = selectors.get_mut(player.selector) else {
            continue;
        };

        let origin =
            body.translation.truncate() + mirror_y(animation.facing.unit()) * settings.selector_reach;
        marker.translation.x = origin.x;
        marker.translation.y = origin.y;

        let nearest = seats
            .iter()
            .map(|(entity, _, transform, _)| {
                (entity, transform.translation.truncate().distance(origin))
            })
            .filter(|(_, distance)| *distance <= settings.selection_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity);

        if nearest != selector.selected {
            if let Some(previous) = selector.selected {
                if let Ok((_, _, _, mut prompt)) = seats.get_mut(previous) {
                    prompt.clear();
                }
            }
            debug!("selector moved from {:?} to {nearest:?}", selector.selected);
            selector.selected = nearest;
        }

        if let Some(current) = nearest {
            if let Ok((_, _, _, mut prompt)) = seats.get_mut(current) {
                if prompt.text() != Some(settings.sit_prompt.as_str()) {
                    prompt.show(settings.sit_prompt.clone());
                }
            }
        }
    }
}

/// Applies one frame of keyboard input to every avatar.
///
/// Component data is copied into a [`ControlledEntity`], advanced, and copied
/// back. Sitting down also replaces the seat prompt with the stand-up prompt
/// and parks the selector at the origin.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn player_controller_system(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    settings: Res<ControllerSettings>,
    mut players: Query<
        (&Player, &mut Transform, &mut Velocity, &mut AnimationKey, &mut PlayerMode),
        Without<PlayerSelector>,
    >,
    mut selectors: Query<(&PlayerSelector, &mut Transform), Without<Player>>,
    mut seats: SeatQuery<'_, '_>,
) {
    let Some(keys) = keyboard else {
        return;
    };
    let input = FrameInput::from_keyboard(&keys, settings.interact_key);

    for (player, mut transform, mut velocity, mut animation, mut mode) in &mut players {
        let selected = selectors
            .get(player.selector)
            .ok()
            .and_then(|(selector, _)| selector.selected);
        let seat = selected.and_then(|entity| {
            seats
                .get(entity)
                .ok()
                .map(|(_, interactable, seat_transform, _)| {
                    SeatSnapshot::from_transform(seat_transform, interactable.category)
                })
        });

        let (position, depth) = to_screen(transform.translation);
        let mut state = ControlledEntity {
            position,
            depth,
            velocity: mirror_y(velocity.0),
            animation: *animation,
            mode: *mode,
        };
        let transition = state.advance(input, seat.as_ref(), settings.speed);

        transform.translation = to_world(state.position, state.depth);
        velocity.set_if_neq(Velocity(mirror_y(state.velocity)));
        animation.set_if_neq(state.animation);
        mode.set_if_neq(state.mode);

        if transition == Transition::Engaged {
            if let Some(entity) = selected {
                if let Ok((_, _, _, mut prompt)) = seats.get_mut(entity) {
                    prompt.clear();
                    prompt.show(settings.stand_prompt.clone());
                }
            }
            if let Ok((_, mut marker)) = selectors.get_mut(player.selector) {
                marker.translation.x = 0.0;
                marker.translation.y = 0.0;
            }
        }
    }
}

/// Moves entities by their velocity scaled by the frame time.
///
/// The frame time is clamped to [`ControllerSettings::max_delta_seconds`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn integrate_velocity_system(
    time: Res<Time>,
    settings: Res<ControllerSettings>,
    mut bodies: Query<(&Velocity, &mut Transform)>,
) {
    // A non-positive limit would freeze or reverse motion.
    let limit = settings.max_delta_seconds.max(f32::EPSILON);
    let dt = time.delta_secs().min(limit);
    for (velocity, mut transform) in &mut bodies {
        if velocity.0 == Vec2::ZERO {
            continue;
        }
        transform.translation.x += velocity.x * dt;
        transform.translation.y += velocity.y * dt;
    }
}
