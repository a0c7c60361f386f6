//! Headless office scene for controller behavioural tests.
//!
//! The scene holds one avatar at world `(100, 100)` facing down and one seat
//! facing down just below it on screen, inside the selector's reach. `reset`
//! rebuilds the app from scratch so every rspec example starts from the same
//! state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use mece::animation::{AnimationKey, Facing};
use mece::components::{Interactable, Player, PlayerMode, PlayerSelector, Prompt, Velocity};
use mece::player::{spawn_player, spawn_seat, PlayerControllerPlugin};

/// Simulated frame length.
pub const FRAME: Duration = Duration::from_millis(100);
/// Where the avatar spawns.
pub const AVATAR_START: Vec2 = Vec2::new(100.0, 100.0);
/// Where the seat sits: one selector reach below the avatar on screen.
pub const SEAT_POSITION: Vec2 = Vec2::new(100.0, 84.0);
/// Render depth of the seat.
pub const SEAT_DEPTH: f32 = -84.0;
/// Sprite size used for the avatar's collider.
pub const SPRITE_SIZE: Vec2 = Vec2::new(32.0, 48.0);

/// Snapshot of the avatar's components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarView {
    /// `Transform` translation (x, y, depth).
    pub translation: Vec3,
    /// Current velocity.
    pub velocity: Vec2,
    /// Current clip.
    pub animation: AnimationKey,
    /// Current mode.
    pub mode: PlayerMode,
}

/// The office `App`, owned by the fixture's mutex.
#[derive(Debug)]
pub struct OfficeApp(App);

// SAFETY: rspec needs `Send + Sync` fixtures. The app is only reached through
// `OfficeFixture::lock`, and `run_scenarios` drives examples on one thread.
unsafe impl Send for OfficeApp {}
unsafe impl Sync for OfficeApp {}

/// Shared fixture wrapping a headless app.
#[derive(Debug, Clone)]
pub struct OfficeFixture {
    app: Arc<Mutex<OfficeApp>>,
    with_keyboard: bool,
}

fn build_app(with_keyboard: bool) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    if with_keyboard {
        app.init_resource::<ButtonInput<KeyCode>>();
    }
    app.add_plugins(PlayerControllerPlugin);

    let world = app.world_mut();
    {
        let mut commands = world.commands();
        spawn_player(&mut commands, AVATAR_START, SPRITE_SIZE);
        spawn_seat(&mut commands, SEAT_POSITION, SEAT_DEPTH, Facing::Down);
    }
    world.flush();

    app.finish();
    app.cleanup();
    app
}

impl OfficeFixture {
    /// Office scene with a keyboard resource.
    pub fn bootstrap() -> Self {
        Self::build(true)
    }

    /// Office scene without any `ButtonInput<KeyCode>` resource.
    pub fn without_keyboard() -> Self {
        Self::build(false)
    }

    fn build(with_keyboard: bool) -> Self {
        Self {
            app: Arc::new(Mutex::new(OfficeApp(build_app(with_keyboard)))),
            with_keyboard,
        }
    }

    /// Locks the app, recovering it if an earlier example panicked mid-frame.
    fn lock(&self) -> MutexGuard<'_, OfficeApp> {
        self.app.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn world_mut<'a>(guard: &'a mut MutexGuard<'_, OfficeApp>) -> &'a mut World {
        guard.0.world_mut()
    }

    /// Throws the current app away and rebuilds the initial scene.
    pub fn reset(&self) {
        *self.lock() = OfficeApp(build_app(self.with_keyboard));
    }

    /// Runs one frame, then expires this frame's key edges.
    pub fn tick(&self) {
        let mut guard = self.lock();
        guard.0.update();
        if let Some(mut keyboard) = Self::world_mut(&mut guard).get_resource_mut::<ButtonInput<KeyCode>>() {
            keyboard.clear();
        }
    }

    /// Starts holding `key`; it registers as just pressed on the next tick.
    pub fn press(&self, key: KeyCode) {
        let mut guard = self.lock();
        Self::world_mut(&mut guard)
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    /// Stops holding `key`.
    pub fn release(&self, key: KeyCode) {
        let mut guard = self.lock();
        Self::world_mut(&mut guard)
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(key);
    }

    /// Presses and releases `key` across one frame.
    pub fn tap(&self, key: KeyCode) {
        self.press(key);
        self.tick();
        self.release(key);
    }

    /// Current avatar state.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one avatar exists.
    pub fn avatar(&self) -> AvatarView {
        let mut guard = self.lock();
        let world = Self::world_mut(&mut guard);
        let mut query =
            world.query_filtered::<(&Transform, &Velocity, &AnimationKey, &PlayerMode), With<Player>>();
        let (transform, velocity, animation, mode) = query
            .single(world)
            .unwrap_or_else(|e| panic!("expected one avatar: {e}"));
        AvatarView {
            translation: transform.translation,
            velocity: velocity.0,
            animation: *animation,
            mode: *mode,
        }
    }

    /// Prompt currently shown on the seat.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one seat exists.
    pub fn seat_prompt(&self) -> Option<String> {
        let mut guard = self.lock();
        let world = Self::world_mut(&mut guard);
        let mut query = world.query_filtered::<&Prompt, With<Interactable>>();
        query
            .single(world)
            .unwrap_or_else(|e| panic!("expected one seat: {e}"))
            .text()
            .map(str::to_owned)
    }

    /// Selector translation and selection.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one selector exists.
    pub fn selector(&self) -> (Vec2, Option<Entity>) {
        let mut guard = self.lock();
        let world = Self::world_mut(&mut guard);
        let mut query = world.query::<(&Transform, &PlayerSelector)>();
        let (transform, selector) = query
            .single(world)
            .unwrap_or_else(|e| panic!("expected one selector: {e}"));
        (transform.translation.truncate(), selector.selected)
    }
}
