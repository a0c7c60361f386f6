#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate for the Mece virtual office.
//! Provides the Bevy avatar controller used by the client and the room
//! server run by the `mece` binary.
pub mod animation;
pub mod components;
pub mod constants;
pub mod controller;
pub mod error;
pub mod logging;
pub mod player;
pub mod screen;
pub mod seat;
pub mod server;

// Re-export commonly used items
pub use constants::*;
pub use animation::{AnimationKey, Facing, Motion, ParseAnimationError};
pub use components::{Collider, Interactable, Player, PlayerMode, PlayerSelector, Prompt, Velocity};
pub use controller::{ControlledEntity, FrameInput, SeatSnapshot, Transition};
pub use error::ServerError;
pub use logging::init as init_logging;
pub use player::{
    integrate_velocity_system, player_controller_system, select_interactable_system, spawn_player,
    spawn_seat, ControllerSettings, PlayerControllerPlugin,
};
pub use seat::{sitting_shift, SittingShift};
pub use server::{GameServer, MeceRoom, Room, ServerConfig};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use mece::prelude::*;
    //! ```

    pub use crate::animation::{AnimationKey, Facing, Motion};
    pub use crate::components::{Interactable, Player, PlayerMode, Prompt, Velocity};
    pub use crate::controller::{ControlledEntity, FrameInput};
    pub use crate::player::{spawn_player, spawn_seat, ControllerSettings, PlayerControllerPlugin};
}
