#![cfg_attr(docsrs, feature(doc_cfg))]
//! Tap-to-spawn behaviour for AR scenes hosted on the Bevy ECS.
//!
//! A [`TapSpawner`] clones a hidden template entity wherever the user taps,
//! gives the clone a random uniform entry scale and a short grow-in
//! animation, and ignores repeat taps inside a cooldown window. Add
//! [`TapSpawnPlugin`] and send [`TouchStart`] messages from the host's
//! hit-testing systems.
pub mod attributes;
pub mod clock;
pub mod cloner;
pub mod controller;
pub mod error;
pub mod logging;
pub mod plugin;
pub mod presentation;
pub mod settings;

pub use clock::{ManualClock, SpawnClock, SystemClock, TimeSource};
pub use cloner::{clone_attributes, CloneKind, CloneRegistry};
pub use controller::{
    arm_spawners_system, entry_scale, handle_touch, tap_spawn_system, SpawnRng, SpawnedFrom,
    SpawnerPhase, TapSpawnState, TapSpawner, TouchOutcome, TouchStart,
};
pub use error::SpawnError;
pub use logging::init as init_logging;
pub use plugin::{TapSpawnPlugin, TapSpawnSystems};
pub use presentation::sync_transforms_system;
pub use settings::SpawnSettings;

pub mod prelude {
    //! Common imports for hosts wiring tap spawning into an app.
    //!
    //! ```rust,no_run
    //! use tap_spawn::prelude::*;
    //! ```

    pub use crate::attributes::*;
    pub use crate::SpawnSettings;
    pub use crate::TapSpawnPlugin;
    pub use crate::TapSpawner;
    pub use crate::TouchStart;
}
