//! One tap spawn test app shared by every closure of an rspec scenario.
//!
//! rspec hands each `before_each`/`then` block a clone of the scenario
//! fixture and insists that the fixture is `Clone + Send + Sync`. Bevy's
//! `App` is neither, so the app sits behind a mutex and is only reached
//! through [`SharedApp::with`].

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use test_utils::TapSpawnTestApp;

struct Cell(TapSpawnTestApp);

// SAFETY: the app never leaves the mutex and scenarios run on a single
// runner thread (see `serial_suite`), so the non-`Send` parts of the app
// (its runner closure and non-send resources) are only touched from the
// thread that created them.
unsafe impl Send for Cell {}

/// Cloneable handle to a mutex-guarded [`TapSpawnTestApp`].
#[derive(Clone)]
pub struct SharedApp(Arc<Mutex<Cell>>);

impl SharedApp {
    /// Wraps `app` for sharing across scenario blocks.
    pub fn new(app: TapSpawnTestApp) -> Self {
        Self(Arc::new(Mutex::new(Cell(app))))
    }

    /// Runs `f` with exclusive access to the app.
    ///
    /// A panic in an earlier assertion poisons the mutex; later blocks
    /// still get the app so they can report their own failures.
    pub fn with<R>(&self, f: impl FnOnce(&mut TapSpawnTestApp) -> R) -> R {
        let mut cell = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cell.0)
    }

    /// Swaps in a fresh app, dropping the previous scenario's world.
    pub fn replace(&self, app: TapSpawnTestApp) {
        self.with(|current| *current = app);
    }
}

impl fmt::Debug for SharedApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedApp").finish_non_exhaustive()
    }
}
