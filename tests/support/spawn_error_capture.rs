//! Shared helpers for observing `SpawnError` events in tests.

use bevy::prelude::*;
use bevy_ecs::prelude::On;
use tap_spawn::SpawnError;

/// Spawn errors captured in trigger order.
#[derive(Resource, Default, Debug)]
pub struct CapturedErrors(pub Vec<SpawnError>);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_error(event: On<SpawnError>, mut errors: ResMut<CapturedErrors>) {
    errors.0.push(*event.event());
}

/// Installs the error-capturing observer and resource on the provided app.
pub fn install_error_observer(app: &mut App) {
    app.insert_resource(CapturedErrors::default());
    app.world_mut().add_observer(record_error);
}

/// Errors captured so far.
pub fn captured(app: &App) -> Vec<SpawnError> {
    app.world()
        .get_resource::<CapturedErrors>()
        .map(|errors| errors.0.clone())
        .unwrap_or_default()
}
