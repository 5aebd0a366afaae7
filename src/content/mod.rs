//! Content domain: data-driven tuning loaded from RON files.

mod loader;

pub use loader::{ContentLoadError, load_movement_tuning, parse_movement_tuning};

use bevy::prelude::*;
use std::path::PathBuf;

use crate::movement::MovementTuning;

/// Where the movement tuning file lives.
#[derive(Resource, Debug, Clone)]
pub struct TuningSource {
    pub path: PathBuf,
}

impl Default for TuningSource {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/data/movement_tuning.ron"),
        }
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TuningSource>()
            .init_resource::<MovementTuning>()
            .add_systems(PreStartup, load_tuning_at_startup);
    }
}

fn load_tuning_at_startup(source: Res<TuningSource>, mut tuning: ResMut<MovementTuning>) {
    reload_tuning(&source, &mut tuning);
}

/// Replace `tuning` with the file contents. On failure the current tuning
/// is kept and the error is logged.
pub fn reload_tuning(source: &TuningSource, tuning: &mut MovementTuning) -> bool {
    match load_movement_tuning(&source.path) {
        Ok(loaded) => {
            info!("Loaded movement tuning from {}", source.path.display());
            *tuning = loaded;
            true
        }
        Err(e) => {
            error!("{}", e);
            warn!("Keeping current movement tuning");
            false
        }
    }
}
