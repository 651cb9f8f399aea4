//! Persisted audio preference.
//!
//! The master volume is saved to a small JSON file in the user's data
//! directory. Nothing about the bubble field itself is persisted.

use bevy::{audio::Volume, prelude::*};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<Preferences>();

    app.add_systems(Startup, load_preferences);
    app.add_systems(
        Update,
        save_volume_preference.run_if(resource_changed::<GlobalVolume>),
    );
}

pub const MIN_VOLUME: f32 = 0.0;
pub const MAX_VOLUME: f32 = 3.0;

/// Resource mirroring what's stored on disk.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Linear master volume, 1.0 is unchanged.
    pub volume: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}

impl Preferences {
    /// Clamp a linear volume into the range the settings menu allows.
    pub fn clamp_volume(volume: f32) -> f32 {
        if volume.is_nan() {
            return 1.0;
        }
        volume.clamp(MIN_VOLUME, MAX_VOLUME)
    }

    fn file_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("poetry_bubbles").join("preferences.json"))
    }

    /// Parse preferences from JSON, sanitizing the volume.
    fn from_json(contents: &str) -> serde_json::Result<Self> {
        let mut prefs: Self = serde_json::from_str(contents)?;
        prefs.volume = Self::clamp_volume(prefs.volume);
        Ok(prefs)
    }

    /// Load preferences from disk, falling back to defaults on any failure.
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            warn!("Could not determine data directory for preferences");
            return Self::default();
        };

        if !path.exists() {
            info!("No preferences file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(prefs) => {
                    info!("Loaded preferences from {:?}", path);
                    prefs
                }
                Err(e) => {
                    warn!("Failed to parse preferences: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read preferences file: {}", e);
                Self::default()
            }
        }
    }

    /// Save preferences to disk.
    pub fn save(&self) {
        let Some(path) = Self::file_path() else {
            debug!("No data directory, preferences not saved");
            return;
        };

        if let Some(parent) = path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warn!("Failed to create preferences directory: {}", e);
            return;
        }

        match serde_json::to_string_pretty(self) {
            Ok(json) => match fs::write(&path, json) {
                Ok(()) => debug!("Saved preferences to {:?}", path),
                Err(e) => warn!("Failed to write preferences: {}", e),
            },
            Err(e) => warn!("Failed to serialize preferences: {}", e),
        }
    }
}

fn load_preferences(mut prefs: ResMut<Preferences>, mut global_volume: ResMut<GlobalVolume>) {
    *prefs = Preferences::load();
    global_volume.volume = Volume::Linear(prefs.volume);
}

/// Keep the stored volume in sync with the settings menu.
fn save_volume_preference(global_volume: Res<GlobalVolume>, mut prefs: ResMut<Preferences>) {
    let volume = Preferences::clamp_volume(global_volume.volume.to_linear());
    if (prefs.volume - volume).abs() < f32::EPSILON {
        return;
    }
    prefs.volume = volume;
    prefs.save();
}
