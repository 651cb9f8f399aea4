//! Sounds the field makes.
//!
//! Field systems never touch audio directly. They write [`PlaySound`]
//! messages and [`play_sounds`] turns those into audio entities, so the
//! field runs the same with or without an audio backend.

use bevy::prelude::*;
use rand::{Rng, seq::IndexedRandom};

use super::drag::PointerMoved;
use crate::{
    AppSystems,
    audio::{Music, music, sound_effect},
};

pub(super) fn plugin(app: &mut App) {
    app.add_message::<PlaySound>();
    app.init_resource::<AmbienceState>();

    app.add_systems(Startup, load_sound_assets);
    app.add_systems(
        Update,
        (
            start_ambience.in_set(AppSystems::Update),
            play_sounds.after(AppSystems::Update),
        ),
    );
}

/// Volume for every one-shot effect.
pub const SFX_VOLUME: f32 = 0.3;

/// Every sound the field can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Ambience,
    PopG,
    PopC,
    ClearAll,
    Creation1,
    Creation2,
    Creation3,
    Select,
}

impl Sound {
    pub const POPS: [Sound; 2] = [Sound::PopG, Sound::PopC];
    pub const CREATIONS: [Sound; 3] = [Sound::Creation1, Sound::Creation2, Sound::Creation3];

    /// One of the two pop variants.
    pub fn random_pop(rng: &mut impl Rng) -> Self {
        *Self::POPS.choose(rng).unwrap_or(&Sound::PopG)
    }

    /// One of the three creation chimes.
    pub fn random_creation(rng: &mut impl Rng) -> Self {
        *Self::CREATIONS.choose(rng).unwrap_or(&Sound::Creation1)
    }

    pub fn path(self) -> &'static str {
        match self {
            Sound::Ambience => "audio/ambience.ogg",
            Sound::PopG => "audio/pop-g.ogg",
            Sound::PopC => "audio/pop-c.ogg",
            Sound::ClearAll => "audio/clear-all.ogg",
            Sound::Creation1 => "audio/creation-1.ogg",
            Sound::Creation2 => "audio/creation-2.ogg",
            Sound::Creation3 => "audio/creation-3.ogg",
            Sound::Select => "audio/select.ogg",
        }
    }

    pub fn is_looping(self) -> bool {
        matches!(self, Sound::Ambience)
    }
}

/// Ask for a sound to be played. Fire-and-forget.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaySound(pub Sound);

/// Audio handles for every [`Sound`].
#[derive(Resource)]
pub struct SoundAssets {
    ambience: Handle<AudioSource>,
    pop_g: Handle<AudioSource>,
    pop_c: Handle<AudioSource>,
    clear_all: Handle<AudioSource>,
    creation_1: Handle<AudioSource>,
    creation_2: Handle<AudioSource>,
    creation_3: Handle<AudioSource>,
    select: Handle<AudioSource>,
}

impl SoundAssets {
    fn handle(&self, sound: Sound) -> Handle<AudioSource> {
        match sound {
            Sound::Ambience => self.ambience.clone(),
            Sound::PopG => self.pop_g.clone(),
            Sound::PopC => self.pop_c.clone(),
            Sound::ClearAll => self.clear_all.clone(),
            Sound::Creation1 => self.creation_1.clone(),
            Sound::Creation2 => self.creation_2.clone(),
            Sound::Creation3 => self.creation_3.clone(),
            Sound::Select => self.select.clone(),
        }
    }
}

/// Whether the ambience loop has been started.
#[derive(Resource, Debug, Default)]
pub struct AmbienceState {
    pub started: bool,
}

/// Start loading every sound. A missing file only shows up as an asset
/// error in the log; playing it later is a silent no-op.
fn load_sound_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(SoundAssets {
        ambience: asset_server.load(Sound::Ambience.path()),
        pop_g: asset_server.load(Sound::PopG.path()),
        pop_c: asset_server.load(Sound::PopC.path()),
        clear_all: asset_server.load(Sound::ClearAll.path()),
        creation_1: asset_server.load(Sound::Creation1.path()),
        creation_2: asset_server.load(Sound::Creation2.path()),
        creation_3: asset_server.load(Sound::Creation3.path()),
        select: asset_server.load(Sound::Select.path()),
    });
}

/// The ambience loop starts on the first pointer movement anywhere.
pub(super) fn start_ambience(
    mut moves: MessageReader<PointerMoved>,
    mut ambience: ResMut<AmbienceState>,
    mut sounds: MessageWriter<PlaySound>,
) {
    if moves.is_empty() {
        return;
    }
    moves.clear();

    if ambience.started {
        return;
    }
    ambience.started = true;
    sounds.write(PlaySound(Sound::Ambience));
    info!("Pointer moved, starting ambience");
}

fn play_sounds(
    mut commands: Commands,
    mut requests: MessageReader<PlaySound>,
    assets: Option<Res<SoundAssets>>,
    music_query: Query<(), With<Music>>,
) {
    let Some(assets) = assets else {
        requests.clear();
        return;
    };

    for PlaySound(sound) in requests.read() {
        let handle = assets.handle(*sound);
        if sound.is_looping() {
            if !music_query.is_empty() {
                continue;
            }
            commands.spawn((Name::new("Ambience"), music(handle)));
        } else {
            commands.spawn((
                Name::new(format!("{:?} Sound", sound)),
                sound_effect(handle, SFX_VOLUME),
            ));
        }
    }
}
