//! Bubble removal.
//!
//! Removing a bubble doesn't despawn it right away: it gets a [`Dying`]
//! component and fades out, then is despawned when the timer runs out.
//! There's no way back from dying.

use std::time::Duration;

use bevy::prelude::*;

use super::{
    FieldSystems,
    bubble::Bubble,
    drag::DragSession,
    sound::{PlaySound, Sound},
};
use crate::{AppSystems, PausableSystems};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Dying>();
    app.add_message::<RemoveBubble>();
    app.add_message::<RemoveAllBubbles>();

    app.add_systems(
        Update,
        (
            tick_dying
                .in_set(AppSystems::TickTimers)
                .in_set(PausableSystems),
            mark_dying
                .in_set(FieldSystems::Remove)
                .in_set(PausableSystems),
        ),
    );
}

/// How long a bubble takes to pop.
pub const DEATH_DURATION: Duration = Duration::from_millis(1000);

/// A bubble on its way out. The entity is despawned when the timer finishes;
/// removing this component would cancel that.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Dying {
    pub timer: Timer,
}

impl Default for Dying {
    fn default() -> Self {
        Self {
            timer: Timer::new(DEATH_DURATION, TimerMode::Once),
        }
    }
}

impl Dying {
    /// 0.0 when removal starts, 1.0 when the bubble is gone.
    pub fn progress(&self) -> f32 {
        self.timer.fraction()
    }
}

/// Pop one bubble (double-click).
#[derive(Message, Debug, Clone, Copy)]
pub struct RemoveBubble(pub Entity);

/// Pop every bubble (the clear-all control).
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RemoveAllBubbles;

fn mark_dying(
    mut commands: Commands,
    mut single: MessageReader<RemoveBubble>,
    mut all: MessageReader<RemoveAllBubbles>,
    bubbles: Query<(Entity, Has<Dying>), With<Bubble>>,
    mut sounds: MessageWriter<PlaySound>,
) {
    let mut rng = rand::rng();
    // Inserts are deferred, so track what this run already marked.
    let mut marked = Vec::new();

    for RemoveBubble(target) in single.read() {
        let Ok((entity, dying)) = bubbles.get(*target) else {
            continue;
        };
        if dying || marked.contains(&entity) {
            continue;
        }

        commands.entity(entity).insert(Dying::default());
        marked.push(entity);
        sounds.write(PlaySound(Sound::random_pop(&mut rng)));
    }

    for _ in all.read() {
        let mut count = 0;
        for (entity, dying) in &bubbles {
            if dying || marked.contains(&entity) {
                continue;
            }
            commands.entity(entity).insert(Dying::default());
            marked.push(entity);
            count += 1;
        }

        // One sound for the whole field, however many bubbles there were.
        sounds.write(PlaySound(Sound::ClearAll));
        info!("Clearing the field: {} bubbles popping", count);
    }
}

fn tick_dying(
    mut commands: Commands,
    time: Res<Time>,
    mut dying: Query<(Entity, &mut Dying)>,
    mut session: ResMut<DragSession>,
) {
    for (entity, mut dying) in &mut dying {
        dying.timer.tick(time.delta());
        if !dying.timer.just_finished() {
            continue;
        }

        if session.is_dragging(entity) {
            session.end();
        }
        commands.entity(entity).despawn();
    }
}
