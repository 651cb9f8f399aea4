//! The bubble field.
//!
//! Everything that happens to bubbles goes through messages:
//! - [`bubble::CreateBubble`] spawns one
//! - [`drag::StartDrag`], [`drag::PointerMoved`] and [`drag::EndDrag`] move one
//! - [`lifecycle::RemoveBubble`] and [`lifecycle::RemoveAllBubbles`] pop them
//!
//! The `input` and `toolbar` modules produce those messages from the
//! pointer, keyboard and buttons.

mod bubble;
mod debug;
mod drag;
mod input;
mod lifecycle;
mod polish;
mod sound;
mod toolbar;
mod words;

use bevy::prelude::*;

use crate::AppSystems;
use bubble::CreateBubble;

pub(super) fn plugin(app: &mut App) {
    configure_sets(app);

    app.add_plugins((
        bubble::plugin,
        drag::plugin,
        lifecycle::plugin,
        sound::plugin,
        input::plugin,
        toolbar::plugin,
        polish::plugin,
        debug::plugin,
    ));

    app.add_systems(Startup, seed_field);
}

/// Order in which the field handles a frame's messages.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum FieldSystems {
    Create,
    Drag,
    Remove,
}

fn configure_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (FieldSystems::Create, FieldSystems::Drag, FieldSystems::Remove)
            .chain()
            .in_set(AppSystems::Update),
    );
}

/// Bubbles waiting on the field when the app opens.
const SEED_TEXTS: [&str; 3] = ["Relax\n&\nEnjoy!", "(There's\nmusic!)", "Drag\nme!"];

fn seed_field(mut create: MessageWriter<CreateBubble>) {
    for text in SEED_TEXTS {
        create.write(CreateBubble::with_text(text));
    }
    info!("Seeded field with {} bubbles", SEED_TEXTS.len());
}
