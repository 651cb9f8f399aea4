//! Visual feedback - grabbed highlight and the fade-out of dying bubbles.

use bevy::prelude::*;

use super::{FieldSystems, bubble::Bubble, drag::DragSession, lifecycle::Dying};
use crate::theme::palette::*;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            highlight_grabbed.run_if(resource_changed::<DragSession>),
            fade_dying,
        )
            .after(FieldSystems::Remove),
    );
}

/// Outline the bubble that's following the pointer.
fn highlight_grabbed(
    session: Res<DragSession>,
    mut bubbles: Query<(Entity, &mut Outline), (With<Bubble>, Without<Dying>)>,
) {
    for (entity, mut outline) in &mut bubbles {
        outline.color = if session.is_dragging(entity) {
            BUBBLE_GRABBED_OUTLINE
        } else {
            BUBBLE_OUTLINE
        };
    }
}

/// Fade the whole bubble out over its death duration.
fn fade_dying(
    mut bubbles: Query<(&Dying, &mut BackgroundColor, &mut Outline, &Children)>,
    mut texts: Query<&mut TextColor>,
) {
    for (dying, mut background, mut outline, children) in &mut bubbles {
        let remaining = 1.0 - dying.progress();

        background.0 = BUBBLE_BACKGROUND.with_alpha(BUBBLE_BACKGROUND.alpha() * remaining);
        outline.color = BUBBLE_OUTLINE.with_alpha(remaining);
        for child in children.iter() {
            if let Ok(mut text) = texts.get_mut(child) {
                text.0 = BUBBLE_TEXT.with_alpha(remaining);
            }
        }
    }
}
