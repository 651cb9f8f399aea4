//! Debug visualization for the field.
//!
//! Toggle with the 'D' key.
//! Shows:
//! - The box new bubbles spawn in
//! - The origin of every bubble (red if it spawned outside the box)
//! - The grab offset of the bubble being dragged

use bevy::{color::palettes::css, input::common_conditions::input_just_pressed, prelude::*};

use super::{
    bubble::{
        Bubble, FieldPosition, FieldViewport, LEFT_SPAWN_BOUND, SPAWN_BOX_HEIGHT, SPAWN_BOX_WIDTH,
        TOP_SPAWN_BOUND, in_spawn_bounds,
    },
    drag::DragSession,
};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<DebugFieldVisible>();

    app.add_systems(
        Update,
        (
            toggle_debug.run_if(input_just_pressed(KeyCode::KeyD)),
            draw_debug_field.run_if(debug_visible),
        ),
    );
}

/// Resource to track if debug visualization is visible.
#[derive(Resource, Default)]
pub struct DebugFieldVisible(pub bool);

fn debug_visible(debug: Res<DebugFieldVisible>) -> bool {
    debug.0
}

fn toggle_debug(mut debug: ResMut<DebugFieldVisible>) {
    debug.0 = !debug.0;
    let state = if debug.0 { "ON" } else { "OFF" };
    info!("Debug field: {}", state);
}

/// Window pixels (origin top-left, y down) to world space for the default
/// 2D camera (origin centered, y up).
fn to_world(px: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(px.x - viewport.x / 2.0, viewport.y / 2.0 - px.y)
}

fn draw_debug_field(
    mut gizmos: Gizmos,
    viewport: Res<FieldViewport>,
    session: Res<DragSession>,
    bubbles: Query<(Entity, &FieldPosition), With<Bubble>>,
) {
    let viewport = viewport.0;

    // Spawn box
    let min = Vec2::new(LEFT_SPAWN_BOUND as f32, TOP_SPAWN_BOUND as f32) / 100.0 * viewport;
    let size = Vec2::new(SPAWN_BOX_WIDTH as f32, SPAWN_BOX_HEIGHT as f32) / 100.0 * viewport;
    gizmos.rect_2d(
        Isometry2d::from_translation(to_world(min + size / 2.0, viewport)),
        size,
        css::AQUA.with_alpha(0.6),
    );

    for (entity, position) in &bubbles {
        let origin = to_world(position.origin(viewport), viewport);
        let color = match position {
            FieldPosition::Percent(p) if in_spawn_bounds(*p) => css::LIMEGREEN,
            FieldPosition::Percent(_) => css::RED,
            FieldPosition::Px(_) => css::GOLD,
        };
        gizmos.circle_2d(Isometry2d::from_translation(origin), 4.0, color);

        // Line from the bubble origin to where it was grabbed
        if let Some(drag) = session.active()
            && drag.bubble == entity
        {
            let grab = to_world(position.origin(viewport) + drag.offset, viewport);
            gizmos.line_2d(origin, grab, css::INDIAN_RED);
        }
    }
}
