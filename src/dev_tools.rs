//! Development tools for the app. This plugin is only enabled in dev builds.

use bevy::{
    dev_tools::states::log_transitions, input::common_conditions::input_just_pressed, prelude::*,
    ui_render::UiDebugOptions,
};

use crate::{Pause, menus::Menu};

pub(super) fn plugin(app: &mut App) {
    // Log `Menu` and `Pause` state transitions.
    app.add_systems(Update, (log_transitions::<Menu>, log_transitions::<Pause>));

    // Toggle the debug overlay for UI.
    app.add_systems(
        Update,
        toggle_debug_ui.run_if(input_just_pressed(TOGGLE_KEY)),
    );
}

const TOGGLE_KEY: KeyCode = KeyCode::Backquote;

fn toggle_debug_ui(mut options: ResMut<UiDebugOptions>) {
    options.toggle();
}
