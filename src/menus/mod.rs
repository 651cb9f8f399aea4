//! Overlay menus and transitions between them.

mod settings;

use bevy::{input::common_conditions::input_just_pressed, prelude::*};

use crate::Pause;

pub(super) fn plugin(app: &mut App) {
    app.init_state::<Menu>();

    app.add_plugins(settings::plugin);

    // The field stands still while a menu is open.
    app.add_systems(OnEnter(Menu::Settings), pause);
    app.add_systems(OnExit(Menu::Settings), unpause);

    app.add_systems(
        Update,
        toggle_settings.run_if(input_just_pressed(KeyCode::Escape)),
    );
}

#[derive(States, Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Menu {
    #[default]
    None,
    Settings,
}

fn pause(mut next_pause: ResMut<NextState<Pause>>) {
    next_pause.set(Pause(true));
}

fn unpause(mut next_pause: ResMut<NextState<Pause>>) {
    next_pause.set(Pause(false));
}

fn toggle_settings(menu: Res<State<Menu>>, mut next_menu: ResMut<NextState<Menu>>) {
    next_menu.set(match menu.get() {
        Menu::None => Menu::Settings,
        Menu::Settings => Menu::None,
    });
}
