//! The row of controls at the top of the window.

use bevy::prelude::*;

use super::{bubble::CreateBubble, lifecycle::RemoveAllBubbles};
use crate::{menus::Menu, theme::widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_toolbar);
}

fn spawn_toolbar(mut commands: Commands) {
    commands.spawn((
        Name::new("Toolbar"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            column_gap: Val::Px(12.0),
            ..default()
        },
        // Keep the controls above any bubble dragged over them.
        GlobalZIndex(1),
        Pickable::IGNORE,
        children![
            widget::button_small("Add word", add_word::<Pointer<Click>>),
            widget::button_small("Clear all", clear_all::<Pointer<Click>>),
            widget::button_small("Settings", open_settings),
        ],
    ));
}

fn add_word<E: EntityEvent>(_: On<E>, mut create: MessageWriter<CreateBubble>) {
    create.write(CreateBubble::random());
}

fn clear_all<E: EntityEvent>(_: On<E>, mut clear: MessageWriter<RemoveAllBubbles>) {
    clear.write(RemoveAllBubbles);
}

fn open_settings(_: On<Pointer<Click>>, mut next_menu: ResMut<NextState<Menu>>) {
    next_menu.set(Menu::Settings);
}
