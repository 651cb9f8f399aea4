//! The settings menu.
//!
//! Additional settings and accessibility options should go here.

use bevy::{audio::Volume, prelude::*};

use crate::{
    menus::Menu,
    preferences::{MAX_VOLUME, MIN_VOLUME},
    theme::{
        palette::{LABEL_TEXT, OVERLAY_BACKGROUND},
        widget,
    },
};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<GlobalVolumeLabel>();

    app.add_systems(OnEnter(Menu::Settings), spawn_settings_menu);
    app.add_systems(
        Update,
        update_global_volume_label.run_if(in_state(Menu::Settings)),
    );
}

fn spawn_settings_menu(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("Settings Menu"),
        BackgroundColor(OVERLAY_BACKGROUND),
        GlobalZIndex(2),
        DespawnOnExit(Menu::Settings),
        children![
            widget::header("Settings"),
            (
                Name::new("Volume Row"),
                Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(15.0),
                    ..default()
                },
                children![
                    widget::label("Volume"),
                    widget::button_square("-", lower_global_volume),
                    (
                        Name::new("Volume Value"),
                        Text::new("100%"),
                        TextFont::from_font_size(24.0),
                        TextColor(LABEL_TEXT),
                        GlobalVolumeLabel,
                        Node {
                            width: Val::Px(70.0),
                            justify_content: JustifyContent::Center,
                            ..default()
                        },
                    ),
                    widget::button_square("+", raise_global_volume),
                ],
            ),
            widget::button("Back", go_back_on_click),
        ],
    ));
}

const VOLUME_STEP: f32 = 0.1;

fn step_volume(current: f32, step: f32) -> f32 {
    (current + step).clamp(MIN_VOLUME, MAX_VOLUME)
}

fn lower_global_volume(_: On<Pointer<Click>>, mut global_volume: ResMut<GlobalVolume>) {
    let linear = step_volume(global_volume.volume.to_linear(), -VOLUME_STEP);
    global_volume.volume = Volume::Linear(linear);
}

fn raise_global_volume(_: On<Pointer<Click>>, mut global_volume: ResMut<GlobalVolume>) {
    let linear = step_volume(global_volume.volume.to_linear(), VOLUME_STEP);
    global_volume.volume = Volume::Linear(linear);
}

#[derive(Component, Reflect)]
#[reflect(Component)]
struct GlobalVolumeLabel;

fn update_global_volume_label(
    global_volume: Res<GlobalVolume>,
    mut label: Single<&mut Text, With<GlobalVolumeLabel>>,
) {
    let percent = 100.0 * global_volume.volume.to_linear();
    label.0 = format!("{percent:3.0}%");
}

fn go_back_on_click(_: On<Pointer<Click>>, mut next_menu: ResMut<NextState<Menu>>) {
    next_menu.set(Menu::None);
}
