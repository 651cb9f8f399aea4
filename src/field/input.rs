//! Turns raw pointer, touch and keyboard input into field messages.

use std::time::Duration;

use bevy::{
    input::touch::{TouchInput, TouchPhase},
    picking::pointer::PointerButton,
    prelude::*,
    window::{CursorMoved, PrimaryWindow},
};

use super::{
    bubble::{CreateBubble, FieldViewport},
    drag::{EndDrag, PointerMoved, StartDrag},
    lifecycle::{RemoveAllBubbles, RemoveBubble},
};
use crate::{AppSystems, PausableSystems};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<ClickHistory>();

    app.add_systems(
        Update,
        (
            track_viewport,
            forward_pointer_moves,
            end_drag_on_global_release,
            // The field doesn't take new work while settings is open.
            keyboard_shortcuts.in_set(PausableSystems),
        )
            .in_set(AppSystems::RecordInput),
    );
}

/// Two clicks closer together than this count as a double-click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// Two clicks further apart than this (logical px, per axis) don't.
pub const DOUBLE_CLICK_MAX_DISTANCE: f32 = 6.0;

/// The last click on a bubble, for double-click detection.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ClickHistory {
    last: Option<(Duration, Vec2)>,
}

impl ClickHistory {
    /// Record a click at time `now`. Returns true if it completes a
    /// double-click, in which case the history starts over.
    pub fn register(&mut self, now: Duration, position: Vec2) -> bool {
        if let Some((then, last_position)) = self.last
            && now.saturating_sub(then) <= DOUBLE_CLICK_WINDOW
        {
            let delta = (position - last_position).abs();
            if delta.x <= DOUBLE_CLICK_MAX_DISTANCE && delta.y <= DOUBLE_CLICK_MAX_DISTANCE {
                self.last = None;
                return true;
            }
        }

        self.last = Some((now, position));
        false
    }
}

pub(super) fn start_drag_on_press(
    press: On<Pointer<Press>>,
    mut drags: MessageWriter<StartDrag>,
) {
    if press.button != PointerButton::Primary {
        return;
    }
    drags.write(StartDrag {
        bubble: press.entity,
        pointer: press.pointer_location.position,
    });
}

pub(super) fn end_drag_on_release(
    release: On<Pointer<Release>>,
    mut drags: MessageWriter<EndDrag>,
) {
    if release.button == PointerButton::Primary {
        drags.write(EndDrag);
    }
}

pub(super) fn remove_on_double_click(
    click: On<Pointer<Click>>,
    time: Res<Time<Real>>,
    mut histories: Query<&mut ClickHistory>,
    mut removals: MessageWriter<RemoveBubble>,
) {
    if click.button != PointerButton::Primary {
        return;
    }
    let Ok(mut history) = histories.get_mut(click.entity) else {
        return;
    };

    if history.register(time.elapsed(), click.pointer_location.position) {
        removals.write(RemoveBubble(click.entity));
    }
}

fn track_viewport(window: Single<&Window, With<PrimaryWindow>>, mut viewport: ResMut<FieldViewport>) {
    let size = Vec2::new(window.width(), window.height());
    if viewport.0 != size {
        viewport.0 = size;
    }
}

fn forward_pointer_moves(
    mut cursor_moves: MessageReader<CursorMoved>,
    mut touches: MessageReader<TouchInput>,
    mut moves: MessageWriter<PointerMoved>,
    mut drags: MessageWriter<EndDrag>,
) {
    for cursor in cursor_moves.read() {
        moves.write(PointerMoved {
            position: cursor.position,
        });
    }

    for touch in touches.read() {
        match touch.phase {
            TouchPhase::Moved => {
                moves.write(PointerMoved {
                    position: touch.position,
                });
            }
            TouchPhase::Ended | TouchPhase::Canceled => {
                drags.write(EndDrag);
            }
            TouchPhase::Started => {}
        }
    }
}

/// Releasing the button anywhere drops the bubble, even if the pointer
/// outran it.
fn end_drag_on_global_release(
    mouse: Res<ButtonInput<MouseButton>>,
    mut drags: MessageWriter<EndDrag>,
) {
    if mouse.just_released(MouseButton::Left) {
        drags.write(EndDrag);
    }
}

fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut create: MessageWriter<CreateBubble>,
    mut clear: MessageWriter<RemoveAllBubbles>,
) {
    if keys.just_pressed(KeyCode::Space) {
        create.write(CreateBubble::random());
    }
    if keys.just_pressed(KeyCode::Delete) {
        clear.write(RemoveAllBubbles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{
        bubble::{Bubble, FieldPosition},
        drag::DragSession,
        lifecycle::Dying,
        test_support::{bubbles, set_paused, test_app},
        words::WORDS,
    };

    const AT: Vec2 = Vec2::new(100.0, 100.0);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_single_click_is_not_a_double_click() {
        let mut history = ClickHistory::default();
        assert!(!history.register(ms(1000), AT));
    }

    #[test]
    fn test_quick_second_click_is_a_double_click() {
        let mut history = ClickHistory::default();
        history.register(ms(1000), AT);
        assert!(history.register(ms(1300), AT + Vec2::new(2.0, -3.0)));
    }

    #[test]
    fn test_slow_second_click_starts_over() {
        let mut history = ClickHistory::default();
        history.register(ms(1000), AT);
        assert!(!history.register(ms(1600), AT));
        // ...but that slow click can begin a new double-click.
        assert!(history.register(ms(1800), AT));
    }

    #[test]
    fn test_distant_second_click_is_not_a_double_click() {
        let mut history = ClickHistory::default();
        history.register(ms(1000), AT);
        assert!(!history.register(ms(1100), AT + Vec2::new(40.0, 0.0)));
    }

    #[test]
    fn test_triple_click_is_one_double_click() {
        let mut history = ClickHistory::default();
        history.register(ms(1000), AT);
        assert!(history.register(ms(1100), AT));
        assert!(!history.register(ms(1200), AT));
    }

    /// A field app that also reads the mouse, keyboard and touch.
    fn input_app() -> App {
        let mut app = test_app();
        app.init_resource::<ButtonInput<MouseButton>>();
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_message::<CursorMoved>();
        app.add_message::<TouchInput>();
        app.add_systems(
            Update,
            (
                forward_pointer_moves,
                end_drag_on_global_release,
                keyboard_shortcuts.in_set(PausableSystems),
            )
                .in_set(AppSystems::RecordInput),
        );
        app
    }

    fn tap_key(app: &mut App, key: KeyCode) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
        app.update();
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release(key);
        keys.clear();
    }

    fn touch(phase: TouchPhase, position: Vec2) -> TouchInput {
        TouchInput {
            phase,
            position,
            window: Entity::PLACEHOLDER,
            force: None,
            id: 0,
        }
    }

    /// Spawn one bubble and start dragging it, grabbed 10px in from its corner.
    fn grab_bubble(app: &mut App) -> Entity {
        app.world_mut()
            .write_message(CreateBubble::with_text("breeze"));
        app.update();
        let mut query = app.world_mut().query_filtered::<Entity, With<Bubble>>();
        let bubble = query.single(app.world()).unwrap();

        app.world_mut()
            .entity_mut(bubble)
            .insert(FieldPosition::Px(Vec2::new(100.0, 100.0)));
        app.world_mut().write_message(StartDrag {
            bubble,
            pointer: Vec2::new(110.0, 110.0),
        });
        app.update();
        assert!(app.world().resource::<DragSession>().is_dragging(bubble));
        bubble
    }

    #[test]
    fn test_left_release_anywhere_ends_the_drag() {
        let mut app = input_app();
        grab_bubble(&mut app);

        {
            let mut mouse = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
            mouse.press(MouseButton::Left);
            mouse.release(MouseButton::Left);
        }
        app.update();

        assert!(app.world().resource::<DragSession>().active().is_none());
    }

    #[test]
    fn test_right_release_keeps_the_drag() {
        let mut app = input_app();
        let bubble = grab_bubble(&mut app);

        {
            let mut mouse = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
            mouse.press(MouseButton::Right);
            mouse.release(MouseButton::Right);
        }
        app.update();

        assert!(app.world().resource::<DragSession>().is_dragging(bubble));
    }

    #[test]
    fn test_touch_moves_and_lifts_the_bubble() {
        let mut app = input_app();
        let bubble = grab_bubble(&mut app);

        app.world_mut()
            .write_message(touch(TouchPhase::Moved, Vec2::new(210.0, 160.0)));
        app.update();
        assert_eq!(
            *app.world().get::<FieldPosition>(bubble).unwrap(),
            FieldPosition::Px(Vec2::new(200.0, 150.0))
        );

        app.world_mut()
            .write_message(touch(TouchPhase::Ended, Vec2::new(210.0, 160.0)));
        app.update();
        assert!(app.world().resource::<DragSession>().active().is_none());
    }

    #[test]
    fn test_canceled_touch_ends_the_drag() {
        let mut app = input_app();
        grab_bubble(&mut app);

        app.world_mut()
            .write_message(touch(TouchPhase::Canceled, Vec2::ZERO));
        app.update();

        assert!(app.world().resource::<DragSession>().active().is_none());
    }

    #[test]
    fn test_cursor_moves_drag_the_bubble() {
        let mut app = input_app();
        let bubble = grab_bubble(&mut app);

        app.world_mut().write_message(CursorMoved {
            window: Entity::PLACEHOLDER,
            position: Vec2::new(60.0, 30.0),
            delta: None,
        });
        app.update();

        assert_eq!(
            *app.world().get::<FieldPosition>(bubble).unwrap(),
            FieldPosition::Px(Vec2::new(50.0, 20.0))
        );
    }

    #[test]
    fn test_space_adds_a_random_word() {
        let mut app = input_app();

        tap_key(&mut app, KeyCode::Space);

        let spawned = bubbles(&mut app);
        assert_eq!(spawned.len(), 1);
        assert!(WORDS.contains(&spawned[0].0.text.as_str()));
    }

    #[test]
    fn test_delete_clears_the_field() {
        let mut app = input_app();
        for _ in 0..3 {
            app.world_mut().write_message(CreateBubble::random());
        }
        app.update();

        tap_key(&mut app, KeyCode::Delete);

        let mut query = app
            .world_mut()
            .query_filtered::<Has<Dying>, With<Bubble>>();
        let dying: Vec<bool> = query.iter(app.world()).collect();
        assert_eq!(dying, vec![true; 3]);
    }

    #[test]
    fn test_shortcuts_do_nothing_while_paused() {
        let mut app = input_app();

        set_paused(&mut app, true);
        tap_key(&mut app, KeyCode::Space);
        set_paused(&mut app, false);
        app.update();

        assert!(bubbles(&mut app).is_empty());
    }
}
