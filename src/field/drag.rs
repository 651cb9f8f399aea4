//! Dragging bubbles around.
//!
//! A single [`DragSession`] owns the bubble being dragged. Starting a new
//! drag while one is active force-ends the old one, so at most one bubble
//! ever follows the pointer.

use bevy::prelude::*;

use super::{
    FieldSystems,
    bubble::{Bubble, FieldPosition, FieldViewport},
    sound::{PlaySound, Sound},
};
use crate::PausableSystems;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<DragSession>();
    app.add_message::<StartDrag>();
    app.add_message::<EndDrag>();
    app.add_message::<PointerMoved>();

    // Releases still count while paused, so a drag can't outlive its button.
    app.add_systems(
        Update,
        (
            (start_drag, follow_pointer).chain().in_set(PausableSystems),
            end_drag,
        )
            .chain()
            .in_set(FieldSystems::Drag),
    );
}

/// Begin dragging `bubble`, grabbed at `pointer` (logical window pixels).
#[derive(Message, Debug, Clone, Copy)]
pub struct StartDrag {
    pub bubble: Entity,
    pub pointer: Vec2,
}

/// Let go of whatever is being dragged.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct EndDrag;

/// The pointer moved somewhere in the window.
#[derive(Message, Debug, Clone, Copy)]
pub struct PointerMoved {
    pub position: Vec2,
}

/// The bubble currently following the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub bubble: Entity,
    /// Pointer position minus bubble origin at grab time.
    pub offset: Vec2,
}

#[derive(Resource, Debug, Default)]
pub struct DragSession {
    active: Option<ActiveDrag>,
}

impl DragSession {
    /// Start a new session, returning the one it replaced.
    pub fn begin(&mut self, bubble: Entity, offset: Vec2) -> Option<ActiveDrag> {
        self.active.replace(ActiveDrag { bubble, offset })
    }

    pub fn end(&mut self) -> Option<ActiveDrag> {
        self.active.take()
    }

    pub fn active(&self) -> Option<ActiveDrag> {
        self.active
    }

    pub fn is_dragging(&self, bubble: Entity) -> bool {
        self.active.is_some_and(|drag| drag.bubble == bubble)
    }
}

fn start_drag(
    mut requests: MessageReader<StartDrag>,
    mut session: ResMut<DragSession>,
    bubbles: Query<&FieldPosition, With<Bubble>>,
    viewport: Res<FieldViewport>,
    mut sounds: MessageWriter<PlaySound>,
) {
    for request in requests.read() {
        let Ok(position) = bubbles.get(request.bubble) else {
            debug!("Ignoring drag of non-bubble {:?}", request.bubble);
            continue;
        };

        let offset = request.pointer - position.origin(viewport.0);
        if let Some(previous) = session.begin(request.bubble, offset)
            && previous.bubble != request.bubble
        {
            debug!("Force-ended drag of {:?}", previous.bubble);
        }
        sounds.write(PlaySound(Sound::Select));
    }
}

fn follow_pointer(
    mut moves: MessageReader<PointerMoved>,
    mut session: ResMut<DragSession>,
    mut bubbles: Query<&mut FieldPosition, With<Bubble>>,
) {
    // Only the latest position matters for where the bubble ends up.
    let Some(latest) = moves.read().last().copied() else {
        return;
    };
    let Some(drag) = session.active() else {
        return;
    };

    match bubbles.get_mut(drag.bubble) {
        Ok(mut position) => *position = FieldPosition::Px(latest.position - drag.offset),
        Err(_) => {
            session.end();
        }
    }
}

fn end_drag(mut requests: MessageReader<EndDrag>, mut session: ResMut<DragSession>) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    if let Some(drag) = session.end() {
        debug!("Dropped {:?}", drag.bubble);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{
        bubble::{CreateBubble, spawn_bubble},
        test_support::{SoundLog, set_paused, test_app},
    };

    fn spawn_at(app: &mut App, text: &str, position: FieldPosition) -> Entity {
        let entity = {
            let mut commands = app.world_mut().commands();
            spawn_bubble(&mut commands, text.to_string(), position)
        };
        app.world_mut().flush();
        entity
    }

    fn position_of(app: &App, bubble: Entity) -> FieldPosition {
        *app.world().get::<FieldPosition>(bubble).unwrap()
    }

    #[test]
    fn test_session_replaces_previous_drag() {
        let mut world = World::new();
        let first = world.spawn_empty().id();
        let second = world.spawn_empty().id();
        let mut session = DragSession::default();

        assert!(session.begin(first, Vec2::ZERO).is_none());
        let replaced = session.begin(second, Vec2::ONE).unwrap();

        assert_eq!(replaced.bubble, first);
        assert!(session.is_dragging(second));
        assert!(!session.is_dragging(first));
        assert!(session.end().is_some());
        assert!(session.active().is_none());
    }

    #[test]
    fn test_drag_moves_only_the_active_bubble() {
        let mut app = test_app();
        // 1280x720 viewport: 10% x 10% is (128, 72).
        let dragged = spawn_at(&mut app, "love", FieldPosition::Percent(Vec2::new(10.0, 10.0)));
        let bystander = spawn_at(&mut app, "calm", FieldPosition::Percent(Vec2::new(50.0, 50.0)));

        app.world_mut().write_message(StartDrag {
            bubble: dragged,
            pointer: Vec2::new(138.0, 82.0),
        });
        app.update();
        app.world_mut().write_message(PointerMoved {
            position: Vec2::new(300.0, 400.0),
        });
        app.update();

        assert_eq!(
            position_of(&app, dragged),
            FieldPosition::Px(Vec2::new(290.0, 390.0))
        );
        assert_eq!(
            position_of(&app, bystander),
            FieldPosition::Percent(Vec2::new(50.0, 50.0))
        );
        assert_eq!(app.world().resource::<SoundLog>().count(Sound::Select), 1);
    }

    #[test]
    fn test_moves_after_end_drag_are_ignored() {
        let mut app = test_app();
        let bubble = spawn_at(&mut app, "soul", FieldPosition::Px(Vec2::new(100.0, 100.0)));

        app.world_mut().write_message(StartDrag {
            bubble,
            pointer: Vec2::new(110.0, 110.0),
        });
        app.update();
        app.world_mut().write_message(EndDrag);
        app.update();
        app.world_mut().write_message(PointerMoved {
            position: Vec2::new(500.0, 500.0),
        });
        app.update();

        assert_eq!(
            position_of(&app, bubble),
            FieldPosition::Px(Vec2::new(100.0, 100.0))
        );
        assert!(app.world().resource::<DragSession>().active().is_none());
    }

    #[test]
    fn test_release_while_paused_still_ends_the_drag() {
        let mut app = test_app();
        let bubble = spawn_at(&mut app, "soul", FieldPosition::Px(Vec2::new(100.0, 100.0)));

        app.world_mut().write_message(StartDrag {
            bubble,
            pointer: Vec2::new(110.0, 110.0),
        });
        app.update();

        set_paused(&mut app, true);
        app.world_mut().write_message(EndDrag);
        for _ in 0..4 {
            app.update();
        }
        set_paused(&mut app, false);

        app.world_mut().write_message(PointerMoved {
            position: Vec2::new(500.0, 500.0),
        });
        app.update();

        assert!(app.world().resource::<DragSession>().active().is_none());
        assert_eq!(
            position_of(&app, bubble),
            FieldPosition::Px(Vec2::new(100.0, 100.0))
        );
    }

    #[test]
    fn test_pointer_moves_while_paused_are_ignored() {
        let mut app = test_app();
        let bubble = spawn_at(&mut app, "soul", FieldPosition::Px(Vec2::new(100.0, 100.0)));

        app.world_mut().write_message(StartDrag {
            bubble,
            pointer: Vec2::new(110.0, 110.0),
        });
        app.update();

        set_paused(&mut app, true);
        app.world_mut().write_message(PointerMoved {
            position: Vec2::new(500.0, 500.0),
        });
        app.update();

        assert_eq!(
            position_of(&app, bubble),
            FieldPosition::Px(Vec2::new(100.0, 100.0))
        );
        assert!(app.world().resource::<DragSession>().is_dragging(bubble));
    }

    #[test]
    fn test_new_drag_force_ends_the_previous_one() {
        let mut app = test_app();
        let first = spawn_at(&mut app, "a", FieldPosition::Px(Vec2::new(0.0, 0.0)));
        let second = spawn_at(&mut app, "an", FieldPosition::Px(Vec2::new(200.0, 0.0)));

        app.world_mut().write_message(StartDrag {
            bubble: first,
            pointer: Vec2::new(5.0, 5.0),
        });
        app.update();
        app.world_mut().write_message(StartDrag {
            bubble: second,
            pointer: Vec2::new(205.0, 5.0),
        });
        app.update();
        app.world_mut().write_message(PointerMoved {
            position: Vec2::new(405.0, 105.0),
        });
        app.update();

        assert_eq!(
            position_of(&app, first),
            FieldPosition::Px(Vec2::new(0.0, 0.0))
        );
        assert_eq!(
            position_of(&app, second),
            FieldPosition::Px(Vec2::new(400.0, 100.0))
        );
    }

    #[test]
    fn test_dragging_a_non_bubble_is_ignored() {
        let mut app = test_app();
        let not_a_bubble = app.world_mut().spawn(Name::new("Toolbar")).id();

        app.world_mut().write_message(StartDrag {
            bubble: not_a_bubble,
            pointer: Vec2::ZERO,
        });
        app.update();

        assert!(app.world().resource::<DragSession>().active().is_none());
        assert_eq!(app.world().resource::<SoundLog>().count(Sound::Select), 0);
    }

    #[test]
    fn test_dragged_bubble_switches_to_pixel_node_offsets() {
        let mut app = test_app();
        app.world_mut()
            .write_message(CreateBubble::with_text("Drag\nme!"));
        app.update();

        let mut query = app.world_mut().query_filtered::<Entity, With<Bubble>>();
        let bubble = query.single(app.world()).unwrap();

        app.world_mut().write_message(StartDrag {
            bubble,
            pointer: Vec2::new(640.0, 360.0),
        });
        app.update();
        app.world_mut().write_message(PointerMoved {
            position: Vec2::new(700.0, 380.0),
        });
        app.update();

        let FieldPosition::Px(px) = position_of(&app, bubble) else {
            panic!("dragged bubble should use pixel units");
        };
        let node = app.world().get::<Node>(bubble).unwrap();
        assert_eq!(node.left, Val::Px(px.x));
        assert_eq!(node.top, Val::Px(px.y));
    }
}
