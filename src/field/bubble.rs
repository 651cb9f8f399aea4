//! Bubble entities - the words floating around the field.
//!
//! A bubble is an absolutely positioned UI node. It spawns at a percentage
//! of the window and switches to pixel coordinates once it is dragged.

use bevy::prelude::*;
use rand::Rng;

use super::{
    FieldSystems,
    input::{ClickHistory, end_drag_on_release, remove_on_double_click, start_drag_on_press},
    sound::{PlaySound, Sound},
    words::bubble_text,
};
use crate::{PausableSystems, theme::palette::*};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Bubble>();
    app.register_type::<FieldPosition>();
    app.add_message::<CreateBubble>();
    app.init_resource::<FieldViewport>();

    app.add_systems(
        Update,
        (
            create_bubbles
                .in_set(FieldSystems::Create)
                .in_set(PausableSystems),
            sync_bubble_nodes.after(FieldSystems::Remove),
        ),
    );
}

/// % of the window that bubbles can't spawn to the left of.
pub const LEFT_SPAWN_BOUND: u32 = 10;
/// % of the window that bubbles can't spawn above.
pub const TOP_SPAWN_BOUND: u32 = 10;
/// % width of the window bubbles spawn in, starting at [`LEFT_SPAWN_BOUND`].
pub const SPAWN_BOX_WIDTH: u32 = 80;
/// % height of the window bubbles spawn in, starting at [`TOP_SPAWN_BOUND`].
pub const SPAWN_BOX_HEIGHT: u32 = 80;

/// A poetry tile. The text never changes after spawning.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Bubble {
    pub text: String,
}

/// Where a bubble's top-left corner sits in the window.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub enum FieldPosition {
    /// Percent of the window size, as spawned.
    Percent(Vec2),
    /// Logical pixels, once dragged.
    Px(Vec2),
}

impl FieldPosition {
    /// Top-left corner in logical pixels for a window of size `viewport`.
    pub fn origin(self, viewport: Vec2) -> Vec2 {
        match self {
            FieldPosition::Percent(percent) => percent / 100.0 * viewport,
            FieldPosition::Px(px) => px,
        }
    }

    fn node_offsets(self) -> (Val, Val) {
        match self {
            FieldPosition::Percent(p) => (Val::Percent(p.x), Val::Percent(p.y)),
            FieldPosition::Px(p) => (Val::Px(p.x), Val::Px(p.y)),
        }
    }
}

/// Logical size of the window the field lives in.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FieldViewport(pub Vec2);

impl Default for FieldViewport {
    fn default() -> Self {
        Self(Vec2::new(1280.0, 720.0))
    }
}

/// Ask for a new bubble. Without text, a random word is used.
#[derive(Message, Debug, Clone, Default)]
pub struct CreateBubble {
    pub text: Option<String>,
}

impl CreateBubble {
    pub fn random() -> Self {
        Self { text: None }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Random spawn position, away from the window edges.
pub fn spawn_position(rng: &mut impl Rng) -> FieldPosition {
    let x = LEFT_SPAWN_BOUND + rng.random_range(0..SPAWN_BOX_WIDTH);
    let y = TOP_SPAWN_BOUND + rng.random_range(0..SPAWN_BOX_HEIGHT);
    FieldPosition::Percent(Vec2::new(x as f32, y as f32))
}

/// Whether a percentage position lies inside the spawn box.
pub fn in_spawn_bounds(percent: Vec2) -> bool {
    let min = Vec2::new(LEFT_SPAWN_BOUND as f32, TOP_SPAWN_BOUND as f32);
    let max = min + Vec2::new(SPAWN_BOX_WIDTH as f32, SPAWN_BOX_HEIGHT as f32);
    percent.x >= min.x && percent.x < max.x && percent.y >= min.y && percent.y < max.y
}

fn create_bubbles(
    mut commands: Commands,
    mut requests: MessageReader<CreateBubble>,
    mut sounds: MessageWriter<PlaySound>,
) {
    let mut rng = rand::rng();

    for request in requests.read() {
        let text = bubble_text(request.text.as_deref(), &mut rng);
        let position = spawn_position(&mut rng);
        let entity = spawn_bubble(&mut commands, text.clone(), position);
        sounds.write(PlaySound(Sound::random_creation(&mut rng)));

        debug!("Spawned bubble {:?} ({:?}) at {:?}", text, entity, position);
    }
}

/// Spawn a bubble with its drag and removal interactions attached.
pub fn spawn_bubble(commands: &mut Commands, text: String, position: FieldPosition) -> Entity {
    let (left, top) = position.node_offsets();

    commands
        .spawn((
            Name::new(format!("Bubble {:?}", text)),
            Bubble { text: text.clone() },
            position,
            ClickHistory::default(),
            Node {
                position_type: PositionType::Absolute,
                left,
                top,
                padding: UiRect::axes(Val::Px(20.0), Val::Px(12.0)),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(BUBBLE_BACKGROUND),
            BorderRadius::MAX,
            Outline::new(Val::Px(2.0), Val::ZERO, BUBBLE_OUTLINE),
            children![(
                Name::new("Bubble Text"),
                Text(text),
                TextFont::from_font_size(22.0),
                TextColor(BUBBLE_TEXT),
                // Presses on the word should land on the bubble itself.
                Pickable::IGNORE,
            )],
        ))
        .observe(start_drag_on_press)
        .observe(end_drag_on_release)
        .observe(remove_on_double_click)
        .id()
}

/// Mirror [`FieldPosition`] into the UI layout.
fn sync_bubble_nodes(mut bubbles: Query<(&FieldPosition, &mut Node), Changed<FieldPosition>>) {
    for (position, mut node) in &mut bubbles {
        let (left, top) = position.node_offsets();
        node.left = left;
        node.top = top;
    }
}
