use bevy::prelude::*;

/// Soft lavender behind everything.
pub const FIELD_BACKGROUND: Color = Color::srgb(0.90, 0.87, 0.96);

/// Dark text for light backgrounds
pub const LABEL_TEXT: Color = Color::srgb(0.20, 0.17, 0.30);

/// Dark text for headers
pub const HEADER_TEXT: Color = Color::srgb(0.20, 0.17, 0.30);

/// Light text for buttons
pub const BUTTON_TEXT: Color = Color::srgb(0.98, 0.97, 1.0);
/// #8a6fc4
pub const BUTTON_BACKGROUND: Color = Color::srgb(0.541, 0.435, 0.769);
/// #a58ddb
pub const BUTTON_HOVERED_BACKGROUND: Color = Color::srgb(0.647, 0.553, 0.859);
/// #6a529e
pub const BUTTON_PRESSED_BACKGROUND: Color = Color::srgb(0.416, 0.322, 0.620);

/// Bubble fill, slightly translucent so overlapping words stay readable.
pub const BUBBLE_BACKGROUND: Color = Color::srgba(1.0, 1.0, 1.0, 0.85);
/// Resting bubble outline.
pub const BUBBLE_OUTLINE: Color = Color::srgb(0.75, 0.68, 0.90);
/// Outline of the bubble currently being dragged.
pub const BUBBLE_GRABBED_OUTLINE: Color = Color::srgb(0.96, 0.62, 0.80);
/// Word text inside a bubble.
pub const BUBBLE_TEXT: Color = Color::srgb(0.25, 0.20, 0.38);

/// Dimmed backdrop behind overlay menus.
pub const OVERLAY_BACKGROUND: Color = Color::srgba(0.90, 0.87, 0.96, 0.95);
