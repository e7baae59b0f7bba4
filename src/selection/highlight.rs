use serde::{Deserialize, Serialize};

/// Linear RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f32; 3]);

impl Color {
    /// Creates a color from its components.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }
}

/// Named colors used by the viewer.
pub mod palette {
    use super::Color;

    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GRAY: Color = Color::rgb(0.70, 0.70, 0.82);
    pub const BLUE: Color = Color::rgb(0.20, 0.20, 0.40);
    pub const ORANGE: Color = Color::rgb(0.90, 0.59, 0.26);
}

/// Display attributes of one actor; the only actor state the engine touches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    pub color: Color,
    pub specular: f32,
}

/// Colors for normal and highlighted faces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightPolicy {
    pub normal: Color,
    pub highlight: Color,
    /// Specular coefficient of highlighted faces. Normal faces use 0.
    pub highlight_specular: f32,
    /// Viewport background.
    pub background: Color,
}

impl Default for HighlightPolicy {
    fn default() -> Self {
        Self {
            normal: palette::GRAY,
            highlight: palette::ORANGE,
            highlight_specular: 0.5,
            background: palette::BLUE,
        }
    }
}

impl HighlightPolicy {
    /// The display state for a face in the given highlight state.
    #[must_use]
    pub fn display_for(&self, highlighted: bool) -> DisplayState {
        if highlighted {
            DisplayState {
                color: self.highlight,
                specular: self.highlight_specular,
            }
        } else {
            DisplayState {
                color: self.normal,
                specular: 0.0,
            }
        }
    }
}
