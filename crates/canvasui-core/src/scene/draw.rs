//! Draw commands recorded on elements.

use kurbo::{BezPath, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// How a path is realized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paint {
    /// Outline only.
    #[default]
    Stroke,
    /// Solid interior.
    Fill,
}

/// Horizontal placement of text inside its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Anchored at the element's left edge.
    #[default]
    Start,
    /// Centered on both axes.
    Middle,
}

/// One entry of an element's draw list, in element-local coordinates.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// A vector path.
    Path {
        path: BezPath,
        paint: Paint,
        color: Color,
    },
    /// A solid rectangle.
    FillRect { rect: Rect, color: Color },
    /// A slice `src` of a material blitted into `dst`.
    Image {
        material: String,
        src: Rect,
        dst: Rect,
    },
    /// A run of text.
    Text {
        text: String,
        font: String,
        color: Color,
        align: TextAlign,
    },
    /// A material repeated to cover `rect`.
    Pattern { material: String, rect: Rect },
}

impl DrawCommand {
    /// Source rectangle of an image command.
    pub fn image_source(&self) -> Option<Rect> {
        match self {
            DrawCommand::Image { src, .. } => Some(*src),
            _ => None,
        }
    }
}
