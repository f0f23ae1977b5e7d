//! Tooltip bubbles: a rounded rectangle with an arrow on one side.

use crate::error::{ConfigError, UiResult};
use canvasui_core::{parse_color, DrawCommand, ElementId, Paint, Scene};
use kurbo::{BezPath, Size};
use serde::Deserialize;

/// Side of the bubble carrying the arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    #[default]
    Bottom,
    Left,
}

impl Side {
    /// Whether the arrow sits on a vertical edge.
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

/// Where the arrow's base starts along its side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "GapRepr")]
pub enum Gap {
    /// Centered on the side.
    #[default]
    Middle,
    /// Pixels from the left (top/bottom sides) or top (left/right sides).
    Offset(f64),
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum GapKeyword {
    Middle,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GapRepr {
    Offset(f64),
    Keyword(GapKeyword),
}

impl From<GapRepr> for Gap {
    fn from(repr: GapRepr) -> Self {
        match repr {
            GapRepr::Offset(v) => Gap::Offset(v),
            GapRepr::Keyword(GapKeyword::Middle) => Gap::Middle,
        }
    }
}

/// Arrow triangle geometry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArrowOptions {
    /// Width of the triangle's base.
    pub base: f64,
    /// Distance from the edge to the apex.
    pub height: f64,
    /// Shift of the apex along the edge.
    pub skew: f64,
}

impl Default for ArrowOptions {
    fn default() -> Self {
        Self {
            base: 10.0,
            height: 10.0,
            skew: 0.0,
        }
    }
}

/// Options for [`tooltip`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TooltipOptions {
    pub position: Side,
    pub gap: Gap,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    #[serde(rename = "type")]
    pub paint: Paint,
    pub color: String,
    pub arrow: ArrowOptions,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            position: Side::Bottom,
            gap: Gap::Middle,
            width: 100.0,
            height: 80.0,
            radius: 5.0,
            paint: Paint::Stroke,
            color: "black".to_string(),
            arrow: ArrowOptions::default(),
        }
    }
}

impl TooltipOptions {
    /// Offset of the arrow base along its side.
    pub fn gap_offset(&self) -> f64 {
        match self.gap {
            Gap::Offset(v) => v,
            Gap::Middle => {
                let side = if self.position.is_vertical() {
                    self.height
                } else {
                    self.width
                };
                side / 2.0 - self.arrow.base / 2.0
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(ConfigError::Invalid(format!(
                "tooltip size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tooltip radius must be non-negative, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

/// Build the closed outline, clockwise from the top-left curve entry.
pub fn tooltip_outline(options: &TooltipOptions) -> BezPath {
    let w = options.width;
    let h = options.height;
    let r = options.radius;
    let gap = options.gap_offset();
    let ArrowOptions { base, height: tip, skew } = options.arrow;
    let apex = gap + base / 2.0 + skew;

    let mut path = BezPath::new();
    path.move_to((r, 0.0));

    if options.position == Side::Top {
        path.line_to((gap, 0.0));
        path.line_to((apex, -tip));
        path.line_to((gap + base, 0.0));
    }
    path.line_to((w - r, 0.0));
    path.quad_to((w, 0.0), (w, r));

    if options.position == Side::Right {
        path.line_to((w, gap));
        path.line_to((w + tip, apex));
        path.line_to((w, gap + base));
    }
    path.line_to((w, h - r));
    path.quad_to((w, h), (w - r, h));

    // Bottom and left run backwards, so the base is walked far end first
    if options.position == Side::Bottom {
        path.line_to((gap + base, h));
        path.line_to((apex, h + tip));
        path.line_to((gap, h));
    }
    path.line_to((r, h));
    path.quad_to((0.0, h), (0.0, h - r));

    if options.position == Side::Left {
        path.line_to((0.0, gap + base));
        path.line_to((-tip, apex));
        path.line_to((0.0, gap));
    }
    path.line_to((0.0, r));
    path.quad_to((0.0, 0.0), (r, 0.0));
    path.close_path();
    path
}

/// Create a tooltip element sized `width x height` drawing its outline.
pub fn tooltip(scene: &mut Scene, options: &TooltipOptions) -> UiResult<ElementId> {
    options.validate()?;
    let color = parse_color(&options.color)
        .ok_or_else(|| ConfigError::Invalid(format!("unrecognized color {:?}", options.color)))?;

    let el = scene.create_element(Some(Size::new(options.width, options.height)));
    if let Some(element) = scene.element_mut(el) {
        element.draw(DrawCommand::Path {
            path: tooltip_outline(options),
            paint: options.paint,
            color,
        });
    }
    log::debug!(
        "Tooltip {} ({}x{}, arrow {:?})",
        el,
        options.width,
        options.height,
        options.position
    );
    Ok(el)
}
