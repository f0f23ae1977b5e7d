//! Scene backgrounds from a pattern image.

use crate::error::{ConfigError, UiError, UiResult};
use canvasui_core::{DrawCommand, ElementId, Scene};
use kurbo::{Point, Rect, Size};
use serde::Deserialize;

/// Options for [`background`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackgroundOptions {
    /// Material id of the pattern image. Required.
    pub img: Option<String>,
    /// Tile the pattern 3x3 around the canvas.
    pub repeat: bool,
}

impl Default for BackgroundOptions {
    fn default() -> Self {
        Self {
            img: None,
            repeat: true,
        }
    }
}

/// Position of a tile in the 3x3 block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileSlot {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl TileSlot {
    /// All slots, row by row.
    pub const ALL: [TileSlot; 9] = [
        TileSlot::TopLeft,
        TileSlot::Top,
        TileSlot::TopRight,
        TileSlot::Left,
        TileSlot::Center,
        TileSlot::Right,
        TileSlot::BottomLeft,
        TileSlot::Bottom,
        TileSlot::BottomRight,
    ];

    /// Column and row relative to the center tile, each in `-1..=1`.
    pub fn cell(self) -> (i32, i32) {
        let i = TileSlot::ALL.iter().position(|&s| s == self).unwrap_or(4) as i32;
        (i % 3 - 1, i / 3 - 1)
    }
}

/// A created background.
#[derive(Debug, Clone)]
pub struct Background {
    pub element: ElementId,
    /// Tile elements, empty when not repeating.
    pub tiles: Vec<(TileSlot, ElementId)>,
}

impl Background {
    pub fn tile(&self, slot: TileSlot) -> Option<ElementId> {
        self.tiles.iter().find(|(s, _)| *s == slot).map(|(_, id)| *id)
    }
}

/// Create a background element.
///
/// With `repeat`, nine canvas-sized tiles cover the canvas and one canvas
/// in every direction around it, so panning the view by less than a canvas
/// never exposes an edge. Tiles are laid out once: nothing moves them when
/// the view pans. Without `repeat` the image is drawn once at its own size.
pub fn background(scene: &mut Scene, options: &BackgroundOptions) -> UiResult<Background> {
    let img = options.img.as_deref().ok_or(ConfigError::MissingField("img"))?;
    let material = scene
        .materials()
        .get(img)
        .cloned()
        .ok_or_else(|| UiError::UnknownMaterial(img.to_string()))?;

    let bg = scene.create_element(None);
    let mut tiles = Vec::new();

    if options.repeat {
        let Size { width: w, height: h } = scene.size();
        for slot in TileSlot::ALL {
            let (col, row) = slot.cell();
            let tile = scene.create_element(Some(Size::new(w, h)));
            if let Some(element) = scene.element_mut(tile) {
                element.draw(DrawCommand::Pattern {
                    material: material.id.clone(),
                    rect: Rect::new(0.0, 0.0, w, h),
                });
                element.set_offset(Point::new(w * col as f64, h * row as f64));
            }
            scene.append(bg, tile)?;
            tiles.push((slot, tile));
        }
        if let Some(element) = scene.element_mut(bg) {
            element.width = w * 3.0;
            element.height = h * 3.0;
        }
    } else if let Some(element) = scene.element_mut(bg) {
        let size = material.size();
        element.width = size.width;
        element.height = size.height;
        element.draw(DrawCommand::Image {
            material: material.id.clone(),
            src: Rect::from_origin_size(Point::ZERO, size),
            dst: Rect::from_origin_size(Point::ZERO, size),
        });
    }

    log::debug!("Background {} from {} ({} tiles)", bg, material.id, tiles.len());
    Ok(Background { element: bg, tiles })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setup() -> Scene {
        let mut scene = Scene::new("bg", Size::new(320.0, 240.0));
        scene.materials_mut().insert("grass", Size::new(32.0, 32.0));
        scene
    }

    #[test]
    fn test_defaults() {
        let opts: BackgroundOptions = serde_json::from_value(json!({ "img": "grass" })).unwrap();
        assert!(opts.repeat);
        assert_eq!(opts.img.as_deref(), Some("grass"));
    }

    #[test]
    fn test_slot_cells() {
        assert_eq!(TileSlot::TopLeft.cell(), (-1, -1));
        assert_eq!(TileSlot::Center.cell(), (0, 0));
        assert_eq!(TileSlot::Right.cell(), (1, 0));
        assert_eq!(TileSlot::BottomLeft.cell(), (-1, 1));
    }

    #[test]
    fn test_repeat_tiles_surround_canvas() {
        let mut scene = setup();
        let opts = BackgroundOptions {
            img: Some("grass".to_string()),
            repeat: true,
        };
        let bg = background(&mut scene, &opts).unwrap();

        assert_eq!(bg.tiles.len(), 9);
        assert_eq!(scene.children(bg.element).len(), 9);
        let element = scene.element(bg.element).unwrap();
        assert_eq!(element.size(), Size::new(960.0, 720.0));

        let top_left = scene.element(bg.tile(TileSlot::TopLeft).unwrap()).unwrap();
        assert_eq!(top_left.offset(), Point::new(-320.0, -240.0));
        let center = scene.element(bg.tile(TileSlot::Center).unwrap()).unwrap();
        assert_eq!(center.offset(), Point::ZERO);
        assert!(matches!(
            center.commands()[0],
            DrawCommand::Pattern { ref material, .. } if material == "grass"
        ));
        let bottom_right = scene.element(bg.tile(TileSlot::BottomRight).unwrap()).unwrap();
        assert_eq!(bottom_right.offset(), Point::new(320.0, 240.0));
    }

    #[test]
    fn test_single_image() {
        let mut scene = setup();
        let opts = BackgroundOptions {
            img: Some("grass".to_string()),
            repeat: false,
        };
        let bg = background(&mut scene, &opts).unwrap();

        assert!(bg.tiles.is_empty());
        let element = scene.element(bg.element).unwrap();
        assert_eq!(element.size(), Size::new(32.0, 32.0));
        assert_eq!(element.commands().len(), 1);
    }

    #[test]
    fn test_missing_image() {
        let mut scene = setup();
        assert!(matches!(
            background(&mut scene, &BackgroundOptions::default()),
            Err(UiError::Config(ConfigError::MissingField("img")))
        ));
        let opts = BackgroundOptions {
            img: Some("sand".to_string()),
            repeat: true,
        };
        assert!(matches!(
            background(&mut scene, &opts),
            Err(UiError::UnknownMaterial(_))
        ));
    }
}
