//! Two squares: one slides right into the other, which turns green.

use super::DemoScene;
use canvasui_core::{DrawCommand, Element, ElementId, Scene, SceneResult};
use canvasui_widgets::{Ui, UiResult};
use kurbo::{Point, Rect, Size};
use peniko::Color;

const ENTITY_SIZE: f64 = 100.0;
/// Pixels the moving entity advances per frame.
const SPEED: f64 = 5.0;

fn red() -> Color {
    Color::from_rgba8(255, 0, 0, 255)
}

fn green() -> Color {
    Color::from_rgba8(0, 128, 0, 255)
}

#[derive(Debug, Default)]
pub struct CollisionScene {
    entities: Option<(ElementId, ElementId)>,
    overlapping: bool,
}

impl CollisionScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// The moving entity and the one it runs into.
    pub fn entities(&self) -> Option<(ElementId, ElementId)> {
        self.entities
    }

    pub fn is_overlapping(&self) -> bool {
        self.overlapping
    }

    fn add_entity(scene: &mut Scene, x: f64, y: f64) -> SceneResult<ElementId> {
        let id = scene.create_element(Some(Size::new(ENTITY_SIZE, ENTITY_SIZE)));
        if let Some(element) = scene.element_mut(id) {
            element.set_offset(Point::new(x, y));
            paint(element, red());
        }
        let stage = scene.stage();
        scene.append(stage, id)?;
        Ok(id)
    }
}

fn paint(element: &mut Element, color: Color) {
    element.clear_drawing();
    element.draw(DrawCommand::FillRect {
        rect: Rect::new(0.0, 0.0, ENTITY_SIZE, ENTITY_SIZE),
        color,
    });
}

/// Strict overlap: touching edges do not count.
fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

impl DemoScene for CollisionScene {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn ready(&mut self, scene: &mut Scene, _ui: &mut Ui) -> UiResult<()> {
        let a = Self::add_entity(scene, 0.0, 100.0)?;
        let b = Self::add_entity(scene, 500.0, 100.0)?;
        self.entities = Some((a, b));
        Ok(())
    }

    fn render(&mut self, scene: &mut Scene) {
        let Some((a, b)) = self.entities else {
            return;
        };
        if let Some(element) = scene.element_mut(a) {
            element.x += SPEED;
        }
        let (Ok(ra), Ok(rb)) = (scene.bounds(a), scene.bounds(b)) else {
            return;
        };

        let hit = overlaps(ra, rb);
        if hit != self.overlapping {
            log::info!("Collision {}", if hit { "over" } else { "out" });
            self.overlapping = hit;
        }
        if hit {
            if let Some(element) = scene.element_mut(b) {
                paint(element, green());
            }
        }
    }
}
