//! A tooltip, a preset button and a draggable square, driven by a scripted
//! pointer.

use super::DemoScene;
use canvasui_core::{DrawCommand, ElementId, MouseButton, PointerEvent, Scene};
use canvasui_widgets::{ButtonCallbacks, ButtonHandle, DragCallbacks, DragHandle, Ui, UiResult};
use kurbo::{Point, Rect, Size};
use peniko::Color;
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;

/// Sprite sheet for the button: four 50x40 frames side by side.
const BUTTON_SHEET: (&str, Size) = ("my_button", Size::new(200.0, 40.0));

const BUTTON_AT: Point = Point::new(200.0, 200.0);
const SQUARE_AT: Point = Point::new(300.0, 300.0);
const SQUARE_SIZE: f64 = 50.0;

fn down(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Down {
        position: Point::new(x, y),
        button: MouseButton::Left,
    }
}

fn up(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Up {
        position: Point::new(x, y),
        button: MouseButton::Left,
    }
}

fn move_to(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Move {
        position: Point::new(x, y),
    }
}

/// One pointer event per frame: click the button, then drag the square
/// past the bottom-right corner of the canvas.
fn script() -> Vec<PointerEvent> {
    vec![
        move_to(225.0, 220.0),
        down(225.0, 220.0),
        up(225.0, 220.0),
        move_to(325.0, 325.0),
        down(325.0, 325.0),
        move_to(412.0, 348.0),
        move_to(700.0, 600.0),
        up(700.0, 600.0),
    ]
}

#[derive(Default)]
pub struct WidgetsScene {
    script: Vec<PointerEvent>,
    frame: usize,
    tooltip: Option<ElementId>,
    button: Option<ButtonHandle>,
    square: Option<DragHandle>,
    clicks: Rc<Cell<u32>>,
    drops: Rc<Cell<u32>>,
}

impl WidgetsScene {
    pub fn new() -> Self {
        Self {
            script: script(),
            ..Self::default()
        }
    }

    pub fn tooltip(&self) -> Option<ElementId> {
        self.tooltip
    }

    pub fn button(&self) -> Option<&ButtonHandle> {
        self.button.as_ref()
    }

    pub fn square(&self) -> Option<&DragHandle> {
        self.square.as_ref()
    }

    pub fn clicks(&self) -> u32 {
        self.clicks.get()
    }

    pub fn drops(&self) -> u32 {
        self.drops.get()
    }
}

impl DemoScene for WidgetsScene {
    fn name(&self) -> &'static str {
        "widgets"
    }

    fn ready(&mut self, scene: &mut Scene, ui: &mut Ui) -> UiResult<()> {
        let stage = scene.stage();
        let (sheet, sheet_size) = BUTTON_SHEET;
        scene.materials_mut().insert(sheet, sheet_size);
        ui.presets_mut()
            .register("mypreset", json!({ "img": sheet, "text": { "color": "black" } }))?;

        let tip = ui.tooltip(
            scene,
            json!({ "position": "top", "width": 150, "height": 60, "type": "fill", "color": "#333" }),
        )?;
        if let Some(element) = scene.element_mut(tip) {
            element.set_offset(Point::new(20.0, 30.0));
        }
        scene.append(stage, tip)?;

        let clicks = Rc::clone(&self.clicks);
        let button = ui.button(
            scene,
            Some("Ok"),
            "mypreset",
            ButtonCallbacks::new().on_click(move |_, _| {
                clicks.set(clicks.get() + 1);
                log::info!("Button clicked ({} total)", clicks.get());
            }),
        )?;
        if let Some(element) = scene.element_mut(button.element) {
            element.set_offset(BUTTON_AT);
        }
        scene.append(stage, button.element)?;

        let square = scene.create_element(Some(Size::new(SQUARE_SIZE, SQUARE_SIZE)));
        if let Some(element) = scene.element_mut(square) {
            element.set_offset(SQUARE_AT);
            element.draw(DrawCommand::FillRect {
                rect: Rect::new(0.0, 0.0, SQUARE_SIZE, SQUARE_SIZE),
                color: Color::from_rgba8(255, 0, 0, 255),
            });
        }
        scene.append(stage, square)?;

        let drops = Rc::clone(&self.drops);
        let handle = ui.draggable(
            scene,
            square,
            json!({ "grid": [10, 10], "containment": "parent" }),
            DragCallbacks::new().on_stop(move |scene, _| {
                drops.set(drops.get() + 1);
                let at = scene.element(square).map(|e| e.offset());
                log::info!("Square dropped at {:?}", at);
            }),
        )?;

        self.tooltip = Some(tip);
        self.button = Some(button);
        self.square = Some(handle);
        Ok(())
    }

    fn render(&mut self, scene: &mut Scene) {
        if let Some(event) = self.script.get(self.frame) {
            scene.dispatch_pointer(event.clone());
        }
        self.frame += 1;
    }
}
