//! Sprite-sheet buttons.
//!
//! The button image is a horizontal strip of equally sized frames, one per
//! visual state. Hover, press and release swap the drawn frame unless the
//! `disabled` attribute is set; writing that attribute redraws the
//! `disabled` frame (or the default frame when cleared).

use crate::error::{ConfigError, UiError, UiResult};
use canvasui_core::{
    parse_color, DrawCommand, ElementId, EventKind, Scene, TextAlign, UiEvent,
};
use kurbo::{Rect, Size};
use peniko::Color;
use serde::Deserialize;
use std::rc::Rc;

/// Attribute that disables a button.
pub const DISABLED_ATTR: &str = "disabled";

/// Visual state, naming one frame of the sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameState {
    Default,
    Hover,
    Click,
    Disabled,
}

/// Label styling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// CSS font shorthand, e.g. `"15px Arial"`.
    pub font: String,
    pub color: String,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font: "20px Arial".to_string(),
            color: "white".to_string(),
        }
    }
}

/// Options for [`button`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ButtonOptions {
    /// Material id of the sprite sheet. Required.
    pub img: Option<String>,
    /// Frame order in the sheet, left to right.
    pub img_order: Vec<FrameState>,
    pub text: TextOptions,
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self {
            img: None,
            img_order: vec![
                FrameState::Default,
                FrameState::Hover,
                FrameState::Click,
                FrameState::Disabled,
            ],
            text: TextOptions::default(),
        }
    }
}

/// Called with the triggering event.
pub type ButtonCallback = Box<dyn FnMut(&mut Scene, &UiEvent)>;

/// Optional click and hover hooks.
#[derive(Default)]
pub struct ButtonCallbacks {
    pub click: Option<ButtonCallback>,
    pub hover: Option<ButtonCallback>,
}

impl ButtonCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_click(mut self, f: impl FnMut(&mut Scene, &UiEvent) + 'static) -> Self {
        self.click = Some(Box::new(f));
        self
    }

    pub fn on_hover(mut self, f: impl FnMut(&mut Scene, &UiEvent) + 'static) -> Self {
        self.hover = Some(Box::new(f));
        self
    }
}

#[derive(Debug, Clone)]
struct Label {
    text: String,
    font: String,
    color: Color,
}

/// Everything needed to redraw the button in a given state.
#[derive(Debug, Clone)]
pub struct FrameSheet {
    material: String,
    order: Vec<FrameState>,
    frame: Size,
    label: Option<Label>,
}

impl FrameSheet {
    /// Index of `state` in the sheet; states not in the sheet use frame 0.
    pub fn index(&self, state: FrameState) -> usize {
        self.order.iter().position(|&s| s == state).unwrap_or(0)
    }

    pub fn frame_size(&self) -> Size {
        self.frame
    }

    /// Replace the element's draw list with the frame for `state`.
    fn draw(&self, scene: &mut Scene, el: ElementId, state: FrameState) {
        let index = self.index(state);
        let Size { width, height } = self.frame;
        let Some(element) = scene.element_mut(el) else {
            return;
        };
        element.clear_drawing();
        element.draw(DrawCommand::Image {
            material: self.material.clone(),
            src: Rect::new(index as f64 * width, 0.0, (index + 1) as f64 * width, height),
            dst: Rect::new(0.0, 0.0, width, height),
        });
        if let Some(label) = &self.label {
            element.draw(DrawCommand::Text {
                text: label.text.clone(),
                font: label.font.clone(),
                color: label.color,
                align: TextAlign::Middle,
            });
        }
        log::debug!("Button {} drew {:?} (frame {})", el, state, index);
    }
}

/// A created button.
#[derive(Debug, Clone)]
pub struct ButtonHandle {
    pub element: ElementId,
    sheet: Rc<FrameSheet>,
}

impl ButtonHandle {
    pub fn sheet(&self) -> &FrameSheet {
        &self.sheet
    }

    pub fn set_disabled(&self, scene: &mut Scene, disabled: bool) -> UiResult<()> {
        scene.set_attr(self.element, DISABLED_ATTR, disabled)?;
        Ok(())
    }

    pub fn is_disabled(&self, scene: &Scene) -> bool {
        scene.attr_flag(self.element, DISABLED_ATTR)
    }

    /// Index of the frame currently drawn, read back from the draw list.
    pub fn current_frame(&self, scene: &Scene) -> Option<usize> {
        let src = scene
            .element(self.element)?
            .commands()
            .iter()
            .find_map(DrawCommand::image_source)?;
        Some((src.x0 / self.sheet.frame.width).round() as usize)
    }
}

/// Create a button from a sprite sheet, with an optional centered label.
pub fn button(
    scene: &mut Scene,
    text: Option<&str>,
    options: &ButtonOptions,
    callbacks: ButtonCallbacks,
) -> UiResult<ButtonHandle> {
    let img = options.img.as_deref().ok_or(ConfigError::MissingField("img"))?;
    if options.img_order.is_empty() {
        return Err(ConfigError::Invalid("img_order must name at least one frame".to_string()).into());
    }
    let material = scene
        .materials()
        .get(img)
        .cloned()
        .ok_or_else(|| UiError::UnknownMaterial(img.to_string()))?;

    let label = match text {
        Some(text) => {
            let color = parse_color(&options.text.color).ok_or_else(|| {
                ConfigError::Invalid(format!("unrecognized color {:?}", options.text.color))
            })?;
            Some(Label {
                text: text.to_string(),
                font: options.text.font.clone(),
                color,
            })
        }
        None => None,
    };

    let frame = Size::new(
        material.width / options.img_order.len() as f64,
        material.height,
    );
    let sheet = Rc::new(FrameSheet {
        material: material.id,
        order: options.img_order.clone(),
        frame,
        label,
    });

    let btn = scene.create_element(Some(frame));
    let ButtonCallbacks {
        click: mut on_click,
        hover: mut on_hover,
    } = callbacks;

    // Clicks reach the callback even while disabled; only frames are gated
    scene.on(btn, EventKind::Click, move |scene, event| {
        if let Some(f) = on_click.as_mut() {
            f(scene, event);
        }
    })?;

    let s = Rc::clone(&sheet);
    scene.on(btn, EventKind::MouseOver, move |scene, event| {
        if scene.attr_flag(btn, DISABLED_ATTR) {
            return;
        }
        s.draw(scene, btn, FrameState::Hover);
        if let Some(f) = on_hover.as_mut() {
            f(scene, event);
        }
    })?;

    for (kind, state) in [
        (EventKind::MouseDown, FrameState::Click),
        (EventKind::MouseUp, FrameState::Default),
        (EventKind::MouseOut, FrameState::Default),
    ] {
        let s = Rc::clone(&sheet);
        scene.on(btn, kind, move |scene, _| {
            if !scene.attr_flag(btn, DISABLED_ATTR) {
                s.draw(scene, btn, state);
            }
        })?;
    }

    let s = Rc::clone(&sheet);
    scene.on(btn, EventKind::AttrChange, move |scene, event| {
        if let Some((DISABLED_ATTR, value)) = event.attr() {
            let state = if value.is_truthy() {
                FrameState::Disabled
            } else {
                FrameState::Default
            };
            s.draw(scene, btn, state);
        }
    })?;

    sheet.draw(scene, btn, FrameState::Default);
    Ok(ButtonHandle {
        element: btn,
        sheet,
    })
}
