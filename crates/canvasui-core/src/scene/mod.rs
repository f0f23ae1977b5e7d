//! Scene graph, attribute notifications and pointer dispatch.
//!
//! A [`Scene`] owns a tree of [`Element`]s rooted at the stage. Widgets
//! attach closures to elements with [`Scene::on`]; the scene invokes them
//! when pointer events are dispatched, attributes change or a render tick
//! runs. Everything happens on the caller's thread.

mod draw;
mod element;
mod events;

pub use draw::{DrawCommand, Paint, TextAlign};
pub use element::{AttrValue, Element, ElementId};
pub use events::{EventDetail, EventKind, Handler, ListenerId, UiEvent};

use crate::input::{InputState, PointerEvent};
use crate::materials::Materials;
use events::Listener;
use kurbo::{Point, Rect, Size};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use uuid::Uuid;

/// Scene errors.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),
    #[error("Invalid hierarchy: {0}")]
    InvalidHierarchy(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// A retained scene: elements, listeners, materials and pointer state.
pub struct Scene {
    name: String,
    size: Size,
    stage: ElementId,
    elements: HashMap<ElementId, Element>,
    listeners: Vec<Listener>,
    materials: Materials,
    input: InputState,
    /// Element currently under the pointer (never the stage).
    hovered: Option<ElementId>,
    /// Element that received the last mouse-down, for click synthesis.
    pressed: Option<ElementId>,
}

impl Scene {
    /// Create a scene whose stage covers a canvas of `size`.
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        let name = name.into();
        let stage = Element::new(size);
        let stage_id = stage.id;
        let mut elements = HashMap::new();
        elements.insert(stage_id, stage);
        log::info!("Scene {} created ({}x{})", name, size.width, size.height);
        Self {
            name,
            size,
            stage: stage_id,
            elements,
            listeners: Vec::new(),
            materials: Materials::new(),
            input: InputState::new(),
            hovered: None,
            pressed: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canvas size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Root element; also the pointer-owning surface.
    pub fn stage(&self) -> ElementId {
        self.stage
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut Materials {
        &mut self.materials
    }

    // --- Elements -------------------------------------------------------

    /// Create a detached element, optionally sized.
    pub fn create_element(&mut self, size: Option<Size>) -> ElementId {
        let element = Element::new(size.unwrap_or(Size::ZERO));
        let id = element.id;
        self.elements.insert(id, element);
        id
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    fn require(&self, id: ElementId) -> SceneResult<&Element> {
        self.elements.get(&id).ok_or(SceneError::UnknownElement(id))
    }

    fn require_mut(&mut self, id: ElementId) -> SceneResult<&mut Element> {
        self.elements
            .get_mut(&id)
            .ok_or(SceneError::UnknownElement(id))
    }

    /// Attach `child` as the last child of `parent`, detaching it first if
    /// it already has a parent.
    pub fn append(&mut self, parent: ElementId, child: ElementId) -> SceneResult<()> {
        self.require(parent)?;
        self.require(child)?;
        if child == self.stage {
            return Err(SceneError::InvalidHierarchy(
                "the stage cannot be appended".to_string(),
            ));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(SceneError::InvalidHierarchy(format!(
                "{child} is an ancestor of {parent}"
            )));
        }

        self.remove(child)?;
        self.require_mut(parent)?.children.push(child);
        self.require_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detach an element from its parent. The element and its subtree stay
    /// in the scene and can be appended again.
    pub fn remove(&mut self, child: ElementId) -> SceneResult<()> {
        let Some(parent) = self.require(child)?.parent else {
            return Ok(());
        };
        if let Some(p) = self.elements.get_mut(&parent) {
            p.children.retain(|&c| c != child);
        }
        self.require_mut(child)?.parent = None;
        Ok(())
    }

    fn is_ancestor_or_self(&self, ancestor: ElementId, mut id: ElementId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.elements.get(&id).and_then(|e| e.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(&id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(&id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the element is reachable from the stage.
    pub fn is_attached(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id) && self.is_ancestor_or_self(self.stage, id)
    }

    /// Absolute top-left corner in canvas coordinates.
    pub fn position(&self, id: ElementId) -> SceneResult<Point> {
        let mut element = self.require(id)?;
        let mut pos = element.offset();
        while let Some(parent) = element.parent {
            element = self.require(parent)?;
            pos += element.offset().to_vec2();
        }
        Ok(pos)
    }

    /// Absolute bounds in canvas coordinates.
    pub fn bounds(&self, id: ElementId) -> SceneResult<Rect> {
        let pos = self.position(id)?;
        let size = self.require(id)?.size();
        Ok(Rect::from_origin_size(pos, size))
    }

    // --- Attributes -----------------------------------------------------

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&AttrValue> {
        self.elements.get(&id).and_then(|e| e.attrs.get(name))
    }

    /// Truthiness of an attribute; absent attributes are falsy.
    pub fn attr_flag(&self, id: ElementId, name: &str) -> bool {
        self.attr(id, name).is_some_and(AttrValue::is_truthy)
    }

    /// Write an attribute and notify the element's `AttrChange` listeners.
    pub fn set_attr(
        &mut self,
        id: ElementId,
        name: &str,
        value: impl Into<AttrValue>,
    ) -> SceneResult<()> {
        let value = value.into();
        self.require_mut(id)?
            .attrs
            .insert(name.to_string(), value.clone());

        let event = UiEvent::new(EventKind::AttrChange, id, self.input.pointer_position)
            .with_detail(EventDetail::Attr {
                name: name.to_string(),
                value,
            });
        let handlers = self.handlers_for(id, EventKind::AttrChange);
        self.invoke(handlers, &event);
        Ok(())
    }

    // --- Listeners ------------------------------------------------------

    /// Register a handler for `kind` events on `id`.
    pub fn on<F>(&mut self, id: ElementId, kind: EventKind, handler: F) -> SceneResult<ListenerId>
    where
        F: FnMut(&mut Scene, &UiEvent) + 'static,
    {
        self.require(id)?;
        let listener_id = Uuid::new_v4();
        let handler: Handler = Rc::new(RefCell::new(handler));
        self.listeners.push(Listener {
            id: listener_id,
            element: id,
            kind,
            handler,
        });
        Ok(listener_id)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn off(&mut self, listener: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != listener);
        self.listeners.len() != before
    }

    /// Number of listeners registered on an element.
    pub fn listener_count(&self, id: ElementId) -> usize {
        self.listeners.iter().filter(|l| l.element == id).count()
    }

    fn handlers_for(&self, id: ElementId, kind: EventKind) -> Vec<Handler> {
        self.listeners
            .iter()
            .filter(|l| l.element == id && l.kind == kind)
            .map(|l| Rc::clone(&l.handler))
            .collect()
    }

    fn invoke(&mut self, handlers: Vec<Handler>, event: &UiEvent) {
        for handler in handlers {
            match handler.try_borrow_mut() {
                Ok(mut f) => (&mut *f)(self, event),
                Err(_) => log::warn!(
                    "Skipping re-entrant {:?} handler on {}",
                    event.kind,
                    event.target
                ),
            }
        }
    }

    /// Deliver a pointer event to the target's listeners, then the stage's.
    fn emit_pointer(&mut self, event: UiEvent) {
        let mut handlers = Vec::new();
        if event.target != self.stage {
            handlers.extend(self.handlers_for(event.target, event.kind));
        }
        handlers.extend(self.handlers_for(self.stage, event.kind));
        self.invoke(handlers, &event);
    }

    // --- Dispatch -------------------------------------------------------

    /// Topmost attached element (excluding the stage) containing `point`.
    pub fn hit_test(&self, point: Point) -> Option<ElementId> {
        let mut hit = None;
        let mut stack: Vec<(ElementId, Point)> = self
            .children(self.stage)
            .iter()
            .rev()
            .map(|&c| (c, Point::ZERO))
            .collect();

        // Pre-order walk; later elements paint over earlier ones.
        while let Some((id, origin)) = stack.pop() {
            let Some(element) = self.elements.get(&id) else {
                continue;
            };
            let pos = origin + element.offset().to_vec2();
            let rect = Rect::from_origin_size(pos, element.size());
            if rect.contains(point) {
                hit = Some(id);
            }
            stack.extend(element.children.iter().rev().map(|&c| (c, pos)));
        }
        hit
    }

    /// Feed a pointer event through hover tracking, element listeners and
    /// stage listeners.
    pub fn dispatch_pointer(&mut self, event: PointerEvent) {
        // A release only clicks if its own button was down
        let was_pressed = event.button().is_some_and(|b| self.input.is_button_pressed(b));
        self.input.handle_pointer_event(&event);
        let position = event.position();
        let button = event.button();
        let hit = self.hit_test(position);

        if hit != self.hovered {
            if let Some(old) = self.hovered.take() {
                if self.elements.contains_key(&old) {
                    self.emit_pointer(UiEvent::new(EventKind::MouseOut, old, position));
                }
            }
            self.hovered = hit;
            if let Some(new) = hit {
                self.emit_pointer(UiEvent::new(EventKind::MouseOver, new, position));
            }
        }

        let target = hit.unwrap_or(self.stage);
        match event {
            PointerEvent::Down { .. } => {
                self.pressed = hit;
                self.emit_pointer(
                    UiEvent::new(EventKind::MouseDown, target, position).with_button(button),
                );
            }
            PointerEvent::Up { .. } => {
                self.emit_pointer(
                    UiEvent::new(EventKind::MouseUp, target, position).with_button(button),
                );
                if let Some(pressed) = self.pressed.take_if(|_| was_pressed) {
                    if Some(pressed) == hit {
                        self.emit_pointer(
                            UiEvent::new(EventKind::Click, pressed, position).with_button(button),
                        );
                    }
                }
            }
            PointerEvent::Move { .. } => {
                self.emit_pointer(UiEvent::new(EventKind::MouseMove, target, position));
            }
            PointerEvent::Scroll { .. } => {}
        }
    }

    /// Run one render tick: every `Render` listener fires once.
    pub fn render(&mut self) {
        let handlers: Vec<(ElementId, Handler)> = self
            .listeners
            .iter()
            .filter(|l| l.kind == EventKind::Render)
            .map(|l| (l.element, Rc::clone(&l.handler)))
            .collect();
        let pointer = self.input.pointer_position;
        for (element, handler) in handlers {
            let event = UiEvent::new(EventKind::Render, element, pointer);
            self.invoke(vec![handler], &event);
        }
    }
}
