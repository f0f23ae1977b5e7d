//! Event kinds, payloads and listener records.

use super::element::{AttrValue, ElementId};
use super::Scene;
use crate::input::MouseButton;
use kurbo::Point;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

/// Identifier returned by [`Scene::on`], used to detach the listener.
pub type ListenerId = Uuid;

/// Shared, re-borrowable event handler.
pub type Handler = Rc<RefCell<dyn FnMut(&mut Scene, &UiEvent)>>;

/// The kinds of event an element can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseDown,
    MouseUp,
    MouseMove,
    MouseOver,
    MouseOut,
    Click,
    /// An attribute was written through [`Scene::set_attr`].
    AttrChange,
    /// One render tick of the scene.
    Render,
}

/// Extra data attached to an event.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EventDetail {
    #[default]
    None,
    /// Name and new value of a changed attribute.
    Attr { name: String, value: AttrValue },
}

/// An event as seen by a handler.
#[derive(Debug, Clone)]
pub struct UiEvent {
    pub kind: EventKind,
    /// Element the event is about (the stage when nothing was hit).
    pub target: ElementId,
    /// Pointer position in canvas coordinates at dispatch time.
    pub pointer: Point,
    pub button: Option<MouseButton>,
    pub detail: EventDetail,
}

impl UiEvent {
    pub fn new(kind: EventKind, target: ElementId, pointer: Point) -> Self {
        Self {
            kind,
            target,
            pointer,
            button: None,
            detail: EventDetail::None,
        }
    }

    pub fn with_button(mut self, button: Option<MouseButton>) -> Self {
        self.button = button;
        self
    }

    pub fn with_detail(mut self, detail: EventDetail) -> Self {
        self.detail = detail;
        self
    }

    /// The changed attribute, for [`EventKind::AttrChange`].
    pub fn attr(&self) -> Option<(&str, &AttrValue)> {
        match &self.detail {
            EventDetail::Attr { name, value } => Some((name.as_str(), value)),
            EventDetail::None => None,
        }
    }
}

/// A registered listener.
pub(crate) struct Listener {
    pub(crate) id: ListenerId,
    pub(crate) element: ElementId,
    pub(crate) kind: EventKind,
    pub(crate) handler: Handler,
}
