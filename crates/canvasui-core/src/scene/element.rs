//! Scene elements and their attribute store.

use super::draw::DrawCommand;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// A value held in an element's attribute store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AttrValue {
    /// Truthiness of the value: `false`, `0` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Bool(b) => *b,
            AttrValue::Number(n) => *n != 0.0,
            AttrValue::Text(s) => !s.is_empty(),
        }
    }

    /// Get the value as a bool, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

/// A node in the scene graph.
///
/// Coordinates are relative to the parent element. The element owns a draw
/// list that a renderer replays in order; it holds no pixels itself.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) id: ElementId,
    /// Horizontal offset from the parent's top-left corner.
    pub x: f64,
    /// Vertical offset from the parent's top-left corner.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) attrs: HashMap<String, AttrValue>,
    commands: Vec<DrawCommand>,
}

impl Element {
    pub(crate) fn new(size: Size) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
            parent: None,
            children: Vec::new(),
            attrs: HashMap::new(),
            commands: Vec::new(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Children in paint order (back to front).
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Offset relative to the parent.
    pub fn offset(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Move the element relative to its parent.
    pub fn set_offset(&mut self, offset: Point) {
        self.x = offset.x;
        self.y = offset.y;
    }

    /// Read an attribute without going through the scene.
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Append a command to the draw list.
    pub fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Drop every queued draw command.
    pub fn clear_drawing(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}
