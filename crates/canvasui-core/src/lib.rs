//! CanvasUI Core Library
//!
//! The scene collaborator the CanvasUI widgets are written against:
//! a retained element tree with attributes and draw lists, pointer
//! dispatch to closure listeners, and a material registry.

pub mod color;
pub mod input;
pub mod materials;
pub mod scene;

pub use color::parse_color;
pub use input::{InputState, MouseButton, PointerEvent};
pub use materials::{Material, Materials};
pub use scene::{
    AttrValue, DrawCommand, Element, ElementId, EventDetail, EventKind, ListenerId, Paint, Scene,
    SceneError, SceneResult, TextAlign, UiEvent,
};
