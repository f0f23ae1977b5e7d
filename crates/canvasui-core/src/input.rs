//! Pointer input state for scene dispatch.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Scroll {
        position: Point,
        delta: Vec2,
    },
}

impl PointerEvent {
    /// Pointer position carried by the event.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Scroll { position, .. } => *position,
        }
    }

    /// Button carried by the event, if any.
    pub fn button(&self) -> Option<MouseButton> {
        match self {
            PointerEvent::Down { button, .. } | PointerEvent::Up { button, .. } => Some(*button),
            _ => None,
        }
    }
}

/// Tracks the pointer across dispatched events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position in canvas coordinates.
    pub pointer_position: Point,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        self.pointer_position = event.position();
        match *event {
            PointerEvent::Down { button, .. } => {
                self.pressed_buttons.insert(button);
            }
            PointerEvent::Up { button, .. } => {
                self.pressed_buttons.remove(&button);
            }
            PointerEvent::Move { .. } | PointerEvent::Scroll { .. } => {}
        }
    }

    /// Check if a button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_press_and_release() {
        let mut input = InputState::new();

        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        assert!(input.is_button_pressed(MouseButton::Left));
        assert!(!input.is_button_pressed(MouseButton::Right));

        input.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        assert!(!input.is_button_pressed(MouseButton::Left));
    }

    #[test]
    fn test_pointer_position_follows_events() {
        let mut input = InputState::new();

        input.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(150.0, 120.0),
        });
        assert_eq!(input.pointer_position, Point::new(150.0, 120.0));

        input.handle_pointer_event(&PointerEvent::Scroll {
            position: Point::new(100.0, 100.0),
            delta: Vec2::new(0.0, 10.0),
        });
        assert_eq!(input.pointer_position, Point::new(100.0, 100.0));
        assert!(!input.is_button_pressed(MouseButton::Left));
    }

    #[test]
    fn test_event_accessors() {
        let event = PointerEvent::Up {
            position: Point::new(3.0, 4.0),
            button: MouseButton::Right,
        };
        assert_eq!(event.position(), Point::new(3.0, 4.0));
        assert_eq!(event.button(), Some(MouseButton::Right));
        assert_eq!(PointerEvent::Move { position: Point::ZERO }.button(), None);
    }
}
