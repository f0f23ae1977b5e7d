//! Widgets for CanvasUI scenes.
//!
//! This crate builds interactive elements on top of a [`canvasui_core::Scene`]:
//!
//! - **Presets**: named option bags shared between widgets
//! - **Draggable**: grid-snapped, axis-limited, contained pointer dragging
//! - **Tooltip**: rounded bubbles with an arrow on any side
//! - **Button**: sprite-sheet buttons with hover/click/disabled frames
//! - **Background**: 3x3 tiled pattern backgrounds
//!
//! Progress bars and dialogs are declared but not implemented.

pub mod background;
pub mod button;
pub mod draggable;
pub mod error;
pub mod preset;
pub mod stubs;
pub mod tooltip;
pub mod ui;

pub use background::{Background, BackgroundOptions, TileSlot};
pub use button::{ButtonCallbacks, ButtonHandle, ButtonOptions, FrameState, DISABLED_ATTR};
pub use draggable::{
    Axis, Containment, DragCallbacks, DragHandle, DragOptions, DragRules, Grid, DRAG_ATTR,
};
pub use error::{ConfigError, UiError, UiResult};
pub use preset::{Params, Preset, PresetData, PresetRegistry};
pub use tooltip::{tooltip_outline, ArrowOptions, Gap, Side, TooltipOptions};
pub use ui::Ui;
