//! Widgets that exist in name only.

use crate::error::{UiError, UiResult};
use canvasui_core::{ElementId, Scene};

/// Progress bar. Not implemented: always returns [`UiError::NotImplemented`].
pub fn progress_bar(_scene: &mut Scene, id: &str, percent: f64) -> UiResult<ElementId> {
    log::warn!("progress_bar({id}, {percent}) requested but not implemented");
    Err(UiError::NotImplemented("progress bar"))
}

/// Dialog box. Not implemented: always returns [`UiError::NotImplemented`].
pub fn dialog(_scene: &mut Scene) -> UiResult<ElementId> {
    log::warn!("dialog requested but not implemented");
    Err(UiError::NotImplemented("dialog"))
}
