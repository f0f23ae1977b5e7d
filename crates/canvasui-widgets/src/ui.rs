//! The widget factory.

use crate::background::{self, Background, BackgroundOptions};
use crate::button::{self, ButtonCallbacks, ButtonHandle, ButtonOptions};
use crate::draggable::{self, DragCallbacks, DragHandle, DragOptions};
use crate::error::UiResult;
use crate::preset::{Params, PresetRegistry};
use crate::stubs;
use crate::tooltip::{self, TooltipOptions};
use canvasui_core::{ElementId, Scene};

/// Creates widgets in a scene, resolving their params through a preset
/// registry.
///
/// ```ignore
/// let mut ui = Ui::new();
/// ui.presets_mut().register("ok", json!({ "img": "my_button" }))?;
/// let a = ui.button(&mut scene, Some("Ok"), "ok", ButtonCallbacks::new())?;
/// let b = ui.button(&mut scene, None, "ok", ButtonCallbacks::new())?;
/// ```
#[derive(Debug, Default)]
pub struct Ui {
    presets: PresetRegistry,
}

impl Ui {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presets(presets: PresetRegistry) -> Self {
        Self { presets }
    }

    pub fn presets(&self) -> &PresetRegistry {
        &self.presets
    }

    pub fn presets_mut(&mut self) -> &mut PresetRegistry {
        &mut self.presets
    }

    /// Let `el` be moved with the pointer.
    pub fn draggable(
        &self,
        scene: &mut Scene,
        el: ElementId,
        params: impl Into<Params>,
        callbacks: DragCallbacks,
    ) -> UiResult<DragHandle> {
        let options: DragOptions = self.presets.options(&params.into())?;
        draggable::draggable(scene, el, &options, callbacks)
    }

    /// Create a sprite-sheet button, optionally labelled.
    pub fn button(
        &self,
        scene: &mut Scene,
        text: Option<&str>,
        params: impl Into<Params>,
        callbacks: ButtonCallbacks,
    ) -> UiResult<ButtonHandle> {
        let options: ButtonOptions = self.presets.options(&params.into())?;
        button::button(scene, text, &options, callbacks)
    }

    /// Create a tooltip bubble.
    pub fn tooltip(&self, scene: &mut Scene, params: impl Into<Params>) -> UiResult<ElementId> {
        let options: TooltipOptions = self.presets.options(&params.into())?;
        tooltip::tooltip(scene, &options)
    }

    /// Create a pattern background.
    pub fn background(
        &self,
        scene: &mut Scene,
        params: impl Into<Params>,
    ) -> UiResult<Background> {
        let options: BackgroundOptions = self.presets.options(&params.into())?;
        background::background(scene, &options)
    }

    /// Not implemented.
    pub fn progress_bar(&self, scene: &mut Scene, id: &str, percent: f64) -> UiResult<ElementId> {
        stubs::progress_bar(scene, id, percent)
    }

    /// Not implemented.
    pub fn dialog(&self, scene: &mut Scene) -> UiResult<ElementId> {
        stubs::dialog(scene)
    }
}
