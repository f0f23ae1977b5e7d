//! Demo scenes.

mod collision;
mod widgets;

pub use collision::CollisionScene;
pub use widgets::WidgetsScene;

use canvasui_core::Scene;
use canvasui_widgets::{Ui, UiResult};

/// Names accepted by [`by_name`].
pub const SCENE_NAMES: &[&str] = &["collision", "widgets"];

/// A scene's lifecycle hooks.
pub trait DemoScene {
    fn name(&self) -> &'static str;

    /// Populate the scene. Called once before the first tick.
    fn ready(&mut self, scene: &mut Scene, ui: &mut Ui) -> UiResult<()>;

    /// Advance by one frame.
    fn render(&mut self, scene: &mut Scene);
}

/// Look up a demo scene by name.
pub fn by_name(name: &str) -> Option<Box<dyn DemoScene>> {
    match name {
        "collision" => Some(Box::new(CollisionScene::new())),
        "widgets" => Some(Box::new(WidgetsScene::new())),
        _ => None,
    }
}
