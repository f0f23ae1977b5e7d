//! CanvasUI Application
//!
//! Example scenes for the CanvasUI widgets and the shell that drives them.

mod app;
pub mod scenes;

pub use app::{App, AppConfig, AppError, AppResult};
pub use scenes::{CollisionScene, DemoScene, WidgetsScene};
