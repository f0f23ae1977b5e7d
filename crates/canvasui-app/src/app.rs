//! Application shell: configuration and the frame loop.

use crate::scenes::{self, DemoScene};
use canvasui_core::Scene;
use canvasui_widgets::{Ui, UiError};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Unknown scene: {0}")]
    UnknownScene(String),
    #[error(transparent)]
    Ui(#[from] UiError),
}

pub type AppResult<T> = Result<T, AppError>;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Demo scene to run.
    pub scene: String,
    /// Number of render ticks before exiting.
    pub frames: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "CanvasUI".to_string(),
            width: 800,
            height: 600,
            scene: "widgets".to_string(),
            frames: 120,
        }
    }
}

impl AppConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    scene: Scene,
    ui: Ui,
    demo: Box<dyn DemoScene>,
    frame: u32,
}

impl App {
    /// Create the application with default configuration.
    pub fn new() -> AppResult<Self> {
        Self::with_config(AppConfig::default())
    }

    /// Create the application and ready its scene.
    pub fn with_config(config: AppConfig) -> AppResult<Self> {
        let mut demo =
            scenes::by_name(&config.scene).ok_or_else(|| AppError::UnknownScene(config.scene.clone()))?;
        let mut scene = Scene::new(demo.name(), config.canvas_size());
        let mut ui = Ui::new();
        demo.ready(&mut scene, &mut ui)?;
        log::info!(
            "{}: scene '{}' ready ({}x{})",
            config.title,
            demo.name(),
            config.width,
            config.height
        );
        Ok(Self {
            config,
            scene,
            ui,
            demo,
            frame: 0,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    /// Frames rendered so far.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Render one frame: the demo's hook, then the scene's render listeners.
    pub fn tick(&mut self) {
        self.demo.render(&mut self.scene);
        self.scene.render();
        self.frame += 1;
    }

    /// Render the configured number of frames.
    pub fn run(&mut self) {
        while self.frame < self.config.frames {
            self.tick();
        }
        log::info!("Scene '{}' finished after {} frames", self.demo.name(), self.frame);
    }
}
