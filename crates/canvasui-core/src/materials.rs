//! Material (image) registry.
//!
//! Materials are registered by identifier together with their pixel size.
//! Decoding and uploading pixels is the renderer's business; widgets only
//! need the dimensions to slice sprite sheets and lay out tiles.

use kurbo::Size;
use std::collections::HashMap;

/// A loaded image known to the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

impl Material {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Lookup table of materials by identifier.
#[derive(Debug, Clone, Default)]
pub struct Materials {
    images: HashMap<String, Material>,
}

impl Materials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image, replacing any previous one with the same id.
    pub fn insert(&mut self, id: impl Into<String>, size: Size) -> &Material {
        let id = id.into();
        log::debug!("Registering material {} ({}x{})", id, size.width, size.height);
        let material = Material {
            id: id.clone(),
            width: size.width,
            height: size.height,
        };
        self.images.insert(id.clone(), material);
        &self.images[&id]
    }

    pub fn get(&self, id: &str) -> Option<&Material> {
        self.images.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.images.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
