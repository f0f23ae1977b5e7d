//! Named, shareable widget configurations.
//!
//! A preset is a mutable key-value bag registered under a name. Widgets take
//! [`Params`], which is either an inline bag, the name of a registered
//! preset, or a preset handle. Handles share their bag with the registry, so
//! a change made through one is seen by every widget created afterwards.

use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// The key-value bag behind a preset.
pub type PresetData = Map<String, Value>;

/// Handle to a registered preset.
#[derive(Debug, Clone)]
pub struct Preset {
    name: String,
    data: Rc<RefCell<PresetData>>,
}

impl Preset {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the current bag.
    pub fn data(&self) -> PresetData {
        self.data.borrow().clone()
    }

    /// Set one key in the shared bag.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.borrow_mut().insert(key.into(), value.into());
    }

    /// Whether two handles refer to the same bag.
    pub fn ptr_eq(&self, other: &Preset) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

/// How a widget receives its configuration.
#[derive(Debug, Clone)]
pub enum Params {
    /// Options given directly; `null` means "all defaults".
    Inline(Value),
    /// Name of a preset in the registry.
    Named(String),
    /// A preset handle.
    Preset(Preset),
}

impl Default for Params {
    fn default() -> Self {
        Params::Inline(Value::Null)
    }
}

impl From<&str> for Params {
    fn from(name: &str) -> Self {
        Params::Named(name.to_string())
    }
}

impl From<String> for Params {
    fn from(name: String) -> Self {
        Params::Named(name)
    }
}

impl From<Preset> for Params {
    fn from(preset: Preset) -> Self {
        Params::Preset(preset)
    }
}

impl From<&Preset> for Params {
    fn from(preset: &Preset) -> Self {
        Params::Preset(preset.clone())
    }
}

impl From<Value> for Params {
    fn from(value: Value) -> Self {
        Params::Inline(value)
    }
}

impl From<PresetData> for Params {
    fn from(data: PresetData) -> Self {
        Params::Inline(Value::Object(data))
    }
}

/// Registry of presets by name.
#[derive(Debug, Default)]
pub struct PresetRegistry {
    presets: HashMap<String, Preset>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `name`, replacing any existing preset.
    ///
    /// `data` must be a JSON object.
    pub fn register(&mut self, name: impl Into<String>, data: Value) -> Result<Preset, ConfigError> {
        let name = name.into();
        let Value::Object(map) = data else {
            return Err(ConfigError::Invalid(format!(
                "preset {name} must be an object"
            )));
        };
        let preset = Preset {
            name: name.clone(),
            data: Rc::new(RefCell::new(map)),
        };
        if self.presets.insert(name.clone(), preset.clone()).is_some() {
            log::debug!("Preset {} overwritten", name);
        }
        Ok(preset)
    }

    /// Look up a preset by name.
    pub fn get(&self, name: &str) -> Option<Preset> {
        self.presets.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Resolve params to the bag they designate.
    pub fn resolve(&self, params: &Params) -> Result<PresetData, ConfigError> {
        match params {
            Params::Inline(Value::Null) => Ok(PresetData::new()),
            Params::Inline(Value::Object(map)) => Ok(map.clone()),
            Params::Inline(other) => Err(ConfigError::Invalid(format!(
                "options must be an object, got {other}"
            ))),
            Params::Named(name) => self
                .presets
                .get(name)
                .map(Preset::data)
                .ok_or_else(|| ConfigError::UnknownPreset(name.clone())),
            Params::Preset(preset) => Ok(preset.data()),
        }
    }

    /// Resolve params and merge them over `T`'s defaults.
    pub fn options<T: DeserializeOwned>(&self, params: &Params) -> Result<T, ConfigError> {
        let data = self.resolve(params)?;
        Ok(serde_json::from_value(Value::Object(data))?)
    }
}
