//! Source layer description produced by the model-file parser.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A layer of the source network. All parameters are kept as text,
/// whatever their logical type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    #[serde(rename = "type")]
    pub layer_type: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl Layer {
    pub fn new(name: impl Into<String>, layer_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layer_type: layer_type.into(),
            params: HashMap::new(),
        }
    }

    /// Set a parameter value.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Parameter value as text, or `default` when the layer does not define it.
    pub fn param_as_string<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.params.get(key).map(String::as_str).unwrap_or(default)
    }
}

/// Name and type of the layer a stage was created from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerOrigin {
    pub name: String,
    pub layer_type: String,
}

impl From<&Layer> for LayerOrigin {
    fn from(layer: &Layer) -> Self {
        Self {
            name: layer.name.clone(),
            layer_type: layer.layer_type.clone(),
        }
    }
}
