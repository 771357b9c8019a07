//! Frontend: translate source layers into stages.
//!
//! Parsers are registered per layer type. A parser is the only place allowed to
//! reject a layer or to add substitute inputs; once every layer is parsed, the
//! structural validator re-checks the whole model.

use std::collections::HashMap;

use crate::blob::BlobWriter;
use crate::config::CompilationConfig;
use crate::error::{Error, Result};
use crate::ir::{DataRef, Layer, Model, StageId};
use crate::stages::strided_slice::parse_strided_slice;

/// Parser turning one layer into a stage of the model.
pub type LayerParser = fn(&mut Model, &Layer, &[DataRef], &[DataRef]) -> Result<StageId>;

/// A source layer together with its already-resolved inputs and outputs.
#[derive(Debug, Clone)]
pub struct LayerInstance {
    pub layer: Layer,
    pub inputs: Vec<DataRef>,
    pub outputs: Vec<DataRef>,
}

impl LayerInstance {
    pub fn new(layer: Layer, inputs: Vec<DataRef>, outputs: Vec<DataRef>) -> Self {
        Self {
            layer,
            inputs,
            outputs,
        }
    }
}

/// Layer-type dispatch over the registered parsers.
#[derive(Debug, Clone)]
pub struct FrontEnd {
    config: CompilationConfig,
    parsers: HashMap<String, LayerParser>,
}

impl Default for FrontEnd {
    fn default() -> Self {
        Self::new(CompilationConfig::default())
    }
}

impl FrontEnd {
    /// Create a frontend with every built-in parser registered.
    pub fn new(config: CompilationConfig) -> Self {
        let mut frontend = Self {
            config,
            parsers: HashMap::new(),
        };
        frontend.register("StridedSlice", parse_strided_slice);
        frontend
    }

    pub fn config(&self) -> &CompilationConfig {
        &self.config
    }

    /// Register (or replace) the parser for `layer_type`.
    pub fn register(&mut self, layer_type: impl Into<String>, parser: LayerParser) {
        self.parsers.insert(layer_type.into(), parser);
    }

    pub fn supports(&self, layer_type: &str) -> bool {
        self.parsers.contains_key(layer_type)
    }

    /// Parse one layer. Returns `None` when the layer type is unknown and the
    /// config allows skipping it.
    pub fn parse_layer(
        &self,
        model: &mut Model,
        layer: &Layer,
        inputs: &[DataRef],
        outputs: &[DataRef],
    ) -> Result<Option<StageId>> {
        let Some(parser) = self.parsers.get(&layer.layer_type) else {
            if self.config.ignore_unknown_layers {
                log::warn!(
                    "Skipping layer {} with unsupported type {}",
                    layer.name,
                    layer.layer_type
                );
                return Ok(None);
            }
            return Err(Error::UnsupportedLayer {
                layer: layer.name.clone(),
                layer_type: layer.layer_type.clone(),
            });
        };

        log::debug!("Parsing layer {} with type {}", layer.name, layer.layer_type);
        parser(model, layer, inputs, outputs).map(Some)
    }

    /// Parse `layers` in order; stops at the first failure.
    pub fn build(&self, model: &mut Model, layers: &[LayerInstance]) -> Result<Vec<StageId>> {
        let mut stages = Vec::with_capacity(layers.len());
        for instance in layers {
            if let Some(id) =
                self.parse_layer(model, &instance.layer, &instance.inputs, &instance.outputs)?
            {
                stages.push(id);
            }
        }

        if self.config.verify_after_build {
            model.validate()?;
        }

        Ok(stages)
    }

    /// Validate the model, run the layout passes and encode it.
    pub fn generate_blob(&self, model: &mut Model) -> Result<Vec<u8>> {
        model.validate()?;
        model.run_layout_passes();
        Ok(BlobWriter::new(self.config.blob_version).write(model))
    }
}
