//! Stage representation
//!
//! A [`Stage`] is the record the model keeps for one lowered operator: its
//! name, type, origin layer and input/output slots. The operator-specific
//! behaviour lives behind the [`StageNode`] trait, one implementation per
//! stage kind.

use core::fmt;
use std::any::Any;
use std::collections::BTreeMap;

use strum::{Display, EnumString};

use super::data::DataRef;
use super::data_type::DataType;
use super::layer::LayerOrigin;
use crate::blob::BlobSerializer;
use crate::error::{Error, Result};

/// Stage kinds known to the target.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, EnumString, Display)]
pub enum StageType {
    StridedSlice,
}

impl StageType {
    /// Code written to the blob for this stage type.
    pub fn blob_code(&self) -> u32 {
        match self {
            StageType::StridedSlice => 133,
        }
    }
}

/// Memory ordering of a data object's dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DimsOrder {
    C,
    NC,
    CHW,
    HWC,
    NCHW,
    NHWC,
}

/// Stride constraint a stage imposes on a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StridesRequirement {
    /// Any strides.
    Empty,
    /// Densely packed.
    Compact,
    /// Innermost dimension aligned to the given number of bytes.
    Aligned(usize),
}

/// How a stage handles the batch dimension of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSupport {
    Split,
    ReplicateConstContent,
}

/// Per-slot information collected by layout passes.
#[derive(Debug, Clone, PartialEq)]
pub struct StageDataInfo<T> {
    inputs: BTreeMap<usize, T>,
    outputs: BTreeMap<usize, T>,
}

impl<T> Default for StageDataInfo<T> {
    fn default() -> Self {
        Self {
            inputs: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }
}

impl<T> StageDataInfo<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, index: usize, value: T) {
        self.inputs.insert(index, value);
    }

    pub fn set_output(&mut self, index: usize, value: T) {
        self.outputs.insert(index, value);
    }

    pub fn get_input(&self, index: usize) -> Option<&T> {
        self.inputs.get(&index)
    }

    pub fn get_output(&self, index: usize) -> Option<&T> {
        self.outputs.get(&index)
    }

    /// True when no slot has been assigned a value.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }
}

/// A stage slot, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Input(usize),
    Output(usize),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Input(i) => write!(f, "input #{i}"),
            Slot::Output(i) => write!(f, "output #{i}"),
        }
    }
}

/// Everything a stage knows about itself apart from its kind-specific state.
#[derive(Debug, Clone)]
pub struct StageInfo {
    pub name: String,
    pub stage_type: StageType,
    pub origin: LayerOrigin,
    pub inputs: Vec<DataRef>,
    pub outputs: Vec<DataRef>,
}

impl StageInfo {
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    pub fn input(&self, index: usize) -> Option<&DataRef> {
        self.inputs.get(index)
    }

    pub fn output(&self, index: usize) -> Option<&DataRef> {
        self.outputs.get(index)
    }

    fn slot(&self, slot: Slot) -> Option<&DataRef> {
        match slot {
            Slot::Input(i) => self.input(i),
            Slot::Output(i) => self.output(i),
        }
    }

    /// Checks that `slot` references a data object whose element type is one
    /// of `allowed`, and returns that type.
    pub fn check_data_type(&self, slot: Slot, allowed: &[DataType]) -> Result<DataType> {
        let actual = match self.slot(slot) {
            Some(DataRef::Buffer(data)) if allowed.contains(&data.desc.dtype) => {
                return Ok(data.desc.dtype);
            }
            Some(DataRef::Buffer(data)) => data.desc.dtype.to_string(),
            Some(DataRef::NoBuffer) => "no buffer".to_string(),
            None => "nothing".to_string(),
        };

        Err(Error::TypeMismatch {
            layer: self.name.clone(),
            layer_type: self.stage_type.to_string(),
            slot: slot.to_string(),
            expected: allowed
                .iter()
                .map(|dtype| dtype.to_string())
                .collect::<Vec<_>>()
                .join(" | "),
            actual,
        })
    }
}

/// Capability contract every stage kind implements.
///
/// The layout hooks default to no-ops; kinds without layout preferences
/// leave them alone.
pub trait StageNode: fmt::Debug {
    /// Downcast to Any for type-safe retrieval
    fn as_any(&self) -> &dyn Any;

    /// Clone the node into a boxed trait object
    fn clone_box(&self) -> Box<dyn StageNode>;

    fn propagate_data_order(&self, _info: &StageInfo, _order: &mut StageDataInfo<DimsOrder>) {}

    fn data_strides_requirements(
        &self,
        _info: &StageInfo,
        _strides: &mut StageDataInfo<StridesRequirement>,
    ) {
    }

    fn finalize_data_layout(&mut self, _info: &StageInfo) {}

    fn batch_support_info(&self, _info: &StageInfo, _batch: &mut StageDataInfo<BatchSupport>) {}

    /// Structural checks that hold for this kind regardless of how the stage was built.
    fn initial_check(&self, info: &StageInfo) -> Result<()>;

    /// Append the stage's scalar parameters.
    fn serialize_params(&self, info: &StageInfo, serializer: &mut BlobSerializer);

    /// Append the buffer references of the stage's slots.
    fn serialize_data(&self, info: &StageInfo, serializer: &mut BlobSerializer);
}

/// A stage registered in a [`Model`](super::Model).
#[derive(Debug)]
pub struct Stage {
    info: StageInfo,
    node: Box<dyn StageNode>,
}

impl Clone for Stage {
    fn clone(&self) -> Self {
        Self {
            info: self.info.clone(),
            node: self.node.clone_box(),
        }
    }
}

impl Stage {
    pub fn new(info: StageInfo, node: Box<dyn StageNode>) -> Self {
        Self { info, node }
    }

    pub fn info(&self) -> &StageInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn stage_type(&self) -> StageType {
        self.info.stage_type
    }

    pub fn origin(&self) -> &LayerOrigin {
        &self.info.origin
    }

    pub fn inputs(&self) -> &[DataRef] {
        &self.info.inputs
    }

    pub fn outputs(&self) -> &[DataRef] {
        &self.info.outputs
    }

    /// Kind-specific state, if the stage is of kind `T`.
    pub fn node<T: 'static>(&self) -> Option<&T> {
        self.node.as_any().downcast_ref::<T>()
    }

    pub fn initial_check(&self) -> Result<()> {
        self.node.initial_check(&self.info)
    }

    pub fn propagate_data_order(&self, order: &mut StageDataInfo<DimsOrder>) {
        self.node.propagate_data_order(&self.info, order);
    }

    pub fn data_strides_requirements(&self, strides: &mut StageDataInfo<StridesRequirement>) {
        self.node.data_strides_requirements(&self.info, strides);
    }

    pub fn finalize_data_layout(&mut self) {
        self.node.finalize_data_layout(&self.info);
    }

    pub fn batch_support_info(&self, batch: &mut StageDataInfo<BatchSupport>) {
        self.node.batch_support_info(&self.info, batch);
    }

    pub fn serialize_params(&self, serializer: &mut BlobSerializer) {
        self.node.serialize_params(&self.info, serializer);
    }

    pub fn serialize_data(&self, serializer: &mut BlobSerializer) {
        self.node.serialize_data(&self.info, serializer);
    }
}
