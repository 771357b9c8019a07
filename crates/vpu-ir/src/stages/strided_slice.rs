//! # StridedSlice
//!
//! Selects a hyper-rectangular region of the input using begin, end and
//! (optional) stride vectors.
//!
//! ## Inputs
//! - `data` (T): Input tensor
//! - `begin` (S32): Start index per axis
//! - `end` (S32): End index per axis
//! - `strides` (S32, optional): Step per axis. Must be a compile-time
//!   constant with strictly positive values. A placeholder takes its slot
//!   when omitted, so the stage always has 4 inputs.
//!
//! ## Outputs
//! - `output` (T): Sliced tensor
//!
//! ## Attributes
//! - `begin_mask`, `end_mask`: per-axis flags, packed into the stage.
//! - `new_axis_mask`, `shrink_axis_mask`, `ellipsis_mask`: must be all zeros.
//!
//! ## Blob layout
//! - Params: `begin_mask: u32`, `end_mask: u32`
//! - Data: `data`, `begin`, `end`, `strides`, `output` buffer references

use std::any::Any;

use crate::blob::BlobSerializer;
use crate::error::{Error, Result};
use crate::ir::{
    DataRef, DataType, Layer, Model, Slot, StageId, StageInfo, StageNode, StageType,
};
use crate::mask::encode_mask;

/// Masks describing a variant of strided slice that cannot be lowered.
const UNSUPPORTED_MASKS: [&str; 3] = ["new_axis_mask", "shrink_axis_mask", "ellipsis_mask"];

/// Kind-specific state of a strided-slice stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StridedSliceStage {
    pub begin_mask: u32,
    pub end_mask: u32,
}

impl StageNode for StridedSliceStage {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn StageNode> {
        Box::new(*self)
    }

    fn initial_check(&self, info: &StageInfo) -> Result<()> {
        if !(3..=4).contains(&info.num_inputs()) {
            return Err(Error::InvalidInputCount {
                action: "Validating",
                layer: info.name.clone(),
                layer_type: info.stage_type.to_string(),
                expected: "3 or 4",
                actual: info.num_inputs(),
            });
        }
        if info.num_outputs() != 1 {
            return Err(Error::InvalidOutputCount {
                action: "Validating",
                layer: info.name.clone(),
                layer_type: info.stage_type.to_string(),
                expected: "1",
                actual: info.num_outputs(),
            });
        }

        let data_type = info.check_data_type(Slot::Input(0), DataType::ALL)?;
        info.check_data_type(Slot::Input(1), &[DataType::S32])?;
        info.check_data_type(Slot::Input(2), &[DataType::S32])?;
        if let Some(strides) = info.input(3)
            && !strides.is_fake()
        {
            info.check_data_type(Slot::Input(3), &[DataType::S32])?;
        }
        info.check_data_type(Slot::Output(0), &[data_type])?;

        log::debug!("StridedSlice {}: initial check passed", info.name);
        Ok(())
    }

    fn serialize_params(&self, _info: &StageInfo, serializer: &mut BlobSerializer) {
        serializer.append(self.begin_mask);
        serializer.append(self.end_mask);
    }

    fn serialize_data(&self, info: &StageInfo, serializer: &mut BlobSerializer) {
        for index in 0..4 {
            info.input(index)
                .unwrap_or(&DataRef::NoBuffer)
                .serialize_buffer(serializer);
        }
        info.output(0)
            .unwrap_or(&DataRef::NoBuffer)
            .serialize_buffer(serializer);
    }
}

/// Translate a `StridedSlice` layer into a stage of `model`.
///
/// Rejects unsupported mask variants and runtime or non-positive strides.
/// When the layer has no strides input, a placeholder is appended so the
/// stage always has 4 inputs.
pub fn parse_strided_slice(
    model: &mut Model,
    layer: &Layer,
    inputs: &[DataRef],
    outputs: &[DataRef],
) -> Result<StageId> {
    if !(3..=4).contains(&inputs.len()) {
        return Err(Error::InvalidInputCount {
            action: "Parsing",
            layer: layer.name.clone(),
            layer_type: layer.layer_type.clone(),
            expected: "3 or 4",
            actual: inputs.len(),
        });
    }
    if outputs.len() != 1 {
        return Err(Error::InvalidOutputCount {
            action: "Parsing",
            layer: layer.name.clone(),
            layer_type: layer.layer_type.clone(),
            expected: "1",
            actual: outputs.len(),
        });
    }

    for attribute in UNSUPPORTED_MASKS {
        if encode_mask(layer.param_as_string(attribute, ""))? != 0 {
            return Err(Error::UnsupportedAttribute {
                layer: layer.name.clone(),
                layer_type: layer.layer_type.clone(),
                attribute,
            });
        }
    }

    let mut extended_inputs = inputs.to_vec();
    match inputs.get(3) {
        None => {
            log::debug!(
                "StridedSlice {}: no strides input, adding placeholder",
                layer.name
            );
            extended_inputs.push(model.add_fake_data());
        }
        Some(strides) => check_strides(layer, strides)?,
    }

    let node = StridedSliceStage {
        begin_mask: encode_mask(layer.param_as_string("begin_mask", ""))?,
        end_mask: encode_mask(layer.param_as_string("end_mask", ""))?,
    };

    Ok(model.add_new_stage(
        layer.name.clone(),
        StageType::StridedSlice,
        layer,
        extended_inputs,
        outputs.to_vec(),
        Box::new(node),
    ))
}

/// The strides must be constant and strictly positive. Reports the first
/// offending element only.
fn check_strides(layer: &Layer, strides: &DataRef) -> Result<()> {
    let missing = || Error::MissingConstant {
        layer: layer.name.clone(),
        layer_type: layer.layer_type.clone(),
        input: "strides",
    };

    let data = strides.data().ok_or_else(missing)?;
    let values = data
        .content()
        .and_then(|content| content.get::<i32>())
        .ok_or_else(missing)?;
    let values = values
        .get(..data.desc.total_dim_size())
        .ok_or_else(missing)?;

    match values.iter().enumerate().find(|(_, stride)| **stride <= 0) {
        Some((index, &value)) => Err(Error::NonPositiveStride {
            layer: layer.name.clone(),
            layer_type: layer.layer_type.clone(),
            index,
            value,
        }),
        None => Ok(()),
    }
}
