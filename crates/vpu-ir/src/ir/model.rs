//! The model: owner of data objects and stages for one compiled network.

use std::rc::Rc;

use super::data::{Data, DataContent, DataDesc, DataHandle, DataLocation, DataRef, DataUsage};
use super::layer::{Layer, LayerOrigin};
use super::stage::{
    BatchSupport, DimsOrder, Stage, StageDataInfo, StageInfo, StageNode, StageType,
    StridesRequirement,
};
use crate::error::{Error, Result};

/// Index of a stage inside its model.
pub type StageId = usize;

/// Graph container. Data objects are placed as they are added: inputs and
/// outputs receive consecutive indices, constants consecutive offsets in the
/// blob's constant section and intermediates consecutive offsets in BSS.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    data: Vec<DataHandle>,
    stages: Vec<Stage>,
    next_input: u32,
    next_output: u32,
    blob_offset: u32,
    bss_offset: u32,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
            stages: Vec::new(),
            next_input: 0,
            next_output: 0,
            blob_offset: 0,
            bss_offset: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All data objects in allocation order.
    pub fn data(&self) -> &[DataHandle] {
        &self.data
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage(&self, id: StageId) -> Result<&Stage> {
        self.stages
            .get(id)
            .ok_or_else(|| Error::UnknownStage(id, self.name.clone()))
    }

    pub fn add_input_data(&mut self, name: impl Into<String>, desc: DataDesc) -> DataHandle {
        let offset = self.next_input;
        self.next_input += 1;
        self.push_data(name.into(), DataUsage::Input, desc, None, DataLocation::Input, offset)
    }

    pub fn add_output_data(&mut self, name: impl Into<String>, desc: DataDesc) -> DataHandle {
        let offset = self.next_output;
        self.next_output += 1;
        self.push_data(name.into(), DataUsage::Output, desc, None, DataLocation::Output, offset)
    }

    /// Add a data object whose content is known at compile time.
    pub fn add_const_data(
        &mut self,
        name: impl Into<String>,
        desc: DataDesc,
        content: DataContent,
    ) -> DataHandle {
        let offset = self.blob_offset;
        self.blob_offset += content.bytes().len() as u32;
        self.push_data(
            name.into(),
            DataUsage::Const,
            desc,
            Some(content),
            DataLocation::Blob,
            offset,
        )
    }

    pub fn add_intermediate_data(&mut self, name: impl Into<String>, desc: DataDesc) -> DataHandle {
        let offset = self.bss_offset;
        self.bss_offset += desc.byte_size() as u32;
        self.push_data(
            name.into(),
            DataUsage::Intermediate,
            desc,
            None,
            DataLocation::Bss,
            offset,
        )
    }

    /// Placeholder for an absent optional input.
    pub fn add_fake_data(&self) -> DataRef {
        log::debug!("Model {}: adding placeholder data", self.name);
        DataRef::NoBuffer
    }

    /// Register a stage built from `layer`.
    pub fn add_new_stage(
        &mut self,
        name: impl Into<String>,
        stage_type: StageType,
        layer: &Layer,
        inputs: Vec<DataRef>,
        outputs: Vec<DataRef>,
        node: Box<dyn StageNode>,
    ) -> StageId {
        let info = StageInfo {
            name: name.into(),
            stage_type,
            origin: LayerOrigin::from(layer),
            inputs,
            outputs,
        };

        log::debug!(
            "Model {}: adding stage {} of type {} with {} inputs and {} outputs",
            self.name,
            info.name,
            info.stage_type,
            info.inputs.len(),
            info.outputs.len()
        );

        self.stages.push(Stage::new(info, node));
        self.stages.len() - 1
    }

    /// Swap the stage at `id` for `stage`, returning the previous one.
    pub fn replace_stage(&mut self, id: StageId, stage: Stage) -> Result<Stage> {
        let slot = self
            .stages
            .get_mut(id)
            .ok_or_else(|| Error::UnknownStage(id, self.name.clone()))?;
        Ok(core::mem::replace(slot, stage))
    }

    /// Run the structural checks of every stage, stopping at the first failure.
    pub fn validate(&self) -> Result<()> {
        for stage in &self.stages {
            log::debug!("Model {}: checking stage {}", self.name, stage.name());
            stage.initial_check()?;
        }
        Ok(())
    }

    /// Collect layout requirements from every stage and let each one
    /// finalize its layout.
    pub fn run_layout_passes(&mut self) {
        for stage in &mut self.stages {
            let mut order = StageDataInfo::<DimsOrder>::new();
            stage.propagate_data_order(&mut order);

            let mut strides = StageDataInfo::<StridesRequirement>::new();
            stage.data_strides_requirements(&mut strides);

            let mut batch = StageDataInfo::<BatchSupport>::new();
            stage.batch_support_info(&mut batch);

            stage.finalize_data_layout();

            log::debug!(
                "Stage {}: order {:?}, strides {:?}, batch {:?}",
                stage.name(),
                order,
                strides,
                batch
            );
        }
    }

    fn push_data(
        &mut self,
        name: String,
        usage: DataUsage,
        desc: DataDesc,
        content: Option<DataContent>,
        location: DataLocation,
        offset: u32,
    ) -> DataHandle {
        let data = Rc::new(Data {
            name,
            usage,
            desc,
            content,
            location,
            offset,
        });
        self.data.push(data.clone());
        data
    }
}
