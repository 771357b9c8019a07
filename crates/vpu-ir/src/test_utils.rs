use crate::ir::{DataContent, DataDesc, DataRef, DataType, Layer, Model};

/// Builder for a model plus the input/output slot lists handed to a parser.
pub struct TestModelBuilder {
    model: Model,
    inputs: Vec<DataRef>,
    outputs: Vec<DataRef>,
}

impl TestModelBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            model: Model::new(name),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Add a runtime input (no content).
    pub fn input(mut self, name: &str, dtype: DataType, dims: Vec<usize>) -> Self {
        let data = self.model.add_input_data(name, DataDesc::new(dtype, dims));
        self.inputs.push(data.into());
        self
    }

    /// Add a 1-D S32 constant input.
    pub fn input_i32_data(mut self, name: &str, values: Vec<i32>) -> Self {
        let data = self.model.add_const_data(
            name,
            DataDesc::new(DataType::S32, vec![values.len()]),
            DataContent::from_slice(&values),
        );
        self.inputs.push(data.into());
        self
    }

    /// Add a 1-D FP32 constant input.
    pub fn input_f32_data(mut self, name: &str, values: Vec<f32>) -> Self {
        let data = self.model.add_const_data(
            name,
            DataDesc::new(DataType::FP32, vec![values.len()]),
            DataContent::from_slice(&values),
        );
        self.inputs.push(data.into());
        self
    }

    pub fn input_fake(mut self) -> Self {
        self.inputs.push(DataRef::NoBuffer);
        self
    }

    pub fn output(mut self, name: &str, dtype: DataType, dims: Vec<usize>) -> Self {
        let data = self.model.add_output_data(name, DataDesc::new(dtype, dims));
        self.outputs.push(data.into());
        self
    }

    pub fn output_fake(mut self) -> Self {
        self.outputs.push(DataRef::NoBuffer);
        self
    }

    pub fn build(self) -> (Model, Vec<DataRef>, Vec<DataRef>) {
        (self.model, self.inputs, self.outputs)
    }
}

/// FP16 data, constant begin/end, output. Strides are left to the caller.
pub fn strided_slice_builder() -> TestModelBuilder {
    TestModelBuilder::new("test_model")
        .input("data", DataType::FP16, vec![1, 3, 8, 8])
        .input_i32_data("begin", vec![0, 0, 0, 0])
        .input_i32_data("end", vec![1, 3, 4, 4])
}

pub fn strided_slice_layer(name: &str) -> Layer {
    Layer::new(name, "StridedSlice")
        .with_param("begin_mask", "1,1,1,1")
        .with_param("end_mask", "1,0,1,0")
        .with_param("new_axis_mask", "0,0,0,0")
        .with_param("shrink_axis_mask", "0,0,0,0")
        .with_param("ellipsis_mask", "0,0,0,0")
}
