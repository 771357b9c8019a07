use vpu_ir::blob::{BLOB_HEADER_SIZE, BLOB_MAGIC, BufferRef};
use vpu_ir::frontend::LayerInstance;
use vpu_ir::ir::{
    DataContent, DataDesc, DataLocation, DataRef, DataType, Layer, Model, StageType,
};
use vpu_ir::stages::strided_slice::StridedSliceStage;
use vpu_ir::{CompilationConfig, ErrorKind, FrontEnd};

fn slice_layer() -> Layer {
    serde_json::from_str(
        r#"{
            "name": "slice",
            "type": "StridedSlice",
            "params": {
                "begin_mask": "1,1,1,1",
                "end_mask": "1,0,1,0",
                "new_axis_mask": "0,0,0,0",
                "shrink_axis_mask": "0,0,0,0",
                "ellipsis_mask": "0,0,0,0"
            }
        }"#,
    )
    .unwrap()
}

fn const_i32(model: &mut Model, name: &str, values: &[i32]) -> DataRef {
    model
        .add_const_data(
            name,
            DataDesc::new(DataType::S32, vec![values.len()]),
            DataContent::from_slice(values),
        )
        .into()
}

/// Model with FP16 data, constant begin/end and optional constant strides.
fn slice_model(strides: Option<&[i32]>) -> (Model, LayerInstance) {
    let mut model = Model::new("net");
    let mut inputs: Vec<DataRef> = vec![
        model
            .add_input_data("data", DataDesc::new(DataType::FP16, vec![1, 3, 8, 8]))
            .into(),
    ];
    inputs.push(const_i32(&mut model, "begin", &[0, 0, 0, 0]));
    inputs.push(const_i32(&mut model, "end", &[1, 3, 4, 4]));
    if let Some(strides) = strides {
        inputs.push(const_i32(&mut model, "strides", strides));
    }
    let output: DataRef = model
        .add_output_data("output", DataDesc::new(DataType::FP16, vec![1, 3, 4, 4]))
        .into();

    (model, LayerInstance::new(slice_layer(), inputs, vec![output]))
}

fn word(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

#[test]
fn blob_for_slice_without_strides() {
    let (mut model, instance) = slice_model(None);
    let frontend = FrontEnd::default();

    let stages = frontend.build(&mut model, &[instance]).unwrap();
    let blob = frontend.generate_blob(&mut model).unwrap();

    assert_eq!(stages, vec![0]);
    assert_eq!(&blob[..4], &BLOB_MAGIC);
    assert_eq!(word(&blob, 4), 2);
    assert_eq!(word(&blob, 8), 0);
    assert_eq!(word(&blob, 12), 1);

    let stage = &blob[BLOB_HEADER_SIZE..];
    assert_eq!(word(stage, 0), StageType::StridedSlice.blob_code());
    assert_eq!(word(stage, 4), 8);
    assert_eq!(word(stage, 8), 0b1111);
    assert_eq!(word(stage, 12), 0b0101);
    assert_eq!(word(stage, 16), 5);

    let refs: Vec<BufferRef> = stage[20..20 + 5 * BufferRef::SIZE]
        .chunks(BufferRef::SIZE)
        .map(|chunk| BufferRef::from_bytes(chunk).unwrap())
        .collect();
    assert_eq!(refs[0].location, DataLocation::Input);
    assert_eq!(refs[1].location, DataLocation::Blob);
    assert_eq!(refs[2].location, DataLocation::Blob);
    assert_eq!(refs[3], BufferRef::NONE);
    assert_eq!(refs[4].location, DataLocation::Output);

    // begin and end, 16 bytes each
    let constants = &stage[20 + 5 * BufferRef::SIZE..];
    assert_eq!(word(constants, 0), 32);
    assert_eq!(constants.len(), 4 + 32);
    assert_eq!(word(constants, 4 + 16 + 4), 3);
}

#[test]
fn blob_for_slice_with_strides() {
    let (mut model, instance) = slice_model(Some(&[1, 1, 2, 2][..]));
    let frontend = FrontEnd::default();

    frontend.build(&mut model, &[instance]).unwrap();
    let blob = frontend.generate_blob(&mut model).unwrap();

    let stage = &blob[BLOB_HEADER_SIZE..];
    let strides = BufferRef::from_bytes(&stage[20 + 3 * BufferRef::SIZE..]).unwrap();
    assert_eq!(strides.location, DataLocation::Blob);
    assert_eq!(strides.offset, 32);
    assert_eq!(strides.dtype_code, DataType::S32.blob_code());

    let constants = &stage[20 + 5 * BufferRef::SIZE..];
    assert_eq!(word(constants, 0), 48);
}

#[test]
fn configured_blob_version_is_written() {
    let config = CompilationConfig::from_json(r#"{"blob_version": {"major": 3, "minor": 1}}"#)
        .unwrap();
    let (mut model, instance) = slice_model(None);
    let frontend = FrontEnd::new(config);

    frontend.build(&mut model, &[instance]).unwrap();
    let blob = frontend.generate_blob(&mut model).unwrap();

    assert_eq!((word(&blob, 4), word(&blob, 8)), (3, 1));
}

#[test]
fn zero_stride_fails_the_build() {
    let (mut model, instance) = slice_model(Some(&[1, 0, 1, 1][..]));

    let err = FrontEnd::default()
        .build(&mut model, &[instance])
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingCompileTimeData);
    assert!(model.stages().is_empty());
}

#[test]
fn ellipsis_fails_the_build() {
    let (mut model, mut instance) = slice_model(None);
    instance.layer = instance.layer.with_param("ellipsis_mask", "0,0,1,0");

    let err = FrontEnd::default()
        .build(&mut model, &[instance])
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);
}

#[test]
fn replaced_stage_is_encoded() {
    let (mut model, instance) = slice_model(None);
    let frontend = FrontEnd::default();
    let id = frontend.build(&mut model, &[instance]).unwrap()[0];

    let copy = model.stage(id).unwrap().clone();
    let previous = model.replace_stage(id, copy).unwrap();
    let node = previous.node::<StridedSliceStage>().unwrap();
    assert_eq!((node.begin_mask, node.end_mask), (0b1111, 0b0101));

    let blob = frontend.generate_blob(&mut model).unwrap();
    let mut reference = model.clone();
    assert_eq!(blob, frontend.generate_blob(&mut reference).unwrap());
}

#[test]
fn unknown_layers_can_be_skipped() {
    let (mut model, instance) = slice_model(None);
    let pooling = LayerInstance::new(Layer::new("pool", "Pooling"), vec![], vec![]);
    let layers = [pooling, instance];

    let strict = FrontEnd::default();
    let err = strict.build(&mut model.clone(), &layers).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);

    let lenient = FrontEnd::new(CompilationConfig::default().with_ignore_unknown_layers(true));
    let stages = lenient.build(&mut model, &layers).unwrap();
    assert_eq!(stages.len(), 1);
}
