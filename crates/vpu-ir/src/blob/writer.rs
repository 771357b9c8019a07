//! Whole-model blob writer.

use super::buffer::BufferRef;
use super::serializer::BlobSerializer;
use crate::config::BlobVersion;
use crate::ir::{DataUsage, Model, Stage};

/// Magic bytes at the start of every blob.
pub const BLOB_MAGIC: [u8; 4] = *b"VPUB";

/// Size of the blob header in bytes.
pub const BLOB_HEADER_SIZE: usize = 16;

/// Writes a validated model as a blob.
#[derive(Debug, Clone)]
pub struct BlobWriter {
    version: BlobVersion,
}

impl BlobWriter {
    pub fn new(version: BlobVersion) -> Self {
        Self { version }
    }

    /// Encode `model`. The model must have passed [`Model::validate`]; encoding
    /// itself performs no checks.
    pub fn write(&self, model: &Model) -> Vec<u8> {
        let mut serializer = BlobSerializer::new();

        serializer.append_bytes(&BLOB_MAGIC);
        serializer.append(self.version.major);
        serializer.append(self.version.minor);
        serializer.append(model.stages().len() as u32);

        for stage in model.stages() {
            write_stage(stage, &mut serializer);
        }

        let constants: Vec<&[u8]> = model
            .data()
            .iter()
            .filter(|data| data.usage == DataUsage::Const)
            .filter_map(|data| data.content().map(|content| content.bytes()))
            .collect();
        let section_size: usize = constants.iter().map(|bytes| bytes.len()).sum();

        serializer.append(section_size as u32);
        for bytes in constants {
            serializer.append_bytes(bytes);
        }

        log::debug!(
            "Model {}: wrote blob of {} bytes for {} stages",
            model.name(),
            serializer.len(),
            model.stages().len()
        );

        serializer.into_bytes()
    }
}

fn write_stage(stage: &Stage, serializer: &mut BlobSerializer) {
    let mut params = BlobSerializer::new();
    stage.serialize_params(&mut params);

    let mut data = BlobSerializer::new();
    stage.serialize_data(&mut data);

    serializer.append(stage.stage_type().blob_code());
    serializer.append(params.len() as u32);
    serializer.append_bytes(params.as_slice());
    serializer.append((data.len() / BufferRef::SIZE) as u32);
    serializer.append_bytes(data.as_slice());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_model_has_header_and_empty_constant_section() {
        let model = Model::new("empty");
        let blob = BlobWriter::new(BlobVersion { major: 2, minor: 1 }).write(&model);

        assert_eq!(blob.len(), BLOB_HEADER_SIZE + 4);
        assert_eq!(&blob[..4], b"VPUB");
        assert_eq!(&blob[4..8], &2u32.to_le_bytes());
        assert_eq!(&blob[8..12], &1u32.to_le_bytes());
        assert_eq!(&blob[12..16], &0u32.to_le_bytes());
        assert_eq!(&blob[16..20], &0u32.to_le_bytes());
    }
}
