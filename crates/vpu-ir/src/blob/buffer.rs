//! Buffer references written into stage data blocks.

use super::serializer::BlobSerializer;
use crate::ir::{DataLocation, DataRef};

/// Where the executor finds a slot's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferRef {
    pub location: DataLocation,
    pub offset: u32,
    pub dtype_code: u32,
}

impl BufferRef {
    /// Encoded size of one reference in bytes.
    pub const SIZE: usize = 12;

    /// Reference meaning "no buffer", used for placeholder slots.
    pub const NONE: BufferRef = BufferRef {
        location: DataLocation::None,
        offset: 0,
        dtype_code: 0,
    };

    pub fn serialize(&self, serializer: &mut BlobSerializer) {
        serializer.append(self.location.blob_code());
        serializer.append(self.offset);
        serializer.append(self.dtype_code);
    }

    /// Decode one reference from the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let word = |i: usize| -> Option<u32> {
            let chunk = bytes.get(i * 4..i * 4 + 4)?;
            Some(u32::from_le_bytes(chunk.try_into().ok()?))
        };

        let location = match word(0)? {
            0 => DataLocation::None,
            1 => DataLocation::Input,
            2 => DataLocation::Output,
            3 => DataLocation::Blob,
            4 => DataLocation::Bss,
            _ => return None,
        };

        Some(Self {
            location,
            offset: word(1)?,
            dtype_code: word(2)?,
        })
    }
}

impl From<&DataRef> for BufferRef {
    fn from(data: &DataRef) -> Self {
        match data {
            DataRef::Buffer(data) => BufferRef {
                location: data.location,
                offset: data.offset,
                dtype_code: data.desc.dtype.blob_code(),
            },
            DataRef::NoBuffer => BufferRef::NONE,
        }
    }
}

impl DataRef {
    /// Append this slot's buffer reference.
    pub fn serialize_buffer(&self, serializer: &mut BlobSerializer) {
        BufferRef::from(self).serialize(serializer);
    }
}
