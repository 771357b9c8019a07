//! Data objects: descriptors, compile-time content and the references stages hold.

use std::rc::Rc;

use derive_new::new;

use super::data_type::{ContentElement, DataType};

/// Element type and dimensions of a data object.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct DataDesc {
    pub dtype: DataType,
    pub dims: Vec<usize>,
}

impl DataDesc {
    /// Number of elements described (1 for a rank-0 descriptor).
    pub fn total_dim_size(&self) -> usize {
        self.dims.iter().product()
    }

    /// Size of the described data in bytes.
    pub fn byte_size(&self) -> usize {
        self.total_dim_size() * self.dtype.size()
    }
}

/// Compile-time constant content of a data object.
///
/// Bytes are kept in a word-aligned buffer so they can be viewed as any
/// [`ContentElement`] without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct DataContent {
    dtype: DataType,
    words: Vec<u32>,
    len: usize,
}

impl DataContent {
    /// Builds content from typed values.
    pub fn from_slice<E: ContentElement>(values: &[E]) -> Self {
        Self::from_bytes(E::DATA_TYPE, bytemuck::cast_slice(values))
    }

    /// Builds content of the given type from raw bytes.
    pub fn from_bytes(dtype: DataType, bytes: &[u8]) -> Self {
        let mut words = vec![0u32; bytes.len().div_ceil(4)];
        bytemuck::cast_slice_mut::<u32, u8>(&mut words)[..bytes.len()].copy_from_slice(bytes);

        Self {
            dtype,
            words,
            len: bytes.len(),
        }
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    /// Raw content bytes.
    pub fn bytes(&self) -> &[u8] {
        &bytemuck::cast_slice::<u32, u8>(&self.words)[..self.len]
    }

    /// Typed view of the content.
    ///
    /// Returns `None` when the content does not hold elements of type `E`.
    pub fn get<E: ContentElement>(&self) -> Option<&[E]> {
        if self.dtype != E::DATA_TYPE {
            return None;
        }
        bytemuck::try_cast_slice(self.bytes()).ok()
    }
}

/// Role of a data object in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataUsage {
    Input,
    Output,
    Const,
    Intermediate,
}

/// Memory region a data object is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataLocation {
    /// No backing buffer.
    None,
    Input,
    Output,
    /// Constant section of the blob.
    Blob,
    /// Scratch memory reserved at load time.
    Bss,
}

impl DataLocation {
    /// Code written to the blob for this location.
    pub fn blob_code(&self) -> u32 {
        match self {
            DataLocation::None => 0,
            DataLocation::Input => 1,
            DataLocation::Output => 2,
            DataLocation::Blob => 3,
            DataLocation::Bss => 4,
        }
    }
}

/// A data object owned by a [`Model`](super::Model).
#[derive(Debug)]
pub struct Data {
    pub name: String,
    pub usage: DataUsage,
    pub desc: DataDesc,
    /// Constant content, if known at compile time.
    pub content: Option<DataContent>,
    /// Region assigned at allocation.
    pub location: DataLocation,
    /// Index (inputs/outputs) or byte offset (blob/bss) inside `location`.
    pub offset: u32,
}

impl Data {
    pub fn content(&self) -> Option<&DataContent> {
        self.content.as_ref()
    }
}

/// Shared handle to a data object.
pub type DataHandle = Rc<Data>;

/// A stage input or output slot.
#[derive(Debug, Clone)]
pub enum DataRef {
    /// A real data object.
    Buffer(DataHandle),
    /// Placeholder used to keep a stage's arity fixed. Has no
    /// dimensions, no content and no buffer.
    NoBuffer,
}

impl DataRef {
    /// The referenced data object, `None` for the placeholder.
    pub fn data(&self) -> Option<&Data> {
        match self {
            DataRef::Buffer(data) => Some(data),
            DataRef::NoBuffer => None,
        }
    }

    /// Whether this slot is the placeholder.
    pub fn is_fake(&self) -> bool {
        matches!(self, DataRef::NoBuffer)
    }

    pub fn dtype(&self) -> Option<DataType> {
        self.data().map(|data| data.desc.dtype)
    }

    pub fn content(&self) -> Option<&DataContent> {
        self.data().and_then(Data::content)
    }

    /// Identity comparison: both slots reference the same data object,
    /// or both are placeholders.
    pub fn same_as(&self, other: &DataRef) -> bool {
        match (self, other) {
            (DataRef::Buffer(a), DataRef::Buffer(b)) => Rc::ptr_eq(a, b),
            (DataRef::NoBuffer, DataRef::NoBuffer) => true,
            _ => false,
        }
    }
}

impl From<DataHandle> for DataRef {
    fn from(data: DataHandle) -> Self {
        DataRef::Buffer(data)
    }
}
