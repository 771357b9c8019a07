//! Element types understood by the target.

use strum::{Display, EnumString};

/// Element type of a data object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, serde::Serialize, serde::Deserialize,
)]
pub enum DataType {
    FP16,
    FP32,
    U8,
    I8,
    S32,
}

impl DataType {
    /// Every element type.
    pub const ALL: &'static [DataType] = &[
        DataType::FP16,
        DataType::FP32,
        DataType::U8,
        DataType::I8,
        DataType::S32,
    ];

    /// Code written to the blob for this type.
    pub fn blob_code(&self) -> u32 {
        match self {
            DataType::FP16 => 0,
            DataType::U8 => 1,
            DataType::S32 => 2,
            DataType::FP32 => 3,
            DataType::I8 => 4,
        }
    }

    /// Size of one element in bytes.
    pub fn size(&self) -> usize {
        match self {
            DataType::U8 | DataType::I8 => 1,
            DataType::FP16 => 2,
            DataType::FP32 | DataType::S32 => 4,
        }
    }
}

/// Host element types that can back constant content.
pub trait ContentElement: bytemuck::Pod {
    /// The data type matching this host element.
    const DATA_TYPE: DataType;
}

impl ContentElement for i32 {
    const DATA_TYPE: DataType = DataType::S32;
}

impl ContentElement for f32 {
    const DATA_TYPE: DataType = DataType::FP32;
}

impl ContentElement for u8 {
    const DATA_TYPE: DataType = DataType::U8;
}

impl ContentElement for i8 {
    const DATA_TYPE: DataType = DataType::I8;
}
