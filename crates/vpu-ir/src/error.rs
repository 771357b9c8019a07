//! Error taxonomy shared by the frontend, the structural validator and the blob writer.

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed textual parameter (e.g. a mask string).
    Format,
    /// Wrong number of inputs or outputs.
    Arity,
    /// Element type mismatch between stage slots.
    Type,
    /// The source operator uses a variant with no lowering strategy.
    UnsupportedFeature,
    /// Data that must be known at compile time is not.
    MissingCompileTimeData,
    /// Invalid compilation configuration.
    Config,
    /// Misuse of the IR container (unknown stage, I/O failure).
    Internal,
}

/// Errors raised while translating, validating or encoding stages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported mask value: only 0 or 1 are supported, but got {character:?} instead")]
    MaskFormat { character: char },

    #[error("Unsupported mask value: masks are limited to {max_axes} axes")]
    MaskTooLong { max_axes: u32 },

    #[error(
        "{action} layer {layer} with type {layer_type} failed: number of inputs should be {expected}, but {actual} were provided"
    )]
    InvalidInputCount {
        action: &'static str,
        layer: String,
        layer_type: String,
        expected: &'static str,
        actual: usize,
    },

    #[error(
        "{action} layer {layer} with type {layer_type} failed: number of outputs should be {expected}, but {actual} were provided"
    )]
    InvalidOutputCount {
        action: &'static str,
        layer: String,
        layer_type: String,
        expected: &'static str,
        actual: usize,
    },

    #[error(
        "Validating layer {layer} with type {layer_type} failed: {slot} has type {actual}, expected {expected}"
    )]
    TypeMismatch {
        layer: String,
        layer_type: String,
        slot: String,
        expected: String,
        actual: String,
    },

    #[error("Checking {layer} with type {layer_type} failed: {attribute} parameter is not supported")]
    UnsupportedAttribute {
        layer: String,
        layer_type: String,
        attribute: &'static str,
    },

    #[error("Checking {layer} with type {layer_type} failed: content for {input} is not available")]
    MissingConstant {
        layer: String,
        layer_type: String,
        input: &'static str,
    },

    #[error(
        "Checking {layer} with type {layer_type} failed: non-positive stride {value} at index {index} is not supported"
    )]
    NonPositiveStride {
        layer: String,
        layer_type: String,
        index: usize,
        value: i32,
    },

    #[error("Layer {layer} has unsupported type {layer_type}")]
    UnsupportedLayer { layer: String, layer_type: String },

    #[error("Stage with id {0} does not exist in model {1}")]
    UnknownStage(usize, String),

    #[error("Invalid compilation config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MaskFormat { .. } | Error::MaskTooLong { .. } => ErrorKind::Format,
            Error::InvalidInputCount { .. } | Error::InvalidOutputCount { .. } => ErrorKind::Arity,
            Error::TypeMismatch { .. } => ErrorKind::Type,
            Error::UnsupportedAttribute { .. } | Error::UnsupportedLayer { .. } => {
                ErrorKind::UnsupportedFeature
            }
            Error::MissingConstant { .. } | Error::NonPositiveStride { .. } => {
                ErrorKind::MissingCompileTimeData
            }
            Error::Config(_) => ErrorKind::Config,
            Error::UnknownStage(..) | Error::Io(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn input_count_message_names_layer() {
        let err = Error::InvalidInputCount {
            action: "Parsing",
            layer: "slice1".to_string(),
            layer_type: "StridedSlice".to_string(),
            expected: "3 or 4",
            actual: 5,
        };

        assert_eq!(err.kind(), ErrorKind::Arity);
        assert_snapshot!(err.to_string(), @"Parsing layer slice1 with type StridedSlice failed: number of inputs should be 3 or 4, but 5 were provided");
    }

    #[test]
    fn mask_format_message_names_character() {
        let err = Error::MaskFormat { character: 'x' };

        assert_eq!(err.kind(), ErrorKind::Format);
        assert_snapshot!(err.to_string(), @"Unsupported mask value: only 0 or 1 are supported, but got 'x' instead");
    }

    #[test]
    fn stride_errors_are_compile_time_data_errors() {
        let err = Error::NonPositiveStride {
            layer: "slice1".to_string(),
            layer_type: "StridedSlice".to_string(),
            index: 2,
            value: -1,
        };

        assert_eq!(err.kind(), ErrorKind::MissingCompileTimeData);
        assert_snapshot!(err.to_string(), @"Checking slice1 with type StridedSlice failed: non-positive stride -1 at index 2 is not supported");
    }
}
