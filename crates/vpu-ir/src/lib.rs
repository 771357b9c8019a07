//! Graph-transformer stages for the VPU target IR.
//!
//! The crate turns source layer descriptions into IR stages, validates them
//! and encodes them into the blob consumed by the executor:
//!
//! - [`frontend`]: dispatches layers to per-type parsers
//! - [`stages`]: stage kinds and their parsers
//! - [`ir`]: model, data objects and the stage capability contract
//! - [`blob`]: append-only serializer and the model blob writer
//! - [`mask`]: textual per-axis mask codec

pub mod blob;
pub mod config;
pub mod error;
pub mod frontend;
pub mod ir;
pub mod mask;
pub mod stages;

#[cfg(test)]
mod test_utils;

pub use config::CompilationConfig;
pub use error::{Error, ErrorKind, Result};
pub use frontend::FrontEnd;
