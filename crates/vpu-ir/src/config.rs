//! Compilation settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Blob format version written into the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobVersion {
    pub major: u32,
    pub minor: u32,
}

impl Default for BlobVersion {
    fn default() -> Self {
        Self { major: 2, minor: 0 }
    }
}

/// Settings driving the frontend and the blob writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilationConfig {
    /// Skip layers without a parser instead of failing.
    pub ignore_unknown_layers: bool,
    /// Run the structural validator once all layers are parsed.
    pub verify_after_build: bool,
    pub blob_version: BlobVersion,
}

impl Default for CompilationConfig {
    fn default() -> Self {
        Self {
            ignore_unknown_layers: false,
            verify_after_build: true,
            blob_version: BlobVersion::default(),
        }
    }
}

impl CompilationConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn with_ignore_unknown_layers(mut self, ignore: bool) -> Self {
        self.ignore_unknown_layers = ignore;
        self
    }

    pub fn with_verify_after_build(mut self, verify: bool) -> Self {
        self.verify_after_build = verify;
        self
    }
}
