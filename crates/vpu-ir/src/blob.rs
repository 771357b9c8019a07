//! # Blob
//!
//! Binary encoding of a compiled model for the downstream executor.
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │  Header (16 bytes)               │
//! │  - Magic "VPUB" (4 bytes)        │
//! │  - Version major (u32)           │
//! │  - Version minor (u32)           │
//! │  - Stage count (u32)             │
//! ├──────────────────────────────────┤
//! │  Stages, in model order          │
//! │  - Stage type code (u32)         │
//! │  - Params size in bytes (u32)    │
//! │  - Params block                  │
//! │  - Buffer reference count (u32)  │
//! │  - Data block (12 bytes / ref)   │
//! ├──────────────────────────────────┤
//! │  Constant section                │
//! │  - Size in bytes (u32)           │
//! │  - Content, allocation order     │
//! └──────────────────────────────────┘
//! ```
//!
//! All integers are little-endian. Stage payloads are positional: the reader
//! knows each stage type's layout, so neither block carries tags.

mod buffer;
mod serializer;
mod writer;

pub use buffer::*;
pub use serializer::*;
pub use writer::*;
