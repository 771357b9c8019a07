//! Stage kinds. Each submodule implements one operator: its [`StageNode`](crate::ir::StageNode)
//! and the frontend parser that builds it from a source layer.

pub mod strided_slice;
