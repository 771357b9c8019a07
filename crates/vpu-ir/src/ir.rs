//! Target IR: data objects, source layers, stages and the model that owns them.

mod data;
mod data_type;
mod layer;
mod model;
mod stage;

pub use data::*;
pub use data_type::*;
pub use layer::*;
pub use model::*;
pub use stage::*;
