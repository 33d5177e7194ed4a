//! Pipeline module - dataset loading, label normalization, and assembly

pub mod assemble;
pub mod label;
pub mod loader;
pub mod preprocess;

pub use assemble::*;
pub use label::*;
pub use loader::*;
pub use preprocess::*;
