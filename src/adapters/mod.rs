// Adapters layer: concrete data source implementations.

pub mod json_file;
pub mod memory;
