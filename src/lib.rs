pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{json_file::JsonFileDataSource, memory::InMemoryDataSource};
pub use app::shell::Shell;
pub use config::toml_config::TomlConfig;
pub use crate::core::{
    engine::FilterEngine,
    filter::filter_products,
    operators::{available_operators, evaluate},
    session::FilterSession,
};
pub use utils::error::{FilterError, Result};
