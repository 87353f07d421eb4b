pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, document::ModelDocument};
pub use core::{
    args::ConstructArgs,
    class::{ClassDef, ModelClass},
    constraint::Constraint,
    instance::ModelInstance,
    property::{PropertyDefault, PropertySpec},
    registry::ClassRegistry,
};
pub use utils::error::{ModelError, Result};
