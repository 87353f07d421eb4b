pub mod args;
pub mod class;
pub mod constraint;
pub mod instance;
pub mod property;
pub mod registry;
pub mod text;

pub use crate::domain::model::{SerializedModel, Value};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
