//! Model loading and the custom object table.

mod loader;
mod objects;

pub use loader::{locate, Generator, MODEL_FILENAME};
pub use objects::{CustomObject, CustomObjects, CUSTOM_DOMAIN, REQUIRED_CUSTOM_OBJECTS};
