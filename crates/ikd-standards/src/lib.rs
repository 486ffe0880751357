pub mod catalog;
pub mod embedded;

pub use catalog::{ConfigError, KitLayoutCatalog};
pub use embedded::DEFAULT_KIT_LAYOUTS;
