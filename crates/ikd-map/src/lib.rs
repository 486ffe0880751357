pub mod engine;
pub mod error;
pub mod state;

pub use engine::{RemapEngine, RemapOutcome};
pub use error::MappingError;
pub use state::HeaderState;
