pub mod config;
pub mod error;
pub mod types;

pub use config::CodexConfig;
pub use error::{ChamberError, Result};
pub use types::{LevelKey, LevelType};
