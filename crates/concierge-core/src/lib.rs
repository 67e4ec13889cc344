pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::Catalog;
pub use config::ConciergeConfig;
pub use error::{ConciergeError, Result};
pub use types::*;
