pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use config::Config;
pub use error::{LyrfetchError, Result};
