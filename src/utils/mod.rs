//! Utility modules
//!
//! - `logging`: tracing subscriber configuration

pub mod logging;
