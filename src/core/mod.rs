//! Core lookup pipeline
//!
//! - `normalize`: canonical comparison keys for artist/title strings
//! - `text`: markup stripping and entity decoding shared by all providers
//! - `fetch`: the injected HTTP layer
//! - `providers`: one module per lyrics site
//! - `chain`: ordered fallback over providers and artist alternatives

pub mod chain;
pub mod fetch;
pub mod normalize;
pub mod providers;
pub mod text;
