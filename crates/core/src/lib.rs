//! Shared types, errors, and configuration for the ArticleExpress
//! generation engine.

pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::EngineConfig;
pub use error::{ArticleError, ArticleResult};
