//! Core types and utilities shared by every stage of the pipeline

pub mod types;
pub mod error;
pub mod logging;

pub use types::*;
pub use error::Error;
