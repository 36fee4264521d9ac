//! # ADX Common Library
//!
//! Shared code for the ADX diagnosis crates including:
//! - Common error types
//! - Configuration loading
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
