//! Core types and trait definitions for the vetreg clinic registry.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod clock;
pub mod error;
pub mod id;
pub mod model;
pub mod registry;
pub mod report;
pub mod rules;

pub use clock::Clock;
pub use error::{Error, ErrorKind, RegistryError, Result};
