//! Core of the `fetch_events` tool.
//!
//! This crate turns the positional arguments of a run into fetch targets,
//! builds the external calendar tool command line for each one, runs them
//! concurrently, and writes the captured output in a fixed section order.

pub mod command;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod orchestrator;
pub mod target;

pub use error::{FetchError, FetchResult};
