//! chorekit - video chores from the command line
//!
//! Action pipelines over a single video (`vedit`), batch re-encoding and URL
//! downloads. The library crate exposes every component for the binary and
//! for integration testing.

pub mod config;
pub mod context;
pub mod download;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod reencode;

pub use error::{Error, Result};
