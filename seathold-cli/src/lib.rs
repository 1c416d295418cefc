//! Library exports for seathold-cli.
//!
//! The CLI structure is exported so documentation tooling can render it.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
