//! CLI command implementations.
//!
//! - `demo`: scripted walk through the booking scenarios
//! - `session`: line-oriented hold/reserve driver
//! - `validate`: check a configuration file
//! - `show_config`: print the effective configuration
//! - `completions`: shell completion scripts

pub mod completions;
pub mod demo;
pub mod session;
pub mod show_config;
pub mod validate;

pub use completions::CompletionsCommand;
pub use demo::DemoCommand;
pub use session::SessionCommand;
pub use show_config::ShowConfigCommand;
pub use validate::ValidateCommand;
