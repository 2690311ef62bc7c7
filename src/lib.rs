//! # vt
//!
//! Command-line client for the Val Town API.
//!
//! Every subcommand runs the same pipeline: resolve a token, build one
//! request, send it, and render the JSON answer on stdout.
//!
//! ```text
//! token ─► args / target ─► client ─► render
//! ```

pub mod args;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod target;
pub mod token;

pub use cli::Cli;
pub use client::{RequestSpec, ValTownClient};
pub use error::{Error, ErrorKind};
