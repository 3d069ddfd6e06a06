//! # caw-cli
//!
//! Command-line client for the Caw platform.
//!
//! Provides commands for:
//! - Hooking and unhooking the Caw handlers on the Faz layer
//! - Registering and following users
//! - Posting caws and reading threads
//!
//! # Architecture
//!
//! The CLI connects to the Faz service via WebSocket and sends one generic
//! event per operation. The [`client::CawClient`] binds each operation to
//! its request and reply schemas and packs them into the event payload.
//!
//! ```text
//! ┌───────────┐     Faz frames        ┌─────────────────┐
//! │  caw-cli  │◄─────────────────────►│   faz service   │
//! └───────────┘     (WebSocket)       └─────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod registry;
pub mod transport;

pub use cli::{Cli, Commands, Format};
pub use client::{CawClient, HookOutcome};
pub use commands::Action;
pub use config::ClientConfig;
pub use error::CliError;
pub use output::OutputFormat;
pub use registry::OperationRegistry;
pub use transport::{FazConnection, FazService};
