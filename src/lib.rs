//! Library crate for user-roster.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state, key handling and the event loop (`app`)
//! - Command line arguments and log setup (`cli`)
//! - Error and result types (`error`)
//! - URL opener for map links (`launch`)
//! - User record types (`model`)
//! - Background retrieval and the local user list (`source`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `user-roster` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod cli;
pub mod error;
pub mod launch;
pub mod model;
pub mod source;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, FetchError, Result};
