//! Core traits and types for the chatcert conformance harness
//!
//! This crate defines the contract a chatbot provider must satisfy: the
//! `SyncProvider` and `AsyncProvider` traits, the `ResponseRecord` mapping
//! type, the mode options for `ask`/`chat`, and the reply shapes the
//! conformance suites inspect.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod provider;
pub mod types;

// Re-export commonly used items
pub use error::{Error, Result};
pub use provider::{AsyncProvider, SyncProvider};
pub use types::{
    options::{AskOptions, ChatOptions, Optimizer},
    record::ResponseRecord,
    reply::{AskReply, AskShape, ChatReply, ChatShape},
};
