//! Scripted reference providers for the chatcert conformance harness
//!
//! These providers answer from a canned [`Script`] instead of a network
//! backend. They exist to exercise the harness: a well-behaved script passes
//! every scenario, and injected faults let tests cover the harness's
//! failure-detection paths in both execution models.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod blocking;
mod nonblocking;
mod script;

pub use blocking::ScriptedProvider;
pub use nonblocking::AsyncScriptedProvider;
pub use script::{Fault, Script};
