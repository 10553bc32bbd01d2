//! Conformance suites for chatbot providers
//!
//! Two structurally mirrored suites drive a provider through the same eight
//! scenarios: [`SyncConformanceSuite`] with blocking calls and iterator
//! consumption, [`AsyncConformanceSuite`] with awaited calls and stream
//! consumption. Each scenario runs against a fresh provider obtained from a
//! factory closure, so no scenario depends on another's side effects, and
//! each produces its own independently reportable verdict.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod async_suite;
mod report;
mod sync_suite;

pub use async_suite::AsyncConformanceSuite;
pub use report::{Outcome, ScenarioReport, SuiteReport};
pub use sync_suite::SyncConformanceSuite;

/// The canonical prompt fixture used when no override is given
pub const TEST_PROMPT: &str = "This is a test prompt";
