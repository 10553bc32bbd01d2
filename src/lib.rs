//! Chatcert - a conformance harness for chatbot provider implementations
//!
//! A provider exposes four operations - `ask`, `get_message`, `chat`, and a
//! readable last-response slot - in both a blocking and a cooperative
//! non-blocking variant. Chatcert verifies that an implementation honors the
//! contract governing those operations: which reply shape each mode returns,
//! how streaming sequences behave, and how the last-response state is kept.
//!
//! # Quick Start
//!
//! ```
//! use chatcert::harness::SyncConformanceSuite;
//! use chatcert::providers::ScriptedProvider;
//!
//! let report = SyncConformanceSuite::new().run(ScriptedProvider::default);
//! assert!(report.passed(), "{report}");
//! ```
//!
//! The async suite is the structurally identical cooperative restatement:
//!
//! ```
//! use chatcert::harness::AsyncConformanceSuite;
//! use chatcert::providers::AsyncScriptedProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let report = AsyncConformanceSuite::new()
//!     .run(AsyncScriptedProvider::default)
//!     .await;
//! assert!(report.passed(), "{report}");
//! # }
//! ```

#![warn(missing_docs)]

// Re-export core types
pub use chatcert_core::*;

pub mod harness {
    //! The sync and async conformance suites
    pub use chatcert_harness::*;
}

pub mod providers {
    //! Scripted reference providers
    pub use chatcert_providers::*;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use chatcert_core::{
        AskOptions, AskReply, AsyncProvider, ChatOptions, ChatReply, Error, Optimizer,
        ResponseRecord, SyncProvider,
    };
    pub use chatcert_harness::{
        AsyncConformanceSuite, SuiteReport, SyncConformanceSuite, TEST_PROMPT,
    };
}
