//! The provider traits every chatbot implementation must satisfy
//!
//! The two trait families mirror each other: `SyncProvider` blocks and hands
//! back `Iterator`-based sequences, `AsyncProvider` suspends at every call
//! and hands back `Stream`-based sequences. Their observable behavior must
//! be equivalent modulo execution model.

use crate::error::Result;
use crate::types::options::{AskOptions, ChatOptions};
use crate::types::record::ResponseRecord;
use crate::types::reply::{AskReply, ChatReply};
use async_trait::async_trait;

/// A chatbot provider driven with blocking calls
///
/// Streaming replies are single-pass, finite iterators; pulling an element
/// blocks until it is available. `last_response` must reflect the most
/// recent record produced by any `ask` or `chat` call on this instance —
/// overwritten on each call, never merged — and is `None` before the first
/// call. Implementations using interior mutability are responsible for
/// making that update safe themselves.
pub trait SyncProvider {
    /// Record-shaped streaming sequence
    type RecordIter: Iterator<Item = Result<ResponseRecord>>;
    /// Raw text-fragment streaming sequence
    type RawIter: Iterator<Item = Result<String>>;
    /// Chat text-fragment streaming sequence
    type TextIter: Iterator<Item = Result<String>>;

    /// Send a prompt and get the reply shape requested by `options`
    ///
    /// Non-streaming calls must yield `AskReply::Record` and update the
    /// last-response slot. Streaming calls yield `AskReply::Stream` (records)
    /// or `AskReply::RawStream` (plain fragments) when `raw` is set.
    fn ask(
        &self,
        prompt: &str,
        options: AskOptions,
    ) -> Result<AskReply<Self::RecordIter, Self::RawIter>>;

    /// Extract the human-readable text from a record
    ///
    /// Pure projection: must not touch the last-response slot.
    fn get_message(&self, response: &ResponseRecord) -> Result<String>;

    /// Convenience layer over `ask` that always deals in message text
    ///
    /// Non-streaming calls must yield `ChatReply::Message` and update the
    /// last-response slot with the record produced internally. Streaming
    /// calls yield `ChatReply::Stream` of plain fragments. A recognized
    /// optimizer in `options` transforms the prompt before dispatch without
    /// changing the reply shape.
    fn chat(&self, prompt: &str, options: ChatOptions) -> Result<ChatReply<Self::TextIter>>;

    /// The most recent record produced by `ask` or `chat`, if any
    fn last_response(&self) -> Option<ResponseRecord>;
}

/// A chatbot provider driven with cooperative non-blocking calls
///
/// Structurally identical to [`SyncProvider`]; every call is awaited and
/// streaming replies are asynchronous sequences that suspend between
/// elements. Elements are observed in production order.
#[async_trait]
pub trait AsyncProvider: Send + Sync {
    /// Record-shaped streaming sequence
    type RecordStream: futures_core::Stream<Item = Result<ResponseRecord>> + Send + Unpin;
    /// Raw text-fragment streaming sequence
    type RawStream: futures_core::Stream<Item = Result<String>> + Send + Unpin;
    /// Chat text-fragment streaming sequence
    type TextStream: futures_core::Stream<Item = Result<String>> + Send + Unpin;

    /// Send a prompt and get the reply shape requested by `options`
    async fn ask(
        &self,
        prompt: &str,
        options: AskOptions,
    ) -> Result<AskReply<Self::RecordStream, Self::RawStream>>;

    /// Extract the human-readable text from a record
    async fn get_message(&self, response: &ResponseRecord) -> Result<String>;

    /// Convenience layer over `ask` that always deals in message text
    async fn chat(&self, prompt: &str, options: ChatOptions) -> Result<ChatReply<Self::TextStream>>;

    /// The most recent record produced by `ask` or `chat`, if any
    fn last_response(&self) -> Option<ResponseRecord>;
}
