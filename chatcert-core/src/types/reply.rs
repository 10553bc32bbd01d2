//! Reply shapes returned by `ask` and `chat`
//!
//! A provider answers each call with one of a small set of shapes, and the
//! conformance suites check that the shape matches the requested mode. The
//! enums are generic over the sequence types so the same definitions serve
//! both the blocking (`Iterator`) and non-blocking (`Stream`) provider
//! families.

use crate::types::record::ResponseRecord;
use std::fmt;

/// The reply to an `ask` call
#[derive(Debug)]
pub enum AskReply<S, R> {
    /// One complete structured record (non-streaming mode)
    Record(ResponseRecord),
    /// A lazy, single-pass, finite sequence of structured records
    Stream(S),
    /// A lazy, single-pass, finite sequence of plain text fragments
    RawStream(R),
}

impl<S, R> AskReply<S, R> {
    /// The shape of this reply, for diagnostics
    pub const fn shape(&self) -> AskShape {
        match self {
            AskReply::Record(_) => AskShape::Record,
            AskReply::Stream(_) => AskShape::Stream,
            AskReply::RawStream(_) => AskShape::RawStream,
        }
    }
}

/// Shape tag for an `ask` reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskShape {
    /// A single structured record
    Record,
    /// A sequence of structured records
    Stream,
    /// A sequence of plain text fragments
    RawStream,
}

impl fmt::Display for AskShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AskShape::Record => write!(f, "a record"),
            AskShape::Stream => write!(f, "a record stream"),
            AskShape::RawStream => write!(f, "a raw fragment stream"),
        }
    }
}

/// The reply to a `chat` call
#[derive(Debug)]
pub enum ChatReply<T> {
    /// The fully assembled message text (non-streaming mode)
    Message(String),
    /// A lazy sequence of text fragments; chat streaming always
    /// auto-extracts text, unlike wrapped `ask` streaming
    Stream(T),
}

impl<T> ChatReply<T> {
    /// The shape of this reply, for diagnostics
    pub const fn shape(&self) -> ChatShape {
        match self {
            ChatReply::Message(_) => ChatShape::Message,
            ChatReply::Stream(_) => ChatShape::Stream,
        }
    }
}

/// Shape tag for a `chat` reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatShape {
    /// A single message string
    Message,
    /// A sequence of text fragments
    Stream,
}

impl fmt::Display for ChatShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatShape::Message => write!(f, "a message string"),
            ChatShape::Stream => write!(f, "a fragment stream"),
        }
    }
}
