//! Mode options for `ask` and `chat` calls

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Mode flags for an `ask` call
///
/// The default is a plain single-shot query. `stream` switches to incremental
/// delivery of structured records; `raw` additionally strips the structural
/// framing so elements are plain text fragments. `raw` without `stream` has
/// no effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AskOptions {
    /// Deliver the answer incrementally as a lazy sequence
    pub stream: bool,
    /// In streaming mode, yield plain text fragments instead of records
    pub raw: bool,
}

impl AskOptions {
    /// Streaming mode with record-shaped elements
    pub const fn streaming() -> Self {
        Self {
            stream: true,
            raw: false,
        }
    }

    /// Streaming mode with plain-text elements
    pub const fn raw_streaming() -> Self {
        Self {
            stream: true,
            raw: true,
        }
    }
}

/// Mode flags for a `chat` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatOptions {
    /// Deliver the message incrementally as a lazy sequence of fragments
    pub stream: bool,
    /// Optional prompt transformation applied before dispatch
    pub optimizer: Option<Optimizer>,
}

impl ChatOptions {
    /// Streaming mode
    pub const fn streaming() -> Self {
        Self {
            stream: true,
            optimizer: None,
        }
    }

    /// Non-streaming mode with a prompt optimizer
    pub const fn optimized(optimizer: Optimizer) -> Self {
        Self {
            stream: false,
            optimizer: Some(optimizer),
        }
    }
}

/// A named prompt transformation applied before dispatch
///
/// The transformation itself belongs to the provider; the contract only
/// requires that the tag be recognized and that using one not change the
/// shape of the `chat` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Optimizer {
    /// Bias the prompt toward a code-only answer
    Code,
}

impl Optimizer {
    /// The wire/tag name for this optimizer
    pub const fn as_str(self) -> &'static str {
        match self {
            Optimizer::Code => "code",
        }
    }
}

impl fmt::Display for Optimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Optimizer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Optimizer::Code),
            other => Err(Error::UnknownOptimizer(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_options_defaults() {
        let options = AskOptions::default();
        assert!(!options.stream);
        assert!(!options.raw);

        assert!(AskOptions::streaming().stream);
        assert!(!AskOptions::streaming().raw);
        assert!(AskOptions::raw_streaming().raw);
    }

    #[test]
    fn test_optimizer_round_trip() {
        let optimizer: Optimizer = "code".parse().unwrap();
        assert_eq!(optimizer, Optimizer::Code);
        assert_eq!(optimizer.to_string(), "code");
    }

    #[test]
    fn test_unknown_optimizer_tag() {
        let err = "shell".parse::<Optimizer>().unwrap_err();
        assert!(matches!(err, Error::UnknownOptimizer(tag) if tag == "shell"));
    }
}
