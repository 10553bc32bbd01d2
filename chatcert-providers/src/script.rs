//! Canned behavior shared by the blocking and non-blocking scripted providers

use chatcert_core::{Error, Optimizer, ResponseRecord, Result};

/// The canned behavior of a scripted provider
///
/// A script holds the reply text and an optional injected fault. Streaming
/// replies chunk the text word by word.
#[derive(Debug, Clone)]
pub struct Script {
    message: String,
    model: String,
    fault: Option<Fault>,
}

/// A deliberate misbehavior injected into a script
///
/// Faults let tests verify that the conformance suites detect the
/// corresponding contract violation or provider error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Fault {
    /// Every `ask`/`chat` call fails with a provider error
    Error(String),
    /// Non-streaming calls answer with a streaming shape
    NonStreamAsStream,
    /// Streaming `ask` calls answer with a single record
    StreamAsRecord,
    /// Streaming replies yield zero elements
    EmptyStreams,
    /// The last-response slot is never updated
    StaleLastResponse,
}

impl Default for Script {
    fn default() -> Self {
        Self::new("Hello! This is a scripted reply.")
    }
}

impl Script {
    /// A well-behaved script answering with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            model: "scripted-1".to_string(),
            fault: None,
        }
    }

    /// Override the model name reported in records
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Inject a deliberate misbehavior
    #[must_use]
    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }

    /// The full reply text
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn has_fault(&self, fault: &Fault) -> bool {
        self.fault.as_ref() == Some(fault)
    }

    /// Fails the call when an `Error` fault is injected
    pub(crate) fn check(&self, operation: &str) -> Result<()> {
        if let Some(Fault::Error(message)) = &self.fault {
            return Err(Error::provider(
                "scripted",
                format!("{operation}: {message}"),
            ));
        }
        Ok(())
    }

    /// The complete record for a prompt
    pub(crate) fn record(&self, prompt: &str) -> ResponseRecord {
        ResponseRecord::new()
            .with("message", self.message.clone())
            .with("prompt", prompt)
            .with("model", self.model.clone())
    }

    /// The reply text chunked word by word, honoring `EmptyStreams`
    pub(crate) fn fragments(&self) -> Vec<Result<String>> {
        if self.has_fault(&Fault::EmptyStreams) {
            return Vec::new();
        }
        self.message
            .split_whitespace()
            .enumerate()
            .map(|(i, word)| {
                if i == 0 {
                    Ok(word.to_string())
                } else {
                    Ok(format!(" {word}"))
                }
            })
            .collect()
    }

    /// The reply chunked as a sequence of partial records
    pub(crate) fn chunk_records(&self, prompt: &str) -> Vec<Result<ResponseRecord>> {
        self.fragments()
            .into_iter()
            .map(|fragment| {
                fragment.map(|text| {
                    ResponseRecord::new()
                        .with("message", text)
                        .with("prompt", prompt)
                        .with("model", self.model.clone())
                })
            })
            .collect()
    }

    /// Apply a recognized optimizer tag to a prompt before dispatch
    pub(crate) fn optimize(prompt: &str, optimizer: Optimizer) -> String {
        match optimizer {
            Optimizer::Code => {
                format!("Provide only code as output, without any explanation.\n\n{prompt}")
            }
        }
    }
}
