//! The cooperative (non-blocking) conformance suite
//!
//! A parallel restatement of the blocking suite: the same eight scenarios
//! and the same verdicts, but every provider call is awaited and every
//! streaming reply is drained with a suspension per element. Elements are
//! asserted in production order.

use crate::report::{ScenarioReport, SuiteReport};
use crate::TEST_PROMPT;
use chatcert_core::{
    AskOptions, AskReply, AsyncProvider, ChatOptions, ChatReply, Optimizer, Result,
};
use futures::{Stream, StreamExt};

/// Drives an [`AsyncProvider`] through the eight contract scenarios
///
/// Scenario names and verdict semantics match [`SyncConformanceSuite`]
/// exactly, so reports from the two execution models can be compared
/// one to one.
///
/// [`SyncConformanceSuite`]: crate::SyncConformanceSuite
#[derive(Debug, Clone)]
pub struct AsyncConformanceSuite {
    prompt: String,
}

impl Default for AsyncConformanceSuite {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncConformanceSuite {
    /// A suite using the canonical prompt fixture
    pub fn new() -> Self {
        Self::with_prompt(TEST_PROMPT)
    }

    /// A suite using a caller-supplied prompt
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// Run all eight scenarios, each against a fresh provider
    ///
    /// Scenarios run to completion one after another; the suite introduces
    /// no concurrency of its own.
    pub async fn run<P, F>(&self, factory: F) -> SuiteReport
    where
        P: AsyncProvider,
        F: Fn() -> P,
    {
        SuiteReport::new(vec![
            self.ask_non_stream(&factory()).await,
            self.ask_stream(&factory()).await,
            self.ask_stream_raw(&factory()).await,
            self.get_message(&factory()).await,
            self.chat_non_stream(&factory()).await,
            self.chat_stream(&factory()).await,
            self.chat_optimizer(&factory()).await,
            self.last_response(&factory()).await,
        ])
    }

    async fn ask_non_stream<P: AsyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "ask_non_stream";
        match provider.ask(&self.prompt, AskOptions::default()).await {
            Ok(AskReply::Record(_)) => ScenarioReport::passed(NAME),
            Ok(reply) => ScenarioReport::failed(
                NAME,
                format!("ask without streaming returned {}", reply.shape()),
            ),
            Err(error) => ScenarioReport::errored(NAME, &error),
        }
    }

    async fn ask_stream<P: AsyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "ask_stream";
        match provider.ask(&self.prompt, AskOptions::streaming()).await {
            Ok(AskReply::Stream(chunks)) => drain(NAME, chunks).await,
            Ok(reply) => ScenarioReport::failed(
                NAME,
                format!("streaming ask returned {}", reply.shape()),
            ),
            Err(error) => ScenarioReport::errored(NAME, &error),
        }
    }

    async fn ask_stream_raw<P: AsyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "ask_stream_raw";
        match provider.ask(&self.prompt, AskOptions::raw_streaming()).await {
            Ok(AskReply::RawStream(fragments)) => drain(NAME, fragments).await,
            Ok(reply) => ScenarioReport::failed(
                NAME,
                format!("raw streaming ask returned {}", reply.shape()),
            ),
            Err(error) => ScenarioReport::errored(NAME, &error),
        }
    }

    async fn get_message<P: AsyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "get_message";
        let record = match provider.ask(&self.prompt, AskOptions::default()).await {
            Ok(AskReply::Record(record)) => record,
            Ok(reply) => {
                return ScenarioReport::failed(
                    NAME,
                    format!("ask without streaming returned {}", reply.shape()),
                )
            }
            Err(error) => return ScenarioReport::errored(NAME, &error),
        };
        match provider.get_message(&record).await {
            Ok(_) => ScenarioReport::passed(NAME),
            Err(error) => ScenarioReport::errored(NAME, &error),
        }
    }

    async fn chat_non_stream<P: AsyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "chat_non_stream";
        match provider.chat(&self.prompt, ChatOptions::default()).await {
            Ok(ChatReply::Message(_)) => ScenarioReport::passed(NAME),
            Ok(reply) => ScenarioReport::failed(
                NAME,
                format!("chat without streaming returned {}", reply.shape()),
            ),
            Err(error) => ScenarioReport::errored(NAME, &error),
        }
    }

    async fn chat_stream<P: AsyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "chat_stream";
        match provider.chat(&self.prompt, ChatOptions::streaming()).await {
            Ok(ChatReply::Stream(fragments)) => drain(NAME, fragments).await,
            Ok(reply) => ScenarioReport::failed(
                NAME,
                format!("streaming chat returned {}", reply.shape()),
            ),
            Err(error) => ScenarioReport::errored(NAME, &error),
        }
    }

    async fn chat_optimizer<P: AsyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "chat_optimizer";
        let options = ChatOptions::optimized(Optimizer::Code);
        match provider.chat(&self.prompt, options).await {
            Ok(ChatReply::Message(_)) => ScenarioReport::passed(NAME),
            Ok(reply) => ScenarioReport::failed(
                NAME,
                format!("optimized chat returned {}", reply.shape()),
            ),
            Err(error) => ScenarioReport::errored(NAME, &error),
        }
    }

    async fn last_response<P: AsyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "last_response";
        if let Err(error) = provider.chat(&self.prompt, ChatOptions::default()).await {
            return ScenarioReport::errored(NAME, &error);
        }
        match provider.last_response() {
            Some(_) => ScenarioReport::passed(NAME),
            None => ScenarioReport::failed(NAME, "last_response is unset after chat"),
        }
    }
}

/// Drain a streaming reply, suspending per element, classifying pulls
async fn drain<T, S>(name: &'static str, mut elements: S) -> ScenarioReport
where
    S: Stream<Item = Result<T>> + Unpin,
{
    let mut count = 0;
    while let Some(element) = elements.next().await {
        match element {
            Ok(_) => count += 1,
            Err(error) => return ScenarioReport::errored(name, &error),
        }
    }
    ScenarioReport::passed_with_elements(name, count)
}
