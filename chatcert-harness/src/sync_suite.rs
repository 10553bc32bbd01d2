//! The blocking conformance suite

use crate::report::{ScenarioReport, SuiteReport};
use crate::TEST_PROMPT;
use chatcert_core::{
    AskOptions, AskReply, ChatOptions, ChatReply, Optimizer, Result, SyncProvider,
};

/// Drives a [`SyncProvider`] through the eight contract scenarios
///
/// Every scenario gets its own fresh provider from the factory closure and
/// produces its own verdict; one scenario's failure never blocks the rest.
/// No call is retried and no provider error is suppressed.
///
/// # Examples
///
/// ```
/// use chatcert_harness::SyncConformanceSuite;
/// use chatcert_providers::ScriptedProvider;
///
/// let report = SyncConformanceSuite::new().run(ScriptedProvider::default);
/// assert!(report.passed(), "{report}");
/// ```
#[derive(Debug, Clone)]
pub struct SyncConformanceSuite {
    prompt: String,
}

impl Default for SyncConformanceSuite {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncConformanceSuite {
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
    pub fn run<P, F>(&self, factory: F) -> SuiteReport
    where
        P: SyncProvider,
        F: Fn() -> P,
    {
        SuiteReport::new(vec![
            self.ask_non_stream(&factory()),
            self.ask_stream(&factory()),
            self.ask_stream_raw(&factory()),
            self.get_message(&factory()),
            self.chat_non_stream(&factory()),
            self.chat_stream(&factory()),
            self.chat_optimizer(&factory()),
            self.last_response(&factory()),
        ])
    }

    /// Ask non-stream: the reply must be a single record.
    fn ask_non_stream<P: SyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "ask_non_stream";
        match provider.ask(&self.prompt, AskOptions::default()) {
            Ok(AskReply::Record(_)) => ScenarioReport::passed(NAME),
            Ok(reply) => ScenarioReport::failed(
                NAME,
                format!("ask without streaming returned {}", reply.shape()),
            ),
            Err(error) => ScenarioReport::errored(NAME, &error),
        }
    }

    /// Ask stream: a record stream, drained eagerly to completion.
    fn ask_stream<P: SyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "ask_stream";
        match provider.ask(&self.prompt, AskOptions::streaming()) {
            Ok(AskReply::Stream(chunks)) => drain(NAME, chunks),
            Ok(reply) => ScenarioReport::failed(
                NAME,
                format!("streaming ask returned {}", reply.shape()),
            ),
            Err(error) => ScenarioReport::errored(NAME, &error),
        }
    }

    /// Ask stream raw: a plain fragment stream, drained to completion.
    fn ask_stream_raw<P: SyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "ask_stream_raw";
        match provider.ask(&self.prompt, AskOptions::raw_streaming()) {
            Ok(AskReply::RawStream(fragments)) => drain(NAME, fragments),
            Ok(reply) => ScenarioReport::failed(
                NAME,
                format!("raw streaming ask returned {}", reply.shape()),
            ),
            Err(error) => ScenarioReport::errored(NAME, &error),
        }
    }

    /// Get message: extraction from a non-stream record yields text.
    fn get_message<P: SyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "get_message";
        let record = match provider.ask(&self.prompt, AskOptions::default()) {
            Ok(AskReply::Record(record)) => record,
            Ok(reply) => {
                return ScenarioReport::failed(
                    NAME,
                    format!("ask without streaming returned {}", reply.shape()),
                )
            }
            Err(error) => return ScenarioReport::errored(NAME, &error),
        };
        match provider.get_message(&record) {
            Ok(_) => ScenarioReport::passed(NAME),
            Err(error) => ScenarioReport::errored(NAME, &error),
        }
    }

    /// Chat non-stream: the reply must be exactly a message string.
    fn chat_non_stream<P: SyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "chat_non_stream";
        match provider.chat(&self.prompt, ChatOptions::default()) {
            Ok(ChatReply::Message(_)) => ScenarioReport::passed(NAME),
            Ok(reply) => ScenarioReport::failed(
                NAME,
                format!("chat without streaming returned {}", reply.shape()),
            ),
            Err(error) => ScenarioReport::errored(NAME, &error),
        }
    }

    /// Chat stream: a fragment stream, every element plain text.
    fn chat_stream<P: SyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "chat_stream";
        match provider.chat(&self.prompt, ChatOptions::streaming()) {
            Ok(ChatReply::Stream(fragments)) => drain(NAME, fragments),
            Ok(reply) => ScenarioReport::failed(
                NAME,
                format!("streaming chat returned {}", reply.shape()),
            ),
            Err(error) => ScenarioReport::errored(NAME, &error),
        }
    }

    /// Chat with the code optimizer: still a message string.
    fn chat_optimizer<P: SyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "chat_optimizer";
        match provider.chat(&self.prompt, ChatOptions::optimized(Optimizer::Code)) {
            Ok(ChatReply::Message(_)) => ScenarioReport::passed(NAME),
            Ok(reply) => ScenarioReport::failed(
                NAME,
                format!("optimized chat returned {}", reply.shape()),
            ),
            Err(error) => ScenarioReport::errored(NAME, &error),
        }
    }

    /// Last response: after a chat call the slot holds a record.
    fn last_response<P: SyncProvider>(&self, provider: &P) -> ScenarioReport {
        const NAME: &str = "last_response";
        if let Err(error) = provider.chat(&self.prompt, ChatOptions::default()) {
            return ScenarioReport::errored(NAME, &error);
        }
        match provider.last_response() {
            Some(_) => ScenarioReport::passed(NAME),
            None => ScenarioReport::failed(NAME, "last_response is unset after chat"),
        }
    }
}

/// Consume a streaming reply eagerly, classifying element pulls
///
/// A zero-element sequence still passes; the count is recorded on the
/// report.
fn drain<T>(name: &'static str, elements: impl Iterator<Item = Result<T>>) -> ScenarioReport {
    let mut count = 0;
    for element in elements {
        match element {
            Ok(_) => count += 1,
            Err(error) => return ScenarioReport::errored(name, &error),
        }
    }
    ScenarioReport::passed_with_elements(name, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Outcome;
    use chatcert_core::{Error, ResponseRecord};
    use pretty_assertions::assert_eq;
    use std::sync::{PoisonError, RwLock};

    type CannedIter<T> = std::vec::IntoIter<Result<T>>;

    /// Minimal well-behaved provider, cut down to what the suite exercises
    #[derive(Default)]
    struct EchoProvider {
        last: RwLock<Option<ResponseRecord>>,
    }

    impl EchoProvider {
        fn record(prompt: &str) -> ResponseRecord {
            ResponseRecord::new()
                .with("message", format!("echo: {prompt}"))
                .with("prompt", prompt)
        }

        fn remember(&self, record: &ResponseRecord) {
            *self.last.write().unwrap_or_else(PoisonError::into_inner) = Some(record.clone());
        }
    }

    impl SyncProvider for EchoProvider {
        type RecordIter = CannedIter<ResponseRecord>;
        type RawIter = CannedIter<String>;
        type TextIter = CannedIter<String>;

        fn ask(
            &self,
            prompt: &str,
            options: AskOptions,
        ) -> Result<AskReply<Self::RecordIter, Self::RawIter>> {
            let record = Self::record(prompt);
            self.remember(&record);
            if options.stream {
                if options.raw {
                    Ok(AskReply::RawStream(
                        vec![Ok("echo: ".to_string()), Ok(prompt.to_string())].into_iter(),
                    ))
                } else {
                    Ok(AskReply::Stream(vec![Ok(record)].into_iter()))
                }
            } else {
                Ok(AskReply::Record(record))
            }
        }

        fn get_message(&self, response: &ResponseRecord) -> Result<String> {
            response
                .get_str("message")
                .map(str::to_string)
                .ok_or_else(|| Error::MalformedRecord("missing message".into()))
        }

        fn chat(&self, prompt: &str, options: ChatOptions) -> Result<ChatReply<Self::TextIter>> {
            let record = Self::record(prompt);
            self.remember(&record);
            if options.stream {
                Ok(ChatReply::Stream(
                    vec![Ok(format!("echo: {prompt}"))].into_iter(),
                ))
            } else {
                Ok(ChatReply::Message(format!("echo: {prompt}")))
            }
        }

        fn last_response(&self) -> Option<ResponseRecord> {
            self.last
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    /// Provider whose chat answers with the wrong shape
    struct ChattyStreamer(EchoProvider);

    impl SyncProvider for ChattyStreamer {
        type RecordIter = CannedIter<ResponseRecord>;
        type RawIter = CannedIter<String>;
        type TextIter = CannedIter<String>;

        fn ask(
            &self,
            prompt: &str,
            options: AskOptions,
        ) -> Result<AskReply<Self::RecordIter, Self::RawIter>> {
            self.0.ask(prompt, options)
        }

        fn get_message(&self, response: &ResponseRecord) -> Result<String> {
            self.0.get_message(response)
        }

        fn chat(&self, prompt: &str, _options: ChatOptions) -> Result<ChatReply<Self::TextIter>> {
            // Always streams, even when a plain message was requested
            self.0.chat(prompt, ChatOptions::streaming())
        }

        fn last_response(&self) -> Option<ResponseRecord> {
            self.0.last_response()
        }
    }

    #[test_log::test]
    fn test_conformant_provider_passes_all_scenarios() {
        let report = SyncConformanceSuite::new().run(EchoProvider::default);
        assert!(report.passed(), "{report}");
        assert_eq!(report.scenarios().len(), 8);
    }

    #[test]
    fn test_wrong_chat_shape_fails_only_chat_scenarios() {
        let suite = SyncConformanceSuite::new();
        let report = suite.run(|| ChattyStreamer(EchoProvider::default()));

        let failed: Vec<_> = report
            .failures()
            .iter()
            .map(|scenario| scenario.name)
            .collect();
        assert_eq!(failed, vec!["chat_non_stream", "chat_optimizer"]);

        let failure = report.scenario("chat_non_stream").unwrap();
        assert!(matches!(
            &failure.outcome,
            Outcome::Failed { reason } if reason.contains("fragment stream")
        ));
    }

    #[test]
    fn test_stream_element_counts_recorded() {
        let report = SyncConformanceSuite::new().run(EchoProvider::default);
        assert_eq!(report.scenario("ask_stream").unwrap().elements, Some(1));
        assert_eq!(report.scenario("ask_stream_raw").unwrap().elements, Some(2));
    }

    #[test]
    fn test_custom_prompt_is_dispatched() {
        let suite = SyncConformanceSuite::with_prompt("another prompt");
        let provider = EchoProvider::default();
        let report = suite.last_response(&provider);
        assert!(report.outcome.is_passed());
        let record = provider.last_response().unwrap();
        assert_eq!(record.get_str("prompt"), Some("another prompt"));
    }
}
