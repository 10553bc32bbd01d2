//! Non-blocking scripted provider

use crate::blocking::{CannedIter, ScriptedProvider};
use crate::script::Script;
use async_trait::async_trait;
use chatcert_core::{
    AskOptions, AskReply, AsyncProvider, ChatOptions, ChatReply, ResponseRecord, Result,
    SyncProvider,
};
use futures::stream;

/// Stream type for canned streaming sequences
pub(crate) type CannedStream<T> = stream::Iter<CannedIter<T>>;

/// A non-blocking provider that answers from a [`Script`]
///
/// Wraps the blocking provider and lifts its canned iterators into
/// asynchronous streams, so the two variants share one behavior and differ
/// only in execution model.
#[derive(Debug, Default)]
pub struct AsyncScriptedProvider {
    inner: ScriptedProvider,
}

impl AsyncScriptedProvider {
    /// Create a provider answering from the given script
    pub fn new(script: Script) -> Self {
        Self {
            inner: ScriptedProvider::new(script),
        }
    }
}

#[async_trait]
impl AsyncProvider for AsyncScriptedProvider {
    type RecordStream = CannedStream<ResponseRecord>;
    type RawStream = CannedStream<String>;
    type TextStream = CannedStream<String>;

    async fn ask(
        &self,
        prompt: &str,
        options: AskOptions,
    ) -> Result<AskReply<Self::RecordStream, Self::RawStream>> {
        match self.inner.ask(prompt, options)? {
            AskReply::Record(record) => Ok(AskReply::Record(record)),
            AskReply::Stream(chunks) => Ok(AskReply::Stream(stream::iter(chunks))),
            AskReply::RawStream(fragments) => Ok(AskReply::RawStream(stream::iter(fragments))),
        }
    }

    async fn get_message(&self, response: &ResponseRecord) -> Result<String> {
        self.inner.get_message(response)
    }

    async fn chat(&self, prompt: &str, options: ChatOptions) -> Result<ChatReply<Self::TextStream>> {
        match self.inner.chat(prompt, options)? {
            ChatReply::Message(message) => Ok(ChatReply::Message(message)),
            ChatReply::Stream(fragments) => Ok(ChatReply::Stream(stream::iter(fragments))),
        }
    }

    fn last_response(&self) -> Option<ResponseRecord> {
        self.inner.last_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_ask_non_stream() {
        let provider = AsyncScriptedProvider::default();
        let reply = provider.ask("hi", AskOptions::default()).await.unwrap();
        let AskReply::Record(record) = reply else {
            panic!("expected a record");
        };
        assert_eq!(record.get_str("prompt"), Some("hi"));
        assert_eq!(provider.last_response(), Some(record));
    }

    #[tokio::test]
    async fn test_ask_stream_preserves_order() {
        let provider = AsyncScriptedProvider::new(Script::new("a b c"));
        let reply = provider.ask("hi", AskOptions::streaming()).await.unwrap();
        let AskReply::Stream(mut chunks) = reply else {
            panic!("expected a record stream");
        };

        let mut messages = Vec::new();
        while let Some(chunk) = chunks.next().await {
            messages.push(chunk.unwrap().get_str("message").unwrap().to_string());
        }
        assert_eq!(messages, vec!["a", " b", " c"]);
    }

    #[tokio::test]
    async fn test_chat_stream_reassembles() {
        let provider = AsyncScriptedProvider::new(Script::new("a b c"));
        let reply = provider
            .chat("hi", ChatOptions::streaming())
            .await
            .unwrap();
        let ChatReply::Stream(fragments) = reply else {
            panic!("expected a fragment stream");
        };
        let text: String = fragments.map(|fragment| fragment.unwrap()).collect().await;
        assert_eq!(text, "a b c");
    }

    #[tokio::test]
    async fn test_get_message_is_pure() {
        let provider = AsyncScriptedProvider::default();
        let AskReply::Record(record) = provider.ask("hi", AskOptions::default()).await.unwrap()
        else {
            panic!("expected a record");
        };
        let before = provider.last_response();
        let message = provider.get_message(&record).await.unwrap();
        assert!(!message.is_empty());
        assert_eq!(provider.last_response(), before);
    }
}
