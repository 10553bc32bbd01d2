//! Blocking scripted provider

use crate::script::{Fault, Script};
use chatcert_core::{
    AskOptions, AskReply, ChatOptions, ChatReply, Error, ResponseRecord, Result, SyncProvider,
};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Iterator type for canned streaming sequences
pub(crate) type CannedIter<T> = std::vec::IntoIter<Result<T>>;

/// A blocking provider that answers from a [`Script`]
///
/// The last-response slot lives behind an `RwLock` so the provider can be
/// driven through a shared reference.
#[derive(Debug)]
pub struct ScriptedProvider {
    script: Script,
    last: RwLock<Option<ResponseRecord>>,
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new(Script::default())
    }
}

impl ScriptedProvider {
    /// Create a provider answering from the given script
    pub fn new(script: Script) -> Self {
        Self {
            script,
            last: RwLock::new(None),
        }
    }

    /// The script this provider answers from
    pub fn script(&self) -> &Script {
        &self.script
    }

    fn remember(&self, record: &ResponseRecord) {
        if self.script.has_fault(&Fault::StaleLastResponse) {
            return;
        }
        *self.last.write().unwrap_or_else(PoisonError::into_inner) = Some(record.clone());
    }
}

impl SyncProvider for ScriptedProvider {
    type RecordIter = CannedIter<ResponseRecord>;
    type RawIter = CannedIter<String>;
    type TextIter = CannedIter<String>;

    fn ask(
        &self,
        prompt: &str,
        options: AskOptions,
    ) -> Result<AskReply<Self::RecordIter, Self::RawIter>> {
        self.script.check("ask")?;
        debug!(stream = options.stream, raw = options.raw, "scripted ask");
        let record = self.script.record(prompt);
        self.remember(&record);

        if options.stream {
            if self.script.has_fault(&Fault::StreamAsRecord) {
                return Ok(AskReply::Record(record));
            }
            if options.raw {
                Ok(AskReply::RawStream(self.script.fragments().into_iter()))
            } else {
                Ok(AskReply::Stream(
                    self.script.chunk_records(prompt).into_iter(),
                ))
            }
        } else if self.script.has_fault(&Fault::NonStreamAsStream) {
            Ok(AskReply::Stream(
                self.script.chunk_records(prompt).into_iter(),
            ))
        } else {
            Ok(AskReply::Record(record))
        }
    }

    fn get_message(&self, response: &ResponseRecord) -> Result<String> {
        response
            .get_str("message")
            .map(str::to_string)
            .ok_or_else(|| Error::MalformedRecord("missing \"message\" key".to_string()))
    }

    fn chat(&self, prompt: &str, options: ChatOptions) -> Result<ChatReply<Self::TextIter>> {
        self.script.check("chat")?;
        debug!(stream = options.stream, optimizer = ?options.optimizer, "scripted chat");
        let prompt = match options.optimizer {
            Some(optimizer) => Script::optimize(prompt, optimizer),
            None => prompt.to_string(),
        };
        let record = self.script.record(&prompt);
        self.remember(&record);

        if options.stream || self.script.has_fault(&Fault::NonStreamAsStream) {
            Ok(ChatReply::Stream(self.script.fragments().into_iter()))
        } else {
            Ok(ChatReply::Message(self.script.message().to_string()))
        }
    }

    fn last_response(&self) -> Option<ResponseRecord> {
        self.last
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
