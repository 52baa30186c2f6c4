//! Scripted `LanguageModel` for pipeline tests. No network.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::llm_client::{LanguageModel, LlmError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallMode {
    Json,
    Text,
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub mode: CallMode,
    pub prompt: String,
    pub system: String,
}

/// Replays queued replies in call order, one queue per call mode.
///
/// When the JSON queue is empty the fallback (if any) is returned forever.
/// When the text queue is empty, drafts are generated as `Draft #n`.
#[derive(Default)]
pub(crate) struct ScriptedModel {
    json_replies: Mutex<VecDeque<Result<Value, LlmError>>>,
    json_fallback: Option<Value>,
    text_replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, value: Value) -> Self {
        self.json_replies.lock().unwrap().push_back(Ok(value));
        self
    }

    pub fn with_json_error(self, err: LlmError) -> Self {
        self.json_replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn with_json_fallback(mut self, value: Value) -> Self {
        self.json_fallback = Some(value);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.text_replies
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
        self
    }

    pub fn with_text_error(self, err: LlmError) -> Self {
        self.text_replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, mode: CallMode, prompt: &str, system: &str) -> usize {
        let mut calls = self.calls.lock().unwrap();
        calls.push(RecordedCall {
            mode,
            prompt: prompt.to_string(),
            system: system.to_string(),
        });
        calls.iter().filter(|c| c.mode == mode).count()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete_text(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let n = self.record(CallMode::Text, prompt, system);
        self.text_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("Draft #{n}")))
    }

    async fn complete_json(&self, prompt: &str, system: &str) -> Result<Value, LlmError> {
        self.record(CallMode::Json, prompt, system);
        let next = self.json_replies.lock().unwrap().pop_front();
        match (next, &self.json_fallback) {
            (Some(reply), _) => reply,
            (None, Some(fallback)) => Ok(fallback.clone()),
            (None, None) => Err(LlmError::EmptyContent),
        }
    }
}

/// A verification reply in the wire shape.
pub(crate) fn verdict(risk: &str, unsupported: &[&str]) -> Value {
    json!({
        "hallucination_risk": risk,
        "unsupported_sentences": unsupported,
    })
}
