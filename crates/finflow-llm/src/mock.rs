//! Scripted mock generator for tests.

use crate::generator::{Generation, GenerationError, TextGenerator};
use crate::prompt::ChatPrompt;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Answer with this text
    Text(String),
    /// Fail with `GenerationError::RequestFailed`
    Fail(String),
}

/// Mock text generator.
///
/// Replies are consumed from a script in order; once the script is
/// exhausted, every call answers with the default text. Every received
/// prompt is recorded so tests can assert call order and count.
pub struct MockGenerator {
    script: Mutex<VecDeque<Reply>>,
    received: Mutex<Vec<ChatPrompt>>,
    call_count: AtomicU32,
    default_text: String,
}

impl MockGenerator {
    /// Create a mock that always answers with `default_text`.
    #[must_use]
    pub fn new(default_text: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            received: Mutex::new(Vec::new()),
            call_count: AtomicU32::new(0),
            default_text: default_text.into(),
        }
    }

    /// Append a scripted text reply.
    #[must_use]
    pub fn then_text(self, text: impl Into<String>) -> Self {
        self.push(Reply::Text(text.into()));
        self
    }

    /// Append a scripted failure.
    #[must_use]
    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.push(Reply::Fail(message.into()));
        self
    }

    fn push(&self, reply: Reply) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
    }

    /// Number of generation calls received.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Prompts received, in call order.
    pub fn received(&self) -> Vec<ChatPrompt> {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// System instructions of received prompts, in call order.
    ///
    /// Convenient for asserting which stages ran and in what order.
    pub fn received_systems(&self) -> Vec<String> {
        self.received()
            .iter()
            .filter_map(|p| p.system().map(str::to_string))
            .collect()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new("mock generation")
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &ChatPrompt) -> Result<Generation, GenerationError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(prompt.clone());

        let scripted = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        match scripted {
            Some(Reply::Text(text)) => Ok(Generation::text(text)),
            Some(Reply::Fail(message)) => Err(GenerationError::RequestFailed(message)),
            None => Ok(Generation::text(self.default_text.clone())),
        }
    }
}
