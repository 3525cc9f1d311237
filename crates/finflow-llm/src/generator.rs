//! The text generator trait and its error type.

use crate::prompt::ChatPrompt;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Errors from a text generation call.
///
/// None of these are recovered inside the pipeline: any variant aborts the
/// run with the failing stage identified.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Transport-level failure reaching the service
    #[error("generation request failed: {0}")]
    RequestFailed(String),

    /// The service rejected the request (quota, auth, bad input)
    #[error("generation rejected: {0}")]
    Rejected(String),

    /// The service answered but the response carried no usable text
    #[error("malformed generation response: {0}")]
    MalformedResponse(String),
}

/// A record of one tool invocation the generator made before answering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the invoked tool
    pub tool: String,
    /// JSON-encoded arguments the generator supplied
    pub arguments: serde_json::Value,
}

/// The outcome of a generation call: final text plus the trace of any
/// intermediate tool calls (empty when no tools were declared or invoked).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    /// Generated text
    pub text: String,
    /// Tool invocations made before the final answer
    pub tool_calls: Vec<ToolCall>,
}

impl Generation {
    /// A plain text generation with no tool trace.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_calls: Vec::new(),
        }
    }
}

/// A text generation service.
///
/// Implementations must be safe for concurrent use by independent pipeline
/// runs; a call suspends the caller until the service answers or fails.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a fully rendered prompt.
    async fn generate(&self, prompt: &ChatPrompt) -> Result<Generation, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_error_display() {
        let err = GenerationError::Rejected("quota exhausted".to_string());
        assert!(err.to_string().contains("quota exhausted"));
    }

    #[test]
    fn plain_generation_has_empty_trace() {
        let g = Generation::text("hello");
        assert_eq!(g.text, "hello");
        assert!(g.tool_calls.is_empty());
    }
}
