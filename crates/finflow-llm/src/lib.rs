//! FinFlow LLM - text generation collaborator
//!
//! Abstracts the large-language-model call every pipeline stage makes:
//! - `ChatPrompt`: a role-tagged message sequence with variable substitution
//! - `TextGenerator`: the async trait each stage consumes
//! - `GeminiClient`: reqwest-backed client for the Gemini `generateContent` API
//! - `MockGenerator`: scripted generator for tests, records call order
//!
//! Generators are stateless request/response clients and safe for concurrent
//! use by independent pipeline runs.

#![warn(unreachable_pub)]

pub mod gemini;
pub mod generator;
pub mod mock;
pub mod prompt;

pub use gemini::GeminiClient;
pub use generator::{Generation, GenerationError, TextGenerator, ToolCall};
pub use mock::MockGenerator;
pub use prompt::{ChatPrompt, Message, Role, ToolDecl};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
