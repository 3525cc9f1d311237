//! Chat prompts: role-tagged messages with `{variable}` substitution.
//!
//! A stage prompt is a fixed system instruction followed by a human message
//! template. Variables are substituted before the prompt is handed to a
//! generator, so the generator only ever sees fully rendered text.

use serde::{Deserialize, Serialize};

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Human,
    Assistant,
}

/// A single role-tagged message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the sender
    pub role: Role,
    /// Rendered content
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a human message.
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Declaration of a callable tool the generator may invoke.
///
/// Only used in tool-augmented mode; the base pipeline declares none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDecl {
    /// Tool name the generator calls it by
    pub name: String,
    /// Natural-language description of what the tool does
    pub description: String,
}

impl ToolDecl {
    /// Create a tool declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// An ordered sequence of role-tagged messages plus optional tool
/// declarations, ready for a generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPrompt {
    /// Messages in conversation order
    pub messages: Vec<Message>,
    /// Tools the generator may invoke before answering
    pub tools: Vec<ToolDecl>,
}

impl ChatPrompt {
    /// Build a prompt from a system instruction and a human message.
    #[must_use]
    pub fn new(system: impl Into<String>, human: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system), Message::human(human)],
            tools: Vec::new(),
        }
    }

    /// Build a prompt from a system instruction and a human template with
    /// `{name}` placeholders substituted from `vars`.
    ///
    /// Unknown placeholders are left verbatim; substitution is literal, not
    /// recursive.
    #[must_use]
    pub fn from_template(
        system: impl Into<String>,
        human_template: &str,
        vars: &[(&str, &str)],
    ) -> Self {
        let mut rendered = human_template.to_string();
        for (name, value) in vars {
            rendered = rendered.replace(&format!("{{{name}}}"), value);
        }
        Self::new(system, rendered)
    }

    /// Attach a tool declaration.
    #[must_use]
    pub fn with_tool(mut self, tool: ToolDecl) -> Self {
        self.tools.push(tool);
        self
    }

    /// The system instruction, if present.
    #[must_use]
    pub fn system(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
    }

    /// The rendered human message, if present.
    #[must_use]
    pub fn human(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::Human)
            .map(|m| m.content.as_str())
    }
}
