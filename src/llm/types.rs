//! Shared types for model responses
//!
//! This module defines tool-use blocks, raw stream chunks, and the
//! normalized updates the stream produces.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::BoxError;

/// A single embedding vector
pub type Embedding = Vec<f32>;

/// Lazy provider source of raw chunks; pulled at most once
pub type RawSource = Box<dyn Iterator<Item = Result<RawChunk, BoxError>> + Send>;

/// Content-block tag carried by every [`ToolUseBlock`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolUseKind {
    #[default]
    #[serde(rename = "tool_use")]
    ToolUse,
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUseBlock {
    /// Always `"type": "tool_use"`; optional on input
    #[serde(rename = "type", default)]
    pub kind: ToolUseKind,
    pub id: String,
    pub name: String,
    #[serde(default, alias = "input")]
    pub arguments: Map<String, Value>,
}

impl ToolUseBlock {
    /// Create a new tool-use block
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            kind: ToolUseKind::ToolUse,
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Build from a JSON value; non-object arguments become an empty map
    pub fn from_json(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        let arguments = match arguments {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(id, name, arguments)
    }
}

/// One unit of a provider's incremental output.
///
/// Each chunk carries the full content seen so far, not a diff, so only the
/// last one is authoritative for the final state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawChunk {
    /// Plain answer text
    Text(String),
    /// Reasoning, answer and tool calls emitted together
    Composite {
        #[serde(default)]
        reasoning: String,
        #[serde(default)]
        text: String,
        #[serde(default)]
        tool_calls: Vec<ToolUseBlock>,
    },
}

impl RawChunk {
    /// Create a plain-text chunk
    pub fn text(text: impl Into<String>) -> Self {
        RawChunk::Text(text.into())
    }

    /// Create a reasoning/answer/tool-call chunk
    pub fn composite(reasoning: impl Into<String>, text: impl Into<String>, tool_calls: Vec<ToolUseBlock>) -> Self {
        RawChunk::Composite {
            reasoning: reasoning.into(),
            text: text.into(),
            tool_calls,
        }
    }

    /// Answer text carried by this chunk
    pub fn answer(&self) -> &str {
        match self {
            RawChunk::Text(text) => text,
            RawChunk::Composite { text, .. } => text,
        }
    }
}

/// A display-ready increment produced by the stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamUpdate {
    /// True only for the single closing update
    pub is_final: bool,
    /// Text to show the user
    pub text: String,
}

impl StreamUpdate {
    /// An intermediate update
    pub fn partial(text: impl Into<String>) -> Self {
        Self {
            is_final: false,
            text: text.into(),
        }
    }

    /// The closing update
    pub fn done(text: impl Into<String>) -> Self {
        Self {
            is_final: true,
            text: text.into(),
        }
    }
}

impl From<StreamUpdate> for (bool, String) {
    fn from(update: StreamUpdate) -> Self {
        (update.is_final, update.text)
    }
}

impl fmt::Display for StreamUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Provider payload kept for diagnostics.
///
/// Anything `Serialize + Debug` qualifies; the debug form stands in when
/// the value refuses to serialize.
pub trait RawData: fmt::Debug + Send + Sync {
    /// Convert to a JSON value
    fn to_json(&self) -> serde_json::Result<Value>;
}

impl<T> RawData for T
where
    T: Serialize + fmt::Debug + Send + Sync,
{
    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
