//! Model wrapper trait and a mock implementation
//!
//! Concrete provider clients live outside this crate; they plug in by
//! implementing [`ModelWrapper`] and returning a [`ModelResponse`].

use std::sync::atomic::{AtomicUsize, Ordering};

use super::response::ModelResponse;
use super::types::{Embedding, RawChunk};
use crate::error::Result;

/// What a wrapped model can produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelCapabilities {
    pub chat: bool,
    pub streaming: bool,
    pub embedding: bool,
}

/// A callable model - each call is independent
pub trait ModelWrapper: Send + Sync {
    /// Name used in logs and errors
    fn model_name(&self) -> &str;

    fn capabilities(&self) -> ModelCapabilities;

    /// Run the model on a single input
    fn call(&self, input: &str) -> Result<ModelResponse>;
}

#[derive(Debug, Clone)]
enum MockBehavior {
    Reply(String),
    Stream(Vec<RawChunk>),
    Embed { dims: usize },
}

/// Mock model for testing
#[derive(Debug)]
pub struct MockModelWrapper {
    name: String,
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockModelWrapper {
    /// Chat model that always answers with `reply`
    pub fn chat(name: impl Into<String>, reply: impl Into<String>) -> Self {
        Self::with_behavior(name, MockBehavior::Reply(reply.into()))
    }

    /// Chat model that streams the given chunks on every call
    pub fn streaming(name: impl Into<String>, chunks: Vec<RawChunk>) -> Self {
        Self::with_behavior(name, MockBehavior::Stream(chunks))
    }

    /// Embedding model producing deterministic `dims`-sized vectors
    pub fn embedding(name: impl Into<String>, dims: usize) -> Self {
        Self::with_behavior(name, MockBehavior::Embed { dims })
    }

    fn with_behavior(name: impl Into<String>, behavior: MockBehavior) -> Self {
        Self {
            name: name.into(),
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `call` has run
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Byte values scaled into [0, 1], zero-padded to `dims`
    pub fn embed_bytes(input: &str, dims: usize) -> Embedding {
        let mut vector: Embedding = input.bytes().take(dims).map(|b| b as f32 / 255.0).collect();
        vector.resize(dims, 0.0);
        vector
    }
}

impl ModelWrapper for MockModelWrapper {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> ModelCapabilities {
        match self.behavior {
            MockBehavior::Reply(_) => ModelCapabilities {
                chat: true,
                ..ModelCapabilities::default()
            },
            MockBehavior::Stream(_) => ModelCapabilities {
                chat: true,
                streaming: true,
                embedding: false,
            },
            MockBehavior::Embed { .. } => ModelCapabilities {
                embedding: true,
                ..ModelCapabilities::default()
            },
        }
    }

    fn call(&self, input: &str) -> Result<ModelResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        log::debug!("Mock model {} called with {} bytes", self.name, input.len());

        let response = match &self.behavior {
            MockBehavior::Reply(reply) => ModelResponse::from_text(reply.clone()),
            MockBehavior::Stream(chunks) => ModelResponse::from_chunks(chunks.clone()),
            MockBehavior::Embed { dims } => {
                ModelResponse::new().with_embedding(vec![Self::embed_bytes(input, *dims)])
            }
        };
        Ok(response.with_raw(serde_json::json!({ "model": self.name, "input": input })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_chat_reply() {
        let mock = MockModelWrapper::chat("mock-chat", "Hi there");
        let mut resp = mock.call("Hello").unwrap();
        assert_eq!(resp.text().unwrap(), Some("Hi there"));
        assert_eq!(mock.call_count(), 1);
        assert!(mock.capabilities().chat);
        assert!(!mock.capabilities().embedding);
    }

    #[test]
    fn test_mock_streaming_returns_fresh_stream_per_call() {
        let mock = MockModelWrapper::streaming("mock-stream", vec![RawChunk::text("a"), RawChunk::text("ab")]);

        let mut first = mock.call("q").unwrap();
        let mut second = mock.call("q").unwrap();
        assert_eq!(first.text().unwrap(), Some("ab"));
        assert_eq!(second.text().unwrap(), Some("ab"));
        assert!(mock.capabilities().streaming);
        assert_eq!(mock.call_count(), 2);
    }

    #[test]
    fn test_mock_embedding_is_deterministic() {
        let mock = MockModelWrapper::embedding("mock-embed", 4);
        let a = mock.call("ab").unwrap();
        let b = mock.call("ab").unwrap();
        assert_eq!(a.embedding, b.embedding);

        let vectors = a.embedding.unwrap();
        let vector = &vectors[0];
        assert_eq!(vector.len(), 4);
        assert_eq!(vector[2], 0.0);
        assert!((vector[0] - b'a' as f32 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_mock_attaches_raw_payload() {
        let mock = MockModelWrapper::chat("mock-chat", "ok");
        let mut resp = mock.call("ping").unwrap();
        let out = resp.serialize().unwrap();
        assert!(out.contains("\"model\": \"mock-chat\""));
        assert!(out.contains("\"input\": \"ping\""));
    }
}
