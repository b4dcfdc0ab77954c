//! Embedding adapter over a model wrapper.
//!
//! Retrieval components want plain vectors, while embedding models answer
//! with a full [`ModelResponse`]. [`EmbeddingModel`] bridges the two by
//! taking the first vector of each response.

use log::debug;
use std::sync::Arc;

use super::client::ModelWrapper;
use super::response::ModelResponse;
use super::types::Embedding;
use crate::error::{ResponseError, Result};

/// Default number of texts embedded per batch
pub const DEFAULT_EMBED_BATCH_SIZE: usize = 1;

/// Embedding provider backed by a [`ModelWrapper`]
pub struct EmbeddingModel {
    model: Arc<dyn ModelWrapper>,
    batch_size: usize,
}

impl EmbeddingModel {
    /// Wrap `model`, failing if it cannot produce embeddings
    pub fn new(model: Arc<dyn ModelWrapper>) -> Result<Self> {
        Self::with_batch_size(model, DEFAULT_EMBED_BATCH_SIZE)
    }

    pub fn with_batch_size(model: Arc<dyn ModelWrapper>, batch_size: usize) -> Result<Self> {
        if !model.capabilities().embedding {
            return Err(ResponseError::UnsupportedEmbeddingModel(model.model_name().to_string()));
        }
        Ok(Self {
            model,
            batch_size: batch_size.max(1),
        })
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Embed a search query
    pub fn embed_query(&self, query: &str) -> Result<Embedding> {
        self.embed_text(query)
    }

    /// Embed a single text
    pub fn embed_text(&self, text: &str) -> Result<Embedding> {
        let response = self.model.call(text)?;
        self.first_embedding(response)
    }

    /// Embed many texts, in order, one batch at a time
    pub fn embed_texts(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for (index, batch) in texts.chunks(self.batch_size).enumerate() {
            debug!(
                "Embedding batch {} ({} texts) with {}",
                index,
                batch.len(),
                self.model_name()
            );
            for text in batch {
                embeddings.push(self.embed_text(text)?);
            }
        }
        Ok(embeddings)
    }

    fn first_embedding(&self, response: ModelResponse) -> Result<Embedding> {
        response
            .embedding
            .and_then(|vectors| vectors.into_iter().next())
            .ok_or_else(|| ResponseError::MissingEmbedding(self.model_name().to_string()))
    }
}

impl std::fmt::Debug for EmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingModel")
            .field("model", &self.model.model_name())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::{MockModelWrapper, ModelCapabilities};

    /// Claims embedding support but never returns a vector
    struct HollowEmbedder;

    impl ModelWrapper for HollowEmbedder {
        fn model_name(&self) -> &str {
            "hollow"
        }

        fn capabilities(&self) -> ModelCapabilities {
            ModelCapabilities {
                embedding: true,
                ..ModelCapabilities::default()
            }
        }

        fn call(&self, _input: &str) -> Result<ModelResponse> {
            Ok(ModelResponse::from_text("no vectors here"))
        }
    }

    #[test]
    fn test_rejects_chat_model() {
        let chat: Arc<dyn ModelWrapper> = Arc::new(MockModelWrapper::chat("chat-only", "hi"));
        let err = EmbeddingModel::new(chat).unwrap_err();
        assert!(matches!(err, ResponseError::UnsupportedEmbeddingModel(ref name) if name == "chat-only"));
    }

    #[test]
    fn test_embed_query_uses_first_vector() {
        let model = EmbeddingModel::new(Arc::new(MockModelWrapper::embedding("embed", 3))).unwrap();
        let vector = model.embed_query("abc").unwrap();
        assert_eq!(vector, MockModelWrapper::embed_bytes("abc", 3));
        assert_eq!(model.batch_size(), DEFAULT_EMBED_BATCH_SIZE);
    }

    #[test]
    fn test_embed_texts_preserves_order() {
        let mock = Arc::new(MockModelWrapper::embedding("embed", 2));
        let model = EmbeddingModel::with_batch_size(mock.clone(), 2).unwrap();

        let vectors = model.embed_texts(&["a", "b", "c"]).unwrap();
        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors[2], MockModelWrapper::embed_bytes("c", 2));
        assert_eq!(mock.call_count(), 3);
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        let model = EmbeddingModel::with_batch_size(Arc::new(MockModelWrapper::embedding("embed", 2)), 0).unwrap();
        assert_eq!(model.batch_size(), 1);
    }

    #[test]
    fn test_missing_embedding_fails() {
        let model = EmbeddingModel::new(Arc::new(HollowEmbedder)).unwrap();
        let err = model.embed_text("x").unwrap_err();
        assert!(matches!(err, ResponseError::MissingEmbedding(_)));
    }
}
