//! Response layer - one envelope for every model backend
//!
//! This module provides:
//! - Shared types (tool-use blocks, raw chunks, stream updates)
//! - ModelResponse, the normalized envelope
//! - ResponseStream, the lazy single-pass stream normalizer
//! - ModelWrapper trait and mock, plus an embedding adapter
//! - JSONL replay sources

pub mod client;
pub mod embedding;
pub mod format;
pub mod replay;
pub mod response;
pub mod streaming;
pub mod types;

pub use client::{MockModelWrapper, ModelCapabilities, ModelWrapper};
pub use embedding::{DEFAULT_EMBED_BATCH_SIZE, EmbeddingModel};
pub use format::ResponseFormat;
pub use replay::{chunks_from_jsonl, response_from_jsonl_file};
pub use response::ModelResponse;
pub use streaming::ResponseStream;
pub use types::{Embedding, RawChunk, RawData, RawSource, StreamUpdate, ToolUseBlock, ToolUseKind};
