//! respnorm - normalized language-model responses
//!
//! Backends answer in different shapes: a finished string, a stream of
//! plain text, or a stream of reasoning/answer/tool-call triples. respnorm
//! wraps all of them in a single [`ModelResponse`] whose raw stream can be
//! consumed lazily, exactly once.

pub mod error;
pub mod llm;

pub use error::{BoxError, ResponseError, Result};
pub use llm::{
    EmbeddingModel, ModelResponse, ModelWrapper, RawChunk, ResponseFormat, ResponseStream, StreamUpdate,
    ToolUseBlock,
};
