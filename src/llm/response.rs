//! The response envelope shared by every model backend.
//!
//! A [`ModelResponse`] is built by whoever called the provider, either with
//! the text already known or with a raw chunk source to be streamed. Reading
//! the text of a streamed response drains the source through
//! [`ResponseStream`], which back-fills `text`, `reason_text` and
//! `tool_calls` as it goes. The source is pulled at most once; afterwards
//! every read is served from the cached fields.

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fmt;

use super::format::ResponseFormat;
use super::streaming::ResponseStream;
use super::types::{Embedding, RawChunk, RawData, RawSource, StreamUpdate, ToolUseBlock};
use crate::error::{BoxError, Result};

/// Output of one model call, normalized across backends
#[derive(Default)]
pub struct ModelResponse {
    text: Option<String>,
    reason_text: Option<String>,
    pub embedding: Option<Vec<Embedding>>,
    pub image_urls: Option<Vec<String>>,
    pub raw: Option<Box<dyn RawData>>,
    pub parsed: Option<Value>,
    pub tool_calls: Option<Vec<ToolUseBlock>>,
    pub(super) source: Option<RawSource>,
    pub(super) stream_exhausted: bool,
    pub(super) format: ResponseFormat,
}

/// Field order here is the serialized key order.
#[derive(Serialize)]
struct SerializedResponse<'a> {
    text: Option<&'a str>,
    embedding: Option<&'a [Embedding]>,
    image_urls: Option<&'a [String]>,
    parsed: Option<&'a Value>,
    raw: Value,
}

impl ModelResponse {
    /// Create an empty response
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a response whose text is already known
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Create a response backed by a fallible raw chunk source
    pub fn from_stream<I>(source: I) -> Self
    where
        I: Iterator<Item = std::result::Result<RawChunk, BoxError>> + Send + 'static,
    {
        Self {
            source: Some(Box::new(source)),
            ..Self::default()
        }
    }

    /// Create a response backed by chunks that cannot fail
    pub fn from_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = RawChunk>,
        I::IntoIter: Send + 'static,
    {
        Self::from_stream(chunks.into_iter().map(Ok))
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_reason_text(mut self, reason_text: impl Into<String>) -> Self {
        self.reason_text = Some(reason_text.into());
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<Embedding>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn with_image_urls(mut self, image_urls: Vec<String>) -> Self {
        self.image_urls = Some(image_urls);
        self
    }

    pub fn with_raw(mut self, raw: impl RawData + 'static) -> Self {
        self.raw = Some(Box::new(raw));
        self
    }

    pub fn with_parsed(mut self, parsed: Value) -> Self {
        self.parsed = Some(parsed);
        self
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolUseBlock>) -> Self {
        self.tool_calls = Some(tool_calls);
        self
    }

    /// Attach a raw source to an existing response
    pub fn with_source(mut self, source: RawSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// Resolved answer text.
    ///
    /// Returns the stored text when present. Otherwise drains the raw source
    /// (see [`resolve`](Self::resolve)) and returns what it produced.
    pub fn text(&mut self) -> Result<Option<&str>> {
        if self.text.is_none() {
            self.resolve()?;
        }
        Ok(self.text.as_deref())
    }

    /// Resolved reasoning text.
    ///
    /// Drains only when neither text nor reasoning is stored, so text given
    /// at construction is never replaced by streamed text.
    pub fn reason_text(&mut self) -> Result<Option<&str>> {
        if self.reason_text.is_none() && self.text.is_none() {
            self.resolve()?;
        }
        Ok(self.reason_text.as_deref())
    }

    /// Text as currently stored, never touching the source
    pub fn cached_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Reasoning as currently stored, never touching the source
    pub fn cached_reason_text(&self) -> Option<&str> {
        self.reason_text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn set_reason_text(&mut self, reason_text: impl Into<String>) {
        self.reason_text = Some(reason_text.into());
    }

    /// Normalized view over the raw source, or `None` without one.
    ///
    /// Every call hands out a new view over the same single-use cursor.
    /// Only the first view to be pulled gets data; any later one yields
    /// [`StreamAlreadyConsumed`](crate::ResponseError::StreamAlreadyConsumed).
    pub fn stream(&mut self) -> Option<ResponseStream<'_>> {
        if self.source.is_none() {
            return None;
        }
        if self.stream_exhausted {
            warn!("Stream view requested over an exhausted source");
        }
        Some(ResponseStream::new(self))
    }

    pub fn has_stream(&self) -> bool {
        self.source.is_some()
    }

    /// Whether the raw source has been pulled already.
    ///
    /// When false and a source exists, the next [`text`](Self::text) read
    /// on an empty response will consume the whole stream.
    pub fn is_stream_exhausted(&self) -> bool {
        self.stream_exhausted
    }

    pub fn format(&self) -> &ResponseFormat {
        &self.format
    }

    /// Drain the raw source to completion, back-filling the final fields.
    ///
    /// Does nothing without a source or once it has been pulled. Errors from
    /// the source propagate as-is and leave the source exhausted.
    pub fn resolve(&mut self) -> Result<()> {
        if self.stream_exhausted {
            return Ok(());
        }
        let Some(stream) = self.stream() else {
            return Ok(());
        };

        debug!("Draining raw source to resolve response");
        let mut updates = 0usize;
        for update in stream {
            update?;
            updates += 1;
        }
        debug!("Raw source drained after {} updates", updates);
        Ok(())
    }

    /// JSON form of the response with the text fully resolved.
    pub fn serialize(&mut self) -> Result<String> {
        self.text()?;
        Ok(self.render())
    }

    /// Apply a chunk's fields and build its display update.
    pub(super) fn apply_chunk(&mut self, chunk: &RawChunk) -> StreamUpdate {
        match chunk {
            RawChunk::Text(text) => {
                self.text = Some(text.clone());
                StreamUpdate::partial(text.clone())
            }
            RawChunk::Composite {
                reasoning,
                text,
                tool_calls,
            } => {
                self.reason_text = Some(reasoning.clone());
                self.text = Some(text.clone());
                self.tool_calls = Some(tool_calls.clone());
                StreamUpdate::partial(self.format.display(Some(reasoning), text))
            }
        }
    }

    /// Display text for the current final state
    pub(super) fn final_display(&self) -> String {
        self.format
            .display(self.reason_text.as_deref(), self.text.as_deref().unwrap_or(""))
    }

    fn raw_json(&self) -> Value {
        match &self.raw {
            None => Value::Null,
            Some(raw) => match raw.to_json() {
                Ok(value) => value,
                Err(e) => {
                    debug!("Raw payload is not JSON serializable ({}), using its string form", e);
                    Value::String(format!("{:?}", raw))
                }
            },
        }
    }

    fn render(&self) -> String {
        let payload = SerializedResponse {
            text: self.text.as_deref(),
            embedding: self.embedding.as_deref(),
            image_urls: self.image_urls.as_deref(),
            parsed: self.parsed.as_ref(),
            raw: self.raw_json(),
        };

        let indent = self.format.indent_bytes();
        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
        if let Err(e) = payload.serialize(&mut serializer) {
            warn!("Failed to serialize response: {}", e);
            return "{}".to_string();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl fmt::Display for ModelResponse {
    /// Renders the stored fields without draining the source.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for ModelResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelResponse")
            .field("text", &self.text)
            .field("reason_text", &self.reason_text)
            .field("embedding", &self.embedding)
            .field("image_urls", &self.image_urls)
            .field("raw", &self.raw)
            .field("parsed", &self.parsed)
            .field("tool_calls", &self.tool_calls)
            .field("has_source", &self.source.is_some())
            .field("stream_exhausted", &self.stream_exhausted)
            .finish()
    }
}
