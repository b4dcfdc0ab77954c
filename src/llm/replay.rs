//! JSONL chunk sources for replaying recorded streams.
//!
//! Each non-empty line is one [`RawChunk`]: a JSON string for plain text,
//! or an object with `reasoning`, `text` and `tool_calls`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::response::ModelResponse;
use super::types::RawChunk;
use crate::error::{BoxError, Result};

/// Lazily parse chunks from a reader, one line at a time.
///
/// IO and parse failures surface as source errors when the line is pulled.
pub fn chunks_from_jsonl<R>(reader: R) -> impl Iterator<Item = std::result::Result<RawChunk, BoxError>> + Send + 'static
where
    R: BufRead + Send + 'static,
{
    reader
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .map(|line| -> std::result::Result<RawChunk, BoxError> {
            let line = line?;
            let chunk = serde_json::from_str(&line)?;
            Ok(chunk)
        })
}

/// Open a JSONL file as a streamed response
pub fn response_from_jsonl_file(path: impl AsRef<Path>) -> Result<ModelResponse> {
    let file = File::open(path.as_ref())?;
    log::info!("Replaying chunks from {}", path.as_ref().display());
    Ok(ModelResponse::from_stream(chunks_from_jsonl(BufReader::new(file))))
}
