//! Stream normalization for model responses.
//!
//! Turns a provider's raw chunk source into display-ready
//! [`StreamUpdate`]s, updating the owning [`ModelResponse`] as each chunk
//! is pulled. Nothing is read ahead of demand.

use log::{debug, trace};
use std::iter::FusedIterator;

use super::response::ModelResponse;
use super::types::{RawChunk, StreamUpdate};
use crate::error::{ResponseError, Result};

#[derive(Debug)]
enum StreamState {
    /// No pull attempted through this view yet
    Pending,
    /// At least one chunk seen; holds the latest
    Streaming { last: RawChunk },
    /// Final update emitted, or the source failed
    Finished,
}

/// Lazy normalized view over a response's raw source.
///
/// Yields one partial update per raw chunk, then exactly one final update.
/// An empty source yields nothing. Dropping the view early leaves the
/// response with whatever the pulled chunks set, and the source stays
/// exhausted.
pub struct ResponseStream<'a> {
    response: &'a mut ModelResponse,
    state: StreamState,
}

impl<'a> ResponseStream<'a> {
    pub(super) fn new(response: &'a mut ModelResponse) -> Self {
        Self {
            response,
            state: StreamState::Pending,
        }
    }

    /// Drain the rest of the stream, returning the final update if any.
    pub fn finish(self) -> Result<Option<StreamUpdate>> {
        let mut last = None;
        for update in self {
            last = Some(update?);
        }
        Ok(last)
    }

    fn pull(&mut self) -> Option<Result<RawChunk>> {
        let source = self.response.source.as_mut()?;
        source.next().map(|item| item.map_err(ResponseError::Source))
    }

    fn accept(&mut self, chunk: RawChunk) -> StreamUpdate {
        trace!("Pulled raw chunk with {} answer bytes", chunk.answer().len());
        let update = self.response.apply_chunk(&chunk);
        self.state = StreamState::Streaming { last: chunk };
        update
    }

    fn close(&mut self, last: RawChunk) -> StreamUpdate {
        // Chunks carry cumulative content, so the last one is the final state
        self.response.apply_chunk(&last);
        let update = StreamUpdate::done(self.response.final_display());
        debug!("Raw source finished, final update is {} bytes", update.text.len());
        update
    }
}

impl Iterator for ResponseStream<'_> {
    type Item = Result<StreamUpdate>;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.state, StreamState::Finished) {
            StreamState::Finished => None,
            StreamState::Pending => {
                if self.response.stream_exhausted {
                    return Some(Err(ResponseError::StreamAlreadyConsumed));
                }
                self.response.stream_exhausted = true;

                match self.pull()? {
                    Ok(chunk) => Some(Ok(self.accept(chunk))),
                    Err(e) => Some(Err(e)),
                }
            }
            StreamState::Streaming { last } => match self.pull() {
                Some(Ok(chunk)) => Some(Ok(self.accept(chunk))),
                Some(Err(e)) => Some(Err(e)),
                None => Some(Ok(self.close(last))),
            },
        }
    }
}

impl FusedIterator for ResponseStream<'_> {}
