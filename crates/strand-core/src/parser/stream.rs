//! Async adapter from a chunk stream to a segment stream

use super::segmenter::StreamSegmenter;
use crate::error::StrandResult;
use crate::segment::Segment;
use futures::{Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;

/// Stream of segments produced from a model response
pub type SegmentStream = Pin<Box<dyn Stream<Item = StrandResult<Segment>> + Send>>;

struct State<S> {
    chunks: S,
    segmenter: Option<StreamSegmenter>,
    ready: VecDeque<Segment>,
}

/// Drive `segmenter` with every chunk of `chunks`, in arrival order.
///
/// When the chunk stream ends the segmenter is finished and its trailing
/// segments are yielded. A chunk error is yielded once and ends the stream;
/// the undecided input is discarded.
pub fn segment_stream<S>(chunks: S, segmenter: StreamSegmenter) -> SegmentStream
where
    S: Stream<Item = StrandResult<String>> + Send + Unpin + 'static,
{
    let state = State {
        chunks,
        segmenter: Some(segmenter),
        ready: VecDeque::new(),
    };

    Box::pin(futures::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(segment) = state.ready.pop_front() {
                return Some((Ok(segment), state));
            }
            state.segmenter.as_ref()?;

            match state.chunks.next().await {
                Some(Ok(chunk)) => {
                    if let Some(segmenter) = state.segmenter.as_mut() {
                        state.ready.extend(segmenter.feed(&chunk));
                    }
                }
                Some(Err(e)) => {
                    tracing::warn!("Chunk stream failed, discarding undecided input: {}", e);
                    state.segmenter = None;
                    return Some((Err(e), state));
                }
                None => {
                    if let Some(segmenter) = state.segmenter.take() {
                        state.ready.extend(segmenter.finish());
                    }
                }
            }
        }
    }))
}
