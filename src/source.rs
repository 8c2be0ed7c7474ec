//! Stream constructors and generators
//!
//! Every source returns a [`PipelineStream`], the boxed stream type all pipes
//! consume and produce.

use async_stream::stream;
use futures_util::stream::{self, BoxStream, StreamExt};
use std::future::Future;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::context::{CancelHandle, StreamContext};
use crate::error::{StreamError, StreamResult};

/// A boxed, heap-allocated stream that every pipeline stage passes along
pub type PipelineStream<O> = BoxStream<'static, O>;

// ================================
// Core Stream Constructors
// ================================

/// Emit the given items in order, then complete
pub fn stream_of<O>(items: Vec<O>) -> PipelineStream<O>
where
    O: Send + 'static,
{
    stream! {
        for item in items {
            yield item;
        }
        log::debug!("stream_of: closed");
    }
    .boxed()
}

/// Create a stream from an iterator
pub fn from_iter<I, O>(iter: I) -> PipelineStream<O>
where
    I: IntoIterator<Item = O> + Send + 'static,
    <I as IntoIterator>::IntoIter: Send,
    O: Send + 'static,
{
    stream::iter(iter).boxed()
}

/// Create an empty stream that completes immediately
pub fn empty<O>() -> PipelineStream<O>
where
    O: Send + 'static,
{
    stream::empty().boxed()
}

/// Generate a stream from a seed value and a function
///
/// The function produces an element and the next state; the stream ends when
/// it returns `None`.
///
/// # Examples
/// ```
/// use odd_stream::source::unfold;
/// use futures_util::stream::StreamExt;
///
/// # async fn example() {
/// let countdown = unfold(3, |n| async move {
///     if n == 0 { None } else { Some((n, n - 1)) }
/// });
/// assert_eq!(countdown.collect::<Vec<_>>().await, vec![3, 2, 1]);
/// # }
/// ```
pub fn unfold<S, O, F, Fut>(init: S, mut f: F) -> PipelineStream<O>
where
    S: Send + 'static,
    O: Send + 'static,
    F: FnMut(S) -> Fut + Send + 'static,
    Fut: Future<Output = Option<(O, S)>> + Send + 'static,
{
    stream! {
        let mut state_opt = Some(init);

        while let Some(state) = state_opt.take() {
            if let Some((item, next_state)) = f(state).await {
                yield item;
                state_opt = Some(next_state);
            }
        }
    }
    .boxed()
}

// ================================
// Fibonacci Generators
// ================================

/// Plain pull-based Fibonacci generator: 0, 1, 1, 2, 3, 5, ...
///
/// Ends after the largest Fibonacci number that fits in a `u64`.
#[derive(Debug, Clone)]
pub struct FibonacciGenerator {
    a: Option<u64>,
    b: Option<u64>,
}

impl FibonacciGenerator {
    pub fn new() -> Self {
        Self {
            a: Some(0),
            b: Some(1),
        }
    }
}

impl Default for FibonacciGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FibonacciGenerator {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let current = self.a?;
        self.a = self.b;
        self.b = self.b.and_then(|b| current.checked_add(b));
        Some(current)
    }
}

/// Lazy Fibonacci stream with no cancellation
pub fn fibonacci_stream() -> PipelineStream<u64> {
    from_iter(FibonacciGenerator::new())
}

/// Fibonacci stream that ends once the returned handle is cancelled
pub fn fibonacci_stream_with_cancel() -> (PipelineStream<u64>, CancelHandle) {
    let (ctx, handle) = StreamContext::with_cancel();
    (fibonacci_stream_with_context(ctx), handle)
}

/// Fibonacci stream that ends once `ctx` is done
pub fn fibonacci_stream_with_context(ctx: StreamContext) -> PipelineStream<u64> {
    stream! {
        for value in FibonacciGenerator::new() {
            if ctx.is_done() {
                break;
            }
            yield value;
        }
        log::debug!("fibonacci_stream: closed");
    }
    .boxed()
}

/// Fibonacci stream produced ahead of the consumer on a spawned task.
///
/// At most `buffer` values wait in the channel. After `ctx` is done the
/// consumer still drains what was already buffered, then the stream ends.
/// Must be called from within a tokio runtime.
pub fn fibonacci_stream_buffered(
    ctx: StreamContext,
    buffer: usize,
) -> StreamResult<PipelineStream<u64>> {
    if buffer == 0 {
        return Err(StreamError::InvalidArgument(
            "buffer size must be greater than zero".to_string(),
        ));
    }

    let (tx, rx) = mpsc::channel(buffer);
    tokio::spawn(async move {
        let done = ctx.done();
        tokio::pin!(done);

        for value in FibonacciGenerator::new() {
            tokio::select! {
                biased;
                _ = &mut done => break,
                sent = tx.send(value) => {
                    if sent.is_err() {
                        break;
                    }
                }
            }
        }
        log::debug!("fibonacci_stream_buffered: closed");
    });

    Ok(ReceiverStream::new(rx).boxed())
}
