use async_stream::stream;
use futures_util::pin_mut;
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::context::StreamContext;
use crate::source::PipelineStream;

/// A Pipe is one pipeline stage: a function from Stream[I] to Stream[O].
///
/// A `Pipe<T, T>` is an operator and can be chained with [`pipeline`].
pub struct Pipe<I, O> {
    f: Arc<dyn Fn(PipelineStream<I>) -> PipelineStream<O> + Send + Sync + 'static>,
}

impl<I, O> Clone for Pipe<I, O> {
    fn clone(&self) -> Self {
        Pipe {
            f: Arc::clone(&self.f),
        }
    }
}

impl<I, O> Pipe<I, O> {
    /// Create a new pipe from a function
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(PipelineStream<I>) -> PipelineStream<O> + Send + Sync + 'static,
    {
        Pipe { f: Arc::new(f) }
    }

    /// Apply this pipe to a stream
    pub fn apply(&self, input: PipelineStream<I>) -> PipelineStream<O> {
        (self.f)(input)
    }
}

/// Run `source` through every operator, left to right
pub fn pipeline<T, Ops>(source: PipelineStream<T>, operators: Ops) -> PipelineStream<T>
where
    Ops: IntoIterator<Item = Pipe<T, T>>,
{
    operators
        .into_iter()
        .fold(source, |stream, operator| operator.apply(stream))
}

/// Create a pipe that applies the given function to each element
pub fn map<I, O, F>(f: F) -> Pipe<I, O>
where
    F: Fn(I) -> O + Send + Sync + Clone + 'static,
    I: Send + 'static,
    O: Send + 'static,
{
    Pipe::new(move |input| {
        let f = f.clone();
        stream! {
            let mut s = input;
            while let Some(item) = s.next().await {
                yield f(item);
            }
            log::debug!("map: closed");
        }
        .boxed()
    })
}

/// Create a pipe that keeps only elements matching the predicate
pub fn filter<I, F>(predicate: F) -> Pipe<I, I>
where
    F: Fn(&I) -> bool + Send + Sync + Clone + 'static,
    I: Send + 'static,
{
    Pipe::new(move |input| {
        let predicate = predicate.clone();
        stream! {
            let mut s = input;
            while let Some(item) = s.next().await {
                if predicate(&item) {
                    yield item;
                }
            }
            log::debug!("filter: closed");
        }
        .boxed()
    })
}

/// Wait `period` before pulling and emitting each element
pub fn delay<T>(period: Duration) -> Pipe<T, T>
where
    T: Send + 'static,
{
    Pipe::new(move |input| {
        stream! {
            let mut s = input;
            loop {
                sleep(period).await;
                match s.next().await {
                    Some(item) => yield item,
                    None => break,
                }
            }
            log::debug!("delay: closed");
        }
        .boxed()
    })
}

/// Apply `inner`, but stop emitting as soon as `ctx` is done
pub fn with_context<I, O>(ctx: StreamContext, inner: Pipe<I, O>) -> Pipe<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    Pipe::new(move |input| {
        let done = ctx.done();
        let s = inner.apply(input);
        stream! {
            pin_mut!(s);
            pin_mut!(done);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut done => {
                        log::debug!("with_context: interrupted");
                        break;
                    },

                    maybe_item = s.next() => {
                        match maybe_item {
                            Some(item) => yield item,
                            None => break,
                        }
                    },
                }
            }
        }
        .boxed()
    })
}

/// Compose two pipes together
pub fn compose<I, M, O>(p1: Pipe<I, M>, p2: Pipe<M, O>) -> Pipe<I, O>
where
    I: Send + 'static,
    M: Send + 'static,
    O: Send + 'static,
{
    Pipe::new(move |input| p2.apply(p1.apply(input)))
}

/// Identity pipe that doesn't transform the stream
pub fn identity<I>() -> Pipe<I, I>
where
    I: Send + 'static,
{
    Pipe::new(|input| input)
}

/// Extension trait for pipes
pub trait PipeExt<I, O> {
    /// Compose this pipe with another pipe
    fn compose<P>(self, other: Pipe<O, P>) -> Pipe<I, P>
    where
        P: Send + 'static;
}

impl<I, O> PipeExt<I, O> for Pipe<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    fn compose<P>(self, other: Pipe<O, P>) -> Pipe<I, P>
    where
        P: Send + 'static,
    {
        compose(self, other)
    }
}
