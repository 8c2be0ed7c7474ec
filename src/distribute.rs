//! Fan-out / fan-in over pipeline streams
//!
//! [`distribute`] shares one input stream between several worker pipelines
//! and [`merge`]s their outputs back into a single stream. Every merged source
//! runs on its own tokio task, so these functions must be called from within a
//! runtime.

use async_stream::stream;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_stream::wrappers::ReceiverStream;

use crate::context::StreamContext;
use crate::error::{StreamError, StreamResult};
use crate::source::PipelineStream;

/// A Fibonacci input paired with its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fib {
    pub n: u64,
    pub result: u64,
}

/// Naive exponential-time Fibonacci, used as a CPU-bound workload
pub fn slow_fibonacci(n: u64) -> u64 {
    if n <= 1 {
        return n;
    }
    slow_fibonacci(n - 1) + slow_fibonacci(n - 2)
}

/// Worker computing [`slow_fibonacci`] for each input on the blocking pool
pub fn fibonacci_worker(ctx: StreamContext, inputs: PipelineStream<u64>) -> PipelineStream<Fib> {
    stream! {
        let mut inputs = inputs;
        while let Some(n) = inputs.next().await {
            if ctx.is_done() {
                break;
            }
            match tokio::task::spawn_blocking(move || slow_fibonacci(n)).await {
                Ok(result) => yield Fib { n, result },
                Err(e) => {
                    log::error!("fibonacci worker failed for n={}: {}", n, e);
                    break;
                }
            }
        }
        log::debug!("fibonacci_worker: closed");
    }
    .boxed()
}

/// Merge several streams into one.
///
/// Each source is forwarded by its own task. Items from one source keep
/// their relative order; interleaving between sources is unspecified. The
/// output ends when all sources end or `ctx` is done.
pub fn merge<T>(ctx: StreamContext, sources: Vec<PipelineStream<T>>) -> PipelineStream<T>
where
    T: Send + 'static,
{
    let (tx, rx) = mpsc::channel(sources.len().max(1));

    for (index, source) in sources.into_iter().enumerate() {
        let tx = tx.clone();
        let done = ctx.done();
        tokio::spawn(async move {
            let mut source = source;
            tokio::pin!(done);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut done => break,
                    maybe_item = source.next() => {
                        match maybe_item {
                            Some(item) => {
                                if tx.send(item).await.is_err() {
                                    break;
                                }
                            }
                            None => break,
                        }
                    }
                }
            }
            log::debug!("merge: source {} closed", index);
        });
    }

    ReceiverStream::new(rx).boxed()
}

/// Share `source` between `replicas` copies of `worker` and merge the results.
///
/// Every input element is handed to exactly one worker.
pub fn distribute<T, U, W>(
    ctx: StreamContext,
    source: PipelineStream<T>,
    worker: W,
    replicas: usize,
) -> StreamResult<PipelineStream<U>>
where
    T: Send + 'static,
    U: Send + 'static,
    W: Fn(StreamContext, PipelineStream<T>) -> PipelineStream<U>,
{
    if replicas == 0 {
        return Err(StreamError::InvalidArgument(
            "distribute needs at least one replica".to_string(),
        ));
    }

    let shared = Arc::new(Mutex::new(source));
    let outputs = (0..replicas)
        .map(|_| {
            let shared = Arc::clone(&shared);
            let input = stream! {
                loop {
                    let next = {
                        let mut guard = shared.lock().await;
                        guard.next().await
                    };
                    match next {
                        Some(item) => yield item,
                        None => break,
                    }
                }
            }
            .boxed();
            worker(ctx.clone(), input)
        })
        .collect();

    Ok(merge(ctx, outputs))
}
