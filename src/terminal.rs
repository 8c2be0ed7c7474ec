//! Terminal operators: consume a stream for an effect or a collection.

use futures_util::StreamExt;
use std::fmt::Display;
use std::io::Write;

use crate::error::StreamResult;
use crate::source::PipelineStream;

/// Consume every element in order, calling `f` on each
pub async fn for_each<T, F>(s: PipelineStream<T>, mut f: F)
where
    F: FnMut(T),
{
    let mut s = s;
    while let Some(item) = s.next().await {
        f(item);
    }
}

/// Write each element on its own line and flush once the stream ends.
///
/// Returns the number of lines written. The first write error stops the
/// stream and is returned.
pub async fn print_each<T, W>(s: PipelineStream<T>, writer: &mut W) -> StreamResult<usize>
where
    T: Display,
    W: Write,
{
    let mut s = s;
    let mut written = 0;
    while let Some(item) = s.next().await {
        writeln!(writer, "{}", item)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Collect all elements into a `Vec`
pub async fn collect<T>(s: PipelineStream<T>) -> Vec<T> {
    s.collect().await
}
