//! The fixed odd / triple / successor pipeline.
//!
//! `[1, 2, 3, 4, 5]` keeps the odd values, multiplies them by 3 and adds 1,
//! yielding `4`, `10`, `16`. Two renditions are provided with identical
//! output: an eager iterator chain and a lazy stream built from pipes.

use std::io::Write;

use crate::config::PipelineConfig;
use crate::error::StreamResult;
use crate::ops::{is_odd, successor, triple};
use crate::pipe::{self, Pipe};
use crate::source::{stream_of, PipelineStream};
use crate::terminal::print_each;

/// The fixed source sequence
pub const SOURCE: [i64; 5] = [1, 2, 3, 4, 5];

/// Single-pass eager rendition over a slice
pub fn transform_eager(source: &[i64]) -> Vec<i64> {
    source
        .iter()
        .copied()
        .filter(is_odd)
        .map(triple)
        .map(successor)
        .collect()
}

/// The three operators, in order: keep odd, triple, add one
pub fn operators() -> Vec<Pipe<i64, i64>> {
    vec![
        pipe::filter(is_odd),
        pipe::map(triple),
        pipe::map(successor),
    ]
}

/// Lazy rendition over an arbitrary source
pub fn build_pipeline(source: Vec<i64>) -> PipelineStream<i64> {
    pipe::pipeline(stream_of(source), operators())
}

/// Run the fixed pipeline and print every result on its own line.
///
/// Returns the number of lines written.
pub async fn run<W: Write>(writer: &mut W) -> StreamResult<usize> {
    print_each(build_pipeline(SOURCE.to_vec()), writer).await
}

/// Run the pipeline over `config.source`, honoring its stage delay and timeout.
///
/// A timeout truncates the output rather than failing the run.
pub async fn run_with_config<W: Write>(config: &PipelineConfig, writer: &mut W) -> StreamResult<usize> {
    config.validate()?;
    let (ctx, _cancel) = config.context();

    let mut operators: Vec<Pipe<i64, i64>> = Vec::with_capacity(4);
    if let Some(period) = config.stage_delay {
        operators.push(pipe::delay(period));
    }
    operators.extend(self::operators());

    let piped = pipe::with_context(ctx.clone(), pipe::identity())
        .apply(pipe::pipeline(stream_of(config.source.clone()), operators));
    let written = print_each(piped, writer).await?;

    if let Some(reason) = ctx.err() {
        log::warn!("pipeline stopped early after {} values: {}", written, reason);
    }
    Ok(written)
}
