use futures_util::stream::StreamExt;
use odd_stream::pipe::{self, *};
use odd_stream::ops::{is_odd, successor, triple};
use odd_stream::*;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

#[test]
fn test_map_triple() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let tripled = map(triple).apply(stream_of(vec![1, 3, 5])).collect::<Vec<_>>().await;
        assert_eq!(tripled, vec![3, 9, 15]);
    });
}

#[test]
fn test_filter_is_odd() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let odds = pipe::filter(is_odd)
            .apply(stream_of(vec![1, 2, 3, 4, 5]))
            .collect::<Vec<_>>()
            .await;
        assert_eq!(odds, vec![1, 3, 5]);
    });
}

#[test]
fn test_pipe_compose() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let odd_then_successor = pipe::compose(
            pipe::filter(|x: &i64| x % 2 == 1),
            pipe::map(|x: i64| x + 1),
        );
        let successor_then_odd = pipe::compose(
            pipe::map(|x: i64| x + 1),
            pipe::filter(|x: &i64| x % 2 == 1),
        );

        let a = odd_then_successor.apply(stream_of(vec![1, 2, 3, 4])).collect::<Vec<_>>().await;
        let b = successor_then_odd.apply(stream_of(vec![1, 2, 3, 4])).collect::<Vec<_>>().await;
        assert_eq!(a, vec![2, 4]);
        assert_eq!(b, vec![3, 5]);
    });
}

#[test]
fn test_identity_between_stages_changes_nothing() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let with_identity = pipeline(
            stream_of(vec![1, 2, 3, 4, 5]),
            vec![pipe::filter(is_odd), pipe::identity(), map(triple), map(successor)],
        )
        .collect::<Vec<_>>()
        .await;
        assert_eq!(with_identity, vec![4, 10, 16]);
    });
}

#[test]
fn test_pipe_ext_compose() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let stream = from_iter(vec![1, 3, 5]);

        let triple = pipe::map(|x: i64| x * 3);
        let to_string = pipe::map(|x: i64| x.to_string());

        let pipe = triple.compose(to_string);

        let result = pipe.apply(stream).collect::<Vec<_>>().await;
        assert_eq!(result, vec!["3".to_string(), "9".to_string(), "15".to_string()]);
    });
}

#[tokio::test]
async fn test_pipeline_with_no_operators_is_identity() {
    let result = pipeline(stream_of(vec![1, 2, 3]), Vec::new()).collect::<Vec<_>>().await;
    assert_eq!(result, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_pipe_is_reusable_after_clone() {
    let odd = pipe::filter(|x: &i64| x % 2 == 1);
    let again = odd.clone();

    let first = odd.apply(stream_of(vec![1, 2, 3])).collect::<Vec<_>>().await;
    let second = again.apply(stream_of(vec![4, 5, 6])).collect::<Vec<_>>().await;
    assert_eq!(first, vec![1, 3]);
    assert_eq!(second, vec![5]);
}

#[tokio::test]
async fn test_delay_spaces_out_elements() {
    let started = Instant::now();
    let result = pipe::delay(Duration::from_millis(20))
        .apply(stream_of(vec![1, 2, 3]))
        .collect::<Vec<_>>()
        .await;

    assert_eq!(result, vec![1, 2, 3]);
    assert!(started.elapsed() >= Duration::from_millis(60));
}

#[tokio::test]
async fn test_with_context_stops_on_timeout() {
    let (ctx, _cancel) = StreamContext::with_timeout(Duration::from_millis(120));
    let slow = pipe::delay(Duration::from_millis(50));

    let result = pipe::with_context(ctx.clone(), slow)
        .apply(from_iter(1..=10))
        .collect::<Vec<i32>>()
        .await;

    assert!(result.len() >= 1 && result.len() <= 3, "got {:?}", result);
    assert_eq!(result, (1..=result.len() as i32).collect::<Vec<_>>());
    assert_eq!(ctx.err(), Some(StreamError::Timeout));
}

#[tokio::test]
async fn test_with_context_already_cancelled_yields_nothing() {
    let (ctx, cancel) = StreamContext::with_cancel();
    cancel.cancel();

    let result = pipe::with_context(ctx, pipe::identity())
        .apply(stream_of(vec![1, 2, 3]))
        .collect::<Vec<i32>>()
        .await;
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_with_context_background_passes_everything() {
    let result = pipe::with_context(StreamContext::background(), pipe::map(|x: i32| x + 1))
        .apply(stream_of(vec![1, 2, 3]))
        .collect::<Vec<_>>()
        .await;
    assert_eq!(result, vec![2, 3, 4]);
}
