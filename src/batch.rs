use futures::future::join_all;
use std::future::Future;

/// Maps `f` over `items` in sequential batches of at most `width` concurrent futures.
///
/// Each batch is awaited in full before the next one starts, and the output is
/// in input order regardless of which future in a batch completes first.
pub async fn batched_map<'a, T, R, F, Fut>(items: &'a [T], width: usize, mut f: F) -> Vec<R>
where
    F: FnMut(&'a T) -> Fut,
    Fut: Future<Output = R>,
{
    let mut results = Vec::with_capacity(items.len());

    for chunk in items.chunks(width.max(1)) {
        let batch = join_all(chunk.iter().map(&mut f)).await;
        results.extend(batch);
    }

    results
}
