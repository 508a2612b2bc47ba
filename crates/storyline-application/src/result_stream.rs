//! Result streams for the presentation layer.

use std::future::Future;

use futures::StreamExt;
use futures::stream::{self, BoxStream};

use storyline_core::error::Result;
use storyline_core::result::NetworkResult;

/// Stream of [`NetworkResult`] for one logical operation.
pub type ResultStream<'a, T> = BoxStream<'a, NetworkResult<T>>;

/// Wraps `operation` as `Loading` followed by exactly one terminal state.
///
/// The operation does not start until the stream is polled past `Loading`.
pub fn result_stream<'a, T, F>(operation: F) -> ResultStream<'a, T>
where
    T: Send + 'a,
    F: Future<Output = Result<T>> + Send + 'a,
{
    stream::once(async { NetworkResult::Loading })
        .chain(stream::once(async move {
            let result = operation.await;
            if let Err(e) = &result {
                tracing::debug!("[ResultStream] Operation failed: {}", e);
            }
            NetworkResult::from(result)
        }))
        .boxed()
}
