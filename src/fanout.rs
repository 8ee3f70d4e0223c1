// ABOUTME: Concurrent fan-out of one operation per identifier with a join barrier.
// ABOUTME: Bounds in-flight work and collects every per-identifier failure.

use futures::stream::{self, StreamExt};
use std::fmt;
use std::future::Future;
use std::num::NonZeroUsize;

/// Default number of operations allowed in flight at once.
pub const DEFAULT_CONCURRENCY: NonZeroUsize = match NonZeroUsize::new(16) {
    Some(n) => n,
    None => unreachable!(),
};

/// Runs one operation per identifier concurrently and joins on all of them.
///
/// A batch moves from pending to running to either all-succeeded or
/// at-least-one-failed, and only becomes terminal once every operation has
/// reported in. Every operation runs to completion: a failure never cancels
/// its siblings, so all side effects are attempted. At most `limit`
/// operations are in flight at any moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanOut {
    limit: NonZeroUsize,
}

impl Default for FanOut {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

impl FanOut {
    pub fn new(limit: NonZeroUsize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Invoke `op` exactly once for every id.
    ///
    /// On success the values are returned in input order. If any operation
    /// failed, the error carries every `(id, error)` pair in input order and
    /// the successful values are dropped. An empty input succeeds without
    /// calling `op`. Duplicate ids are not collapsed.
    pub async fn run<K, T, E, F, Fut>(
        &self,
        ids: impl IntoIterator<Item = K>,
        op: F,
    ) -> Result<Vec<T>, BatchError<K, E>>
    where
        K: Clone + fmt::Display,
        E: fmt::Display,
        F: Fn(K) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let ids: Vec<K> = ids.into_iter().collect();
        let total = ids.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        tracing::debug!("Fanning out {} operations, {} at a time", total, self.limit());

        let op = &op;
        let mut outcomes: Vec<(usize, K, Result<T, E>)> = stream::iter(ids.into_iter().enumerate())
            .map(move |(index, id)| async move {
                let result = op(id.clone()).await;
                (index, id, result)
            })
            .buffer_unordered(self.limit())
            .collect()
            .await;
        outcomes.sort_by_key(|(index, _, _)| *index);

        let mut values = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for (_, id, result) in outcomes {
            match result {
                Ok(value) => values.push(value),
                Err(error) => {
                    tracing::debug!("Operation for {} failed: {}", id, error);
                    failures.push(Failure { id, error });
                }
            }
        }

        tracing::debug!("Fan-out finished: {} of {} failed", failures.len(), total);

        if failures.is_empty() {
            Ok(values)
        } else {
            Err(BatchError { total, failures })
        }
    }
}

/// One failed operation of a batch.
#[derive(Debug)]
pub struct Failure<K, E> {
    pub id: K,
    pub error: E,
}

/// A batch in which at least one operation failed.
#[derive(Debug)]
pub struct BatchError<K, E> {
    total: usize,
    failures: Vec<Failure<K, E>>,
}

impl<K, E> BatchError<K, E> {
    /// Number of operations in the batch.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn succeeded(&self) -> usize {
        self.total - self.failures.len()
    }

    pub fn failures(&self) -> &[Failure<K, E>] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<Failure<K, E>> {
        self.failures
    }
}

impl<K: fmt::Display, E: fmt::Display> fmt::Display for BatchError<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} operations failed", self.failed(), self.total)?;
        for (i, failure) in self.failures.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}[{}] {}", failure.id, failure.error)?;
        }
        Ok(())
    }
}

impl<K, E> std::error::Error for BatchError<K, E>
where
    K: fmt::Debug + fmt::Display,
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.failures
            .first()
            .map(|f| &f.error as &(dyn std::error::Error + 'static))
    }
}
