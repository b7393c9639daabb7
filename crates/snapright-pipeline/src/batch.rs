//! Batch fan-out/fan-in coordination.
//!
//! A batch launches one task per input item, lets them complete in any
//! order, and delivers a single aggregate whose slots line up with the
//! input order. Items are independent: a failure is recorded in its own
//! slot and never blocks or fails its siblings.
//!
//! The coordinator drives its tasks from one logical thread of control via
//! an unordered completion stream, so correctness does not depend on the
//! host offering real parallelism.

use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::debug;

/// Completion tracking for one multi-item conversion.
///
/// Holds a pre-sized slot vector (index-aligned with the inputs) and a
/// completion counter. The job is done exactly when every slot has been
/// recorded; results are delivered once, never partially.
pub struct BatchJob<T, E> {
    slots: Vec<Option<Result<T, E>>>,
    completed: usize,
}

impl<T, E> BatchJob<T, E> {
    /// Create a job tracking `total` items.
    pub fn new(total: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(total).collect(),
            completed: 0,
        }
    }

    /// Number of items the job tracks.
    pub fn total(&self) -> usize {
        self.slots.len()
    }

    /// Number of items that have finished, successfully or not.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Whether every item has finished.
    pub fn is_done(&self) -> bool {
        self.completed == self.slots.len()
    }

    /// Record one item's outcome in its original slot.
    ///
    /// Failures are recorded the same way as successes; the slot keeps the
    /// `Err` as an explicit marker. Each slot is written exactly once.
    pub fn record(&mut self, index: usize, result: Result<T, E>) {
        let slot = &mut self.slots[index];
        debug_assert!(slot.is_none(), "slot {index} recorded twice");
        *slot = Some(result);
        self.completed += 1;
    }

    /// Deliver the aggregate, ordered by original input index.
    ///
    /// Callable only once the job is done; the coordinator guarantees that
    /// by driving every task to completion before delivery.
    pub fn into_results(self) -> Vec<Result<T, E>> {
        debug_assert!(self.is_done(), "batch delivered before completion");
        self.slots
            .into_iter()
            .map(|slot| slot.expect("every slot is recorded before delivery"))
            .collect()
    }
}

/// Apply `per_item` to every item concurrently and join the results.
///
/// Tasks are launched together and polled as one set; completion order is
/// unconstrained, but the returned vector is ordered by input index. The
/// aggregate is delivered exactly once, after the last item finishes.
pub async fn run_all<T, R, E, F, Fut>(items: Vec<T>, per_item: F) -> Vec<Result<R, E>>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let mut job = BatchJob::new(items.len());

    let mut tasks: FuturesUnordered<_> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let task = per_item(item);
            async move { (index, task.await) }
        })
        .collect();

    while let Some((index, result)) = tasks.next().await {
        debug!(index, ok = result.is_ok(), "batch item finished");
        job.record(index, result);
    }

    job.into_results()
}
