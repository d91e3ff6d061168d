//! Bounded fan-out/join for sync operations.
//!
//! A [`TaskGroup`] runs submitted units of work with a caller-specified
//! maximum parallelism and reports the first failure. Units submitted after
//! a failure still run to completion; the group never cancels work that has
//! already started, so a failed `wait` means "one or more operations failed,
//! others may have been applied remotely".

use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// A handle to a group of concurrent units of work.
///
/// Handles are cheap to clone; clones schedule onto the same group, which
/// lets a unit of work fan out further (a localization update scheduling its
/// screenshot uploads) while the original caller waits once for everything.
pub struct TaskGroup<E> {
    inner: Arc<Inner<E>>,
}

struct Inner<E> {
    semaphore: Option<Arc<Semaphore>>,
    first_error: Mutex<Option<E>>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl<E> Clone for TaskGroup<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Send + 'static> TaskGroup<E> {
    /// Create a group running at most `max_concurrency` units at once.
    ///
    /// A `max_concurrency` of zero means unbounded.
    pub fn new(max_concurrency: usize) -> Self {
        let semaphore = if max_concurrency == 0 {
            None
        } else {
            Some(Arc::new(Semaphore::new(max_concurrency)))
        };

        Self {
            inner: Arc::new(Inner {
                semaphore,
                first_error: Mutex::new(None),
                handles: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Schedule a unit of work.
    ///
    /// The unit starts immediately if capacity allows, otherwise it waits
    /// for a slot. Its error, if any, is recorded only if it is the first
    /// failure observed by the group.
    pub fn go<F>(&self, work: F)
    where
        F: Future<Output = Result<(), E>> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);

        let handle = tokio::spawn(async move {
            let _permit = match &inner.semaphore {
                Some(semaphore) => Some(
                    Arc::clone(semaphore)
                        .acquire_owned()
                        .await
                        .expect("task group semaphore closed"),
                ),
                None => None,
            };

            if let Err(err) = work.await {
                let mut slot = inner.first_error.lock().expect("error slot poisoned");
                if slot.is_none() {
                    *slot = Some(err);
                }
            }
        });

        self.inner
            .handles
            .lock()
            .expect("handle list poisoned")
            .push(handle);
    }

    /// Wait for every scheduled unit to complete.
    ///
    /// Returns the first error observed, or `Ok` if all units succeeded.
    /// Units scheduled by other units while waiting are awaited as well.
    pub async fn wait(self) -> Result<(), E> {
        loop {
            let handle = self.inner.handles.lock().expect("handle list poisoned").pop();
            match handle {
                // Completed work may have scheduled more; keep draining.
                Some(handle) => {
                    let _ = handle.await;
                }
                None => break,
            }
        }

        match self
            .inner
            .first_error
            .lock()
            .expect("error slot poisoned")
            .take()
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_all_succeed() {
        let group: TaskGroup<String> = TaskGroup::new(4);
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..10 {
            let count = Arc::clone(&count);
            group.go(async move {
                count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }

        assert!(group.wait().await.is_ok());
        assert_eq!(count.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_first_error_wins_and_siblings_complete() {
        let group: TaskGroup<String> = TaskGroup::new(3);
        let first_done = Arc::new(AtomicBool::new(false));
        let third_done = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&first_done);
        group.go(async move {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });
        group.go(async move { Err("boom".to_string()) });
        let flag = Arc::clone(&third_done);
        group.go(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        let err = group.wait().await.unwrap_err();
        assert_eq!(err, "boom");
        assert!(first_done.load(Ordering::SeqCst));
        assert!(third_done.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_only_first_error_is_reported() {
        let group: TaskGroup<String> = TaskGroup::new(1);
        group.go(async move { Err("first".to_string()) });
        group.go(async move { Err("second".to_string()) });

        // Concurrency of one makes completion order deterministic.
        assert_eq!(group.wait().await.unwrap_err(), "first");
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let group: TaskGroup<String> = TaskGroup::new(2);
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        for _ in 0..12 {
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            group.go(async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            });
        }

        assert!(group.wait().await.is_ok());
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_zero_means_unbounded() {
        let group: TaskGroup<String> = TaskGroup::new(0);
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..50 {
            let count = Arc::clone(&count);
            group.go(async move {
                count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }

        assert!(group.wait().await.is_ok());
        assert_eq!(count.load(Ordering::SeqCst), 50);
    }

    #[tokio::test]
    async fn test_nested_scheduling_is_awaited() {
        let group: TaskGroup<String> = TaskGroup::new(2);
        let nested_done = Arc::new(AtomicBool::new(false));

        let handle = group.clone();
        let flag = Arc::clone(&nested_done);
        group.go(async move {
            handle.go(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                flag.store(true, Ordering::SeqCst);
                Ok(())
            });
            Ok(())
        });

        assert!(group.wait().await.is_ok());
        assert!(nested_done.load(Ordering::SeqCst));
    }
}
