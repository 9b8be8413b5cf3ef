// src/crawl/barrier.rs
// =============================================================================
// A join barrier for tasks that spawn more tasks.
//
// The crawl has no central queue: each task spawns its children directly.
// To know when the whole tree is finished we count outstanding tasks:
// - enter() is called by the PARENT before it spawns a child (+1)
// - the child's guard is dropped when the child finishes (-1)
// - wait() returns once the count reaches zero
//
// Because the child is counted before the parent can finish, the count can
// never touch zero while work is still being handed out.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug, Default)]
pub struct JoinBarrier {
    pending: AtomicUsize,
    notify: Notify,
}

/// Proof that one task is registered with a barrier.
/// Dropping it marks the task as done, even if the task panicked.
#[derive(Debug)]
pub struct BarrierGuard {
    barrier: Arc<JoinBarrier>,
}

impl JoinBarrier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers one more outstanding task
    pub fn enter(self: &Arc<Self>) -> BarrierGuard {
        self.pending.fetch_add(1, Ordering::SeqCst);
        BarrierGuard {
            barrier: Arc::clone(self),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Waits until every registered task has finished.
    /// Returns immediately if nothing is pending.
    pub async fn wait(&self) {
        loop {
            // Register interest before checking the count, otherwise a
            // notification sent between the check and the await is lost
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.pending() == 0 {
                return;
            }
            notified.await;
        }
    }

    fn leave(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.notify.notify_waiters();
        }
    }
}

impl Drop for BarrierGuard {
    fn drop(&mut self) {
        self.barrier.leave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_with_nothing_pending() {
        let barrier = JoinBarrier::new();
        barrier.wait().await;
        assert_eq!(barrier.pending(), 0);
    }

    #[tokio::test]
    async fn test_guard_drop_decrements() {
        let barrier = JoinBarrier::new();
        let a = barrier.enter();
        let b = barrier.enter();
        assert_eq!(barrier.pending(), 2);
        drop(a);
        assert_eq!(barrier.pending(), 1);
        drop(b);
        assert_eq!(barrier.pending(), 0);
    }

    // Each task spawns two children until depth 0; wait() must not return
    // before the last grandchild is done.
    fn spawn_tree(barrier: Arc<JoinBarrier>, guard: BarrierGuard, depth: u32, done: Arc<AtomicUsize>) {
        tokio::spawn(async move {
            let _guard = guard;
            tokio::time::sleep(Duration::from_millis(5)).await;
            if depth > 0 {
                for _ in 0..2 {
                    let child = barrier.enter();
                    spawn_tree(Arc::clone(&barrier), child, depth - 1, Arc::clone(&done));
                }
            }
            done.fetch_add(1, Ordering::SeqCst);
        });
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_wait_covers_recursively_spawned_tasks() {
        let barrier = JoinBarrier::new();
        let done = Arc::new(AtomicUsize::new(0));

        let root = barrier.enter();
        spawn_tree(Arc::clone(&barrier), root, 4, Arc::clone(&done));
        barrier.wait().await;

        // 1 + 2 + 4 + 8 + 16 tasks
        assert_eq!(done.load(Ordering::SeqCst), 31);
        assert_eq!(barrier.pending(), 0);
    }

    #[tokio::test]
    async fn test_guard_released_when_task_panics() {
        let barrier = JoinBarrier::new();
        let guard = barrier.enter();
        let handle = tokio::spawn(async move {
            let _guard = guard;
            panic!("task failed");
        });
        assert!(handle.await.is_err());
        barrier.wait().await;
        assert_eq!(barrier.pending(), 0);
    }
}
