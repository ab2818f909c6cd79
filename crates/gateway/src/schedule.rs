//! Cancellable periodic and delayed tasks
//!
//! Every timer a component starts is a [`ScheduledTask`] registered in the
//! component's [`TaskSet`], so disposing the component aborts all of them.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// A spawned timer task, aborted on drop
pub struct ScheduledTask {
    name: String,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Run `work` after `initial_delay`, then every `period`.
    ///
    /// Runs of the same task never overlap: a slow run delays the next tick
    /// instead of stacking up behind it.
    pub fn every<F, Fut>(
        name: impl Into<String>,
        initial_delay: Duration,
        period: Duration,
        mut work: F,
    ) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        let task_name = name.clone();
        // interval_at panics on a zero period
        let period = period.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + initial_delay, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            log::debug!("Task {} scheduled every {:?}", task_name, period);
            loop {
                ticker.tick().await;
                work().await;
            }
        });

        Self { name, handle }
    }

    /// Run `work` once after `delay`
    pub fn after<Fut>(name: impl Into<String>, delay: Duration, work: Fut) -> Self
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            work.await;
        });

        Self {
            name: name.into(),
            handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Default)]
struct TaskSetState {
    tasks: Vec<ScheduledTask>,
    closed: bool,
}

/// The tasks owned by one component
#[derive(Default)]
pub struct TaskSet {
    state: Mutex<TaskSetState>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task, dropping any that have already completed. Once the set
    /// is closed the task is aborted immediately and `false` is returned.
    pub fn push(&self, task: ScheduledTask) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.closed {
            log::debug!("Task set closed, aborting {}", task.name());
            task.abort();
            return false;
        }
        // one-shot tasks that already ran
        state.tasks.retain(|t| !t.is_finished());
        state.tasks.push(task);
        true
    }

    /// Abort every registered task and refuse new ones
    pub fn abort_all(&self) {
        let tasks = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.closed = true;
            std::mem::take(&mut state.tasks)
        };
        for task in &tasks {
            log::debug!("Aborting task {}", task.name());
            task.abort();
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_task(counter: &Arc<AtomicUsize>) -> impl FnMut() -> std::future::Ready<()> + Send + 'static {
        let counter = counter.clone();
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_honours_initial_delay_and_period() {
        let counter = Arc::new(AtomicUsize::new(0));
        let _task = ScheduledTask::every(
            "count",
            Duration::from_millis(100),
            Duration::from_millis(50),
            counting_task(&counter),
        );

        tokio::time::sleep(Duration::from_millis(90)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        // ticks at 150, 200, 250
        tokio::time::sleep(Duration::from_millis(140)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_stops_ticks() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = ScheduledTask::every(
            "count",
            Duration::ZERO,
            Duration::from_millis(10),
            counting_task(&counter),
        );

        tokio::time::sleep(Duration::from_millis(25)).await;
        let seen = counter.load(Ordering::SeqCst);
        assert!(seen > 0);

        task.abort();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), seen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_after_runs_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        let task = ScheduledTask::after("once", Duration::from_millis(100), async move {
            c.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_set_prunes_finished_tasks() {
        let counter = Arc::new(AtomicUsize::new(0));
        let set = TaskSet::new();
        set.push(ScheduledTask::after("once", Duration::from_millis(10), async {}));
        assert_eq!(set.len(), 1);

        tokio::time::sleep(Duration::from_millis(50)).await;
        set.push(ScheduledTask::every(
            "count",
            Duration::ZERO,
            Duration::from_millis(10),
            counting_task(&counter),
        ));
        assert_eq!(set.len(), 1);
        set.abort_all();
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_set_abort_all() {
        let counter = Arc::new(AtomicUsize::new(0));
        let set = TaskSet::new();
        assert!(set.push(ScheduledTask::every(
            "a",
            Duration::ZERO,
            Duration::from_millis(10),
            counting_task(&counter),
        )));
        assert!(set.push(ScheduledTask::every(
            "b",
            Duration::ZERO,
            Duration::from_millis(10),
            counting_task(&counter),
        )));
        assert_eq!(set.len(), 2);

        tokio::time::sleep(Duration::from_millis(15)).await;
        set.abort_all();
        assert!(set.is_empty());
        assert!(set.is_closed());

        let seen = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), seen);

        // closed sets refuse new work
        assert!(!set.push(ScheduledTask::every(
            "late",
            Duration::ZERO,
            Duration::from_millis(10),
            counting_task(&counter),
        )));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), seen);
    }
}
