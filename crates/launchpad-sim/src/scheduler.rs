//! One-shot delayed tasks on the host's wall clock.
//!
//! Each task is tagged with the interaction it belongs to. Polling fires
//! a due task exactly once and removes it; cancelling by handle or by
//! interaction drops it without firing.

/// Handle returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    handle: TaskHandle,
    due_ms: f64,
    interaction: u64,
    payload: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    tasks: Vec<ScheduledTask<T>>,
    next_handle: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_handle: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: f64, delay_ms: u64, interaction: u64, payload: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.tasks.push(ScheduledTask {
            handle,
            due_ms: now_ms + delay_ms as f64,
            interaction,
            payload,
        });
        handle
    }

    /// Returns true if the task was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    /// Cancel every task belonging to `interaction`. Returns how many were
    /// dropped.
    pub fn cancel_interaction(&mut self, interaction: u64) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.interaction != interaction);
        before - self.tasks.len()
    }

    /// Remove and return every task due at `now_ms`, in scheduling order.
    pub fn poll(&mut self, now_ms: f64) -> Vec<(u64, T)> {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|t| t.due_ms <= now_ms);
        self.tasks = pending;
        due.into_iter().map(|t| (t.interaction, t.payload)).collect()
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }
}
