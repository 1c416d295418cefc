//! Wall-clock expiry scheduling on a dedicated worker thread.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error};
use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::error::Result;
use crate::hold::HoldId;

use super::{ExpiryScheduler, ExpiryTask};

/// Fires expiry tasks at their deadlines from one background thread.
///
/// Tasks wait in a deadline-ordered queue. The worker sleeps on a condition
/// variable until the earliest deadline (or until a new task or shutdown
/// wakes it), pops every due task and runs them with the queue unlocked.
/// Dropping the scheduler stops the worker and discards tasks that have not
/// fired.
#[derive(Debug)]
pub struct TimerScheduler {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

#[derive(Debug, Default)]
struct Shared {
    queue: Mutex<TimerQueue>,
    wakeup: Condvar,
}

#[derive(Debug, Default)]
struct TimerQueue {
    deadlines: BinaryHeap<Reverse<(Instant, u64)>>,
    // Armed task per sequence number; cancelled tasks are removed here and
    // their heap entries skipped when they surface.
    tasks: HashMap<u64, ExpiryTask>,
    by_hold: HashMap<HoldId, u64>,
    next_seq: u64,
    shutdown: bool,
}

impl TimerQueue {
    fn push(&mut self, task: ExpiryTask, deadline: Instant) {
        let seq = self.next_seq;
        self.next_seq += 1;
        if let Some(previous) = self.by_hold.insert(task.hold_id(), seq) {
            self.tasks.remove(&previous);
        }
        self.tasks.insert(seq, task);
        self.deadlines.push(Reverse((deadline, seq)));
    }

    fn cancel(&mut self, hold_id: HoldId) -> bool {
        match self.by_hold.remove(&hold_id) {
            Some(seq) => self.tasks.remove(&seq).is_some(),
            None => false,
        }
    }

    fn next_deadline(&mut self) -> Option<Instant> {
        while let Some(Reverse((deadline, seq))) = self.deadlines.peek().copied() {
            if self.tasks.contains_key(&seq) {
                return Some(deadline);
            }
            self.deadlines.pop();
        }
        None
    }

    fn pop_due(&mut self, now: Instant) -> Vec<ExpiryTask> {
        let mut due = Vec::new();
        while let Some(Reverse((deadline, seq))) = self.deadlines.peek().copied() {
            if deadline > now {
                break;
            }
            self.deadlines.pop();
            if let Some(task) = self.tasks.remove(&seq) {
                self.by_hold.remove(&task.hold_id());
                due.push(task);
            }
        }
        due
    }

    fn len(&self) -> usize {
        self.tasks.len()
    }
}

impl TimerScheduler {
    /// Starts the worker thread.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the thread cannot be spawned.
    pub fn new() -> Result<Self> {
        let shared = Arc::new(Shared::default());
        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("seathold-expiry".to_string())
            .spawn(move || run_worker(&worker_shared))?;
        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Number of armed tasks that have neither fired nor been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.shared.queue.lock().len()
    }
}

impl ExpiryScheduler for TimerScheduler {
    fn schedule(&self, task: ExpiryTask, delay: Duration) {
        let deadline = Instant::now() + delay;
        debug!("arming expiry for hold {} in {delay:?}", task.hold_id());
        self.shared.queue.lock().push(task, deadline);
        self.shared.wakeup.notify_one();
    }

    fn cancel(&self, hold_id: HoldId) {
        if self.shared.queue.lock().cancel(hold_id) {
            debug!("cancelled expiry for hold {hold_id}");
        }
    }
}

impl Drop for TimerScheduler {
    fn drop(&mut self) {
        self.shared.queue.lock().shutdown = true;
        self.shared.wakeup.notify_all();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("expiry worker panicked");
            }
        }
    }
}

fn run_worker(shared: &Shared) {
    let mut queue = shared.queue.lock();
    loop {
        if queue.shutdown {
            return;
        }
        match queue.next_deadline() {
            None => shared.wakeup.wait(&mut queue),
            Some(deadline) if deadline > Instant::now() => {
                shared.wakeup.wait_until(&mut queue, deadline);
            }
            Some(_) => {
                let due = queue.pop_due(Instant::now());
                // Tasks take the service lock; never hold the queue lock then
                MutexGuard::unlocked(&mut queue, || {
                    for task in due {
                        let outcome = task.run();
                        debug!("expiry for hold {} fired: {outcome:?}", task.hold_id());
                    }
                });
            }
        }
    }
}
