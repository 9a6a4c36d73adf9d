use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Keeps a scheduled task alive; dropping it cancels the task.
pub struct TaskHandle {
    _guard: Box<dyn Any>,
}

impl TaskHandle {
    pub fn new<T: 'static>(guard: T) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

/// Timer and display-refresh source used by the timed state machines.
pub trait Scheduler {
    fn now_ms(&self) -> f64;
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle;
    /// Runs `task` on the next display refresh with the frame timestamp.
    fn on_next_frame(&self, task: Box<dyn FnOnce(f64)>) -> TaskHandle;
}

pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 16.0;

enum ManualTask {
    Timer(Box<dyn FnOnce()>),
    Frame(Box<dyn FnOnce(f64)>),
}

struct Pending {
    due_ms: f64,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    task: ManualTask,
}

struct ManualQueue {
    now_ms: f64,
    frame_interval_ms: f64,
    next_seq: u64,
    pending: Vec<Pending>,
}

struct CancelOnDrop(Rc<Cell<bool>>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

/// Deterministic scheduler: time only moves when [`ManualScheduler::advance`]
/// is called, frames fire every `frame_interval_ms`.
#[derive(Clone)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL_MS)
    }

    pub fn with_frame_interval(frame_interval_ms: f64) -> Self {
        Self {
            queue: Rc::new(RefCell::new(ManualQueue {
                now_ms: 0.0,
                frame_interval_ms: frame_interval_ms.max(1.0),
                next_seq: 0,
                pending: Vec::new(),
            })),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.queue
            .borrow()
            .pending
            .iter()
            .filter(|task| !task.cancelled.get())
            .count()
    }

    /// Moves the clock forward, running every task that comes due in order.
    pub fn advance(&self, delta_ms: f64) {
        let target = self.queue.borrow().now_ms + delta_ms.max(0.0);
        while let Some(task) = self.pop_due(target) {
            match task.task {
                ManualTask::Timer(run) => run(),
                ManualTask::Frame(run) => run(task.due_ms),
            }
        }
        self.queue.borrow_mut().now_ms = target;
    }

    fn pop_due(&self, target: f64) -> Option<Pending> {
        let mut queue = self.queue.borrow_mut();
        queue.pending.retain(|task| !task.cancelled.get());
        let index = queue
            .pending
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due_ms <= target)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .total_cmp(&b.due_ms)
                    .then_with(|| a.seq.cmp(&b.seq))
            })
            .map(|(index, _)| index)?;
        let task = queue.pending.swap_remove(index);
        queue.now_ms = queue.now_ms.max(task.due_ms);
        Some(task)
    }

    fn push(&self, due_ms: f64, task: ManualTask) -> TaskHandle {
        let cancelled = Rc::new(Cell::new(false));
        let mut queue = self.queue.borrow_mut();
        let seq = queue.next_seq;
        queue.next_seq = seq.wrapping_add(1);
        queue.pending.push(Pending {
            due_ms,
            seq,
            cancelled: Rc::clone(&cancelled),
            task,
        });
        TaskHandle::new(CancelOnDrop(cancelled))
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.queue.borrow().now_ms
    }

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        let due = self.now_ms() + f64::from(delay_ms);
        self.push(due, ManualTask::Timer(task))
    }

    fn on_next_frame(&self, task: Box<dyn FnOnce(f64)>) -> TaskHandle {
        let (now, interval) = {
            let queue = self.queue.borrow();
            (queue.now_ms, queue.frame_interval_ms)
        };
        let due = ((now / interval).floor() + 1.0) * interval;
        self.push(due, ManualTask::Frame(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_timers_in_due_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_a = Rc::clone(&log);
        let log_b = Rc::clone(&log);
        let _a = scheduler.after(30, Box::new(move || log_a.borrow_mut().push("a")));
        let _b = scheduler.after(10, Box::new(move || log_b.borrow_mut().push("b")));
        scheduler.advance(20.0);
        assert_eq!(*log.borrow(), vec!["b"]);
        scheduler.advance(10.0);
        assert_eq!(*log.borrow(), vec!["b", "a"]);
        assert_eq!(scheduler.now_ms(), 30.0);
    }

    #[test]
    fn dropped_handle_cancels() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let handle = scheduler.after(5, Box::new(move || flag.set(true)));
        drop(handle);
        scheduler.advance(100.0);
        assert!(!fired.get());
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn frames_land_on_interval_boundaries() {
        let scheduler = ManualScheduler::with_frame_interval(10.0);
        let stamp = Rc::new(Cell::new(-1.0));
        let out = Rc::clone(&stamp);
        scheduler.advance(3.0);
        let _frame = scheduler.on_next_frame(Box::new(move |ts| out.set(ts)));
        scheduler.advance(6.0);
        assert_eq!(stamp.get(), -1.0);
        scheduler.advance(1.0);
        assert_eq!(stamp.get(), 10.0);
    }
}
