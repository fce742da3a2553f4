use super::FrameTime;

/// A one-shot task waiting on the frame clock.
pub type DeferredTask = Box<dyn FnOnce()>;

#[derive(Debug, Copy, Clone, PartialEq)]
enum Due {
    /// Run on the first frame whose index is at least this value.
    Frame(u64),
    /// Run on the first frame whose unscaled elapsed time reaches this value.
    Elapsed(f64),
}

struct Pending {
    due: Due,
    task: DeferredTask,
}

/// One-shot tasks scheduled against the frame clock.
///
/// Some host systems misbehave when configured during initialization; work
/// that has to happen "after the next frame boundary" is queued here instead
/// of running inline. There is no cancellation: dropping the queue (its owner
/// going away) drops every pending task.
///
/// Tasks run in scheduling order among those that are due.
pub struct DeferredQueue {
    pending: Vec<Pending>,
    /// Index of the frame that will be processed next.
    next_frame: u64,
    /// Unscaled elapsed seconds as of the last processed frame.
    elapsed: f64,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self { pending: Vec::new(), next_frame: 0, elapsed: 0.0 }
    }

    /// Runs `task` on the next processed frame.
    pub fn next_frame(&mut self, task: impl FnOnce() + 'static) {
        self.after_frames(1, task);
    }

    /// Runs `task` once `frames` frame boundaries have passed (`0` behaves like `1`).
    pub fn after_frames(&mut self, frames: u64, task: impl FnOnce() + 'static) {
        let due = self.next_frame + frames.max(1) - 1;
        self.pending.push(Pending { due: Due::Frame(due), task: Box::new(task) });
    }

    /// Runs `task` once `seconds` of unscaled time have elapsed.
    ///
    /// Unscaled so that a pausing menu (time scale `0`) does not hold it back.
    pub fn after_seconds(&mut self, seconds: f64, task: impl FnOnce() + 'static) {
        let due = self.elapsed + seconds.max(0.0);
        self.pending.push(Pending { due: Due::Elapsed(due), task: Box::new(task) });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every task due at `time`, advancing the queue's notion of "now".
    ///
    /// Split from [`run_due`](Self::run_due) so a queue behind a `RefCell` can
    /// release its borrow before the tasks run (tasks may schedule more tasks).
    pub fn take_due(&mut self, time: &FrameTime) -> Vec<DeferredTask> {
        self.next_frame = time.frame_index.wrapping_add(1);
        self.elapsed = time.elapsed;

        let mut due = Vec::new();
        let mut waiting = Vec::with_capacity(self.pending.len());
        for pending in self.pending.drain(..) {
            let ready = match pending.due {
                Due::Frame(frame) => time.frame_index >= frame,
                Due::Elapsed(at) => time.elapsed >= at,
            };
            if ready {
                due.push(pending.task);
            } else {
                waiting.push(pending);
            }
        }
        self.pending = waiting;
        due
    }

    /// Runs every task due at `time` and returns how many ran.
    pub fn run_due(&mut self, time: &FrameTime) -> usize {
        let due = self.take_due(time);
        let n = due.len();
        for task in due {
            task();
        }
        n
    }
}

impl Default for DeferredQueue {
    fn default() -> Self {
        Self::new()
    }
}
