//! Rate limiting for noisy browser events (scroll, resize, pointer moves).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::scheduler::Scheduler;

/// Runs at most one call per `limit_ms` window; calls inside the window are dropped.
pub struct Throttle<S: Scheduler> {
    limit_ms: u32,
    blocked: Rc<Cell<bool>>,
    reset: RefCell<Option<S::Handle>>,
    scheduler: S,
}

impl<S: Scheduler> Throttle<S> {
    pub fn new(limit_ms: u32, scheduler: S) -> Self {
        Self {
            limit_ms,
            blocked: Rc::new(Cell::new(false)),
            reset: RefCell::new(None),
            scheduler,
        }
    }

    /// Returns whether `f` ran.
    pub fn run(&self, f: impl FnOnce()) -> bool {
        if self.blocked.get() {
            return false;
        }
        f();
        self.blocked.set(true);
        let blocked = self.blocked.clone();
        let handle = self.scheduler.after(self.limit_ms, Box::new(move || blocked.set(false)));
        *self.reset.borrow_mut() = Some(handle);
        true
    }
}

/// Delays a call until `wait_ms` of quiet. With `immediate`, the first
/// call of a burst runs right away and the trailing edge is skipped.
pub struct Debounce<S: Scheduler> {
    wait_ms: u32,
    immediate: bool,
    armed: Rc<Cell<bool>>,
    pending: RefCell<Option<S::Handle>>,
    scheduler: S,
}

impl<S: Scheduler> Debounce<S> {
    pub fn new(wait_ms: u32, immediate: bool, scheduler: S) -> Self {
        Self {
            wait_ms,
            immediate,
            armed: Rc::new(Cell::new(false)),
            pending: RefCell::new(None),
            scheduler,
        }
    }

    pub fn call(&self, f: impl FnOnce() + 'static) {
        let call_now = self.immediate && !self.armed.get();
        let (leading, trailing) = if self.immediate { (Some(f), None) } else { (None, Some(f)) };

        // Replacing the handle cancels the previous timer.
        self.pending.borrow_mut().take();
        self.armed.set(true);

        let armed = self.armed.clone();
        let handle = self.scheduler.after(
            self.wait_ms,
            Box::new(move || {
                armed.set(false);
                if let Some(f) = trailing {
                    f();
                }
            }),
        );
        *self.pending.borrow_mut() = Some(handle);

        if call_now {
            if let Some(f) = leading {
                f();
            }
        }
    }
}

/// Wraps `f` so only its first invocation runs.
pub fn once<F: FnOnce() -> R, R>(f: F) -> impl FnMut() -> Option<R> {
    let mut f = Some(f);
    move || f.take().map(|f| f())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::manual::ManualScheduler;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() -> Box<dyn FnOnce()>) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, move || {
            let c = c.clone();
            Box::new(move || c.set(c.get() + 1)) as Box<dyn FnOnce()>
        })
    }

    #[test]
    fn throttle_drops_calls_inside_window() {
        let scheduler = ManualScheduler::new();
        let throttle = Throttle::new(16, scheduler.clone());
        let mut runs = 0;

        assert!(throttle.run(|| runs += 1));
        assert!(!throttle.run(|| runs += 1));
        scheduler.advance(15);
        assert!(!throttle.run(|| runs += 1));
        scheduler.advance(1);
        assert!(throttle.run(|| runs += 1));
        assert_eq!(runs, 2);
    }

    #[test]
    fn debounce_fires_once_after_quiet_period() {
        let scheduler = ManualScheduler::new();
        let debounce = Debounce::new(250, false, scheduler.clone());
        let (count, task) = counter();

        for _ in 0..5 {
            debounce.call(task());
            scheduler.advance(100);
        }
        assert_eq!(count.get(), 0);
        scheduler.advance(150);
        assert_eq!(count.get(), 1);
        scheduler.advance(1000);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn immediate_debounce_runs_leading_edge_only() {
        let scheduler = ManualScheduler::new();
        let debounce = Debounce::new(250, true, scheduler.clone());
        let (count, task) = counter();

        debounce.call(task());
        assert_eq!(count.get(), 1);
        debounce.call(task());
        scheduler.advance(100);
        debounce.call(task());
        scheduler.advance(250);
        assert_eq!(count.get(), 1);

        debounce.call(task());
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn once_only_runs_first_call() {
        let mut runs = 0;
        {
            let mut f = once(|| {
                runs += 1;
                runs
            });
            assert_eq!(f(), Some(1));
            assert_eq!(f(), None);
        }
        assert_eq!(runs, 1);
    }
}
