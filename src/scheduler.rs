//! Timer seam shared by every controller that schedules work.
//!
//! Handles cancel their timer when dropped, so "at most one live timer"
//! reduces to "at most one stored handle".

use gloo_timers::callback::{Interval, Timeout};

pub trait Scheduler {
    type Handle;

    /// Runs `task` once after `millis`.
    fn after(&self, millis: u32, task: Box<dyn FnOnce()>) -> Self::Handle;

    /// Runs `task` every `millis`, first after one full period.
    fn every(&self, millis: u32, task: Box<dyn FnMut()>) -> Self::Handle;
}

pub enum TimerHandle {
    Timeout(Timeout),
    Interval(Interval),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = TimerHandle;

    fn after(&self, millis: u32, task: Box<dyn FnOnce()>) -> TimerHandle {
        TimerHandle::Timeout(Timeout::new(millis, task))
    }

    fn every(&self, millis: u32, task: Box<dyn FnMut()>) -> TimerHandle {
        TimerHandle::Interval(Interval::new(millis, task))
    }
}

#[cfg(test)]
pub mod manual {
    use super::Scheduler;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::{Rc, Weak};

    enum Job {
        Once(Box<dyn FnOnce()>),
        Every(Box<dyn FnMut()>),
    }

    struct Task {
        id: u64,
        due: u64,
        period: Option<u64>,
        job: Job,
    }

    #[derive(Default)]
    struct Clock {
        now: u64,
        next_id: u64,
        tasks: Vec<Task>,
        cancelled: HashSet<u64>,
    }

    /// Deterministic clock for tests; time only moves through `advance`.
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        clock: Rc<RefCell<Clock>>,
    }

    pub struct ManualHandle {
        id: u64,
        clock: Weak<RefCell<Clock>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            if let Some(clock) = self.clock.upgrade() {
                let mut clock = clock.borrow_mut();
                clock.tasks.retain(|t| t.id != self.id);
                clock.cancelled.insert(self.id);
            }
        }
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn now(&self) -> u64 {
            self.clock.borrow().now
        }

        pub fn pending(&self) -> usize {
            self.clock.borrow().tasks.len()
        }

        pub fn advance(&self, millis: u64) {
            let target = self.now() + millis;
            self.advance_to(target);
        }

        /// Fires every task due at or before `target`, in due order.
        pub fn advance_to(&self, target: u64) {
            loop {
                let task = {
                    let mut clock = self.clock.borrow_mut();
                    let next = clock
                        .tasks
                        .iter()
                        .enumerate()
                        .filter(|(_, t)| t.due <= target)
                        .min_by_key(|(_, t)| (t.due, t.id))
                        .map(|(i, _)| i);
                    match next {
                        Some(i) => {
                            let task = clock.tasks.remove(i);
                            clock.now = task.due;
                            task
                        }
                        None => break,
                    }
                };

                let Task { id, due, period, job } = task;
                match job {
                    Job::Once(run) => run(),
                    Job::Every(mut run) => {
                        run();
                        let mut clock = self.clock.borrow_mut();
                        if !clock.cancelled.contains(&id) {
                            let period = period.unwrap_or(1).max(1);
                            clock.tasks.push(Task { id, due: due + period, period: Some(period), job: Job::Every(run) });
                        }
                    }
                }
            }
            self.clock.borrow_mut().now = target;
        }

        fn push(&self, millis: u32, period: Option<u64>, job: Job) -> ManualHandle {
            let mut clock = self.clock.borrow_mut();
            let id = clock.next_id;
            clock.next_id += 1;
            let due = clock.now + millis as u64;
            clock.tasks.push(Task { id, due, period, job });
            ManualHandle { id, clock: Rc::downgrade(&self.clock) }
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn after(&self, millis: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
            self.push(millis, None, Job::Once(task))
        }

        fn every(&self, millis: u32, task: Box<dyn FnMut()>) -> ManualHandle {
            self.push(millis, Some(millis as u64), Job::Every(task))
        }
    }

    mod tests {
        use super::*;
        use std::cell::Cell;

        #[test]
        fn once_fires_at_due_time() {
            let scheduler = ManualScheduler::new();
            let fired = Rc::new(Cell::new(false));
            let flag = fired.clone();
            let _handle = scheduler.after(100, Box::new(move || flag.set(true)));

            scheduler.advance(99);
            assert!(!fired.get());
            scheduler.advance(1);
            assert!(fired.get());
            assert_eq!(scheduler.pending(), 0);
        }

        #[test]
        fn dropping_handle_cancels() {
            let scheduler = ManualScheduler::new();
            let count = Rc::new(Cell::new(0));
            let c = count.clone();
            let handle = scheduler.every(10, Box::new(move || c.set(c.get() + 1)));

            scheduler.advance(25);
            assert_eq!(count.get(), 2);
            drop(handle);
            scheduler.advance(100);
            assert_eq!(count.get(), 2);
        }
    }
}
