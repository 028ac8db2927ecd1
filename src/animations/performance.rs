use std::cell::Cell;
use std::rc::Rc;

use log::{info, warn};

use super::frame::FrameLoop;
use crate::dom;
use crate::utils::perf::memory_usage;
use crate::Result;

pub const REDUCED_CLASS: &str = "reduced-animations";
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
const LOW_FPS: u32 = 30;
const RECOVERED_FPS: u32 = 55;
const SAMPLE_MS: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Reduce,
    Restore,
}

/// Counts frames and reports the rate once per second of wall time.
#[derive(Debug, Clone)]
pub struct FpsMonitor {
    frames: u32,
    window_start: f64,
    fps: u32,
}

impl FpsMonitor {
    pub fn new(now: f64) -> Self {
        Self { frames: 0, window_start: now, fps: 60 }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Records a frame at `now`. At the end of each sample window returns
    /// what to do about animation detail, if anything.
    pub fn frame(&mut self, now: f64) -> Option<Adjustment> {
        self.frames += 1;
        let elapsed = now - self.window_start;
        if elapsed < SAMPLE_MS {
            return None;
        }
        self.fps = (self.frames as f64 * 1000.0 / elapsed).round() as u32;
        self.frames = 0;
        self.window_start = now;

        if self.fps < LOW_FPS {
            Some(Adjustment::Reduce)
        } else if self.fps > RECOVERED_FPS {
            Some(Adjustment::Restore)
        } else {
            None
        }
    }
}

pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
        .map(|q| q.matches())
        .unwrap_or(false)
}

/// Watches the frame rate and toggles `reduced-animations` on `<body>`.
pub struct PerformanceWatch {
    _frames: FrameLoop,
}

impl PerformanceWatch {
    pub fn attach() -> Result<Self> {
        let body = dom::body()?;
        if prefers_reduced_motion() {
            dom::set_class(&body, REDUCED_CLASS, true);
            info!("Reduced motion preference detected");
        }

        let monitor: Rc<Cell<Option<FpsMonitor>>> = Rc::new(Cell::new(None));
        let frames = FrameLoop::start(move |now| {
            let mut current = monitor.take().unwrap_or_else(|| FpsMonitor::new(now));
            match current.frame(now) {
                Some(Adjustment::Reduce) if !dom::has_class(&body, REDUCED_CLASS) => {
                    dom::set_class(&body, REDUCED_CLASS, true);
                    warn!("Low FPS detected ({}), reducing animation complexity", current.fps());
                    if let Some(memory) = memory_usage() {
                        warn!("Heap in use: {} of {} MB", memory.used, memory.total);
                    }
                }
                Some(Adjustment::Restore) if dom::has_class(&body, REDUCED_CLASS) && !prefers_reduced_motion() => {
                    dom::set_class(&body, REDUCED_CLASS, false);
                    info!("FPS improved, re-enabling full animations");
                }
                _ => {}
            }
            monitor.set(Some(current));
            true
        })?;
        Ok(Self { _frames: frames })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_second() {
        let mut monitor = FpsMonitor::new(0.0);
        for i in 1..60 {
            assert_eq!(monitor.frame(i as f64 * 16.0), None);
        }
        assert_eq!(monitor.frame(992.0), None);
        // 61 frames over exactly one second
        assert_eq!(monitor.frame(1000.0), Some(Adjustment::Restore));
        assert_eq!(monitor.fps(), 61);
    }

    #[test]
    fn low_rate_reduces() {
        let mut monitor = FpsMonitor::new(0.0);
        for i in 1..20 {
            monitor.frame(i as f64 * 50.0);
        }
        assert_eq!(monitor.frame(1000.0), Some(Adjustment::Reduce));
        assert_eq!(monitor.fps(), 20);
    }

    #[test]
    fn middling_rate_changes_nothing() {
        let mut monitor = FpsMonitor::new(0.0);
        for i in 1..40 {
            monitor.frame(i as f64 * 25.0);
        }
        assert_eq!(monitor.frame(1000.0), None);
        assert_eq!(monitor.fps(), 40);
    }
}
