//! Testimonial carousel: a circular track of slides with a parallel row
//! of indicators, optionally advanced by a repeating timer.
//!
//! Exactly one slide/indicator pair is active while the track is
//! non-empty. Timer ticks and user actions both end in [`Track::go_to`],
//! which updates every handle synchronously, so any interleaving of
//! events leaves a consistent display.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use web_sys::Element;

use crate::config::{TestimonialConfig, DEFAULT_TESTIMONIAL_INTERVAL_MS};
use crate::scheduler::Scheduler;

/// Anything that can be visually marked as the active item.
pub trait ActiveToggle {
    fn set_active(&self, active: bool);
}

impl ActiveToggle for Element {
    fn set_active(&self, active: bool) {
        let _ = self.class_list().toggle_with_force("active", active);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayConfig {
    pub enabled: bool,
    pub interval_ms: u32,
}

impl AutoplayConfig {
    pub fn new(enabled: bool, interval_ms: u32) -> Self {
        let interval_ms = if interval_ms == 0 {
            warn!("Carousel interval must be positive, using {}ms", DEFAULT_TESTIMONIAL_INTERVAL_MS);
            DEFAULT_TESTIMONIAL_INTERVAL_MS
        } else {
            interval_ms
        };
        Self { enabled, interval_ms }
    }

    pub fn disabled() -> Self {
        Self::new(false, DEFAULT_TESTIMONIAL_INTERVAL_MS)
    }
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self::new(true, DEFAULT_TESTIMONIAL_INTERVAL_MS)
    }
}

impl From<&TestimonialConfig> for AutoplayConfig {
    fn from(config: &TestimonialConfig) -> Self {
        Self::new(config.autoplay, config.interval_ms())
    }
}

/// Inputs a UI binding layer forwards from platform events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    Next,
    Prev,
    Select(usize),
    HoverEnter,
    HoverLeave,
}

struct Track<T> {
    slides: Vec<T>,
    indicators: Vec<T>,
    current: usize,
}

impl<T: ActiveToggle> Track<T> {
    fn len(&self) -> usize {
        self.slides.len()
    }

    fn go_to(&mut self, index: usize) {
        if index >= self.len() {
            // Out-of-range jumps are rejected rather than clamped.
            warn!("Ignoring carousel jump to {} (have {} slides)", index, self.len());
            return;
        }
        for (i, slide) in self.slides.iter().enumerate() {
            slide.set_active(i == index);
        }
        for (i, indicator) in self.indicators.iter().enumerate() {
            indicator.set_active(i == index);
        }
        self.current = index;
    }

    fn next(&mut self) {
        let len = self.len();
        if len > 0 {
            self.go_to((self.current + 1) % len);
        }
    }

    fn prev(&mut self) {
        let len = self.len();
        if len > 0 {
            self.go_to((self.current + len - 1) % len);
        }
    }
}

pub struct Carousel<T, S: Scheduler> {
    track: Rc<RefCell<Track<T>>>,
    timer: RefCell<Option<S::Handle>>,
    scheduler: S,
    autoplay: AutoplayConfig,
}

impl<T: ActiveToggle + 'static, S: Scheduler> Carousel<T, S> {
    /// Binds the carousel to its slides and indicators. With no slides the
    /// carousel is inert and every operation is a no-op.
    pub fn new(slides: Vec<T>, mut indicators: Vec<T>, autoplay: AutoplayConfig, scheduler: S) -> Self {
        if indicators.len() != slides.len() {
            warn!(
                "Carousel has {} slides but {} indicators; extra indicators are ignored",
                slides.len(),
                indicators.len()
            );
            indicators.truncate(slides.len());
        }

        let carousel = Self {
            track: Rc::new(RefCell::new(Track { slides, indicators, current: 0 })),
            timer: RefCell::new(None),
            scheduler,
            autoplay,
        };

        if !carousel.is_inert() {
            carousel.track.borrow_mut().go_to(0);
            carousel.start_autoplay();
            debug!("Carousel ready with {} slides", carousel.len());
        }
        carousel
    }

    pub fn len(&self) -> usize {
        self.track.borrow().len()
    }

    pub fn is_inert(&self) -> bool {
        self.len() == 0
    }

    /// Active slide, or `None` for an inert carousel.
    pub fn current_index(&self) -> Option<usize> {
        let track = self.track.borrow();
        (track.len() > 0).then_some(track.current)
    }

    pub fn is_autoplaying(&self) -> bool {
        self.timer.borrow().is_some()
    }

    pub fn go_to_slide(&self, index: usize) {
        if self.is_inert() {
            return;
        }
        self.track.borrow_mut().go_to(index);
    }

    pub fn next_slide(&self) {
        self.track.borrow_mut().next();
    }

    pub fn prev_slide(&self) {
        self.track.borrow_mut().prev();
    }

    /// (Re)starts autoplay from a full interval. Any live timer is
    /// cancelled first, so repeated calls never stack timers.
    pub fn start_autoplay(&self) {
        if self.is_inert() {
            return;
        }
        self.pause_autoplay();
        if !self.autoplay.enabled {
            return;
        }

        let track = Rc::downgrade(&self.track);
        let handle = self.scheduler.every(
            self.autoplay.interval_ms,
            Box::new(move || {
                if let Some(track) = track.upgrade() {
                    track.borrow_mut().next();
                }
            }),
        );
        *self.timer.borrow_mut() = Some(handle);
    }

    pub fn pause_autoplay(&self) {
        let handle = self.timer.borrow_mut().take();
        drop(handle);
    }

    pub fn handle(&self, event: CarouselEvent) {
        match event {
            CarouselEvent::Next => self.next_slide(),
            CarouselEvent::Prev => self.prev_slide(),
            CarouselEvent::Select(index) => self.go_to_slide(index),
            CarouselEvent::HoverEnter => self.pause_autoplay(),
            CarouselEvent::HoverLeave => self.start_autoplay(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::manual::ManualScheduler;
    use std::cell::Cell;

    #[derive(Clone, Default)]
    struct Flag {
        active: Rc<Cell<bool>>,
        writes: Rc<Cell<u32>>,
    }

    impl ActiveToggle for Flag {
        fn set_active(&self, active: bool) {
            self.active.set(active);
            self.writes.set(self.writes.get() + 1);
        }
    }

    struct Fixture {
        slides: Vec<Flag>,
        dots: Vec<Flag>,
        scheduler: ManualScheduler,
        carousel: Carousel<Flag, ManualScheduler>,
    }

    fn fixture(n: usize, autoplay: AutoplayConfig) -> Fixture {
        let slides: Vec<Flag> = (0..n).map(|_| Flag::default()).collect();
        let dots: Vec<Flag> = (0..n).map(|_| Flag::default()).collect();
        let scheduler = ManualScheduler::new();
        let carousel = Carousel::new(slides.clone(), dots.clone(), autoplay, scheduler.clone());
        Fixture { slides, dots, scheduler, carousel }
    }

    fn active(flags: &[Flag]) -> Vec<usize> {
        flags
            .iter()
            .enumerate()
            .filter(|(_, f)| f.active.get())
            .map(|(i, _)| i)
            .collect()
    }

    fn assert_single_active(f: &Fixture, index: usize) {
        assert_eq!(active(&f.slides), vec![index]);
        assert_eq!(active(&f.dots), vec![index]);
        assert_eq!(f.carousel.current_index(), Some(index));
    }

    #[test]
    fn starts_on_first_slide() {
        let f = fixture(3, AutoplayConfig::disabled());
        assert_single_active(&f, 0);
        assert!(!f.carousel.is_autoplaying());
    }

    #[test]
    fn next_and_prev_keep_exactly_one_active() {
        let f = fixture(4, AutoplayConfig::disabled());
        let moves = [true, true, false, true, true, true, false, false, false, false, true];
        let mut expected = 0usize;
        for forward in moves {
            if forward {
                f.carousel.next_slide();
                expected = (expected + 1) % 4;
            } else {
                f.carousel.prev_slide();
                expected = (expected + 3) % 4;
            }
            assert_single_active(&f, expected);
        }
    }

    #[test]
    fn next_wraps_around_after_n_steps() {
        let f = fixture(5, AutoplayConfig::disabled());
        for _ in 0..5 {
            f.carousel.next_slide();
        }
        assert_single_active(&f, 0);
    }

    #[test]
    fn prev_wraps_around_after_n_steps() {
        let f = fixture(5, AutoplayConfig::disabled());
        f.carousel.prev_slide();
        assert_single_active(&f, 4);
        for _ in 0..4 {
            f.carousel.prev_slide();
        }
        assert_single_active(&f, 0);
    }

    #[test]
    fn go_to_reads_back_every_index() {
        let f = fixture(6, AutoplayConfig::disabled());
        for i in (0..6).rev() {
            f.carousel.go_to_slide(i);
            assert_single_active(&f, i);
        }
    }

    #[test]
    fn out_of_range_jump_is_rejected() {
        let f = fixture(3, AutoplayConfig::disabled());
        f.carousel.go_to_slide(1);
        f.carousel.go_to_slide(3);
        f.carousel.go_to_slide(usize::MAX);
        assert_single_active(&f, 1);
    }

    #[test]
    fn single_slide_wraps_onto_itself() {
        let f = fixture(1, AutoplayConfig::disabled());
        f.carousel.next_slide();
        f.carousel.prev_slide();
        assert_single_active(&f, 0);
    }

    #[test]
    fn empty_carousel_is_inert() {
        let f = fixture(0, AutoplayConfig::default());
        assert!(f.carousel.is_inert());
        assert_eq!(f.carousel.current_index(), None);

        f.carousel.next_slide();
        f.carousel.prev_slide();
        f.carousel.go_to_slide(0);
        f.carousel.start_autoplay();
        f.carousel.pause_autoplay();
        f.carousel.handle(CarouselEvent::HoverLeave);

        assert!(!f.carousel.is_autoplaying());
        assert_eq!(f.scheduler.pending(), 0);
    }

    #[test]
    fn empty_carousel_never_touches_indicators() {
        let dots: Vec<Flag> = (0..2).map(|_| Flag::default()).collect();
        let carousel = Carousel::new(Vec::new(), dots.clone(), AutoplayConfig::default(), ManualScheduler::new());
        carousel.go_to_slide(1);
        carousel.next_slide();
        assert!(dots.iter().all(|d| d.writes.get() == 0));
    }

    #[test]
    fn pause_twice_is_harmless() {
        let f = fixture(3, AutoplayConfig::new(true, 5000));
        f.carousel.pause_autoplay();
        f.carousel.pause_autoplay();
        assert!(!f.carousel.is_autoplaying());
        assert_eq!(f.scheduler.pending(), 0);
        assert_single_active(&f, 0);
    }

    #[test]
    fn start_twice_keeps_one_timer() {
        let f = fixture(3, AutoplayConfig::new(true, 5000));
        f.carousel.start_autoplay();
        f.carousel.start_autoplay();
        assert_eq!(f.scheduler.pending(), 1);

        f.scheduler.advance(5000);
        assert_single_active(&f, 1);
    }

    #[test]
    fn disabled_autoplay_never_schedules() {
        let f = fixture(3, AutoplayConfig::disabled());
        f.carousel.start_autoplay();
        f.scheduler.advance(60_000);
        assert_eq!(f.scheduler.pending(), 0);
        assert_single_active(&f, 0);
    }

    #[test]
    fn autoplay_advances_on_each_interval() {
        let f = fixture(3, AutoplayConfig::new(true, 5000));
        assert_single_active(&f, 0);

        f.scheduler.advance_to(4999);
        assert_single_active(&f, 0);
        f.scheduler.advance_to(5000);
        assert_single_active(&f, 1);
        f.scheduler.advance_to(10_000);
        assert_single_active(&f, 2);
        f.scheduler.advance_to(15_000);
        assert_single_active(&f, 0);
    }

    #[test]
    fn hover_restarts_with_full_interval() {
        let f = fixture(3, AutoplayConfig::new(true, 5000));

        f.scheduler.advance_to(2000);
        f.carousel.handle(CarouselEvent::HoverEnter);
        f.scheduler.advance_to(9000);
        assert_single_active(&f, 0);

        f.carousel.handle(CarouselEvent::HoverLeave);
        f.scheduler.advance_to(13_999);
        assert_single_active(&f, 0);
        f.scheduler.advance_to(14_000);
        assert_single_active(&f, 1);
    }

    #[test]
    fn indicator_click_jumps_immediately() {
        let f = fixture(3, AutoplayConfig::new(true, 5000));
        f.carousel.handle(CarouselEvent::Select(2));
        assert_single_active(&f, 2);

        // The pending tick still fires on its original schedule.
        f.scheduler.advance_to(5000);
        assert_single_active(&f, 0);
    }

    #[test]
    fn dropping_carousel_cancels_timer() {
        let f = fixture(3, AutoplayConfig::new(true, 5000));
        let scheduler = f.scheduler.clone();
        assert_eq!(scheduler.pending(), 1);
        drop(f);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn zero_interval_uses_default() {
        assert_eq!(AutoplayConfig::new(true, 0).interval_ms, DEFAULT_TESTIMONIAL_INTERVAL_MS);
    }

    #[test]
    fn mismatched_indicators_are_truncated() {
        let slides: Vec<Flag> = (0..2).map(|_| Flag::default()).collect();
        let dots: Vec<Flag> = (0..3).map(|_| Flag::default()).collect();
        let carousel = Carousel::new(slides, dots.clone(), AutoplayConfig::disabled(), ManualScheduler::new());
        carousel.next_slide();
        assert_eq!(active(&dots), vec![1]);
        assert_eq!(dots[2].writes.get(), 0);
    }
}
