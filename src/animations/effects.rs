use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Math, Object};
use web_sys::{Animation, Document, Element, KeyframeAnimationOptions};

use super::observer::OnceVisible;
use crate::dom::{self, Listener};
use crate::scheduler::{BrowserScheduler, Scheduler};
use crate::utils::timing::Throttle;
use crate::Result;

const DEFAULT_PARALLAX_SPEED: f64 = 0.5;
const DEFAULT_STAGGER_MS: u32 = 100;
const DEFAULT_COUNT_MS: u32 = 2000;
const DEFAULT_TYPE_MS: u32 = 100;
const FRAME_MS: u32 = 16;
const CURSOR_LINGER_MS: u32 = 1000;
const CHAR_REVEAL_MS: u32 = 50;
const MORPH_MS: u32 = 3000;

pub const COUNTER_SELECTOR: &str = ".counter, .stat-number, [data-count]";

pub fn parallax_offset(scroll_y: f64, speed: f64) -> f64 {
    -(scroll_y * speed)
}

pub fn parse_speed(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|s| s.is_finite())
        .unwrap_or(DEFAULT_PARALLAX_SPEED)
}

/// Millisecond value from a data attribute. Missing, malformed and zero
/// values all use `default`.
pub fn parse_ms(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&ms| ms > 0)
        .unwrap_or(default)
}

pub fn stagger_delays(count: usize, delay_ms: u32) -> Vec<u32> {
    (0..count as u32).map(|i| i * delay_ms).collect()
}

/// Leading integer of a counter target, e.g. `"1500+"` reads as 1500.
pub fn parse_target(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let end = raw
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}

/// Counts from zero to `target` in equal increments, one per frame.
#[derive(Debug, Clone)]
pub struct CountUp {
    target: i64,
    step: f64,
    current: f64,
}

impl CountUp {
    pub fn new(target: i64, duration_ms: u32) -> Self {
        let frames = (duration_ms.max(FRAME_MS) as f64) / FRAME_MS as f64;
        Self { target, step: target as f64 / frames, current: 0.0 }
    }

    /// Value to display after the next frame, and whether counting is done.
    pub fn tick(&mut self) -> (i64, bool) {
        self.current += self.step;
        if self.current >= self.target as f64 {
            (self.target, true)
        } else {
            (self.current.floor() as i64, false)
        }
    }
}

/// Reveals text one character per tick.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    typed: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self { chars: text.chars().collect(), typed: 0 }
    }

    pub fn is_done(&self) -> bool {
        self.typed >= self.chars.len()
    }

    /// Text shown after typing one more character.
    pub fn advance(&mut self) -> String {
        self.typed = (self.typed + 1).min(self.chars.len());
        self.chars[..self.typed].iter().collect()
    }
}

/// Words split on single spaces, each as its characters. Runs of spaces
/// keep their empty words so the rebuilt text has the same spacing.
pub fn split_words(text: &str) -> Vec<Vec<char>> {
    text.split(' ').map(|word| word.chars().collect()).collect()
}

pub const MORPH_STATES: [&str; 4] = [
    "polygon(20% 0%, 80% 0%, 100% 50%, 80% 100%, 20% 100%, 0% 50%)",
    "polygon(50% 0%, 100% 50%, 50% 100%, 0% 50%)",
    "polygon(25% 0%, 75% 0%, 100% 50%, 75% 100%, 25% 100%, 0% 50%)",
    "polygon(30% 0%, 70% 0%, 100% 30%, 100% 70%, 70% 100%, 30% 100%, 0% 70%, 0% 30%)",
];

/// Maps a value in `[0, 1)` onto one of the morph states.
pub fn pick_morph(random: f64) -> &'static str {
    let index = (random * MORPH_STATES.len() as f64).floor().max(0.0) as usize;
    MORPH_STATES[index.min(MORPH_STATES.len() - 1)]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub transform: &'static str,
    pub border_radius: &'static str,
}

pub const LOADING_MORPH_FRAMES: [Keyframe; 3] = [
    Keyframe { transform: "scale(1) rotate(0deg)", border_radius: "20%" },
    Keyframe { transform: "scale(1.2) rotate(180deg)", border_radius: "50%" },
    Keyframe { transform: "scale(1) rotate(360deg)", border_radius: "20%" },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timing {
    pub duration: f64,
    pub iterations: f64,
    pub easing: &'static str,
}

pub const LOADING_MORPH_TIMING: Timing = Timing { duration: 2000.0, iterations: f64::INFINITY, easing: "ease-in-out" };

pub type TaskSlot<S> = Rc<RefCell<Option<<S as Scheduler>::Handle>>>;

/// Runs `step` every `millis` until it returns `false`. The returned slot
/// holds the live timer; emptying it stops the task.
pub fn repeat_until<S: Scheduler>(scheduler: &S, millis: u32, mut step: impl FnMut() -> bool + 'static) -> TaskSlot<S>
where
    S::Handle: 'static,
{
    let slot: TaskSlot<S> = Rc::new(RefCell::new(None));
    let weak = Rc::downgrade(&slot);
    let handle = scheduler.every(
        millis,
        Box::new(move || {
            if !step() {
                if let Some(slot) = weak.upgrade() {
                    let finished = slot.borrow_mut().take();
                    drop(finished);
                }
            }
        }),
    );
    *slot.borrow_mut() = Some(handle);
    slot
}

fn set_text(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

pub struct Parallax {
    _listener: Listener,
}

impl Parallax {
    pub fn attach(document: &Document) -> Result<Option<Self>> {
        let elements = dom::query_all(document, ".parallax-element");
        if elements.is_empty() {
            return Ok(None);
        }
        let throttle = Throttle::new(FRAME_MS, BrowserScheduler);
        let window = dom::window()?;
        let listener = Listener::new(&window, "scroll", move |_| {
            throttle.run(|| {
                let y = web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
                for el in &elements {
                    let speed = parse_speed(dom::data_attr(el, "speed").as_deref());
                    let transform = format!("translateY({}px)", parallax_offset(y, speed));
                    dom::set_style(el, &[("transform", &transform)]);
                }
            });
        })?;
        Ok(Some(Self { _listener: listener }))
    }
}

pub struct Stagger {
    _observer: OnceVisible,
    _pending: Rc<RefCell<Vec<Timeout>>>,
}

impl Stagger {
    pub fn attach(document: &Document) -> Result<Self> {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let observer = {
            let pending = pending.clone();
            OnceVisible::new(0.1, None, move |container| {
                let delay = parse_ms(dom::data_attr(&container, "stagger").as_deref(), DEFAULT_STAGGER_MS);
                let children = dom::elements_of(&container);
                let delays = stagger_delays(children.len(), delay);
                let mut pending = pending.borrow_mut();
                for (child, delay) in children.into_iter().zip(delays) {
                    pending.push(Timeout::new(delay, move || dom::set_class(&child, "animate-fade-in-up", true)));
                }
            })?
        };
        observer.observe_all(&dom::query_all(document, "[data-stagger]"));
        Ok(Self { _observer: observer, _pending: pending })
    }
}

pub struct Counters {
    _observer: OnceVisible,
    _running: Rc<RefCell<Vec<TaskSlot<BrowserScheduler>>>>,
}

impl Counters {
    pub fn attach(document: &Document) -> Result<Self> {
        let running = Rc::new(RefCell::new(Vec::new()));
        let observer = {
            let running = running.clone();
            OnceVisible::new(0.5, None, move |element| {
                let raw = dom::data_attr(&element, "target").or_else(|| dom::data_attr(&element, "count"));
                let Some(target) = raw.as_deref().and_then(parse_target) else {
                    return;
                };
                let duration = parse_ms(dom::data_attr(&element, "duration").as_deref(), DEFAULT_COUNT_MS);
                let mut count = CountUp::new(target, duration);
                let task = repeat_until(&BrowserScheduler, FRAME_MS, move || {
                    let (value, done) = count.tick();
                    set_text(&element, &value.to_string());
                    !done
                });
                running.borrow_mut().push(task);
            })?
        };
        let counters = dom::query_all(document, COUNTER_SELECTOR);
        debug!("Found {} counters", counters.len());
        observer.observe_all(&counters);
        Ok(Self { _observer: observer, _running: running })
    }
}

pub struct Typewriters {
    _observer: OnceVisible,
    _running: Rc<RefCell<Vec<TaskSlot<BrowserScheduler>>>>,
    _pending: Rc<RefCell<Vec<Timeout>>>,
}

impl Typewriters {
    pub fn attach(document: &Document) -> Result<Self> {
        let running = Rc::new(RefCell::new(Vec::new()));
        let pending = Rc::new(RefCell::new(Vec::new()));
        let observer = {
            let running = running.clone();
            let pending = Rc::downgrade(&pending);
            OnceVisible::new(0.5, None, move |element| {
                let text = element.text_content().unwrap_or_default();
                let speed = parse_ms(dom::data_attr(&element, "speed").as_deref(), DEFAULT_TYPE_MS);
                set_text(&element, "");
                dom::set_style(
                    &element,
                    &[
                        ("border-right", "2px solid var(--primary-color)"),
                        ("animation", "blinkCursor 0.75s step-end infinite"),
                    ],
                );

                let mut writer = Typewriter::new(&text);
                let pending = pending.clone();
                let task = repeat_until(&BrowserScheduler, speed, move || {
                    set_text(&element, &writer.advance());
                    if !writer.is_done() {
                        return true;
                    }
                    let element = element.clone();
                    let hide_cursor = Timeout::new(CURSOR_LINGER_MS, move || {
                        dom::set_style(&element, &[("animation", "none"), ("border-right", "none")]);
                    });
                    if let Some(pending) = pending.upgrade() {
                        pending.borrow_mut().push(hide_cursor);
                    }
                    false
                });
                running.borrow_mut().push(task);
            })?
        };
        observer.observe_all(&dom::query_all(document, ".typewriter-effect"));
        Ok(Self { _observer: observer, _running: running, _pending: pending })
    }
}

fn rebuild_as_chars(document: &Document, element: &Element) -> Result<()> {
    let text = element.text_content().unwrap_or_default();
    dom::empty(element);
    for (i, word) in split_words(&text).into_iter().enumerate() {
        if i > 0 {
            element.append_with_str_1(" ")?;
        }
        let span = dom::create_element(document, "span", "word", &[])?;
        for c in word {
            let char_span = dom::create_element(document, "span", "char", &[])?;
            char_span.set_text_content(Some(&c.to_string()));
            span.append_child(&char_span)?;
        }
        element.append_child(&span)?;
    }
    Ok(())
}

/// `.text-reveal` headings split into per character spans that fade in
/// one after another once half the heading is visible.
pub struct TextReveal {
    _observer: OnceVisible,
    _pending: Rc<RefCell<Vec<Timeout>>>,
}

impl TextReveal {
    pub fn attach(document: &Document) -> Result<Option<Self>> {
        let targets = dom::query_all(document, ".text-reveal");
        if targets.is_empty() {
            return Ok(None);
        }
        for target in &targets {
            rebuild_as_chars(document, target)?;
        }
        let pending = Rc::new(RefCell::new(Vec::new()));
        let observer = {
            let pending = pending.clone();
            OnceVisible::new(0.5, None, move |element| {
                let chars = dom::query_all_in(&element, ".char");
                let delays = stagger_delays(chars.len(), CHAR_REVEAL_MS);
                let mut pending = pending.borrow_mut();
                for (c, delay) in chars.into_iter().zip(delays) {
                    pending.push(Timeout::new(delay, move || {
                        dom::set_style(&c, &[("opacity", "1"), ("transform", "translateY(0)")]);
                    }));
                }
            })?
        };
        observer.observe_all(&targets);
        Ok(Some(Self { _observer: observer, _pending: pending }))
    }
}

fn serialize<T: Serialize>(value: &T) -> Result<wasm_bindgen::JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| crate::Error::Js(e.to_string()))
}

fn loop_loading_morph(loader: &Element) -> Result<Animation> {
    let keyframes: Object = serialize(&LOADING_MORPH_FRAMES)?.unchecked_into();
    let options: KeyframeAnimationOptions = serialize(&LOADING_MORPH_TIMING)?.unchecked_into();
    Ok(loader.animate_with_keyframe_animation_options(Some(&keyframes), &options))
}

/// Clip-path morphing on `.morph-shape` and the looping `.loading-morph`
/// keyframes. Dropping it cancels both.
pub struct Morphs {
    _running: Vec<TaskSlot<BrowserScheduler>>,
    animations: Vec<Animation>,
}

impl Morphs {
    pub fn attach(document: &Document) -> Result<Option<Self>> {
        let shapes = dom::query_all(document, ".morph-shape");
        let loaders = dom::query_all(document, ".loading-morph");
        if shapes.is_empty() && loaders.is_empty() {
            return Ok(None);
        }
        let running = shapes
            .into_iter()
            .map(|shape| {
                repeat_until(&BrowserScheduler, MORPH_MS, move || {
                    dom::set_style(&shape, &[("clip-path", pick_morph(Math::random()))]);
                    true
                })
            })
            .collect();
        let animations = loaders.iter().map(loop_loading_morph).collect::<Result<Vec<_>>>()?;
        Ok(Some(Self { _running: running, animations }))
    }
}

impl Drop for Morphs {
    fn drop(&mut self) {
        for animation in &self.animations {
            animation.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::manual::ManualScheduler;
    use std::cell::Cell;

    #[test]
    fn parallax_moves_against_scroll() {
        assert_eq!(parallax_offset(200.0, 0.5), -100.0);
        assert_eq!(parse_speed(Some("0.25")), 0.25);
        assert_eq!(parse_speed(Some("fast")), 0.5);
        assert_eq!(parse_speed(None), 0.5);
    }

    #[test]
    fn stagger_and_ms_parsing() {
        assert_eq!(stagger_delays(4, 150), vec![0, 150, 300, 450]);
        assert_eq!(parse_ms(Some("0"), 100), 100);
        assert_eq!(parse_ms(Some("250"), 100), 250);
        assert_eq!(parse_ms(Some("abc"), 100), 100);
    }

    #[test]
    fn counter_targets() {
        assert_eq!(parse_target("1500"), Some(1500));
        assert_eq!(parse_target(" 98% "), Some(98));
        assert_eq!(parse_target("50+"), Some(50));
        assert_eq!(parse_target("k"), None);
    }

    #[test]
    fn count_up_reaches_target_exactly() {
        let mut count = CountUp::new(100, 2000);
        let mut last = 0;
        let mut frames = 0;
        loop {
            let (value, done) = count.tick();
            assert!(value >= last);
            last = value;
            frames += 1;
            if done {
                break;
            }
        }
        assert_eq!(last, 100);
        assert!((125..=126).contains(&frames));
    }

    #[test]
    fn zero_target_finishes_immediately() {
        assert_eq!(CountUp::new(0, 2000).tick(), (0, true));
    }

    #[test]
    fn typewriter_handles_multibyte_text() {
        let mut writer = Typewriter::new("hé!");
        assert_eq!(writer.advance(), "h");
        assert_eq!(writer.advance(), "hé");
        assert!(!writer.is_done());
        assert_eq!(writer.advance(), "hé!");
        assert!(writer.is_done());
    }

    #[test]
    fn repeat_until_stops_itself() {
        let scheduler = ManualScheduler::new();
        let runs = Rc::new(Cell::new(0));
        let counted = runs.clone();
        let slot = repeat_until(&scheduler, 16, move || {
            counted.set(counted.get() + 1);
            counted.get() < 3
        });

        scheduler.advance(16 * 10);
        assert_eq!(runs.get(), 3);
        assert!(slot.borrow().is_none());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn words_keep_their_spacing() {
        let words = split_words("Learn  fast");
        assert_eq!(words, vec![vec!['L', 'e', 'a', 'r', 'n'], vec![], vec!['f', 'a', 's', 't']]);
        assert_eq!(split_words("").len(), 1);
    }

    #[test]
    fn text_reveal_delays_step_by_fifty() {
        let chars: usize = split_words("Hi there").iter().map(Vec::len).sum();
        assert_eq!(stagger_delays(chars, CHAR_REVEAL_MS), vec![0, 50, 100, 150, 200, 250, 300]);
    }

    #[test]
    fn morph_pick_follows_the_random_source() {
        let picks: Vec<_> = [0.0, 0.3, 0.6, 0.99, 1.0].into_iter().map(pick_morph).collect();
        assert_eq!(picks[0], MORPH_STATES[0]);
        assert_eq!(picks[1], MORPH_STATES[1]);
        assert_eq!(picks[2], MORPH_STATES[2]);
        assert_eq!(picks[3], MORPH_STATES[3]);
        assert_eq!(picks[4], MORPH_STATES[3]);
        assert_eq!(pick_morph(-0.5), MORPH_STATES[0]);
    }

    #[test]
    fn loading_morph_loops_forever_and_returns_home() {
        assert_eq!(LOADING_MORPH_FRAMES[0].border_radius, LOADING_MORPH_FRAMES[2].border_radius);
        assert_eq!(LOADING_MORPH_FRAMES[2].transform, "scale(1) rotate(360deg)");
        assert_eq!(LOADING_MORPH_FRAMES[1].transform, "scale(1.2) rotate(180deg)");
        assert_eq!(LOADING_MORPH_FRAMES[1].border_radius, "50%");
        assert!(LOADING_MORPH_TIMING.iterations.is_infinite());
        assert_eq!(LOADING_MORPH_TIMING.duration, 2000.0);
    }
}
