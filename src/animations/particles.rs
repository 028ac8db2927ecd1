use std::f64::consts::PI;

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::js_sys::Math;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use super::frame::FrameLoop;
use crate::dom::{self, Listener};
use crate::Result;

const EXPLOSION_PARTICLES: usize = 12;
const EXPLOSION_DISTANCE: f64 = 100.0;
const EXPLOSION_MS: u32 = 800;
const TRAIL_SIZE_PX: u32 = 4;
const TRAIL_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleOptions {
    pub count: usize,
    pub size: u32,
    pub color: String,
    pub speed: f64,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self { count: 50, size: 2, color: "#6366f1".to_string(), speed: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub opacity: f64,
}

impl Particle {
    /// Places a particle uniformly inside `width × height` with a random
    /// drift of at most `speed / 2` per frame on each axis.
    pub fn spawn(width: f64, height: f64, speed: f64, mut random: impl FnMut() -> f64) -> Self {
        Self {
            x: random() * width,
            y: random() * height,
            vx: (random() - 0.5) * speed,
            vy: (random() - 0.5) * speed,
            opacity: random() * 0.8 + 0.2,
        }
    }

    /// Moves one frame and reverses direction on any edge it reached.
    pub fn step(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;
        if self.x <= 0.0 || self.x >= width {
            self.vx = -self.vx;
        }
        if self.y <= 0.0 || self.y >= height {
            self.vy = -self.vy;
        }
    }
}

/// Endpoints of a radial burst: `count` evenly spaced angles starting at 0°.
pub fn explosion_offsets(count: usize, distance: f64) -> Vec<(f64, f64)> {
    (0..count)
        .map(|i| {
            let angle = (360.0 / count as f64) * i as f64 * PI / 180.0;
            (angle.cos() * distance, angle.sin() * distance)
        })
        .collect()
}

struct Dot {
    element: Element,
    particle: Particle,
}

/// Floating dots drifting inside the `.particles` container.
pub struct ParticleLayer {
    _frames: FrameLoop,
}

impl ParticleLayer {
    pub fn attach(document: &Document, options: &ParticleOptions) -> Result<Option<Self>> {
        let Some(container) = dom::query(document, ".particles") else {
            return Ok(None);
        };
        let Ok(container) = container.dyn_into::<HtmlElement>() else {
            return Ok(None);
        };

        let width = container.offset_width() as f64;
        let height = container.offset_height() as f64;
        let mut dots = Vec::with_capacity(options.count);
        for _ in 0..options.count {
            let particle = Particle::spawn(width, height, options.speed, Math::random);
            let element = dom::create_element(document, "div", "particle", &[])?;
            let size = format!("{}px", options.size);
            let opacity = particle.opacity.to_string();
            dom::set_style(
                &element,
                &[
                    ("position", "absolute"),
                    ("width", &size),
                    ("height", &size),
                    ("background", &options.color),
                    ("border-radius", "50%"),
                    ("opacity", &opacity),
                ],
            );
            container.append_child(&element)?;
            dots.push(Dot { element, particle });
        }
        debug!("Spawned {} particles", dots.len());

        let frames = FrameLoop::start(move |_| {
            let width = container.offset_width() as f64;
            let height = container.offset_height() as f64;
            for dot in dots.iter_mut() {
                dot.particle.step(width, height);
                let left = format!("{}px", dot.particle.x);
                let top = format!("{}px", dot.particle.y);
                dom::set_style(&dot.element, &[("left", &left), ("top", &top)]);
            }
            true
        })?;
        Ok(Some(Self { _frames: frames }))
    }
}

fn burst(document: &Document, x: f64, y: f64) -> Result<()> {
    let body = dom::body()?;
    for (dx, dy) in explosion_offsets(EXPLOSION_PARTICLES, EXPLOSION_DISTANCE) {
        let particle = dom::create_element(document, "div", "click-particle", &[])?;
        let left = format!("{}px", x);
        let top = format!("{}px", y);
        let transition = format!("transform {0}ms ease-out, opacity {0}ms ease-out", EXPLOSION_MS);
        dom::set_style(
            &particle,
            &[
                ("position", "fixed"),
                ("width", "6px"),
                ("height", "6px"),
                ("background", "var(--secondary-color)"),
                ("border-radius", "50%"),
                ("pointer-events", "none"),
                ("left", &left),
                ("top", &top),
                ("z-index", "1001"),
                ("transform", "translate(0, 0) scale(1)"),
                ("opacity", "1"),
                ("transition", &transition),
            ],
        );
        body.append_child(&particle)?;

        let target = format!("translate({}px, {}px) scale(0)", dx, dy);
        let moving = particle.clone();
        Timeout::new(16, move || dom::set_style(&moving, &[("transform", &target), ("opacity", "0")])).forget();
        Timeout::new(EXPLOSION_MS, move || particle.remove()).forget();
    }
    Ok(())
}

/// Radial burst on clicks landing on `[data-click-trail]` elements.
pub struct ClickExplosions {
    _listener: Listener,
}

impl ClickExplosions {
    pub fn attach(document: &Document) -> Result<Self> {
        let doc = document.clone();
        let listener = dom::delegate(document, "[data-click-trail]", "click", move |_, event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Err(e) = burst(&doc, event.client_x() as f64, event.client_y() as f64) {
                warn!("Click burst failed: {}", e);
            }
        })?;
        Ok(Self { _listener: listener })
    }
}

/// Pointer position relative to the trail container's top-left corner.
pub fn trail_position(client: (f64, f64), origin: (f64, f64)) -> (f64, f64) {
    (client.0 - origin.0, client.1 - origin.1)
}

pub fn trail_style(x: f64, y: f64) -> String {
    format!(
        "position: absolute; width: {0}px; height: {0}px; background: var(--primary-color); \
         border-radius: 50%; pointer-events: none; left: {1}px; top: {2}px; z-index: 1000; \
         animation: fadeOut {3}ms ease-out forwards;",
        TRAIL_SIZE_PX, x, y, TRAIL_MS
    )
}

fn drop_trail(document: &Document, container: &Element, event: &MouseEvent) -> Result<()> {
    let rect = container.get_bounding_client_rect();
    let (x, y) = trail_position((event.client_x() as f64, event.client_y() as f64), (rect.left(), rect.top()));
    let particle = dom::create_element(document, "div", "trail-particle", &[("style", &trail_style(x, y))])?;
    container.append_child(&particle)?;
    Timeout::new(TRAIL_MS, move || particle.remove()).forget();
    Ok(())
}

/// Fading dots left behind the pointer inside `[data-mouse-trail]` elements.
pub struct MouseTrails {
    _listeners: Vec<Listener>,
}

impl MouseTrails {
    pub fn attach(document: &Document) -> Result<Option<Self>> {
        let containers = dom::query_all(document, "[data-mouse-trail]");
        if containers.is_empty() {
            return Ok(None);
        }
        let listeners = containers
            .into_iter()
            .map(|container| {
                let doc = document.clone();
                let target = container.clone();
                Listener::new(&target, "mousemove", move |event| {
                    if let Some(event) = event.dyn_ref::<MouseEvent>() {
                        if let Err(e) = drop_trail(&doc, &container, event) {
                            warn!("Mouse trail failed: {}", e);
                        }
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!("Mouse trails on {} elements", listeners.len());
        Ok(Some(Self { _listeners: listeners }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(values: &[f64]) -> impl FnMut() -> f64 + '_ {
        let mut i = 0;
        move || {
            let v = values[i % values.len()];
            i += 1;
            v
        }
    }

    #[test]
    fn spawn_respects_ranges() {
        let p = Particle::spawn(200.0, 100.0, 1.0, sequence(&[0.5, 0.25, 1.0, 0.0, 0.0]));
        assert_eq!(p.x, 100.0);
        assert_eq!(p.y, 25.0);
        assert_eq!(p.vx, 0.5);
        assert_eq!(p.vy, -0.5);
        assert!((p.opacity - 0.2).abs() < 1e-12);
    }

    #[test]
    fn particle_bounces_off_edges() {
        let mut p = Particle { x: 0.5, y: 50.0, vx: -1.0, vy: 0.0, opacity: 1.0 };
        p.step(100.0, 100.0);
        assert_eq!(p.x, -0.5);
        assert_eq!(p.vx, 1.0);
        p.step(100.0, 100.0);
        assert_eq!(p.x, 0.5);
        assert_eq!(p.vx, 1.0);

        let mut q = Particle { x: 50.0, y: 99.5, vx: 0.0, vy: 1.0, opacity: 1.0 };
        q.step(100.0, 100.0);
        assert_eq!(q.vy, -1.0);
    }

    #[test]
    fn explosion_is_radial() {
        let offsets = explosion_offsets(12, 100.0);
        assert_eq!(offsets.len(), 12);
        assert!((offsets[0].0 - 100.0).abs() < 1e-9);
        assert!(offsets[0].1.abs() < 1e-9);
        // 90 degrees is the fourth point
        assert!(offsets[3].0.abs() < 1e-9);
        assert!((offsets[3].1 - 100.0).abs() < 1e-9);
        for (dx, dy) in offsets {
            assert!(((dx * dx + dy * dy).sqrt() - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn default_options() {
        let options = ParticleOptions::default();
        assert_eq!(options.count, 50);
        assert_eq!(options.color, "#6366f1");
    }

    #[test]
    fn trail_dot_sits_under_the_pointer() {
        assert_eq!(trail_position((150.0, 90.0), (100.0, 40.0)), (50.0, 50.0));
        let style = trail_style(50.0, 12.5);
        assert!(style.contains("width: 4px; height: 4px"));
        assert!(style.contains("left: 50px; top: 12.5px"));
        assert!(style.contains("fadeOut 1000ms"));
    }
}
