use log::{info, warn};

use super::effects::{Counters, Morphs, Parallax, Stagger, TextReveal, Typewriters};
use super::particles::{ClickExplosions, MouseTrails, ParticleLayer, ParticleOptions};
use super::reveal::ScrollReveal;
use crate::dom;
use crate::utils::perf::measure_time;
use crate::Result;

/// Everything bound to the markup of the page currently on screen.
/// Dropping it detaches observers, listeners and frame loops.
#[derive(Default)]
pub struct PageEffects {
    reveal: Option<ScrollReveal>,
    parallax: Option<Parallax>,
    stagger: Option<Stagger>,
    counters: Option<Counters>,
    typewriters: Option<Typewriters>,
    particles: Option<ParticleLayer>,
    explosions: Option<ClickExplosions>,
    trails: Option<MouseTrails>,
    text_reveal: Option<TextReveal>,
    morphs: Option<Morphs>,
}

fn keep<T>(name: &str, attached: Result<T>) -> Option<T> {
    attached.map_err(|e| warn!("Could not attach {}: {}", name, e)).ok()
}

impl PageEffects {
    /// Binds every effect whose markup is present. A failing effect is
    /// logged and skipped; the rest still attach.
    pub fn attach() -> Self {
        let Ok(document) = dom::document() else {
            return Self::default();
        };
        let effects = measure_time("Page effects", || Self {
            reveal: keep("scroll reveal", ScrollReveal::attach(&document)),
            parallax: keep("parallax", Parallax::attach(&document)).flatten(),
            stagger: keep("stagger", Stagger::attach(&document)),
            counters: keep("counters", Counters::attach(&document)),
            typewriters: keep("typewriter", Typewriters::attach(&document)),
            particles: keep("particles", ParticleLayer::attach(&document, &ParticleOptions::default())).flatten(),
            explosions: keep("click explosions", ClickExplosions::attach(&document)),
            trails: keep("mouse trails", MouseTrails::attach(&document)).flatten(),
            text_reveal: keep("text reveal", TextReveal::attach(&document)).flatten(),
            morphs: keep("morphing", Morphs::attach(&document)).flatten(),
        });
        info!("Animation system initialized ({} effects)", effects.active());
        effects
    }

    pub fn active(&self) -> usize {
        [
            self.reveal.is_some(),
            self.parallax.is_some(),
            self.stagger.is_some(),
            self.counters.is_some(),
            self.typewriters.is_some(),
            self.particles.is_some(),
            self.explosions.is_some(),
            self.trails.is_some(),
            self.text_reveal.is_some(),
            self.morphs.is_some(),
        ]
        .iter()
        .filter(|&&on| on)
        .count()
    }
}
