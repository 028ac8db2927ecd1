use crate::Result;

use super::frame::FrameLoop;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Accepts the CSS keyword names. Unknown names fall back to linear.
    pub fn parse(name: &str) -> Self {
        match name {
            "ease-in" => Easing::EaseIn,
            "ease-out" => Easing::EaseOut,
            "ease-in-out" => Easing::EaseInOut,
            _ => Easing::Linear,
        }
    }

    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Calls `on_frame` with eased progress every animation frame until the
/// duration has passed. The final call always receives `1.0`.
pub fn animate(duration_ms: f64, easing: Easing, mut on_frame: impl FnMut(f64) + 'static) -> Result<FrameLoop> {
    let mut start = None;
    FrameLoop::start(move |now| {
        let started = *start.get_or_insert(now);
        let t = progress(now - started, duration_ms);
        on_frame(easing.apply(t));
        t < 1.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_hit_endpoints() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn curve_shapes() {
        assert_eq!(Easing::EaseIn.apply(0.5), 0.25);
        assert_eq!(Easing::EaseOut.apply(0.5), 0.75);
        assert_eq!(Easing::EaseInOut.apply(0.25), 0.125);
        assert_eq!(Easing::EaseInOut.apply(0.75), 0.875);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn parse_and_progress() {
        assert_eq!(Easing::parse("ease-out"), Easing::EaseOut);
        assert_eq!(Easing::parse("cubic-bezier(0,0,1,1)"), Easing::Linear);
        assert_eq!(progress(500.0, 2000.0), 0.25);
        assert_eq!(progress(3000.0, 2000.0), 1.0);
        assert_eq!(progress(10.0, 0.0), 1.0);
    }
}
