// Stroke painter: turns pointer segments into soft brush marks in the mask.
// Visual: a round, feathered hole that follows the pointer; moving faster
// makes the hole slightly wider. Nothing is drawn on screen from here, we
// only raise mask values and the compositor does the rest.

use crate::config::RevealConfig;
use crate::mask::{to_mask_units, DecayMask};
use crate::types::Vec2;

/// Radial falloff of the brush: opacity at a normalized distance from the
/// centre (0 = centre, 1 = rim), linearly interpolated between stops.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushProfile {
    stops: Vec<(f32, f32)>,
}

impl Default for BrushProfile {
    /// Opaque core, soft shoulder, transparent rim.
    fn default() -> Self {
        Self::new(vec![(0.0, 1.0), (0.3, 0.8), (0.7, 0.3), (1.0, 0.0)])
    }
}

impl BrushProfile {
    /// `stops` must be sorted by position and start at 0.
    pub fn new(stops: Vec<(f32, f32)>) -> Self {
        debug_assert!(stops.windows(2).all(|w| w[0].0 <= w[1].0));
        Self { stops }
    }

    /// Opacity in `[0, 1]` at normalized distance `t`.
    pub fn opacity(&self, t: f32) -> f32 {
        let Some(&(first_pos, first_a)) = self.stops.first() else {
            return 0.0;
        };
        if t <= first_pos {
            return first_a;
        }
        for pair in self.stops.windows(2) {
            let (p0, a0) = pair[0];
            let (p1, a1) = pair[1];
            if t <= p1 {
                let span = p1 - p0;
                if span <= f32::EPSILON {
                    return a1;
                }
                return a0 + (a1 - a0) * ((t - p0) / span);
            }
        }
        0.0
    }
}

/// Stamps capsule-shaped soft marks into a [`DecayMask`].
///
/// Blend rule: each pixel becomes `max(existing, stamp)`, so repainting an
/// area never darkens it and a stroke never exceeds full opacity.
#[derive(Debug, Clone)]
pub struct StrokePainter {
    base_radius: f32,
    speed_gain: f32,
    speed_cap: f32,
    profile: BrushProfile,
}

impl StrokePainter {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            base_radius: config.brush_radius,
            speed_gain: config.speed_gain,
            speed_cap: config.speed_cap,
            profile: BrushProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: BrushProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Brush radius for a pointer that travelled `speed` pixels this event.
    pub fn radius_for_speed(&self, speed: f32) -> f32 {
        self.base_radius + speed.clamp(0.0, self.speed_cap) * self.speed_gain
    }

    /// Single round dab centred on `at`.
    pub fn dab(&self, mask: &mut DecayMask, at: Vec2, radius: f32) {
        self.capsule(mask, at, at, radius);
    }

    /// Soft capsule from `a` to `b`: every pixel takes the profile value of
    /// its distance to the segment. Covers both endpoints, so consecutive
    /// capsules join without gaps even at high pointer speed.
    pub fn capsule(&self, mask: &mut DecayMask, a: Vec2, b: Vec2, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        let w = mask.width() as i32;
        let h = mask.height() as i32;

        // Bounding box, clipped to the mask.
        let x0 = ((a.x.min(b.x) - radius).floor() as i32).max(0);
        let y0 = ((a.y.min(b.y) - radius).floor() as i32).max(0);
        let x1 = ((a.x.max(b.x) + radius).ceil() as i32).min(w - 1);
        let y1 = ((a.y.max(b.y) + radius).ceil() as i32).min(h - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }

        let ab = b - a;
        let len2 = ab.dot(ab);
        let r2 = radius * radius;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32, y as f32);
                let ap = p - a;
                let t = if len2 > 0.0 { (ap.dot(ab) / len2).clamp(0.0, 1.0) } else { 0.0 };
                let d = p - (a + ab * t);
                let d2 = d.dot(d);
                if d2 >= r2 {
                    continue; // outside the brush
                }
                let value = to_mask_units(self.profile.opacity(d2.sqrt() / radius));
                mask.raise(x, y, value);
            }
        }
    }
}
