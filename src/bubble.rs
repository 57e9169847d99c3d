// The decorative intro bubble and its burst.
// Visual: a pearly disc springs open in the centre, overshooting a little,
// holds, then swells to twice its size while fading out as sixteen coloured
// specks fly off towards the four diagonals. Inside it, soft colour blobs
// drift slowly on a lissajous path.

use std::time::Duration;

use crate::config::IntroTimings;
use crate::ease::{progress, CubicBezier};
use crate::phase::IntroPhase;
use crate::types::Vec2;

pub const BUBBLE_DIAMETER: f32 = 340.0;
pub const BURST_PARTICLE_COUNT: usize = 16;
pub const BURST_PARTICLE_LIFETIME: Duration = Duration::from_millis(800);

/// Blue, blush, cream, stone (0x00RRGGBB).
pub const PALETTE: [u32; 4] = [0x0000_47AB, 0x00F5_D0D0, 0x00FF_F9E6, 0x00D4_D1CC];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleVisual {
    pub diameter: f32,
    pub scale: f32,
    pub opacity: f32,
}

/// Bubble appearance for a phase, `None` once it is gone.
pub fn bubble_visual(phase: IntroPhase, in_phase: Duration, timings: &IntroTimings) -> Option<BubbleVisual> {
    match phase {
        IntroPhase::Growing => {
            let grown = CubicBezier::OVERSHOOT.apply(progress(in_phase, timings.grow));
            Some(BubbleVisual { diameter: BUBBLE_DIAMETER * grown, scale: 1.0, opacity: 1.0 })
        }
        IntroPhase::Holding => Some(BubbleVisual { diameter: BUBBLE_DIAMETER, scale: 1.0, opacity: 1.0 }),
        IntroPhase::Bursting => {
            let p = CubicBezier::EASE_OUT.apply(progress(in_phase, timings.burst));
            Some(BubbleVisual { diameter: BUBBLE_DIAMETER, scale: 1.0 + p, opacity: 1.0 - p })
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstParticle {
    /// Offset from the bubble centre.
    pub offset: Vec2,
    pub size: f32,
    pub scale: f32,
    pub opacity: f32,
    pub color: u32,
}

/// Burst specks `since_burst` after the bubble popped; empty once they are gone.
pub fn burst_particles(since_burst: Duration) -> Vec<BurstParticle> {
    if since_burst >= BURST_PARTICLE_LIFETIME {
        return Vec::new();
    }
    let p = CubicBezier::EASE_OUT.apply(progress(since_burst, BURST_PARTICLE_LIFETIME));
    (0..BURST_PARTICLE_COUNT)
        .map(|i| {
            let dir = match i % 4 {
                0 => Vec2::new(-150.0, -100.0),
                1 => Vec2::new(150.0, -100.0),
                2 => Vec2::new(-150.0, 100.0),
                _ => Vec2::new(150.0, 100.0),
            };
            BurstParticle {
                offset: dir * p,
                size: 6.0 + (i % 3) as f32 * 4.0,
                scale: 1.0 - p,
                opacity: 0.8 * (1.0 - p),
                color: PALETTE[i % 4],
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftOffset {
    pub x: f32,
    pub y: f32,
    /// Shimmer angle in degrees.
    pub angle: f32,
}

/// Slow lissajous drift of the blobs inside the bubble. Its own frame loop.
#[derive(Debug, Clone)]
pub struct GradientDrift {
    time: f32,
    running: bool,
}

impl Default for GradientDrift {
    fn default() -> Self {
        Self::new()
    }
}

impl GradientDrift {
    const STEP: f32 = 0.008;

    pub fn new() -> Self {
        Self { time: 0.0, running: true }
    }

    pub fn tick(&mut self) {
        if self.running {
            self.time += Self::STEP;
        }
    }

    pub fn offset(&self) -> DriftOffset {
        let t = self.time;
        DriftOffset {
            x: (t * 0.7).sin() * 20.0 + (t * 1.3).sin() * 10.0,
            y: (t * 0.5).cos() * 15.0 + (t * 1.1).cos() * 8.0,
            angle: t * 15.0,
        }
    }

    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn bubble_grows_overshoots_and_bursts() {
        let t = IntroTimings::default();
        let start = bubble_visual(IntroPhase::Growing, ms(0), &t).unwrap();
        assert_eq!(start.diameter, 0.0);
        let overshoot = bubble_visual(IntroPhase::Growing, ms(900), &t).unwrap();
        assert!(overshoot.diameter > BUBBLE_DIAMETER);
        let grown = bubble_visual(IntroPhase::Growing, ms(1500), &t).unwrap();
        assert_eq!(grown.diameter, BUBBLE_DIAMETER);

        let popped = bubble_visual(IntroPhase::Bursting, ms(500), &t).unwrap();
        assert_eq!(popped.scale, 2.0);
        assert_eq!(popped.opacity, 0.0);

        assert!(bubble_visual(IntroPhase::LabelsVisible, ms(0), &t).is_none());
    }

    #[test]
    fn burst_particles_fly_out_and_vanish() {
        let start = burst_particles(ms(0));
        assert_eq!(start.len(), BURST_PARTICLE_COUNT);
        assert!(start.iter().all(|p| p.offset == Vec2::ZERO && p.opacity == 0.8));

        let mid = burst_particles(ms(400));
        assert!(mid[0].offset.x < 0.0 && mid[0].offset.y < 0.0);
        assert!(mid[3].offset.x > 0.0 && mid[3].offset.y > 0.0);
        assert_eq!(mid[1].size, 10.0);

        assert!(burst_particles(ms(800)).is_empty());
    }

    #[test]
    fn drift_stops_when_cancelled() {
        let mut drift = GradientDrift::new();
        assert_eq!(drift.offset(), DriftOffset { x: 0.0, y: 23.0, angle: 0.0 });
        drift.tick();
        let moved = drift.offset();
        assert!(moved.angle > 0.0);
        drift.cancel();
        drift.tick();
        assert_eq!(drift.offset(), moved);
    }
}
