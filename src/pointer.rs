// Pointer tracker: normalizes mouse/touch input into paintable segments.
// Visual: decides *when* a brush stroke is laid down. Tiny jitters are
// ignored, long gaps are not bridged, and everything else is split into
// short sub-steps so the painted trail stays continuous.

use crate::config::RevealConfig;
use crate::types::Vec2;

/// Platform-agnostic pointer input, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved(Vec2),
    /// Pointer left the window.
    Left,
    TouchStart(Vec2),
    TouchMoved(Vec2),
    TouchEnd,
}

/// One accepted pointer movement, ready for the painter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub from: Vec2,
    pub to: Vec2,
    /// Number of interpolation sub-steps (>= 1).
    pub steps: usize,
}

impl Stroke {
    /// Distance covered by this event; also the brush "speed".
    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }

    /// Consecutive `(previous, current)` sub-step points from `from` to `to`.
    pub fn substeps(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.steps as f32;
        (1..=self.steps).map(move |i| {
            let prev = self.from.lerp(self.to, (i - 1) as f32 / n);
            let cur = self.from.lerp(self.to, i as f32 / n);
            (prev, cur)
        })
    }
}

/// Single-pointer tracker holding only the last accepted sample.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    last: Option<Vec2>,
    min_distance: f32,
    max_step: f32,
    teleport_distance: f32,
}

impl PointerTracker {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            last: None,
            min_distance: config.min_distance,
            max_step: config.max_step,
            teleport_distance: config.teleport_distance,
        }
    }

    pub fn last_sample(&self) -> Option<Vec2> {
        self.last
    }

    /// Forget the last sample; the next contact starts a fresh stroke.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Feed one input event. Returns a stroke when the event should paint.
    pub fn handle(&mut self, event: PointerEvent) -> Option<Stroke> {
        match event {
            PointerEvent::Moved(p) | PointerEvent::TouchMoved(p) => self.sample(p),
            PointerEvent::TouchStart(p) => {
                self.last = Some(p);
                None
            }
            PointerEvent::Left | PointerEvent::TouchEnd => {
                self.reset();
                None
            }
        }
    }

    fn sample(&mut self, p: Vec2) -> Option<Stroke> {
        let Some(last) = self.last else {
            self.last = Some(p);
            return None;
        };

        let distance = last.distance(p);
        if distance < self.min_distance {
            // keep `last`: slow drags still accumulate into a real stroke
            return None;
        }
        if distance > self.teleport_distance {
            log::trace!("pointer jumped {distance:.0}px; starting a new stroke");
            self.last = Some(p);
            return None;
        }

        self.last = Some(p);
        let steps = ((distance / self.max_step).ceil() as usize).max(1);
        Some(Stroke { from: last, to: p, steps })
    }
}
