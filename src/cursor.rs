// Custom cursor: a ring and a dot trailing the real pointer.
// Visual: the ring lags softly behind the mouse, its gradient border slowly
// spinning. Over something clickable the ring swells and the dot shrinks.

use crate::types::Vec2;

/// Ring border gradient stops, 0x00RRGGBB, evenly spaced around the circle.
pub const RING_STOPS: [u32; 4] = [0x0000_47AB, 0x00F5_D0D0, 0x00FF_FFFF, 0x00FF_F9E6];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorFollower {
    pub position: Vec2,
    pub target: Vec2,
    /// Gradient angle in degrees, `[0, 360)`.
    pub angle: f32,
    pub pointing: bool,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorFollower {
    pub const FOLLOW: f32 = 0.15;
    pub const SPIN: f32 = 0.5;

    pub fn new() -> Self {
        Self { position: Vec2::ZERO, target: Vec2::ZERO, angle: 0.0, pointing: false }
    }

    pub fn set_target(&mut self, target: Vec2, pointing: bool) {
        self.target = target;
        self.pointing = pointing;
    }

    pub fn step(&mut self) {
        self.position = self.position.lerp(self.target, Self::FOLLOW);
        self.angle = (self.angle + Self::SPIN) % 360.0;
    }

    pub fn ring_scale(&self) -> f32 {
        if self.pointing { 1.5 } else { 1.0 }
    }

    pub fn dot_scale(&self) -> f32 {
        if self.pointing { 0.5 } else { 1.0 }
    }

    /// Border colour at `theta` degrees around the ring, rotated by the
    /// current angle.
    pub fn ring_color(&self, theta: f32) -> u32 {
        let t = ((theta - self.angle).rem_euclid(360.0)) / 360.0 * RING_STOPS.len() as f32;
        let i = (t.floor() as usize) % RING_STOPS.len();
        let j = (i + 1) % RING_STOPS.len();
        mix_rgb(RING_STOPS[i], RING_STOPS[j], t.fract())
    }
}

#[inline]
fn mix_rgb(a: u32, b: u32, t: f32) -> u32 {
    let ch = |shift: u32| {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        ((ca + (cb - ca) * t).round() as u32).min(255) << shift
    };
    ch(16) | ch(8) | ch(0)
}
