// Decay mask: the off-screen "where has the pointer been" memory.
// Visual: unseen directly; wherever a pixel is > 0 the hidden photo shows
// through, with that much opacity. Painting raises values, the per-frame
// decay lowers them, so the revealed trail shrinks and fades on its own.

use crate::types::Viewport;

/// Fixed-point full opacity. Integer storage keeps the decay exact, so a
/// pixel painted to full reaches exactly zero after a known frame count.
pub const MASK_FULL: u16 = u16::MAX;

/// Per-pixel opacity mask, row-major, `width * height` entries.
#[derive(Debug, Clone)]
pub struct DecayMask {
    width: usize,
    height: usize,
    alpha: Vec<u16>,
    // false once a decay pass leaves every pixel at zero; lets idle frames skip work
    has_any: bool,
}

/// Convert a `[0, 1]` opacity to mask units.
#[inline]
pub fn to_mask_units(a: f32) -> u16 {
    (a.clamp(0.0, 1.0) * MASK_FULL as f32).round() as u16
}

/// Per-frame decrement for a fade rate given as a fraction of full scale.
/// Rounded up so `ceil(1 / fade_rate)` frames always clear a full pixel.
pub fn fade_step(fade_rate: f32) -> u16 {
    let step = (fade_rate.clamp(0.0, 1.0) * MASK_FULL as f32).ceil() as u32;
    step.clamp(1, MASK_FULL as u32) as u16
}

impl DecayMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width * height],
            has_any: false,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Raw row-major values.
    pub fn values(&self) -> &[u16] {
        &self.alpha
    }

    /// Raw value at (x, y); out of bounds reads as 0.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        if x < self.width && y < self.height {
            self.alpha[y * self.width + x]
        } else {
            0
        }
    }

    /// Opacity at (x, y) in `[0, 1]`.
    #[inline]
    pub fn alpha(&self, x: usize, y: usize) -> f32 {
        self.get(x, y) as f32 / MASK_FULL as f32
    }

    /// Sum of all raw values. Handy for "is it fading" assertions.
    pub fn total(&self) -> u64 {
        self.alpha.iter().map(|&a| a as u64).sum()
    }

    pub fn is_clear(&self) -> bool {
        !self.has_any
    }

    /// Raise (x, y) to at least `value`; never lowers a pixel.
    #[inline]
    pub fn raise(&mut self, x: i32, y: i32, value: u16) {
        if x < 0 || y < 0 || value == 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let a = &mut self.alpha[y * self.width + x];
        if value > *a {
            *a = value;
            self.has_any = true;
        }
    }

    /// One decay tick: every pixel loses `step`, floored at zero.
    /// Returns whether anything is still visible afterwards.
    pub fn decay(&mut self, step: u16) -> bool {
        if !self.has_any {
            return false;
        }
        let mut any = false;
        for a in &mut self.alpha {
            *a = a.saturating_sub(step);
            any |= *a > 0;
        }
        self.has_any = any;
        any
    }

    /// Wipe the mask (nothing revealed anywhere).
    pub fn clear(&mut self) {
        self.alpha.fill(0);
        self.has_any = false;
    }

    /// Reallocate for a new viewport, keeping the old content anchored at
    /// (0, 0). Rows/columns that no longer fit are dropped. Zero-sized
    /// requests are ignored and the previous buffer stays in place.
    /// Returns whether a reallocation happened.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if width == 0 || height == 0 {
            log::debug!("mask resize to {width}x{height} skipped; keeping {}x{}", self.width, self.height);
            return false;
        }
        if width == self.width && height == self.height {
            return false;
        }

        let mut next = vec![0u16; width * height];
        let copy_w = self.width.min(width);
        let copy_h = self.height.min(height);
        for y in 0..copy_h {
            let src = &self.alpha[y * self.width..y * self.width + copy_w];
            next[y * width..y * width + copy_w].copy_from_slice(src);
        }

        log::debug!("mask resized {}x{} -> {width}x{height}", self.width, self.height);
        self.width = width;
        self.height = height;
        self.has_any = next.iter().any(|&a| a > 0);
        self.alpha = next;
        true
    }
}
