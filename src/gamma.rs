// Final present: blend the straight-alpha reveal frame over the page colour
// in linear light, producing the 0x00RRGGBB buffer the window shows.
// Visual: the photo fades into the warm paper background with no dark halos
// around half-transparent brush edges.

use crate::types::FrameBuffer;

/// Warm paper colour behind everything (0x00RRGGBB).
pub const BASE_COLOR: u32 = 0x00E7_E5E0;

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1)
    srgb_to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255), index = (linear * 4095).round()
    linear_to_srgb: [u8; 4096],
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}

impl GammaLut {
    /// Build both tables once at startup.
    pub fn new() -> Self {
        let mut s2l = [0.0f32; 256];
        for (v, slot) in s2l.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut l2s = [0u8; 4096];
        for (i, slot) in l2s.iter_mut().enumerate() {
            let l = i as f32 / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { srgb_to_linear: s2l, linear_to_srgb: l2s }
    }

    #[inline]
    pub fn srgb_u8_to_linear(&self, v: u8) -> f32 {
        self.srgb_to_linear[v as usize]
    }

    #[inline]
    pub fn linear_to_srgb_u8(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.linear_to_srgb[idx]
    }

    /// Mix two sRGB channels by `t` in linear light.
    #[inline]
    pub fn mix_u8(&self, under: u8, over: u8, t: f32) -> u8 {
        let a = self.srgb_u8_to_linear(under);
        let b = self.srgb_u8_to_linear(over);
        self.linear_to_srgb_u8(a + (b - a) * t)
    }
}

/// Composite `frame` (ARGB) over `base` (0x00RRGGBB) into `out`.
/// Fully transparent pixels are written as the base colour directly.
pub fn present_over(frame: &FrameBuffer, base: u32, lut: &GammaLut, out: &mut FrameBuffer) {
    if out.width != frame.width || out.height != frame.height {
        *out = FrameBuffer::new(frame.width, frame.height);
    }
    let base = base & 0x00FF_FFFF;
    let (br, bg, bb) = ((base >> 16) as u8, (base >> 8) as u8, base as u8);

    for (dst, &src) in out.pixels.iter_mut().zip(&frame.pixels) {
        let a = (src >> 24) as u8;
        *dst = match a {
            0 => base,
            255 => src & 0x00FF_FFFF,
            _ => {
                let t = a as f32 / 255.0;
                let r = lut.mix_u8(br, (src >> 16) as u8, t) as u32;
                let g = lut.mix_u8(bg, (src >> 8) as u8, t) as u32;
                let b = lut.mix_u8(bb, src as u8, t) as u32;
                (r << 16) | (g << 8) | b
            }
        };
    }
}

/// Fill `out` with the base colour (nothing revealed / photo still loading).
pub fn fill_base(out: &mut FrameBuffer, base: u32) {
    out.pixels.fill(base & 0x00FF_FFFF);
}
