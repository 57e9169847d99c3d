// Reveal compositor: runs once per frame, pointer or not.
// Visual: the photo appears only where the mask says so, with the mask's
// opacity; elsewhere the frame is transparent and the page colour shows.
//
//   1) fade the mask a little
//   2) cover-fit the photo into the working frame
//   3) keep the frame only where the mask is set ("destination-in")

use crate::background::BackgroundImage;
use crate::cover::CoverPlacement;
use crate::mask::{fade_step, DecayMask, MASK_FULL};
use crate::types::{argb, FrameBuffer, Viewport};

pub struct Compositor {
    frame: FrameBuffer,
    image: Option<BackgroundImage>,
    // keyed by (viewport, image size) so a resize or a new image recomputes it
    placement: Option<(Viewport, (u32, u32), CoverPlacement)>,
    fade_step: u16,
}

impl Compositor {
    pub fn new(viewport: Viewport, fade_rate: f32) -> Self {
        Self {
            frame: FrameBuffer::new(viewport.width, viewport.height),
            image: None,
            placement: None,
            fade_step: fade_step(fade_rate),
        }
    }

    /// Hand over the decoded photo (the "load complete" signal).
    pub fn attach(&mut self, image: BackgroundImage) {
        self.image = Some(image);
        self.placement = None;
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Reallocate the working frame. Zero-sized requests are ignored.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport.is_empty() || viewport == self.frame.viewport() {
            return false;
        }
        self.frame = FrameBuffer::new(viewport.width, viewport.height);
        true
    }

    /// Cover placement for the current viewport, recomputed on change.
    pub fn placement(&mut self) -> Option<CoverPlacement> {
        let image = self.image.as_ref()?;
        let viewport = self.frame.viewport();
        let dims = (image.width(), image.height());
        match self.placement {
            Some((vp, d, p)) if vp == viewport && d == dims => Some(p),
            _ => {
                let p = CoverPlacement::compute(dims.0, dims.1, viewport)?;
                self.placement = Some((viewport, dims, p));
                Some(p)
            }
        }
    }

    /// One frame. Always decays the mask; returns the composited frame, or
    /// `None` while the photo is not loaded yet (the frame is left blank).
    pub fn render(&mut self, mask: &mut DecayMask) -> Option<&FrameBuffer> {
        mask.decay(self.fade_step);

        let Some(placement) = self.placement() else {
            self.frame.clear();
            return None;
        };
        if mask.is_clear() {
            // nothing would survive the mask anyway
            self.frame.clear();
            return Some(&self.frame);
        }

        let Some(image) = self.image.as_ref() else {
            self.frame.clear();
            return None;
        };
        draw_cover(&mut self.frame, image, placement);
        apply_mask(&mut self.frame, mask);
        Some(&self.frame)
    }
}

/// Draw `image` into `frame` at `placement` (nearest-neighbour sampling).
pub fn draw_cover(frame: &mut FrameBuffer, image: &BackgroundImage, placement: CoverPlacement) {
    let rgba = image.rgba();
    let (iw, ih) = (rgba.width(), rgba.height());
    if iw == 0 || ih == 0 {
        frame.clear();
        return;
    }

    // Column/row lookup tables: each destination column maps to one source column.
    let src_x: Vec<u32> = (0..frame.width)
        .map(|x| CoverPlacement::source_coord(x, placement.x, placement.width, iw))
        .collect();

    for y in 0..frame.height {
        let sy = CoverPlacement::source_coord(y, placement.y, placement.height, ih);
        let row = &mut frame.pixels[y * frame.width..(y + 1) * frame.width];
        for (dst, &sx) in row.iter_mut().zip(&src_x) {
            let [r, g, b, a] = rgba.get_pixel(sx, sy).0;
            *dst = argb(a, r, g, b);
        }
    }
}

/// Multiply every pixel's alpha by the mask; zero results become fully
/// transparent. Pixels outside the mask count as unmasked (alpha 0).
pub fn apply_mask(frame: &mut FrameBuffer, mask: &DecayMask) {
    let full = MASK_FULL as u32;
    for y in 0..frame.height {
        for x in 0..frame.width {
            let idx = y * frame.width + x;
            let m = mask.get(x, y) as u32;
            if m == 0 {
                frame.pixels[idx] = 0;
                continue;
            }
            let px = frame.pixels[idx];
            let a = px >> 24;
            let out = (a * m + full / 2) / full;
            frame.pixels[idx] = if out == 0 { 0 } else { (out << 24) | (px & 0x00FF_FFFF) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::unpack_argb;
    use image::{Rgba, RgbaImage};

    fn solid(w: u32, h: u32) -> BackgroundImage {
        BackgroundImage::from_rgba(RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255])))
    }

    #[test]
    fn nothing_renders_before_the_image_is_attached() {
        let mut comp = Compositor::new(Viewport::new(8, 8), 0.008);
        let mut mask = DecayMask::new(8, 8);
        mask.raise(1, 1, MASK_FULL);
        assert!(comp.render(&mut mask).is_none());
        assert!(comp.frame().pixels.iter().all(|&p| p == 0));
        // the mask still faded
        assert!(mask.get(1, 1) < MASK_FULL);
    }

    #[test]
    fn only_masked_pixels_are_visible() {
        let mut comp = Compositor::new(Viewport::new(8, 8), 0.008);
        comp.attach(solid(4, 4));
        let mut mask = DecayMask::new(8, 8);
        mask.raise(2, 3, MASK_FULL);

        let frame = comp.render(&mut mask).unwrap();
        let [a, r, g, b] = unpack_argb(frame.get(2, 3).unwrap());
        assert!(a > 250);
        assert_eq!((r, g, b), (10, 20, 30));
        assert_eq!(frame.get(0, 0), Some(0));
        assert_eq!(frame.pixels.iter().filter(|&&p| p != 0).count(), 1);
    }

    #[test]
    fn alpha_tracks_mask_opacity() {
        let mut frame = FrameBuffer::new(2, 1);
        frame.pixels.fill(argb(255, 1, 2, 3));
        let mut mask = DecayMask::new(2, 1);
        mask.raise(0, 0, MASK_FULL / 2);
        apply_mask(&mut frame, &mask);
        let a = unpack_argb(frame.pixels[0])[0];
        assert!((127..=128).contains(&a), "alpha {a}");
        assert_eq!(frame.pixels[1], 0);
    }

    #[test]
    fn placement_follows_resizes() {
        let mut comp = Compositor::new(Viewport::new(100, 50), 0.008);
        comp.attach(solid(10, 10));
        let p = comp.placement().unwrap();
        assert_eq!(p.width, 100.0);

        assert!(comp.resize(Viewport::new(50, 100)));
        let p = comp.placement().unwrap();
        assert_eq!(p.height, 100.0);
        assert_eq!(comp.frame().width, 50);

        assert!(!comp.resize(Viewport::new(0, 0)));
        assert_eq!(comp.frame().width, 50);
    }

    #[test]
    fn cleared_mask_renders_an_empty_frame() {
        let mut comp = Compositor::new(Viewport::new(4, 4), 1.0);
        comp.attach(solid(4, 4));
        let mut mask = DecayMask::new(4, 4);
        mask.raise(0, 0, MASK_FULL);
        let frame = comp.render(&mut mask).unwrap();
        assert!(frame.pixels.iter().all(|&p| p == 0));
    }
}
