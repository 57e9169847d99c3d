// Cover-fit placement of the background photo over the viewport.
// Visual: the photo always fills the whole window, never squashed; the
// overflowing axis is cropped evenly on both sides.

use crate::types::Viewport;

/// Where the image lands in viewport pixels. `x`/`y` are zero or negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverPlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CoverPlacement {
    /// `None` when either the image or the viewport has no area.
    pub fn compute(image_w: u32, image_h: u32, viewport: Viewport) -> Option<Self> {
        if image_w == 0 || image_h == 0 || viewport.is_empty() {
            return None;
        }
        let vw = viewport.width as f32;
        let vh = viewport.height as f32;
        let image_aspect = image_w as f32 / image_h as f32;
        let view_aspect = vw / vh;

        let placement = if view_aspect > image_aspect {
            // viewport is wider: match widths, crop top/bottom
            let height = vw / image_aspect;
            Self { x: 0.0, y: (vh - height) / 2.0, width: vw, height }
        } else {
            let width = vh * image_aspect;
            Self { x: (vw - width) / 2.0, y: 0.0, width, height: vh }
        };
        Some(placement)
    }

    /// Source pixel for a destination pixel centre; clamped into the image.
    #[inline]
    pub fn source_coord(dst: usize, offset: f32, extent: f32, src_len: u32) -> u32 {
        let u = ((dst as f32 + 0.5) - offset) / extent;
        let s = (u * src_len as f32).floor() as i64;
        s.clamp(0, src_len as i64 - 1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(p: CoverPlacement, vp: Viewport, img_aspect: f32) {
        assert!(p.x <= 1e-3 && p.y <= 1e-3, "{p:?}");
        assert!(p.x + p.width >= vp.width as f32 - 1e-3, "{p:?}");
        assert!(p.y + p.height >= vp.height as f32 - 1e-3, "{p:?}");
        assert!((p.width / p.height - img_aspect).abs() < 1e-3, "{p:?}");
    }

    #[test]
    fn wide_viewport_crops_vertically() {
        let vp = Viewport::new(1920, 1080);
        let p = CoverPlacement::compute(1000, 1000, vp).unwrap();
        assert_eq!(p.x, 0.0);
        assert_eq!(p.width, 1920.0);
        assert_eq!(p.height, 1920.0);
        assert_eq!(p.y, (1080.0 - 1920.0) / 2.0);
    }

    #[test]
    fn tall_viewport_crops_horizontally() {
        let vp = Viewport::new(400, 900);
        let p = CoverPlacement::compute(1600, 900, vp).unwrap();
        assert_eq!(p.y, 0.0);
        assert_eq!(p.height, 900.0);
        assert_eq!(p.width, 1600.0);
        assert_eq!(p.x, -600.0);
    }

    #[test]
    fn covers_for_many_aspect_ratios() {
        let images = [(1600, 900), (900, 1600), (1000, 1000), (3, 1), (1, 7)];
        let viewports = [(1920, 1080), (375, 812), (800, 800), (5000, 10), (10, 5000)];
        for (iw, ih) in images {
            for (vw, vh) in viewports {
                let vp = Viewport::new(vw, vh);
                let p = CoverPlacement::compute(iw, ih, vp).unwrap();
                assert_covers(p, vp, iw as f32 / ih as f32);
            }
        }
    }

    #[test]
    fn degenerate_inputs_have_no_placement() {
        assert!(CoverPlacement::compute(0, 10, Viewport::new(10, 10)).is_none());
        assert!(CoverPlacement::compute(10, 10, Viewport::new(0, 10)).is_none());
    }

    #[test]
    fn source_coord_stays_in_image() {
        for dst in 0..100 {
            let s = CoverPlacement::source_coord(dst, -50.0, 200.0, 10);
            assert!(s < 10);
        }
        assert_eq!(CoverPlacement::source_coord(0, 0.0, 100.0, 10), 0);
        assert_eq!(CoverPlacement::source_coord(99, 0.0, 100.0, 10), 9);
    }
}
