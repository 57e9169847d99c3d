// FX: intro bubble, burst specks, floating bubbles and the custom cursor,
// fully software-drawn with alpha blending onto the presented screen.
// Visual outcomes:
// - A pearly bubble with slowly drifting colour blobs grows in the centre, then pops.
// - Sixteen coloured specks fly off towards the corners and fade.
// - The cursor is a soft glow, a spinning gradient ring and a small dot.

use cursor_reveal::bubble::{BubbleVisual, BurstParticle, DriftOffset, PALETTE};
use cursor_reveal::config::FloatConfig;
use cursor_reveal::cursor::CursorFollower;
use cursor_reveal::floating::FloatingBubble;
use cursor_reveal::types::{FrameBuffer, Vec2};

// ----------------------------- blending helpers --------------------------------

/// Blend `color` over the pixel at (x,y) by `alpha` in [0,1].
/// Visual: the pixel shifts towards the colour; alpha 1 replaces it.
#[inline]
pub fn blend_rgb(fb: &mut FrameBuffer, x: i32, y: i32, color: u32, alpha: f32) {
    if x < 0 || y < 0 || alpha <= 0.0 { return; }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height { return; }

    let idx = y * fb.width + x;
    let old = fb.pixels[idx];
    let a = alpha.min(1.0);
    let mix = |shift: u32| {
        let o = ((old >> shift) & 0xFF) as f32;
        let n = ((color >> shift) & 0xFF) as f32;
        ((o + (n - o) * a).round() as u32).min(255) << shift
    };
    fb.pixels[idx] = mix(16) | mix(8) | mix(0);
}

/// Solid disc with a one-pixel anti-aliased rim.
/// Visual: a crisp round dot.
fn draw_disc(fb: &mut FrameBuffer, c: Vec2, radius: f32, color: u32, alpha: f32) {
    if radius <= 0.0 || alpha <= 0.0 { return; }
    let r = radius.ceil() as i32 + 1;
    let (cx, cy) = (c.x.round() as i32, c.y.round() as i32);
    for y in (cy - r)..=(cy + r) {
        for x in (cx - r)..=(cx + r) {
            let d = Vec2::new(x as f32, y as f32).distance(c);
            let cover = (radius + 0.5 - d).clamp(0.0, 1.0);
            if cover > 0.0 {
                blend_rgb(fb, x, y, color, alpha * cover);
            }
        }
    }
}

/// Soft round glow with Gaussian falloff, optionally clipped to a circle.
/// Visual: a fuzzy blob of colour, strongest in the middle.
fn draw_glow(fb: &mut FrameBuffer, c: Vec2, radius: f32, color: u32, strength: f32, clip: Option<(Vec2, f32)>) {
    if radius <= 0.0 || strength <= 0.0 { return; }
    let r = radius.ceil() as i32;
    let (cx, cy) = (c.x.round() as i32, c.y.round() as i32);
    let sigma = radius * 0.5; // smaller = sharper edge
    let denom = 2.0 * sigma * sigma;
    let r2 = radius * radius;

    for y in (cy - r)..=(cy + r) {
        for x in (cx - r)..=(cx + r) {
            let p = Vec2::new(x as f32, y as f32);
            let d = p - c;
            let d2 = d.dot(d);
            if d2 > r2 { continue; }
            if let Some((clip_c, clip_r)) = clip {
                if p.distance(clip_c) > clip_r { continue; }
            }
            blend_rgb(fb, x, y, color, (-d2 / denom).exp() * strength);
        }
    }
}

/// Ring whose colour varies with the angle around the centre.
/// Visual: a thin circle with a gradient border.
fn draw_ring(fb: &mut FrameBuffer, c: Vec2, radius: f32, thickness: f32, color_at: impl Fn(f32) -> u32) {
    let outer = radius + thickness / 2.0;
    let inner = radius - thickness / 2.0;
    let r = outer.ceil() as i32 + 1;
    let (cx, cy) = (c.x.round() as i32, c.y.round() as i32);
    for y in (cy - r)..=(cy + r) {
        for x in (cx - r)..=(cx + r) {
            let d = Vec2::new(x as f32, y as f32) - c;
            let dist = d.length();
            let cover = (outer + 0.5 - dist).clamp(0.0, 1.0) * (dist - inner + 0.5).clamp(0.0, 1.0);
            if cover > 0.0 {
                let theta = d.y.atan2(d.x).to_degrees().rem_euclid(360.0);
                blend_rgb(fb, x, y, color_at(theta), cover);
            }
        }
    }
}

// ----------------------------- scene pieces ------------------------------------

/// Visual: pearly cream disc, four palette blobs drifting inside it.
pub fn render_intro_bubble(fb: &mut FrameBuffer, center: Vec2, bubble: &BubbleVisual, drift: DriftOffset) {
    let radius = bubble.diameter * bubble.scale / 2.0;
    if radius < 1.0 || bubble.opacity <= 0.0 { return; }

    draw_disc(fb, center, radius, PALETTE[2], 0.9 * bubble.opacity);

    let spin = drift.angle.to_radians();
    for (i, &color) in PALETTE.iter().enumerate() {
        let phase = spin + i as f32 * std::f32::consts::FRAC_PI_2;
        let reach = radius * 0.35;
        let blob = center
            + Vec2::new(drift.x, drift.y) * bubble.scale
            + Vec2::new(phase.cos() * reach, phase.sin() * reach);
        draw_glow(fb, blob, radius * 0.6, color, 0.55 * bubble.opacity, Some((center, radius)));
    }

    // Specular highlight, top left.
    let shine = center + Vec2::new(-radius * 0.35, -radius * 0.4);
    draw_glow(fb, shine, radius * 0.25, 0x00FF_FFFF, 0.6 * bubble.opacity, Some((center, radius)));
}

/// Visual: coloured specks flying apart and shrinking.
pub fn render_burst(fb: &mut FrameBuffer, center: Vec2, particles: &[BurstParticle]) {
    for p in particles {
        draw_disc(fb, center + p.offset, p.size * p.scale / 2.0, p.color, p.opacity);
    }
}

/// Visual: floating soap bubbles; hovered ones slightly larger.
pub fn render_floating(fb: &mut FrameBuffer, bubbles: &[FloatingBubble], cfg: &FloatConfig) {
    for (i, b) in bubbles.iter().enumerate() {
        let scale = b.scale(cfg);
        if scale <= 0.0 { continue; }
        let radius = b.size * scale / 2.0;
        draw_disc(fb, b.position, radius, PALETTE[2], 0.85);
        let tint = PALETTE[i % 2 * 3];
        draw_glow(fb, b.position + Vec2::new(radius * 0.3, radius * 0.3), radius * 0.7, tint, 0.35, Some((b.position, radius)));
        draw_glow(fb, b.position + Vec2::new(-radius * 0.35, -radius * 0.4), radius * 0.25, 0x00FF_FFFF, 0.6, Some((b.position, radius)));
    }
}

/// Visual: faint glow, gradient ring and centre dot trailing the mouse.
pub fn render_cursor(fb: &mut FrameBuffer, cursor: &CursorFollower) {
    let c = cursor.position;
    draw_glow(fb, c, 150.0, cursor.ring_color(0.0), 0.15, None);
    draw_ring(fb, c, 11.0 * cursor.ring_scale(), 2.0, |theta| cursor.ring_color(theta));
    draw_disc(fb, c, 4.0 * cursor.dot_scale(), PALETTE[0], 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_is_clipped_to_the_buffer() {
        let mut fb = FrameBuffer::new(4, 4);
        blend_rgb(&mut fb, -1, 0, 0x00FF_FFFF, 1.0);
        blend_rgb(&mut fb, 4, 4, 0x00FF_FFFF, 1.0);
        assert!(fb.pixels.iter().all(|&p| p == 0));
        blend_rgb(&mut fb, 1, 1, 0x00FF_FFFF, 1.0);
        assert_eq!(fb.get(1, 1), Some(0x00FF_FFFF));
    }

    #[test]
    fn glow_respects_its_clip_circle() {
        let mut fb = FrameBuffer::new(40, 40);
        let c = Vec2::new(20.0, 20.0);
        draw_glow(&mut fb, c, 15.0, 0x00FF_0000, 1.0, Some((c, 5.0)));
        assert_ne!(fb.get(20, 20), Some(0));
        assert_eq!(fb.get(20, 30), Some(0));
    }

    #[test]
    fn popped_bubble_draws_nothing() {
        let mut fb = FrameBuffer::new(20, 20);
        let gone = BubbleVisual { diameter: 340.0, scale: 2.0, opacity: 0.0 };
        render_intro_bubble(&mut fb, Vec2::new(10.0, 10.0), &gone, DriftOffset { x: 0.0, y: 0.0, angle: 0.0 });
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }
}
