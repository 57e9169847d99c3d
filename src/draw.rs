// Window + software drawing utilities.
// Visual effects provided here:
// 1) A resizable window that shows the composed page.
// 2) Pointer input turned into reveal events (move, leave, click).
// 3) A 5x7 bitmap font, scaled up, for labels, the title and the HUD.

use cursor_reveal::error::Error;
use cursor_reveal::pointer::PointerEvent;
use cursor_reveal::types::{FrameBuffer, Vec2, Viewport};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::fx::blend_rgb;

pub struct Drawer {
    window: Window,    // the on-screen window you see
    inside: bool,      // pointer was over the window last frame
    was_down: bool,    // left button state last frame (click edge detection)
}

impl Drawer {
    /// Visual: a new empty window appears; the OS cursor is hidden over it.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let opts = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, opts)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        window.set_cursor_visibility(false);
        Ok(Self { window, inside: false, was_down: false })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// R forgets the session marker and replays the intro.
    pub fn r_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::R, KeyRepeat::No)
    }

    /// Current client-area size.
    pub fn viewport(&self) -> Viewport {
        let (w, h) = self.window.get_size();
        Viewport::new(w, h)
    }

    /// Mouse position in window pixels, `None` while outside the window.
    pub fn mouse_pos(&self) -> Option<Vec2> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Vec2::new(x, y))
    }

    /// Translate this frame's mouse state into a pointer event.
    /// Visual: moving paints, leaving the window lifts the brush.
    pub fn pointer_event(&mut self) -> Option<PointerEvent> {
        match self.mouse_pos() {
            Some(p) => {
                self.inside = true;
                Some(PointerEvent::Moved(p))
            }
            None if self.inside => {
                self.inside = false;
                Some(PointerEvent::Left)
            }
            None => None,
        }
    }

    /// True on the frame the left button goes down.
    pub fn left_clicked(&mut self) -> bool {
        let down = self.window.get_mouse_down(MouseButton::Left);
        let clicked = down && !self.was_down;
        self.was_down = down;
        clicked
    }
}

/* ---------- 5x7 bitmap font, uppercase ASCII subset ---------- */

/// Return a 5x7 glyph bitmap. Lowercase maps to uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '&' => g!(0b01100,0b10010,0b10100,0b01000,0b10101,0b10010,0b01101),

        _ => None,
    }
}

/// Text style: pixel scale, extra spacing between glyphs, colour, opacity.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub scale: i32,
    pub tracking: i32,
    pub color: u32,
    pub alpha: f32,
}

impl TextStyle {
    pub const HUD: TextStyle = TextStyle { scale: 1, tracking: 1, color: 0x0033_3333, alpha: 0.8 };

    #[inline]
    fn advance(&self) -> i32 {
        5 * self.scale + self.tracking
    }
}

/// Width in pixels of `text` drawn with `style`.
pub fn text_width(text: &str, style: &TextStyle) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { n * style.advance() - style.tracking }
}

/// Visual: one glyph, each font pixel a `scale`-sized square.
fn draw_char(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, style: &TextStyle) {
    let Some(rows) = glyph5x7(ch) else { return };
    let s = style.scale;
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if (rowbits & (1 << (4 - rx))) == 0 { continue; }
            let (px, py) = (x + rx * s, y + ry as i32 * s);
            for dy in 0..s {
                for dx in 0..s {
                    blend_rgb(fb, px + dx, py + dy, style.color, style.alpha);
                }
            }
        }
    }
}

/// Draw a text string with its top-left corner at (x,y).
pub fn draw_text(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, style: &TextStyle) {
    for ch in text.chars() {
        draw_char(fb, x, y, ch, style);
        x += style.advance();
    }
}

/// Draw a text string centred on `c`.
/// Visual: labels and the title sit exactly on their anchor points.
pub fn draw_text_centered(fb: &mut FrameBuffer, c: Vec2, text: &str, style: &TextStyle) {
    let w = text_width(text, style);
    let h = 7 * style.scale;
    draw_text(fb, c.x.round() as i32 - w / 2, c.y.round() as i32 - h / 2, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_service_letter_has_a_glyph() {
        for ch in "ARCHITECTURE INTERIOR STYLING PHOTOGRAPHY DESIGN & STUDIO".chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph for {ch:?}");
        }
        assert_eq!(glyph5x7('a'), glyph5x7('A'));
    }

    #[test]
    fn width_accounts_for_scale_and_tracking() {
        let style = TextStyle { scale: 2, tracking: 3, color: 0, alpha: 1.0 };
        assert_eq!(text_width("", &style), 0);
        assert_eq!(text_width("AB", &style), 10 + 3 + 10);
    }

    #[test]
    fn centred_text_lands_around_the_anchor() {
        let mut fb = FrameBuffer::new(40, 20);
        let style = TextStyle { scale: 1, tracking: 1, color: 0x00FF_FFFF, alpha: 1.0 };
        draw_text_centered(&mut fb, Vec2::new(20.0, 10.0), "I", &style);
        // 'I' has a solid vertical stem in its middle column.
        assert_eq!(fb.get(20, 10), Some(0x00FF_FFFF));
    }
}
