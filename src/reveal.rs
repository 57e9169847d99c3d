// Reveal engine: pointer tracker -> stroke painter -> decay mask -> compositor.
// Visual: move the pointer and the hidden photo is painted in under it; stop
// and the painted area fades back to the plain page colour in ~2 seconds.

use crate::background::BackgroundImage;
use crate::brush::StrokePainter;
use crate::compositor::Compositor;
use crate::config::RevealConfig;
use crate::error::Result;
use crate::mask::DecayMask;
use crate::pointer::{PointerEvent, PointerTracker};
use crate::types::{FrameBuffer, Viewport};

/// Owns the mask exclusively. Input events and frame ticks arrive on the same
/// thread, so a resize is always a complete reallocate-and-copy before the
/// next frame reads the mask.
pub struct RevealEngine {
    mask: DecayMask,
    painter: StrokePainter,
    tracker: PointerTracker,
    compositor: Compositor,
    running: bool,
}

impl RevealEngine {
    pub fn new(viewport: Viewport, config: RevealConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            mask: DecayMask::new(viewport.width, viewport.height),
            painter: StrokePainter::new(&config),
            tracker: PointerTracker::new(&config),
            compositor: Compositor::new(viewport, config.fade_rate),
            running: true,
        })
    }

    pub fn mask(&self) -> &DecayMask {
        &self.mask
    }

    pub fn viewport(&self) -> Viewport {
        self.mask.viewport()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn attach_background(&mut self, image: BackgroundImage) {
        self.compositor.attach(image);
    }

    pub fn has_background(&self) -> bool {
        self.compositor.has_image()
    }

    /// Viewport changed. Zero/negative sizes (layout thrash) keep the old buffers.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            log::debug!("ignoring resize to {}x{}", viewport.width, viewport.height);
            return;
        }
        self.mask.resize(viewport.width, viewport.height);
        self.compositor.resize(viewport);
    }

    /// Feed one pointer/touch event; paints immediately when it produces a stroke.
    pub fn pointer(&mut self, event: PointerEvent) {
        if !self.running {
            return;
        }
        let Some(stroke) = self.tracker.handle(event) else {
            return;
        };
        let radius = self.painter.radius_for_speed(stroke.length());
        for (prev, cur) in stroke.substeps() {
            self.painter.capsule(&mut self.mask, prev, cur, radius);
        }
    }

    /// One animation tick: decay + composite. `None` while the photo loads.
    pub fn frame(&mut self) -> Option<&FrameBuffer> {
        if !self.running {
            return None;
        }
        self.compositor.render(&mut self.mask)
    }

    /// Stop the frame loop and ignore further input.
    pub fn teardown(&mut self) {
        if self.running {
            log::debug!("reveal engine torn down");
        }
        self.running = false;
        self.tracker.reset();
    }
}
