// Free-floating bubbles: the alternate presentation of the service links.
// Visual: big soap bubbles wander lazily around the window, nudged by tiny
// random pushes, bouncing softly off the edges. Hovering one makes it hold
// still; clicking it pops it and, once the pop has played, navigates.

use std::time::Duration;

use rand::Rng;

use crate::config::FloatConfig;
use crate::types::{NavigationRequest, Service, Vec2, Viewport};

#[derive(Debug, Clone)]
pub struct FloatingBubble {
    pub label: String,
    pub href: String,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub hovered: bool,
    bursting: bool,
    visible: bool,
    appear_in: Duration,
    navigate_in: Option<Duration>,
}

/// Allowed range for one axis; collapses to the midpoint when the viewport
/// is smaller than twice the padding.
#[inline]
fn axis_bounds(extent: f32, padding: f32) -> (f32, f32) {
    let (lo, hi) = (padding, extent - padding);
    if lo <= hi { (lo, hi) } else { (extent / 2.0, extent / 2.0) }
}

/// Inelastic wall bounce for one axis: reflect + damp the velocity and pull
/// the position back inside.
#[inline]
fn bounce_axis(pos: &mut f32, vel: &mut f32, (lo, hi): (f32, f32), restitution: f32) {
    if *pos < lo || *pos > hi {
        *vel *= -restitution;
        *pos = pos.clamp(lo, hi);
    }
}

impl FloatingBubble {
    pub fn new<R: Rng + ?Sized>(
        service: &Service,
        position: Vec2,
        delay: Duration,
        cfg: &FloatConfig,
        rng: &mut R,
    ) -> Self {
        let spread = cfg.initial_spread;
        let velocity = Vec2::new(
            (rng.random::<f32>() - 0.5) * spread,
            (rng.random::<f32>() - 0.5) * spread,
        );
        Self {
            label: service.label.clone(),
            href: service.href.clone(),
            position,
            velocity,
            size: cfg.size,
            hovered: false,
            bursting: false,
            visible: delay.is_zero(),
            appear_in: delay,
            navigate_in: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_bursting(&self) -> bool {
        self.bursting
    }

    /// Render scale: popped bubbles vanish, hovered ones swell slightly.
    pub fn scale(&self, cfg: &FloatConfig) -> f32 {
        if !self.visible || self.bursting {
            0.0
        } else if self.hovered {
            cfg.hover_scale
        } else {
            1.0
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.visible && !self.bursting && self.position.distance(p) <= self.size / 2.0
    }

    /// One physics frame. Hovered or bursting bubbles hold still.
    pub fn step<R: Rng + ?Sized>(&mut self, viewport: Viewport, cfg: &FloatConfig, rng: &mut R) {
        if self.bursting || self.hovered {
            return;
        }
        let mut next = self.position + self.velocity;

        let jitter = cfg.perturbation;
        self.velocity.x += (rng.random::<f32>() - 0.5) * jitter;
        self.velocity.y += (rng.random::<f32>() - 0.5) * jitter;
        self.velocity.x = self.velocity.x.clamp(-cfg.max_velocity, cfg.max_velocity);
        self.velocity.y = self.velocity.y.clamp(-cfg.max_velocity, cfg.max_velocity);

        let padding = self.size / 2.0 + cfg.edge_margin;
        let bx = axis_bounds(viewport.width as f32, padding);
        let by = axis_bounds(viewport.height as f32, padding);
        bounce_axis(&mut next.x, &mut self.velocity.x, bx, cfg.restitution);
        bounce_axis(&mut next.y, &mut self.velocity.y, by, cfg.restitution);

        self.position = next;
    }

    /// Pop the bubble; navigation follows after `activation_delay`.
    /// Returns false if it was already popping or not shown yet.
    pub fn activate(&mut self, cfg: &FloatConfig) -> bool {
        if self.bursting || !self.visible {
            return false;
        }
        self.bursting = true;
        self.navigate_in = Some(cfg.activation_delay);
        true
    }

    /// Advance the appear/navigate timers.
    pub fn tick(&mut self, dt: Duration) -> Option<NavigationRequest> {
        if !self.visible {
            self.appear_in = self.appear_in.saturating_sub(dt);
            if self.appear_in.is_zero() {
                self.visible = true;
            }
        }
        let remaining = self.navigate_in?;
        let left = remaining.saturating_sub(dt);
        if left.is_zero() {
            self.navigate_in = None;
            log::info!("bubble '{}' popped -> {}", self.label, self.href);
            return Some(NavigationRequest::new(self.href.clone()));
        }
        self.navigate_in = Some(left);
        None
    }

    fn cancel_timers(&mut self) {
        self.navigate_in = None;
    }
}

/// All floating bubbles plus the random source that perturbs them.
pub struct BubbleField<R: Rng> {
    bubbles: Vec<FloatingBubble>,
    viewport: Viewport,
    cfg: FloatConfig,
    rng: R,
    running: bool,
}

impl<R: Rng> BubbleField<R> {
    pub fn new(bubbles: Vec<FloatingBubble>, viewport: Viewport, cfg: FloatConfig, rng: R) -> Self {
        Self { bubbles, viewport, cfg, rng, running: true }
    }

    /// One bubble per service at a random spot inside the padded bounds,
    /// appearing one after another `stagger` apart.
    pub fn scatter(services: &[Service], viewport: Viewport, cfg: FloatConfig, mut rng: R, stagger: Duration) -> Self {
        let padding = cfg.padding();
        let (x0, x1) = axis_bounds(viewport.width as f32, padding);
        let (y0, y1) = axis_bounds(viewport.height as f32, padding);
        let bubbles = services
            .iter()
            .enumerate()
            .map(|(i, service)| {
                let pos = Vec2::new(
                    x0 + (x1 - x0) * rng.random::<f32>(),
                    y0 + (y1 - y0) * rng.random::<f32>(),
                );
                FloatingBubble::new(service, pos, stagger * i as u32, &cfg, &mut rng)
            })
            .collect();
        Self::new(bubbles, viewport, cfg, rng)
    }

    pub fn bubbles(&self) -> &[FloatingBubble] {
        &self.bubbles
    }

    pub fn config(&self) -> &FloatConfig {
        &self.cfg
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if !viewport.is_empty() {
            self.viewport = viewport;
        }
    }

    /// One frame of motion and timers; returns any navigation that came due.
    pub fn frame(&mut self, dt: Duration) -> Vec<NavigationRequest> {
        if !self.running {
            return Vec::new();
        }
        let mut out = Vec::new();
        for bubble in &mut self.bubbles {
            if let Some(nav) = bubble.tick(dt) {
                out.push(nav);
            }
            bubble.step(self.viewport, &self.cfg, &mut self.rng);
        }
        out
    }

    pub fn hover(&mut self, p: Option<Vec2>) -> bool {
        let mut any = false;
        for bubble in &mut self.bubbles {
            bubble.hovered = p.is_some_and(|p| bubble.contains(p));
            any |= bubble.hovered;
        }
        any
    }

    /// Click at `p`: pops the topmost bubble under it.
    pub fn activate(&mut self, p: Vec2) -> bool {
        if !self.running {
            return false;
        }
        let cfg = self.cfg;
        self.bubbles
            .iter_mut()
            .rev()
            .find(|b| b.contains(p))
            .is_some_and(|b| b.activate(&cfg))
    }

    pub fn teardown(&mut self) {
        self.running = false;
        for bubble in &mut self.bubbles {
            bubble.cancel_timers();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn svc() -> Service {
        Service::new("Interior", "/interior")
    }

    #[test]
    fn wall_hit_reflects_and_damps() {
        let cfg = FloatConfig { perturbation: 0.0, ..FloatConfig::default() };
        let mut rng = StdRng::seed_from_u64(1);
        let mut b = FloatingBubble::new(&svc(), Vec2::new(140.5, 300.0), Duration::ZERO, &cfg, &mut rng);
        b.velocity = Vec2::new(-1.0, 0.0);
        b.step(Viewport::new(800, 600), &cfg, &mut rng);
        assert_eq!(b.position.x, 140.0);
        assert!((b.velocity.x - 0.8).abs() < 1e-6);
    }

    #[test]
    fn velocity_stays_clamped() {
        let cfg = FloatConfig { perturbation: 10.0, ..FloatConfig::default() };
        let mut rng = StdRng::seed_from_u64(7);
        let mut b = FloatingBubble::new(&svc(), Vec2::new(400.0, 300.0), Duration::ZERO, &cfg, &mut rng);
        for _ in 0..500 {
            b.step(Viewport::new(800, 600), &cfg, &mut rng);
            assert!(b.velocity.x.abs() <= cfg.max_velocity);
            assert!(b.velocity.y.abs() <= cfg.max_velocity);
        }
    }

    #[test]
    fn hovered_bubble_holds_still() {
        let cfg = FloatConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut b = FloatingBubble::new(&svc(), Vec2::new(400.0, 300.0), Duration::ZERO, &cfg, &mut rng);
        b.hovered = true;
        b.step(Viewport::new(800, 600), &cfg, &mut rng);
        assert_eq!(b.position, Vec2::new(400.0, 300.0));
        assert_eq!(b.scale(&cfg), 1.1);
    }

    #[test]
    fn tiny_viewport_pins_to_centre() {
        let cfg = FloatConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut b = FloatingBubble::new(&svc(), Vec2::new(10.0, 10.0), Duration::ZERO, &cfg, &mut rng);
        b.step(Viewport::new(200, 100), &cfg, &mut rng);
        assert_eq!(b.position, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn pop_navigates_once_after_the_delay() {
        let cfg = FloatConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let b = FloatingBubble::new(&svc(), Vec2::new(400.0, 300.0), Duration::ZERO, &cfg, &mut rng);
        let mut field = BubbleField::new(vec![b], Viewport::new(800, 600), cfg, rng);

        assert!(field.activate(Vec2::new(400.0, 300.0)));
        assert!(!field.activate(Vec2::new(400.0, 300.0)));
        assert!(field.bubbles()[0].is_bursting());

        let mut navs = Vec::new();
        for _ in 0..60 {
            navs.extend(field.frame(Duration::from_millis(16)));
        }
        assert_eq!(navs, vec![NavigationRequest::new("/interior")]);
        assert_eq!(field.bubbles()[0].position, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn delayed_bubbles_appear_later_and_ignore_clicks_before() {
        let cfg = FloatConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let b = FloatingBubble::new(&svc(), Vec2::new(400.0, 300.0), Duration::from_millis(100), &cfg, &mut rng);
        let mut field = BubbleField::new(vec![b], Viewport::new(800, 600), cfg, rng);
        assert!(!field.bubbles()[0].is_visible());
        assert!(!field.activate(Vec2::new(400.0, 300.0)));
        field.frame(Duration::from_millis(100));
        assert!(field.bubbles()[0].is_visible());
    }

    #[test]
    fn teardown_cancels_pending_navigation() {
        let cfg = FloatConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let b = FloatingBubble::new(&svc(), Vec2::new(400.0, 300.0), Duration::ZERO, &cfg, &mut rng);
        let mut field = BubbleField::new(vec![b], Viewport::new(800, 600), cfg, rng);
        field.activate(Vec2::new(400.0, 300.0));
        field.teardown();
        assert!(field.frame(Duration::from_secs(5)).is_empty());
    }
}
