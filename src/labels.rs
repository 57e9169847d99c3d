// Kinetic labels: the four service words of the intro.
// Visual: the words appear clustered around the centre where the bubble
// burst, then glide out to the screen corners (or a vertical stack on narrow
// screens), decelerating as they arrive, and stay there as clickable links.

use crate::config::LayoutConfig;
use crate::types::{NavigationRequest, Service, Vec2, Viewport};

/// How many anchors the layout provides.
pub const ANCHOR_COUNT: usize = 4;

/// Approximate text box of a label, used for hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    pub char_advance: f32,
    pub line_height: f32,
    pub padding: (f32, f32),
}

impl Default for LabelMetrics {
    fn default() -> Self {
        // 16px uppercase with 0.25em tracking, 12px/16px button padding
        Self { char_advance: 14.0, line_height: 24.0, padding: (16.0, 12.0) }
    }
}

impl LabelMetrics {
    pub fn half_extent(&self, text: &str) -> Vec2 {
        let chars = text.chars().count() as f32;
        Vec2::new(
            (chars * self.char_advance) / 2.0 + self.padding.0,
            self.line_height / 2.0 + self.padding.1,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub id: usize,
    pub text: String,
    pub href: String,
    pub position: Vec2,
    pub target: Vec2,
    pub opacity: f32,
    pub scale: f32,
    pub hovered: bool,
    half_extent: Vec2,
    pinned: bool,
}

impl Label {
    pub fn new(id: usize, service: &Service, position: Vec2, target: Vec2, metrics: &LabelMetrics) -> Self {
        Self {
            id,
            text: service.label.clone(),
            href: service.href.clone(),
            position,
            target,
            opacity: 0.0,
            scale: 1.0,
            hovered: false,
            half_extent: metrics.half_extent(&service.label),
            pinned: false,
        }
    }

    /// At its anchor and no longer moving.
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Hit box is centred on the label position and scales with it.
    pub fn contains(&self, p: Vec2) -> bool {
        let d = p - self.position;
        let half = self.half_extent * self.scale;
        d.x.abs() <= half.x && d.y.abs() <= half.y
    }

    /// One flight frame: cover `fraction` of the remaining distance, or snap
    /// onto the anchor when closer than `epsilon`.
    pub fn fly(&mut self, fraction: f32, epsilon: f32) {
        if self.pinned {
            return;
        }
        let delta = self.target - self.position;
        if delta.length() < epsilon {
            self.position = self.target;
            self.scale = 1.0;
            self.pinned = true;
            return;
        }
        self.position = self.position + delta * fraction;
        self.scale = 1.0;
    }

    fn pin(&mut self) {
        self.position = self.target;
        self.opacity = 1.0;
        self.scale = 1.0;
        self.pinned = true;
    }
}

/// Render-facing snapshot of one label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelFrame {
    pub id: usize,
    pub position: Vec2,
    pub opacity: f32,
    pub scale: f32,
}

pub fn is_narrow(viewport: Viewport, layout: &LayoutConfig) -> bool {
    viewport.width < layout.breakpoint
}

/// Resting positions: the four corners on desktop, a vertical stack below
/// the centre on narrow viewports.
pub fn anchors(viewport: Viewport, layout: &LayoutConfig) -> [Vec2; ANCHOR_COUNT] {
    let w = viewport.width as f32;
    let h = viewport.height as f32;
    if is_narrow(viewport, layout) {
        let x = w / 2.0;
        let start = h * layout.mobile_start;
        let step = layout.mobile_spacing;
        return [
            Vec2::new(x, start),
            Vec2::new(x, start + step),
            Vec2::new(x, start + step * 2.0),
            Vec2::new(x, start + step * 3.0),
        ];
    }
    let pad = layout.desktop_padding;
    let (ix, iy) = layout.corner_inset;
    let left = pad + ix;
    let right = w - pad - ix;
    let top = pad + iy;
    let bottom = h - pad - iy;
    [
        Vec2::new(left, top),
        Vec2::new(right, top),
        Vec2::new(left, bottom),
        Vec2::new(right, bottom),
    ]
}

/// Where the labels sit when the bubble bursts.
pub fn cluster(viewport: Viewport, layout: &LayoutConfig) -> [Vec2; ANCHOR_COUNT] {
    let c = viewport.center();
    if is_narrow(viewport, layout) {
        return [c; ANCHOR_COUNT];
    }
    let (ox, oy) = layout.cluster_offset;
    [
        Vec2::new(c.x - ox, c.y - oy),
        Vec2::new(c.x + ox, c.y - oy),
        Vec2::new(c.x - ox, c.y + oy),
        Vec2::new(c.x + ox, c.y + oy),
    ]
}

#[derive(Debug, Clone)]
pub struct LabelSet {
    labels: Vec<Label>,
    flying: bool,
    fraction: f32,
    epsilon: f32,
}

impl LabelSet {
    /// Lay out labels for `services`. With `settled`, labels start pinned at
    /// their anchors, fully visible; otherwise hidden in the centre cluster.
    pub fn new(
        services: &[Service],
        viewport: Viewport,
        layout: &LayoutConfig,
        metrics: &LabelMetrics,
        settled: bool,
    ) -> Self {
        if services.len() > ANCHOR_COUNT {
            log::warn!(
                "{} services given; only the first {ANCHOR_COUNT} get an anchor",
                services.len()
            );
        }
        let targets = anchors(viewport, layout);
        let starts = cluster(viewport, layout);
        let labels = services
            .iter()
            .take(ANCHOR_COUNT)
            .enumerate()
            .map(|(i, service)| {
                let mut label = Label::new(i, service, starts[i], targets[i], metrics);
                if settled {
                    label.pin();
                } else {
                    label.scale = layout.hidden_scale;
                }
                label
            })
            .collect();
        Self::from_labels(labels, layout)
    }

    pub fn from_labels(labels: Vec<Label>, layout: &LayoutConfig) -> Self {
        Self {
            labels,
            flying: false,
            fraction: layout.flight_fraction,
            epsilon: layout.snap_epsilon,
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn is_flying(&self) -> bool {
        self.flying
    }

    /// Instant reveal at the current (clustered) positions.
    pub fn reveal(&mut self) {
        for label in &mut self.labels {
            label.opacity = 1.0;
            label.scale = 1.0;
        }
    }

    /// Switch the per-frame integrator to directed flight.
    pub fn begin_flight(&mut self) {
        self.flying = true;
    }

    /// Per-frame integration; a no-op until flight begins.
    pub fn step(&mut self) {
        if !self.flying {
            return;
        }
        for label in &mut self.labels {
            label.fly(self.fraction, self.epsilon);
        }
    }

    pub fn all_pinned(&self) -> bool {
        self.labels.iter().all(Label::is_pinned)
    }

    pub fn frames(&self) -> Vec<LabelFrame> {
        self.labels
            .iter()
            .map(|l| LabelFrame { id: l.id, position: l.position, opacity: l.opacity, scale: l.scale })
            .collect()
    }

    /// Topmost visible label under `p`.
    pub fn hit_test(&self, p: Vec2) -> Option<&Label> {
        self.labels.iter().rev().find(|l| l.is_visible() && l.contains(p))
    }

    /// Update hover flags; returns whether any label is hovered.
    pub fn hover(&mut self, p: Option<Vec2>) -> bool {
        let hit = p.and_then(|p| self.hit_test(p).map(|l| l.id));
        for label in &mut self.labels {
            label.hovered = Some(label.id) == hit;
        }
        hit.is_some()
    }

    /// Click/tap at `p`: navigation to the label under it, if any.
    pub fn activate(&self, p: Vec2) -> Option<NavigationRequest> {
        let label = self.hit_test(p)?;
        log::info!("label '{}' activated -> {}", label.text, label.href);
        Some(NavigationRequest::new(label.href.clone()))
    }
}
