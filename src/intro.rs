//! Intro scene: the phase machine driving the bubble and the kinetic labels.
//!
//! The machine owns *when* things happen; the label set integrates positions
//! every frame on its own. The scene wires the two together, persists the
//! session marker on completion and answers the host's render queries.

use std::time::Duration;

use crate::bubble::{bubble_visual, burst_particles, BubbleVisual, BurstParticle, DriftOffset, GradientDrift};
use crate::config::{IntroTimings, LayoutConfig};
use crate::labels::{LabelFrame, LabelMetrics, LabelSet};
use crate::phase::{IntroEvent, IntroMachine, IntroPhase};
use crate::session::SessionStore;
use crate::types::{NavigationRequest, Service, Vec2, Viewport};

pub struct IntroScene {
    machine: IntroMachine,
    labels: LabelSet,
    drift: GradientDrift,
    timings: IntroTimings,
    torn_down: bool,
}

impl IntroScene {
    /// Mount the intro. `seen_before` is the session marker read by the host;
    /// when set, labels start at their anchors and nothing is scheduled.
    /// Anchors are computed once, from `viewport`, here.
    pub fn mount(
        services: &[Service],
        viewport: Viewport,
        timings: IntroTimings,
        layout: &LayoutConfig,
        seen_before: bool,
    ) -> Self {
        let machine = IntroMachine::mount(&timings, seen_before);
        let mut labels = LabelSet::new(services, viewport, layout, &LabelMetrics::default(), seen_before);
        if seen_before {
            labels.begin_flight();
        }
        Self {
            machine,
            labels,
            drift: GradientDrift::new(),
            timings,
            torn_down: false,
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.machine.phase()
    }

    pub fn is_complete(&self) -> bool {
        self.machine.is_complete()
    }

    pub fn title_visible(&self) -> bool {
        self.machine.title_revealed()
    }

    pub fn machine(&self) -> &IntroMachine {
        &self.machine
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// One frame: fire due timers, apply their effects, then integrate the
    /// labels and the bubble drift. Completion writes the session marker.
    pub fn frame(&mut self, dt: Duration, session: &mut dyn SessionStore) -> Vec<IntroEvent> {
        if self.torn_down {
            return Vec::new();
        }
        let events = self.machine.advance(dt);
        for event in &events {
            match event {
                IntroEvent::PhaseEntered(IntroPhase::LabelsVisible) => self.labels.reveal(),
                IntroEvent::PhaseEntered(IntroPhase::LabelsFlying) => self.labels.begin_flight(),
                IntroEvent::Complete => {
                    if let Err(err) = session.mark_intro_seen() {
                        log::warn!("could not persist intro marker: {err}");
                    }
                }
                _ => {}
            }
        }
        self.labels.step();
        if self.machine.phase().shows_bubble() {
            self.drift.tick();
        } else {
            self.drift.cancel();
        }
        events
    }

    pub fn bubble(&self) -> Option<BubbleVisual> {
        bubble_visual(self.machine.phase(), self.machine.time_in_phase(), &self.timings)
    }

    pub fn burst_particles(&self) -> Vec<BurstParticle> {
        if self.machine.phase() != IntroPhase::Bursting {
            return Vec::new();
        }
        burst_particles(self.machine.time_in_phase())
    }

    pub fn drift(&self) -> DriftOffset {
        self.drift.offset()
    }

    /// Per-label `{id, position, opacity, scale}`; empty while the bubble shows.
    pub fn label_frames(&self) -> Vec<LabelFrame> {
        if !self.machine.phase().shows_labels() {
            return Vec::new();
        }
        self.labels.frames()
    }

    pub fn hover(&mut self, p: Option<Vec2>) -> bool {
        if !self.machine.phase().shows_labels() {
            return false;
        }
        self.labels.hover(p)
    }

    pub fn activate(&self, p: Vec2) -> Option<NavigationRequest> {
        if self.torn_down || !self.machine.phase().shows_labels() {
            return None;
        }
        self.labels.activate(p)
    }

    /// Host unmounted: clear timers and stop every loop.
    pub fn teardown(&mut self) {
        self.machine.cancel();
        self.drift.cancel();
        self.torn_down = true;
    }
}
