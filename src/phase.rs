//! Intro phase machine.
//!
//! A six-state sequencer advanced purely by elapsed time. Every transition is
//! a pre-scheduled timer in a small table; the host feeds frame deltas in
//! through [`IntroMachine::advance`], so tests can fast-forward a virtual
//! clock without waiting on wall time.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use crate::config::IntroTimings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntroPhase {
    Growing,
    Holding,
    Bursting,
    LabelsVisible,
    LabelsFlying,
    Settled,
}

impl IntroPhase {
    pub const ORDER: [IntroPhase; 6] = [
        IntroPhase::Growing,
        IntroPhase::Holding,
        IntroPhase::Bursting,
        IntroPhase::LabelsVisible,
        IntroPhase::LabelsFlying,
        IntroPhase::Settled,
    ];

    pub fn next(self) -> Option<IntroPhase> {
        match self {
            IntroPhase::Growing => Some(IntroPhase::Holding),
            IntroPhase::Holding => Some(IntroPhase::Bursting),
            IntroPhase::Bursting => Some(IntroPhase::LabelsVisible),
            IntroPhase::LabelsVisible => Some(IntroPhase::LabelsFlying),
            IntroPhase::LabelsFlying => Some(IntroPhase::Settled),
            IntroPhase::Settled => None,
        }
    }

    /// Whether the decorative bubble is on screen in this phase.
    pub fn shows_bubble(self) -> bool {
        matches!(self, IntroPhase::Growing | IntroPhase::Holding | IntroPhase::Bursting)
    }

    /// Whether labels are on screen (and clickable) in this phase.
    pub fn shows_labels(self) -> bool {
        !self.shows_bubble()
    }
}

impl fmt::Display for IntroPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntroPhase::Growing => "growing",
            IntroPhase::Holding => "holding",
            IntroPhase::Bursting => "bursting",
            IntroPhase::LabelsVisible => "labels-visible",
            IntroPhase::LabelsFlying => "labels-flying",
            IntroPhase::Settled => "settled",
        };
        f.write_str(name)
    }
}

/// Notification produced while advancing the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroEvent {
    PhaseEntered(IntroPhase),
    /// One-shot, fired together with entering `Settled`.
    Complete,
    /// The host may fade in its title now.
    TitleRevealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerAction {
    Enter(IntroPhase),
    RevealTitle,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    /// Absolute virtual time since mount.
    due: Duration,
    action: TimerAction,
}

#[derive(Debug, Clone)]
pub struct IntroMachine {
    phase: IntroPhase,
    elapsed: Duration,
    phase_started: Duration,
    timers: VecDeque<Timer>,
    completed: bool,
    title_revealed: bool,
    cancelled: bool,
}

impl IntroMachine {
    /// Mount the machine. With `seen_before` the machine starts `Settled`,
    /// schedules nothing and never emits events.
    pub fn mount(timings: &IntroTimings, seen_before: bool) -> Self {
        if seen_before {
            log::debug!("intro already seen this session; starting settled");
            return Self {
                phase: IntroPhase::Settled,
                elapsed: Duration::ZERO,
                phase_started: Duration::ZERO,
                timers: VecDeque::new(),
                completed: true,
                title_revealed: true,
                cancelled: false,
            };
        }

        let steps = [
            (timings.grow, IntroPhase::Holding),
            (timings.hold, IntroPhase::Bursting),
            (timings.burst, IntroPhase::LabelsVisible),
            (timings.labels_visible, IntroPhase::LabelsFlying),
            (timings.flight, IntroPhase::Settled),
        ];
        let mut timers = VecDeque::with_capacity(steps.len() + 1);
        let mut due = Duration::ZERO;
        for (len, phase) in steps {
            due += len;
            timers.push_back(Timer { due, action: TimerAction::Enter(phase) });
        }
        timers.push_back(Timer {
            due: due + timings.title_delay,
            action: TimerAction::RevealTitle,
        });

        Self {
            phase: IntroPhase::Growing,
            elapsed: Duration::ZERO,
            phase_started: Duration::ZERO,
            timers,
            completed: false,
            title_revealed: false,
            cancelled: false,
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Virtual time since mount.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn time_in_phase(&self) -> Duration {
        self.elapsed.saturating_sub(self.phase_started)
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn title_revealed(&self) -> bool {
        self.title_revealed
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Move the virtual clock forward and fire every timer that came due, in
    /// schedule order. A long `dt` may fire several transitions at once.
    pub fn advance(&mut self, dt: Duration) -> Vec<IntroEvent> {
        let mut events = Vec::new();
        if self.cancelled {
            return events;
        }
        self.elapsed += dt;

        while let Some(timer) = self.timers.front().copied() {
            if timer.due > self.elapsed {
                break;
            }
            self.timers.pop_front();
            match timer.action {
                TimerAction::Enter(next) => {
                    debug_assert_eq!(
                        self.phase.next(),
                        Some(next),
                        "intro timer table out of order"
                    );
                    log::debug!("intro phase {} -> {}", self.phase, next);
                    self.phase = next;
                    self.phase_started = timer.due;
                    events.push(IntroEvent::PhaseEntered(next));
                    if next == IntroPhase::Settled && !self.completed {
                        self.completed = true;
                        log::info!("intro complete after {:?}", timer.due);
                        events.push(IntroEvent::Complete);
                    }
                }
                TimerAction::RevealTitle => {
                    self.title_revealed = true;
                    events.push(IntroEvent::TitleRevealed);
                }
            }
        }
        events
    }

    /// Clear every pending timer; later `advance` calls do nothing.
    pub fn cancel(&mut self) {
        if !self.timers.is_empty() {
            log::debug!("intro cancelled in phase {} with {} timers pending", self.phase, self.timers.len());
        }
        self.timers.clear();
        self.cancelled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn phases_follow_the_reference_schedule() {
        let mut m = IntroMachine::mount(&IntroTimings::default(), false);
        assert_eq!(m.phase(), IntroPhase::Growing);

        assert!(m.advance(ms(1499)).is_empty());
        assert_eq!(m.advance(ms(1)), vec![IntroEvent::PhaseEntered(IntroPhase::Holding)]);
        assert_eq!(m.advance(ms(1000)), vec![IntroEvent::PhaseEntered(IntroPhase::Bursting)]);
        assert_eq!(m.advance(ms(500)), vec![IntroEvent::PhaseEntered(IntroPhase::LabelsVisible)]);
        assert_eq!(m.advance(ms(1500)), vec![IntroEvent::PhaseEntered(IntroPhase::LabelsFlying)]);
        assert_eq!(
            m.advance(ms(1500)),
            vec![IntroEvent::PhaseEntered(IntroPhase::Settled), IntroEvent::Complete]
        );
        assert!(!m.title_revealed());
        assert_eq!(m.advance(ms(300)), vec![IntroEvent::TitleRevealed]);
        assert!(m.advance(ms(60_000)).is_empty());
        assert_eq!(m.phase(), IntroPhase::Settled);
    }

    #[test]
    fn one_huge_step_fires_everything_in_order() {
        let mut m = IntroMachine::mount(&IntroTimings::default(), false);
        let events = m.advance(ms(10_000));
        let phases: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                IntroEvent::PhaseEntered(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(phases, IntroPhase::ORDER[1..].to_vec());
        assert_eq!(events.iter().filter(|e| **e == IntroEvent::Complete).count(), 1);
        assert_eq!(events.last(), Some(&IntroEvent::TitleRevealed));
    }

    #[test]
    fn skip_path_starts_settled_without_timers() {
        let mut m = IntroMachine::mount(&IntroTimings::default(), true);
        assert_eq!(m.phase(), IntroPhase::Settled);
        assert_eq!(m.pending_timers(), 0);
        assert!(m.is_complete());
        assert!(m.title_revealed());
        assert!(m.advance(ms(10_000)).is_empty());
    }

    #[test]
    fn cancel_clears_pending_timers() {
        let mut m = IntroMachine::mount(&IntroTimings::default(), false);
        m.advance(ms(2000));
        assert_eq!(m.phase(), IntroPhase::Holding);
        m.cancel();
        assert_eq!(m.pending_timers(), 0);
        assert!(m.advance(ms(10_000)).is_empty());
        assert_eq!(m.phase(), IntroPhase::Holding);
        assert!(!m.is_complete());
    }

    #[test]
    fn time_in_phase_restarts_on_transition() {
        let mut m = IntroMachine::mount(&IntroTimings::default(), false);
        m.advance(ms(1600));
        assert_eq!(m.time_in_phase(), ms(100));
        m.advance(ms(1000));
        assert_eq!(m.phase(), IntroPhase::Bursting);
        assert_eq!(m.time_in_phase(), ms(100));
    }

    #[test]
    fn display_names_match_phase_labels() {
        let names: Vec<String> = IntroPhase::ORDER.iter().map(|p| p.to_string()).collect();
        assert_eq!(
            names,
            ["growing", "holding", "bursting", "labels-visible", "labels-flying", "settled"]
        );
    }
}
