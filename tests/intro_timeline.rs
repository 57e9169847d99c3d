use std::time::Duration;

use cursor_reveal::labels::anchors;
use cursor_reveal::phase::IntroMachine;
use cursor_reveal::{
    default_services, IntroEvent, IntroPhase, IntroScene, IntroTimings, LayoutConfig, MemorySession, SessionStore,
    Viewport,
};

const FRAME: Duration = Duration::from_millis(16);

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn phases_fire_in_order_at_their_scheduled_times() {
    let timings = IntroTimings::default();
    let mut machine = IntroMachine::mount(&timings, false);

    let checkpoints = [
        (1499, IntroPhase::Growing),
        (1, IntroPhase::Holding),
        (999, IntroPhase::Holding),
        (1, IntroPhase::Bursting),
        (500, IntroPhase::LabelsVisible),
        (1500, IntroPhase::LabelsFlying),
        (1499, IntroPhase::LabelsFlying),
        (1, IntroPhase::Settled),
    ];
    for (step, expected) in checkpoints {
        machine.advance(ms(step));
        assert_eq!(machine.phase(), expected, "at {:?}", machine.elapsed());
    }
    assert!(machine.is_complete());
    assert!(!machine.title_revealed());
    machine.advance(ms(300));
    assert!(machine.title_revealed());
    assert_eq!(machine.pending_timers(), 0);
}

#[test]
fn frame_driven_run_emits_each_transition_once() {
    let vp = Viewport::new(1920, 1080);
    let mut session = MemorySession::default();
    let mut scene = IntroScene::mount(&default_services(), vp, IntroTimings::default(), &LayoutConfig::default(), false);

    let mut events = Vec::new();
    for _ in 0..((7000 / 16) + 1) {
        events.extend(scene.frame(FRAME, &mut session));
    }

    let entered: Vec<IntroPhase> = events
        .iter()
        .filter_map(|e| match e {
            IntroEvent::PhaseEntered(p) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(entered, IntroPhase::ORDER[1..].to_vec());
    assert_eq!(events.iter().filter(|e| **e == IntroEvent::Complete).count(), 1);

    let complete_at = events.iter().position(|e| *e == IntroEvent::Complete);
    let title_at = events.iter().position(|e| *e == IntroEvent::TitleRevealed);
    assert!(complete_at < title_at);

    assert!(session.has_seen_intro());
    let targets = anchors(vp, &LayoutConfig::default());
    for (frame, target) in scene.label_frames().iter().zip(targets) {
        assert_eq!(frame.position, target);
    }
}

#[test]
fn a_huge_frame_gap_fast_forwards_without_skipping_events() {
    let mut machine = IntroMachine::mount(&IntroTimings::default(), false);
    let events = machine.advance(Duration::from_secs(60));
    assert_eq!(
        events,
        vec![
            IntroEvent::PhaseEntered(IntroPhase::Holding),
            IntroEvent::PhaseEntered(IntroPhase::Bursting),
            IntroEvent::PhaseEntered(IntroPhase::LabelsVisible),
            IntroEvent::PhaseEntered(IntroPhase::LabelsFlying),
            IntroEvent::PhaseEntered(IntroPhase::Settled),
            IntroEvent::Complete,
            IntroEvent::TitleRevealed,
        ]
    );
    assert!(machine.advance(Duration::from_secs(60)).is_empty());
}

#[test]
fn second_visit_skips_straight_to_the_settled_layout() {
    let vp = Viewport::new(1280, 720);
    let mut session = MemorySession::default();
    let mut first = IntroScene::mount(&default_services(), vp, IntroTimings::default(), &LayoutConfig::default(), session.has_seen_intro());
    for _ in 0..500 {
        first.frame(FRAME, &mut session);
    }
    assert!(session.has_seen_intro());

    let mount = |session: &MemorySession| {
        IntroScene::mount(&default_services(), vp, IntroTimings::default(), &LayoutConfig::default(), session.has_seen_intro())
    };
    let a = mount(&session);
    let b = mount(&session);
    assert_eq!(a.phase(), IntroPhase::Settled);
    assert!(a.title_visible());
    assert!(a.bubble().is_none());
    assert_eq!(a.label_frames(), b.label_frames());
    assert_eq!(a.label_frames(), first.label_frames());
    assert_eq!(a.machine().pending_timers(), 0);
}

#[test]
fn narrow_viewport_stacks_labels_below_the_centre() {
    let vp = Viewport::new(375, 812);
    let scene = IntroScene::mount(&default_services(), vp, IntroTimings::default(), &LayoutConfig::default(), true);
    let frames = scene.label_frames();
    assert_eq!(frames.len(), 4);
    for pair in frames.windows(2) {
        assert_eq!(pair[0].position.x, 187.5);
        assert!((pair[1].position.y - pair[0].position.y - 50.0).abs() < 1e-3);
    }
}
