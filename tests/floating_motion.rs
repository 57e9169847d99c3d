use std::time::Duration;

use cursor_reveal::floating::FloatingBubble;
use cursor_reveal::{default_services, BubbleField, FloatConfig, NavigationRequest, Vec2, Viewport};
use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME: Duration = Duration::from_millis(16);

fn inside_padded_bounds(b: &FloatingBubble, vp: Viewport, cfg: &FloatConfig) -> bool {
    let pad = cfg.padding();
    b.position.x >= pad
        && b.position.x <= vp.width as f32 - pad
        && b.position.y >= pad
        && b.position.y <= vp.height as f32 - pad
}

#[test]
fn bubbles_stay_inside_the_padded_viewport() {
    let vp = Viewport::new(1024, 768);
    let cfg = FloatConfig::default();
    let mut field = BubbleField::scatter(&default_services(), vp, cfg, StdRng::seed_from_u64(42), Duration::ZERO);

    for frame in 0..20_000 {
        field.frame(FRAME);
        for b in field.bubbles() {
            assert!(inside_padded_bounds(b, vp, &cfg), "escaped at frame {frame}: {:?}", b.position);
            assert!(b.velocity.x.abs() <= cfg.max_velocity && b.velocity.y.abs() <= cfg.max_velocity);
        }
    }
}

#[test]
fn shrinking_the_window_pulls_bubbles_back_in() {
    let cfg = FloatConfig::default();
    let mut field = BubbleField::scatter(&default_services(), Viewport::new(1920, 1080), cfg, StdRng::seed_from_u64(7), Duration::ZERO);
    let small = Viewport::new(600, 400);
    field.resize(small);
    field.frame(FRAME);
    for b in field.bubbles() {
        assert!(inside_padded_bounds(b, small, &cfg), "{:?}", b.position);
    }

    // Ignored: zero-sized layout thrash.
    field.resize(Viewport::new(0, 0));
    field.frame(FRAME);
    for b in field.bubbles() {
        assert!(inside_padded_bounds(b, small, &cfg));
    }
}

#[test]
fn same_seed_same_trajectory() {
    let vp = Viewport::new(1280, 720);
    let run = |seed| {
        let mut field = BubbleField::scatter(&default_services(), vp, FloatConfig::default(), StdRng::seed_from_u64(seed), Duration::ZERO);
        for _ in 0..300 {
            field.frame(FRAME);
        }
        field.bubbles().iter().map(|b| b.position).collect::<Vec<Vec2>>()
    };
    assert_eq!(run(3), run(3));
}

#[test]
fn clicking_a_bubble_navigates_after_its_burst() {
    let vp = Viewport::new(1280, 720);
    let cfg = FloatConfig::default();
    let mut field = BubbleField::scatter(&default_services(), vp, cfg, StdRng::seed_from_u64(1), Duration::from_millis(200));

    // Staggered appearance: only the first bubble is up at the start.
    let visible = field.bubbles().iter().filter(|b| b.is_visible()).count();
    assert_eq!(visible, 1);

    let target = field.bubbles()[0].position;
    let href = field.bubbles()[0].href.clone();
    assert!(field.hover(Some(target)));
    assert!(field.activate(target));

    let mut navs = Vec::new();
    let mut frames = 0;
    while navs.is_empty() && frames < 100 {
        navs.extend(field.frame(FRAME));
        frames += 1;
    }
    assert_eq!(navs, vec![NavigationRequest::new(href)]);
    // 500 ms at 16 ms per frame
    assert_eq!(frames, 32);

    // Navigation is one-shot.
    for _ in 0..100 {
        assert!(field.frame(FRAME).is_empty());
    }
}
