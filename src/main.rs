// What you SEE:
// • A warm paper-coloured page. Move the mouse and a hidden photo is painted
//   in under it; the painted trail fades back out in about two seconds.
// • First run: a bubble grows in the centre, pops, and four labels fly out to
//   the corners, then the title fades in. Later runs in the same session
//   start settled.
// • --floating: the labels drift around as soap bubbles instead.
// • Click a label/bubble to "navigate" (logged + shown in the HUD).
// • R replays the intro. ESC quits.

mod draw;
mod fx;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use rand::rngs::ThreadRng;

use cursor_reveal::background::{BackgroundLoader, LoadState};
use cursor_reveal::clock::FrameClock;
use cursor_reveal::cursor::CursorFollower;
use cursor_reveal::gamma::{fill_base, present_over, GammaLut, BASE_COLOR};
use cursor_reveal::logging::{init_logging, LoggingConfig};
use cursor_reveal::{
    default_services, BubbleField, Error, FileSession, FloatConfig, FrameBuffer, IntroEvent, IntroScene,
    IntroTimings, LayoutConfig, MemorySession, NavigationRequest, RevealConfig, RevealEngine, SessionStore,
    Service, Vec2, Viewport,
};
use draw::{draw_text, draw_text_centered, Drawer, TextStyle};

#[derive(Debug, Parser)]
#[command(name = "cursor-reveal", version, about = "Pointer-driven photo reveal with an animated intro")]
struct Args {
    /// Background photo revealed under the pointer.
    #[arg(long)]
    image: Option<PathBuf>,

    #[arg(long, default_value_t = 1280)]
    width: usize,

    #[arg(long, default_value_t = 720)]
    height: usize,

    /// Fraction of full alpha removed from the painted trail per frame.
    #[arg(long, default_value_t = 0.008)]
    fade_rate: f32,

    /// Base brush radius in pixels.
    #[arg(long, default_value_t = 60.0)]
    brush_size: f32,

    /// Start settled, as if the intro had already played.
    #[arg(long)]
    skip_intro: bool,

    /// Free-floating bubbles instead of the intro + corner labels.
    #[arg(long)]
    floating: bool,

    /// Marker file remembering that the intro played; delete it to start a new session.
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Log filter, env_logger syntax (overrides RUST_LOG).
    #[arg(long)]
    log: Option<String>,

    /// Brand title shown once the intro settles.
    #[arg(long, default_value = "STUDIO")]
    title: String,
}

/// Which presentation of the service links is active.
enum Scene {
    Intro(IntroScene),
    Floating(BubbleField<ThreadRng>),
}

impl Scene {
    fn teardown(&mut self) {
        match self {
            Scene::Intro(scene) => scene.teardown(),
            Scene::Floating(field) => field.teardown(),
        }
    }
}

const LABEL_STYLE: TextStyle = TextStyle { scale: 2, tracking: 4, color: 0x0022_2222, alpha: 0.9 };
const TITLE_STYLE: TextStyle = TextStyle { scale: 10, tracking: 14, color: 0x0022_2222, alpha: 0.9 };
const SUBTITLE_STYLE: TextStyle = TextStyle { scale: 2, tracking: 6, color: 0x0022_2222, alpha: 0.5 };
const TITLE_FADE: Duration = Duration::from_millis(1500);

fn mount_intro(services: &[Service], viewport: Viewport, seen_before: bool) -> Scene {
    Scene::Intro(IntroScene::mount(
        services,
        viewport,
        IntroTimings::default(),
        &LayoutConfig::default(),
        seen_before,
    ))
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    init_logging(LoggingConfig { env_filter: args.log.clone(), ..LoggingConfig::default() });

    /* --- Window + reveal engine ---
       Visual: window opens on the plain page colour. */
    let mut drawer = Drawer::new("Cursor Reveal", args.width, args.height)?;
    let mut viewport = Viewport::new(args.width, args.height);
    let reveal_cfg = RevealConfig {
        brush_radius: args.brush_size,
        fade_rate: args.fade_rate,
        ..RevealConfig::default()
    };
    let mut engine = RevealEngine::new(viewport, reveal_cfg)?;

    /* --- Background photo, decoded off the frame loop ---
       Visual: nothing is revealed until it arrives. */
    let mut loader = args.image.clone().map(BackgroundLoader::spawn);
    if loader.is_none() {
        log::warn!("no --image given; the reveal will stay empty");
    }

    /* --- Session marker ---
       Visual: decides whether the intro plays or the labels start settled. */
    let mut session: Box<dyn SessionStore> = match &args.session_file {
        Some(path) => Box::new(FileSession::new(path)),
        None => Box::new(MemorySession::default()),
    };
    let services = default_services();
    let mut scene = if args.floating {
        let cfg = FloatConfig::default();
        cfg.validate()?;
        Scene::Floating(BubbleField::scatter(&services, viewport, cfg, rand::rng(), Duration::from_millis(200)))
    } else {
        mount_intro(&services, viewport, args.skip_intro || session.has_seen_intro())
    };

    /* --- Present buffers ---
       Visual: `screen` is exactly what you see each frame. */
    let lut = GammaLut::new();
    let mut screen = FrameBuffer::new(viewport.width, viewport.height);
    let mut cursor = CursorFollower::new();
    let mut title_alpha: f32 = 0.0;
    let mut title_on = matches!(&scene, Scene::Intro(s) if s.title_visible());
    let mut last_nav: Option<(NavigationRequest, Instant)> = None;

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    let mut clock = FrameClock::new();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let ft = clock.tick();

        /* 1) Window resized? Mask keeps its overlapping region. */
        let vp = drawer.viewport();
        if vp != viewport && !vp.is_empty() {
            engine.resize(vp);
            if let Scene::Floating(field) = &mut scene {
                field.resize(vp);
            }
            viewport = vp;
        }

        /* 2) Photo arrived? */
        let state = match loader.as_mut() {
            Some(l) => l.poll(),
            None => LoadState::Pending,
        };
        match state {
            LoadState::Ready(image) => {
                engine.attach_background(image);
                loader = None;
            }
            LoadState::Failed(_) => loader = None,
            LoadState::Pending => {}
        }

        /* 3) Inputs: pointer paints, clicks activate, R replays the intro. */
        if let Some(event) = drawer.pointer_event() {
            engine.pointer(event);
        }
        let mouse = drawer.mouse_pos();
        let clicked = drawer.left_clicked();
        if drawer.r_pressed_once() && !args.floating {
            scene.teardown();
            scene = mount_intro(&services, viewport, false);
            title_on = false;
            title_alpha = 0.0;
        }

        /* 4) Scene timers + motion. */
        let mut navs = Vec::new();
        let pointing = match &mut scene {
            Scene::Intro(intro) => {
                for event in intro.frame(ft.dt, session.as_mut()) {
                    if event == IntroEvent::TitleRevealed {
                        title_on = true;
                    }
                }
                if clicked {
                    navs.extend(mouse.and_then(|p| intro.activate(p)));
                }
                intro.hover(mouse)
            }
            Scene::Floating(field) => {
                if clicked {
                    if let Some(p) = mouse {
                        field.activate(p);
                    }
                }
                navs.extend(field.frame(ft.dt));
                field.hover(mouse)
            }
        };
        for nav in navs {
            log::info!("navigate -> {}", nav.target);
            last_nav = Some((nav, Instant::now()));
        }
        if title_on {
            title_alpha = (title_alpha + ft.dt.as_secs_f32() / TITLE_FADE.as_secs_f32()).min(1.0);
        }

        /* 5) Reveal: decay + composite, then blend over the page colour. */
        let engine_vp = engine.viewport();
        match engine.frame() {
            Some(frame) => present_over(frame, BASE_COLOR, &lut, &mut screen),
            None => {
                if screen.viewport() != engine_vp {
                    screen = FrameBuffer::new(engine_vp.width, engine_vp.height);
                }
                fill_base(&mut screen, BASE_COLOR);
            }
        }

        /* 6) Scene on top: title, bubble/burst or floating bubbles, labels. */
        let center = screen.viewport().center();
        if title_alpha > 0.0 {
            let title = TextStyle { alpha: TITLE_STYLE.alpha * title_alpha, ..TITLE_STYLE };
            draw_text_centered(&mut screen, center - Vec2::new(0.0, 30.0), &args.title, &title);
            let sub = TextStyle { alpha: SUBTITLE_STYLE.alpha * title_alpha, ..SUBTITLE_STYLE };
            draw_text_centered(&mut screen, center + Vec2::new(0.0, 50.0), "DESIGN & PHOTOGRAPHY", &sub);
        }
        match &scene {
            Scene::Intro(intro) => {
                if let Some(bubble) = intro.bubble() {
                    fx::render_intro_bubble(&mut screen, center, &bubble, intro.drift());
                }
                fx::render_burst(&mut screen, center, &intro.burst_particles());
                for (frame, label) in intro.label_frames().iter().zip(intro.labels().labels()) {
                    let style = TextStyle { alpha: LABEL_STYLE.alpha * frame.opacity, ..LABEL_STYLE };
                    let style = if label.hovered { TextStyle { color: 0x0000_47AB, ..style } } else { style };
                    draw_text_centered(&mut screen, frame.position, &label.text, &style);
                }
            }
            Scene::Floating(field) => {
                fx::render_floating(&mut screen, field.bubbles(), field.config());
                for b in field.bubbles().iter().filter(|b| b.is_visible() && !b.is_bursting()) {
                    draw_text_centered(&mut screen, b.position, &b.label, &LABEL_STYLE);
                }
            }
        }

        /* 7) Cursor + HUD. */
        if let Some(p) = mouse {
            cursor.set_target(p, pointing);
        }
        cursor.step();
        if mouse.is_some() {
            fx::render_cursor(&mut screen, &cursor);
        }

        let mut hud = format!("{hud_fps_text} | R: REPLAY  ESC: QUIT");
        if let Some((nav, at)) = &last_nav {
            if at.elapsed() < Duration::from_secs(3) {
                hud.push_str(&format!(" | GO: {}", nav.target));
            }
        }
        let bottom = screen.height as i32 - 16;
        draw_text(&mut screen, 8, bottom, &hud, &TextStyle::HUD);

        /* 8) Present to the window. */
        drawer.present(&screen)?;

        /* 9) FPS counter (once per second). */
        frames_this_second += 1;
        let now = ft.now;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::trace!("FPS: {fps:.1}");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    scene.teardown();
    engine.teardown();
    Ok(())
}
