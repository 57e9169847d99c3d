//! Pointer-driven photo reveal with an animated intro.
//!
//! A hidden background photo shows through wherever the pointer has recently
//! been, and fades back out over a couple of seconds. On top of it an intro
//! bubble grows, pops and releases four service labels that fly to their
//! resting corners; alternatively the labels float around as soap bubbles.
//!
//! The crate is host-agnostic: it consumes pointer events, viewport sizes and
//! frame deltas, and produces ARGB frames plus render snapshots. The
//! `cursor-reveal` binary hosts it in a `minifb` window.

pub mod background;
pub mod brush;
pub mod bubble;
pub mod clock;
pub mod compositor;
pub mod config;
pub mod cover;
pub mod cursor;
pub mod ease;
pub mod error;
pub mod floating;
pub mod gamma;
pub mod intro;
pub mod labels;
pub mod logging;
pub mod mask;
pub mod phase;
pub mod pointer;
pub mod reveal;
pub mod session;
pub mod types;

pub use config::{FloatConfig, IntroTimings, LayoutConfig, RevealConfig};
pub use error::{Error, Result};
pub use floating::BubbleField;
pub use intro::IntroScene;
pub use phase::{IntroEvent, IntroPhase};
pub use pointer::PointerEvent;
pub use reveal::RevealEngine;
pub use session::{FileSession, MemorySession, SessionStore};
pub use types::{FrameBuffer, NavigationRequest, Service, Vec2, Viewport};

/// The four links shown by the intro and the floating field.
pub fn default_services() -> Vec<Service> {
    vec![
        Service::new("Architecture", "/architecture"),
        Service::new("Interior", "/interior"),
        Service::new("Styling", "/styling"),
        Service::new("Photography", "/photography"),
    ]
}
