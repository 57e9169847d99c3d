// Tunables for every animated subsystem, with the reference values baked in
// as defaults. The demo binary overrides a few of them from the command line.

use std::time::Duration;

use crate::error::{Error, Result};

/// Brush, decay and pointer-sampling settings for the reveal engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    /// Base brush radius in pixels (visual: size of the painted hole at rest).
    pub brush_radius: f32,
    /// Extra radius per pixel of pointer travel in one event.
    pub speed_gain: f32,
    /// Pointer travel above this no longer grows the brush.
    pub speed_cap: f32,
    /// Fraction of full alpha removed from every mask pixel per frame.
    pub fade_rate: f32,
    /// Pointer moves shorter than this are dropped.
    pub min_distance: f32,
    /// Longest interpolation sub-step between two pointer samples.
    pub max_step: f32,
    /// Jumps longer than this start a new stroke instead of painting a line.
    pub teleport_distance: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            brush_radius: 60.0,
            speed_gain: 0.3,
            speed_cap: 50.0,
            fade_rate: 0.008,
            min_distance: 2.0,
            max_step: 4.0,
            teleport_distance: 400.0,
        }
    }
}

impl RevealConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.brush_radius > 0.0) {
            return Err(Error::invalid_config(format!(
                "brush_radius must be positive, got {}",
                self.brush_radius
            )));
        }
        if !(self.fade_rate > 0.0 && self.fade_rate <= 1.0) {
            return Err(Error::invalid_config(format!(
                "fade_rate must be in (0, 1], got {}",
                self.fade_rate
            )));
        }
        if !(self.max_step > 0.0) {
            return Err(Error::invalid_config(format!(
                "max_step must be positive, got {}",
                self.max_step
            )));
        }
        if self.speed_gain < 0.0 || self.speed_cap < 0.0 || self.min_distance < 0.0 {
            return Err(Error::invalid_config(
                "speed_gain, speed_cap and min_distance must not be negative",
            ));
        }
        if self.teleport_distance <= self.min_distance {
            return Err(Error::invalid_config(
                "teleport_distance must exceed min_distance",
            ));
        }
        Ok(())
    }

    /// Number of frames after which a fully painted pixel is guaranteed clear.
    pub fn frames_to_clear(&self) -> u32 {
        (1.0 / self.fade_rate).ceil() as u32
    }
}

/// How long each intro phase lasts before the next timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntroTimings {
    pub grow: Duration,
    pub hold: Duration,
    pub burst: Duration,
    pub labels_visible: Duration,
    pub flight: Duration,
    /// Pause between "intro complete" and the title fade-in.
    pub title_delay: Duration,
}

impl Default for IntroTimings {
    fn default() -> Self {
        Self {
            grow: Duration::from_millis(1500),
            hold: Duration::from_millis(1000),
            burst: Duration::from_millis(500),
            labels_visible: Duration::from_millis(1500),
            flight: Duration::from_millis(1500),
            title_delay: Duration::from_millis(300),
        }
    }
}

impl IntroTimings {
    /// Time from mount until the machine reaches `settled`.
    pub fn total(&self) -> Duration {
        self.grow + self.hold + self.burst + self.labels_visible + self.flight
    }
}

/// Label anchors, the initial cluster and the flight easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Viewports narrower than this use the stacked (mobile) layout.
    pub breakpoint: usize,
    pub desktop_padding: f32,
    /// Extra inset of each corner anchor from the padded edge.
    pub corner_inset: (f32, f32),
    pub mobile_padding: f32,
    /// Mobile stack starts at this fraction of the viewport height.
    pub mobile_start: f32,
    pub mobile_spacing: f32,
    /// Desktop cluster offsets from the centre before the flight.
    pub cluster_offset: (f32, f32),
    /// Fraction of the remaining distance covered per frame in flight.
    pub flight_fraction: f32,
    /// Labels closer than this to their anchor snap onto it.
    pub snap_epsilon: f32,
    pub hidden_scale: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoint: 768,
            desktop_padding: 60.0,
            corner_inset: (80.0, 40.0),
            mobile_padding: 20.0,
            mobile_start: 0.52,
            mobile_spacing: 50.0,
            cluster_offset: (100.0, 60.0),
            flight_fraction: 0.06,
            snap_epsilon: 1.0,
            hidden_scale: 0.8,
        }
    }
}

/// Free-floating bubble physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatConfig {
    pub size: f32,
    /// Added to half the size to get the wall padding.
    pub edge_margin: f32,
    /// Velocity multiplier after hitting a wall (inelastic bounce).
    pub restitution: f32,
    /// Width of the uniform velocity perturbation per frame.
    pub perturbation: f32,
    /// Per-axis velocity clamp.
    pub max_velocity: f32,
    /// Width of the uniform initial velocity distribution.
    pub initial_spread: f32,
    /// Burst animation length before navigation fires.
    pub activation_delay: Duration,
    pub hover_scale: f32,
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            size: 180.0,
            edge_margin: 50.0,
            restitution: 0.8,
            perturbation: 0.02,
            max_velocity: 1.0,
            initial_spread: 0.5,
            activation_delay: Duration::from_millis(500),
            hover_scale: 1.1,
        }
    }
}

impl FloatConfig {
    pub fn padding(&self) -> f32 {
        self.size / 2.0 + self.edge_margin
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.restitution >= 0.0 && self.restitution < 1.0) {
            return Err(Error::invalid_config(format!(
                "restitution must be in [0, 1), got {}",
                self.restitution
            )));
        }
        if !(self.max_velocity > 0.0) {
            return Err(Error::invalid_config("max_velocity must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        RevealConfig::default().validate().unwrap();
        FloatConfig::default().validate().unwrap();
    }

    #[test]
    fn fade_rate_bounds_are_enforced() {
        let cfg = RevealConfig { fade_rate: 0.0, ..RevealConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = RevealConfig { fade_rate: 1.5, ..RevealConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = RevealConfig { fade_rate: f32::NAN, ..RevealConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn default_intro_lasts_six_seconds() {
        assert_eq!(IntroTimings::default().total(), Duration::from_millis(6000));
        assert_eq!(RevealConfig::default().frames_to_clear(), 125);
    }

    #[test]
    fn float_padding_is_half_size_plus_margin() {
        assert_eq!(FloatConfig::default().padding(), 140.0);
    }
}
