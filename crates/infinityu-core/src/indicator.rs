//! Transient zoom percentage overlay.
//!
//! The indicator holds no state of its own beyond its animation: the text is
//! whatever percentage the viewport last reported.

use crate::Instant;
use kurbo::{Point, Size};
use std::time::Duration;

/// Distance of the indicator anchor from the bottom edge, in screen pixels.
pub const INDICATOR_MARGIN: f64 = 32.0;

/// Animation phase. Only one phase exists at a time, so starting a new
/// countdown replaces (cancels) whatever was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Hidden,
    /// Fully visible until the deadline.
    Holding { until: Instant },
    /// Fading out since `since`.
    Fading { since: Instant },
}

/// Auto-hiding "{percent}%" overlay.
#[derive(Debug, Clone)]
pub struct ZoomIndicator {
    percent: u32,
    text: String,
    phase: Phase,
    hold: Duration,
    fade: Duration,
}

impl ZoomIndicator {
    /// Create a hidden indicator with the given hold and fade times.
    pub fn new(hold: Duration, fade: Duration) -> Self {
        Self {
            percent: 100,
            text: "100%".to_string(),
            phase: Phase::Hidden,
            hold,
            fade,
        }
    }

    /// Show a new zoom percentage and restart the countdown.
    pub fn show(&mut self, percent: u32, now: Instant) {
        self.percent = percent;
        self.text = format!("{percent}%");
        self.phase = Phase::Holding { until: now + self.hold };
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Advance the animation. Returns true while the overlay needs repainting.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Hidden => false,
            Phase::Holding { until } => {
                if now >= until {
                    self.phase = Phase::Fading { since: until };
                    self.tick(now)
                } else {
                    false
                }
            }
            Phase::Fading { since } => {
                if now.saturating_duration_since(since) >= self.fade {
                    self.phase = Phase::Hidden;
                }
                // Either still fading or just disappeared; both need a repaint.
                true
            }
        }
    }

    /// Opacity in `[0, 1]` at `now`.
    pub fn opacity(&self, now: Instant) -> f64 {
        let fade_start = match self.phase {
            Phase::Hidden => return 0.0,
            Phase::Holding { until } if now < until => return 1.0,
            Phase::Holding { until } => until,
            Phase::Fading { since } => since,
        };
        if self.fade.is_zero() {
            return 0.0;
        }
        let elapsed = now.saturating_duration_since(fade_start).as_secs_f64();
        (1.0 - elapsed / self.fade.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.opacity(now) > 0.0
    }

    /// Whether an animation is pending (holding or fading).
    pub fn is_animating(&self) -> bool {
        self.phase != Phase::Hidden
    }

    /// Screen anchor (bottom-centre) for a viewport of the given size.
    pub fn anchor(viewport_size: Size) -> Point {
        Point::new(
            viewport_size.width / 2.0,
            (viewport_size.height - INDICATOR_MARGIN).max(0.0),
        )
    }
}
