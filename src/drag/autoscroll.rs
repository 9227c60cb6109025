//! Auto-scroll of the parent container while a panel is dragged near its edge.
//!
//! The host drives [`AutoScroller::tick`] from a periodic timer
//! ([`DragSettings::scroll_interval`]). A tick with neither direction set and
//! zero velocity returns immediately.

use crate::config::DragSettings;
use crate::drag::coords::Viewport;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Outcome of one timer tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTick {
    pub scroll_top: f64,
    /// The drag position should be re-issued so shifted slots follow the scroll
    pub redrag: bool,
}

#[derive(Debug, Clone)]
pub struct AutoScroller {
    direction: Option<ScrollDirection>,
    velocity: f64,
    max_velocity: f64,
}

impl Default for AutoScroller {
    fn default() -> Self {
        Self::new(&DragSettings::default())
    }
}

impl AutoScroller {
    pub fn new(settings: &DragSettings) -> Self {
        Self {
            direction: None,
            velocity: 0.0,
            max_velocity: settings.max_scroll_velocity,
        }
    }

    pub fn start(&mut self, direction: ScrollDirection) {
        if self.direction != Some(direction) {
            trace!(?direction, "Auto-scroll started");
        }
        self.direction = Some(direction);
    }

    pub fn stop(&mut self) {
        self.direction = None;
        self.velocity = 0.0;
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_active(&self) -> bool {
        self.direction.is_some() || self.velocity != 0.0
    }

    /// Apply one tick of scrolling to `viewport`, clamped to `[0, max_scroll]`.
    pub fn tick(&mut self, viewport: &mut Viewport, max_scroll: f64) -> Option<ScrollTick> {
        if !self.is_active() {
            return None;
        }

        match self.direction {
            Some(ScrollDirection::Up) => self.velocity = -self.max_velocity,
            Some(ScrollDirection::Down) => self.velocity = self.max_velocity,
            None => {}
        }

        let max_scroll = max_scroll.max(0.0);
        let scroll_top = (viewport.scroll_top + self.velocity).clamp(0.0, max_scroll);
        viewport.scroll_top = scroll_top;

        Some(ScrollTick {
            scroll_top,
            redrag: self.velocity != 0.0 && scroll_top > 0.0 && scroll_top < max_scroll,
        })
    }
}
