//! Tooltip state machine
//!
//! ```text
//! Hidden --show--> Appearing --fade in--> Tracking
//!    ^                 |                     |
//!    |                 +------- leave -------+
//!    |                           v
//!    +------ fade out ----- Disappearing
//! ```
//!
//! `show` is accepted in every phase and preempts whatever is on screen. Every
//! `show` starts a new generation; fade timers carry the generation they were
//! issued for and are ignored once it has moved on.

use crate::config::OverlayConfig;
use crate::content::Measure;
use crate::geometry::{place, Point, Size, Viewport};
use std::time::Duration;
use tracing::{debug, trace};

/// Lifecycle phase of the tooltip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing shown
    #[default]
    Hidden,
    /// Placed, waiting for the fade-in
    Appearing,
    /// Fully visible and following the pointer
    Tracking,
    /// Fading out after the pointer left
    Disappearing,
}

/// Show/hide cycle counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// Raw counter value
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Which fade a timer completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    /// Opacity goes to 1
    In,
    /// Content is cleared
    Out,
}

/// Request to call [`TooltipOverlay::fade_elapsed`] after `delay`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeTimer {
    /// Generation the timer belongs to
    pub generation: Generation,
    /// Fade being completed
    pub fade: Fade,
    /// How long to wait
    pub delay: Duration,
}

/// Observable tooltip state
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState<C> {
    /// Content being shown
    pub content: Option<C>,
    /// Whether the tooltip is mounted
    pub visible: bool,
    /// Placement (horizontal centre line, top edge)
    pub position: Point,
    /// Target opacity, 0.0 to 1.0
    pub opacity: f64,
    /// Current phase
    pub phase: Phase,
    /// Current generation
    pub generation: Generation,
}

impl<C> Default for TooltipState<C> {
    fn default() -> Self {
        Self {
            content: None,
            visible: false,
            position: Point::default(),
            opacity: 0.0,
            phase: Phase::Hidden,
            generation: Generation::default(),
        }
    }
}

/// Single-instance, viewport-aware tooltip
///
/// # Examples
///
/// ```
/// use reliquary_overlay::{Fade, OverlayConfig, Phase, Point, Size, TooltipOverlay};
///
/// let mut overlay = TooltipOverlay::new(OverlayConfig::default(), Size::new(800.0, 600.0));
///
/// let timer = overlay.show(Size::new(100.0, 40.0), Point::new(200.0, 100.0));
/// assert_eq!(overlay.state().phase, Phase::Appearing);
/// assert_eq!(timer.fade, Fade::In);
///
/// overlay.fade_elapsed(timer);
/// assert_eq!(overlay.state().opacity, 1.0);
///
/// let timer = overlay.leave().unwrap();
/// overlay.fade_elapsed(timer);
/// assert_eq!(overlay.state().phase, Phase::Hidden);
/// ```
#[derive(Debug, Clone)]
pub struct TooltipOverlay<C> {
    config: OverlayConfig,
    viewport: Viewport,
    anchor: Point,
    size: Size,
    state: TooltipState<C>,
}

impl<C: Measure> TooltipOverlay<C> {
    /// Create a hidden overlay for a viewport
    pub fn new(config: OverlayConfig, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            anchor: Point::default(),
            size: Size::default(),
            state: TooltipState::default(),
        }
    }

    /// Current state
    pub fn state(&self) -> &TooltipState<C> {
        &self.state
    }

    /// Current viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Measured size of the current content
    pub fn size(&self) -> Size {
        self.size
    }

    /// Configuration in use
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Show `content` at `anchor`, replacing anything on screen
    ///
    /// Position is computed immediately; opacity starts at 0 and the returned
    /// timer brings it to 1.
    pub fn show(&mut self, content: C, anchor: Point) -> FadeTimer {
        self.state.generation = Generation(self.state.generation.0 + 1);
        self.size = content.measure();
        self.anchor = anchor;

        self.state.content = Some(content);
        self.state.visible = true;
        self.state.opacity = 0.0;
        self.state.phase = Phase::Appearing;
        self.reposition();

        debug!(
            "Tooltip shown (generation {}) at ({}, {})",
            self.state.generation.0, self.state.position.x, self.state.position.y
        );

        FadeTimer {
            generation: self.state.generation,
            fade: Fade::In,
            delay: self.config.fade_in_delay(),
        }
    }

    /// Follow the pointer; ignored unless appearing or tracking
    ///
    /// Returns whether the position was updated.
    pub fn pointer_moved(&mut self, anchor: Point) -> bool {
        if !matches!(self.state.phase, Phase::Appearing | Phase::Tracking) {
            return false;
        }
        self.anchor = anchor;
        self.reposition();
        true
    }

    /// Start hiding; returns the timer that clears the content
    ///
    /// Returns `None` when nothing is shown or a fade-out is already running.
    pub fn leave(&mut self) -> Option<FadeTimer> {
        if !matches!(self.state.phase, Phase::Appearing | Phase::Tracking) {
            return None;
        }

        self.state.opacity = 0.0;
        self.state.phase = Phase::Disappearing;

        Some(FadeTimer {
            generation: self.state.generation,
            fade: Fade::Out,
            delay: self.config.fade_out(),
        })
    }

    /// Update the viewport and re-place a mounted tooltip
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if self.state.visible {
            self.reposition();
        }
    }

    /// Complete a fade
    ///
    /// Timers from an older generation, or for a phase the tooltip has left,
    /// are ignored. Returns whether the timer was applied.
    pub fn fade_elapsed(&mut self, timer: FadeTimer) -> bool {
        if timer.generation != self.state.generation {
            trace!(
                "Ignoring stale {:?} timer (generation {} < {})",
                timer.fade,
                timer.generation.0,
                self.state.generation.0
            );
            return false;
        }

        match (timer.fade, self.state.phase) {
            (Fade::In, Phase::Appearing) => {
                self.state.opacity = 1.0;
                self.state.phase = Phase::Tracking;
                true
            }
            (Fade::Out, Phase::Disappearing) => {
                self.state.content = None;
                self.state.visible = false;
                self.state.position = Point::default();
                self.state.opacity = 0.0;
                self.state.phase = Phase::Hidden;
                self.size = Size::default();
                debug!("Tooltip hidden (generation {})", self.state.generation.0);
                true
            }
            _ => false,
        }
    }

    fn reposition(&mut self) {
        self.state.position = place(self.anchor, self.size, self.viewport, self.config.offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay() -> TooltipOverlay<Size> {
        TooltipOverlay::new(OverlayConfig::default(), Size::new(800.0, 600.0))
    }

    fn small() -> Size {
        Size::new(100.0, 40.0)
    }

    #[test]
    fn test_show_places_immediately_with_zero_opacity() {
        let mut overlay = overlay();
        let timer = overlay.show(small(), Point::new(300.0, 200.0));

        let state = overlay.state();
        assert!(state.visible);
        assert_eq!(state.opacity, 0.0);
        assert_eq!(state.position, Point::new(300.0, 210.0));
        assert_eq!(timer.delay, Duration::from_millis(50));
    }

    #[test]
    fn test_full_cycle() {
        let mut overlay = overlay();
        let fade_in = overlay.show(small(), Point::new(300.0, 200.0));
        assert!(overlay.fade_elapsed(fade_in));
        assert_eq!(overlay.state().phase, Phase::Tracking);

        assert!(overlay.pointer_moved(Point::new(780.0, 590.0)));
        assert_eq!(overlay.state().position, Point::new(670.0, 540.0));
        assert_eq!(overlay.state().opacity, 1.0);

        let fade_out = overlay.leave().unwrap();
        assert_eq!(overlay.state().phase, Phase::Disappearing);
        assert_eq!(overlay.state().opacity, 0.0);
        assert!(overlay.state().content.is_some());

        assert!(overlay.fade_elapsed(fade_out));
        assert_eq!(overlay.state(), &TooltipState {
            generation: overlay.state().generation,
            ..TooltipState::default()
        });
    }

    #[test]
    fn test_stale_fade_out_does_not_blank_new_tooltip() {
        let mut overlay = overlay();
        overlay.show(small(), Point::new(100.0, 100.0));
        let stale = overlay.leave().unwrap();

        let fresh_in = overlay.show(Size::new(50.0, 20.0), Point::new(400.0, 300.0));
        assert!(!overlay.fade_elapsed(stale));
        assert_eq!(overlay.state().phase, Phase::Appearing);
        assert_eq!(overlay.state().content, Some(Size::new(50.0, 20.0)));

        assert!(overlay.fade_elapsed(fresh_in));
        assert_eq!(overlay.state().phase, Phase::Tracking);
    }

    #[test]
    fn test_fade_in_after_leave_is_ignored() {
        let mut overlay = overlay();
        let fade_in = overlay.show(small(), Point::new(100.0, 100.0));
        let fade_out = overlay.leave().unwrap();

        assert!(!overlay.fade_elapsed(fade_in));
        assert_eq!(overlay.state().opacity, 0.0);
        assert!(overlay.fade_elapsed(fade_out));
        assert!(!overlay.state().visible);
    }

    #[test]
    fn test_moves_ignored_when_not_shown() {
        let mut overlay = overlay();
        assert!(!overlay.pointer_moved(Point::new(1.0, 1.0)));
        assert!(overlay.leave().is_none());

        overlay.show(small(), Point::new(300.0, 200.0));
        overlay.leave();
        assert!(!overlay.pointer_moved(Point::new(1.0, 1.0)));
        assert!(overlay.leave().is_none());
    }

    #[test]
    fn test_resize_replaces_visible_tooltip() {
        let mut overlay = overlay();
        overlay.show(small(), Point::new(300.0, 200.0));
        assert_eq!(overlay.state().position.x, 300.0);

        overlay.resize(Size::new(350.0, 600.0));
        assert_eq!(overlay.state().position.x, 300.0 - 100.0 - 10.0);
    }

    #[test]
    fn test_generation_increments_per_show() {
        let mut overlay = overlay();
        let first = overlay.show(small(), Point::default());
        let second = overlay.show(small(), Point::default());
        assert!(second.generation > first.generation);
        assert_eq!(overlay.state().generation, second.generation);
    }
}
