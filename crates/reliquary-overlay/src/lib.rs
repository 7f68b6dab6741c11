//! Reliquary Overlay
//!
//! A single, viewport-aware tooltip that follows the pointer.
//!
//! # Overview
//!
//! - **Placement**: [`place`] keeps the box inside the viewport, flipping it
//!   to the other side of the pointer on overflow
//! - **State machine**: [`TooltipOverlay`] runs the
//!   hidden / appearing / tracking / disappearing cycle and hands out
//!   [`FadeTimer`]s that the caller schedules
//! - **Dispatcher**: [`OverlayDriver`] owns the state machine on one task,
//!   schedules the timers itself and publishes every change on a `watch`
//!   channel
//!
//! Only one tooltip exists at a time. Showing new content preempts the
//! current one, and a fade-out started for the old content never hides the
//! new one.
//!
//! # Usage
//!
//! ```
//! use reliquary_overlay::{Measure, OverlayConfig, Phase, Point, Size, TooltipContent, TooltipOverlay};
//!
//! let content = TooltipContent::new("Total stats", vec!["power: 12".to_string()]);
//! let size = content.measure();
//!
//! let mut overlay = TooltipOverlay::new(OverlayConfig::default(), Size::new(800.0, 600.0));
//! let timer = overlay.show(content, Point::new(790.0, 20.0));
//!
//! // Right edge overflow puts the box left of the pointer
//! assert_eq!(overlay.state().position.x, 790.0 - size.width - 10.0);
//!
//! overlay.fade_elapsed(timer);
//! assert_eq!(overlay.state().phase, Phase::Tracking);
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [overlay]
//! offset = 10.0
//! fade_in_delay_ms = 50
//! fade_out_ms = 200
//! transition_ms = 200
//! ```

#![warn(missing_docs)]

mod config;
mod content;
mod driver;
mod error;
mod geometry;
mod tooltip;

pub use config::OverlayConfig;
pub use content::{Measure, TextMetrics, TooltipContent, DEFAULT_TITLE};
pub use driver::{OverlayDriver, OverlayEvent, OverlayHandle};
pub use error::OverlayError;
pub use geometry::{place, Point, Size, Viewport};
pub use tooltip::{Fade, FadeTimer, Generation, Phase, TooltipOverlay, TooltipState};
