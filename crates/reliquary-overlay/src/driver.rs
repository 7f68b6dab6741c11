//! Event dispatcher running the tooltip on a single task

use crate::config::OverlayConfig;
use crate::content::Measure;
use crate::error::OverlayError;
use crate::geometry::{Point, Viewport};
use crate::tooltip::{FadeTimer, TooltipOverlay, TooltipState};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// Input to the overlay dispatcher
#[derive(Debug, Clone)]
pub enum OverlayEvent<C> {
    /// Pointer or focus entered an element carrying `content`
    Enter {
        /// Content to show
        content: C,
        /// Pointer position
        anchor: Point,
    },
    /// Pointer moved over the element
    Move(Point),
    /// Pointer or focus left the element
    Leave,
    /// The viewport changed size
    Resize(Viewport),
    /// A fade timer fired
    FadeElapsed(FadeTimer),
}

/// Cloneable sender used by view code to feed the dispatcher
#[derive(Debug)]
pub struct OverlayHandle<C> {
    tx: mpsc::UnboundedSender<OverlayEvent<C>>,
}

impl<C> Clone for OverlayHandle<C> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<C> OverlayHandle<C> {
    /// Send a raw event
    pub fn send(&self, event: OverlayEvent<C>) -> Result<(), OverlayError> {
        self.tx.send(event).map_err(|_| OverlayError::Closed)
    }

    /// Show `content` at `anchor`
    pub fn enter(&self, content: C, anchor: Point) -> Result<(), OverlayError> {
        self.send(OverlayEvent::Enter { content, anchor })
    }

    /// Follow the pointer
    pub fn move_to(&self, anchor: Point) -> Result<(), OverlayError> {
        self.send(OverlayEvent::Move(anchor))
    }

    /// Start hiding
    pub fn leave(&self) -> Result<(), OverlayError> {
        self.send(OverlayEvent::Leave)
    }

    /// Report a new viewport size
    pub fn resize(&self, viewport: Viewport) -> Result<(), OverlayError> {
        self.send(OverlayEvent::Resize(viewport))
    }
}

/// Single-task dispatcher owning the tooltip
///
/// Events are applied one at a time, each to completion. Fade timers are
/// spawned sleeps that post [`OverlayEvent::FadeElapsed`] back into the same
/// queue, so the generation check in [`TooltipOverlay::fade_elapsed`] decides
/// whether a late timer still applies. Every state change is published on a
/// `watch` channel.
///
/// The dispatcher stops once all handles are dropped and no timer is pending.
///
/// # Examples
///
/// ```no_run
/// use reliquary_overlay::{OverlayConfig, OverlayDriver, Point, Size};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let (driver, handle, mut state) =
///         OverlayDriver::<Size>::new(OverlayConfig::default(), Size::new(800.0, 600.0));
///     let task = tokio::spawn(driver.run());
///
///     handle.enter(Size::new(120.0, 40.0), Point::new(10.0, 10.0)).unwrap();
///     state.changed().await.unwrap();
///     println!("{:?}", state.borrow().position);
///
///     drop(handle);
///     task.await.unwrap();
/// }
/// ```
pub struct OverlayDriver<C> {
    overlay: TooltipOverlay<C>,
    timer_tx: mpsc::WeakUnboundedSender<OverlayEvent<C>>,
    rx: mpsc::UnboundedReceiver<OverlayEvent<C>>,
    state_tx: watch::Sender<TooltipState<C>>,
}

impl<C> OverlayDriver<C>
where
    C: Measure + Clone + Send + Sync + 'static,
{
    /// Create a dispatcher, its input handle and a state subscription
    pub fn new(
        config: OverlayConfig,
        viewport: Viewport,
    ) -> (Self, OverlayHandle<C>, watch::Receiver<TooltipState<C>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(TooltipState::default());

        let driver = Self {
            overlay: TooltipOverlay::new(config, viewport),
            timer_tx: tx.downgrade(),
            rx,
            state_tx,
        };

        (driver, OverlayHandle { tx }, state_rx)
    }

    /// Process events until every handle is dropped
    pub async fn run(mut self) {
        info!("Overlay dispatcher started");
        while let Some(event) = self.rx.recv().await {
            self.dispatch(event);
        }
        info!("Overlay dispatcher stopped");
    }

    /// Apply one event and publish the resulting state
    pub fn dispatch(&mut self, event: OverlayEvent<C>) {
        let changed = match event {
            OverlayEvent::Enter { content, anchor } => {
                let timer = self.overlay.show(content, anchor);
                self.schedule(timer);
                true
            }
            OverlayEvent::Move(anchor) => self.overlay.pointer_moved(anchor),
            OverlayEvent::Leave => match self.overlay.leave() {
                Some(timer) => {
                    self.schedule(timer);
                    true
                }
                None => false,
            },
            OverlayEvent::Resize(viewport) => {
                self.overlay.resize(viewport);
                true
            }
            OverlayEvent::FadeElapsed(timer) => self.overlay.fade_elapsed(timer),
        };

        if changed {
            self.state_tx.send_replace(self.overlay.state().clone());
        }
    }

    /// The tooltip being driven
    pub fn overlay(&self) -> &TooltipOverlay<C> {
        &self.overlay
    }

    fn schedule(&self, timer: FadeTimer) {
        // No live handle means nobody is left to observe the fade
        let Some(tx) = self.timer_tx.upgrade() else {
            debug!("Dropping {:?} timer, no handles left", timer.fade);
            return;
        };

        tokio::spawn(async move {
            tokio::time::sleep(timer.delay).await;
            // The dispatcher may already be gone
            let _ = tx.send(OverlayEvent::FadeElapsed(timer));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::tooltip::Phase;
    use std::time::Duration;
    use tokio::time::sleep;

    fn start() -> (
        tokio::task::JoinHandle<()>,
        OverlayHandle<Size>,
        watch::Receiver<TooltipState<Size>>,
    ) {
        let (driver, handle, state) =
            OverlayDriver::new(OverlayConfig::default(), Size::new(800.0, 600.0));
        (tokio::spawn(driver.run()), handle, state)
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_fades_in_then_leave_clears() {
        let (task, handle, state) = start();

        handle.enter(Size::new(100.0, 40.0), Point::new(300.0, 200.0)).unwrap();
        sleep(Duration::from_millis(10)).await;
        {
            let s = state.borrow();
            assert_eq!(s.phase, Phase::Appearing);
            assert_eq!(s.opacity, 0.0);
            assert_eq!(s.position, Point::new(300.0, 210.0));
        }

        sleep(Duration::from_millis(50)).await;
        assert_eq!(state.borrow().phase, Phase::Tracking);
        assert_eq!(state.borrow().opacity, 1.0);

        handle.move_to(Point::new(750.0, 100.0)).unwrap();
        sleep(Duration::from_millis(1)).await;
        assert_eq!(state.borrow().position.x, 750.0 - 100.0 - 10.0);

        handle.leave().unwrap();
        sleep(Duration::from_millis(100)).await;
        assert_eq!(state.borrow().phase, Phase::Disappearing);
        assert!(state.borrow().content.is_some());

        sleep(Duration::from_millis(150)).await;
        assert_eq!(state.borrow().phase, Phase::Hidden);
        assert!(state.borrow().content.is_none());
        assert!(!state.borrow().visible);

        drop(handle);
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reenter_survives_stale_fade_out() {
        let (task, handle, state) = start();

        handle.enter(Size::new(100.0, 40.0), Point::new(100.0, 100.0)).unwrap();
        sleep(Duration::from_millis(60)).await;
        handle.leave().unwrap();

        // Fade-out would land at +200ms; re-enter before that
        sleep(Duration::from_millis(100)).await;
        handle.enter(Size::new(50.0, 20.0), Point::new(400.0, 300.0)).unwrap();

        sleep(Duration::from_millis(200)).await;
        let s = state.borrow().clone();
        assert_eq!(s.phase, Phase::Tracking);
        assert_eq!(s.content, Some(Size::new(50.0, 20.0)));
        assert_eq!(s.opacity, 1.0);
        assert!(s.visible);

        drop(handle);
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_repositions() {
        let (task, handle, state) = start();

        handle.enter(Size::new(100.0, 40.0), Point::new(300.0, 200.0)).unwrap();
        handle.resize(Size::new(350.0, 600.0)).unwrap();
        sleep(Duration::from_millis(1)).await;
        assert_eq!(state.borrow().position.x, 190.0);

        drop(handle);
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_returns_when_handles_dropped() {
        let (task, handle, _state) = start();
        let other = handle.clone();
        drop(handle);
        other.leave().unwrap();
        drop(other);

        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("dispatcher should stop")
            .unwrap();
    }

    #[tokio::test]
    async fn test_send_after_driver_dropped_is_closed() {
        let (driver, handle, _state) =
            OverlayDriver::<Size>::new(OverlayConfig::default(), Size::new(800.0, 600.0));
        drop(driver);

        assert!(matches!(handle.leave(), Err(OverlayError::Closed)));
    }
}
