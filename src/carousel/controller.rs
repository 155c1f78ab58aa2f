//! Slideshow controller
//!
//! Owns the slides, the [`CarouselState`] and the autoplay timer, and keeps
//! the three consistent: a timer is only ever armed while the carousel is in
//! AUTO mode and has at least one slide. It is armed the first time someone
//! waits for a tick, so building a controller needs no runtime.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info};

use super::autoplay::{AutoplayTimer, DEFAULT_AUTOPLAY_PERIOD};
use super::pagination;
use super::state::{CarouselState, GoToPolicy, SlideChange};
use crate::announcement::Slide;
use crate::error::CarouselError;

/// Callback invoked after every state change
pub type SlideListener = Box<dyn FnMut(&SlideChange) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    pub autoplay_period: Duration,
    pub go_to_policy: GoToPolicy,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_period: DEFAULT_AUTOPLAY_PERIOD,
            go_to_policy: GoToPolicy::Auto,
        }
    }
}

pub struct SlideshowController {
    slides: Vec<Slide>,
    state: CarouselState,
    config: CarouselConfig,
    timer: Option<AutoplayTimer>,
    listeners: Vec<SlideListener>,
}

impl SlideshowController {
    /// Create a controller in AUTO mode at the first slide
    pub fn new(slides: Vec<Slide>, config: CarouselConfig) -> Result<Self, CarouselError> {
        if config.autoplay_period.is_zero() {
            return Err(CarouselError::InvalidPeriod);
        }

        let controller = Self {
            state: CarouselState::new(slides.len()),
            slides,
            config,
            timer: None,
            listeners: Vec::new(),
        };
        info!(
            slides = controller.slides.len(),
            period_ms = config.autoplay_period.as_millis() as u64,
            "Carousel created"
        );
        Ok(controller)
    }

    /// Register a listener for state changes
    pub fn on_slide_change(&mut self, listener: impl FnMut(&SlideChange) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn next(&mut self) -> Option<SlideChange> {
        let change = self.state.next()?;
        Some(self.commit(change))
    }

    pub fn previous(&mut self) -> Option<SlideChange> {
        let change = self.state.previous()?;
        Some(self.commit(change))
    }

    pub fn go_to(&mut self, index: usize) -> Result<SlideChange, CarouselError> {
        let change = self.state.go_to(index, self.config.go_to_policy)?;
        Ok(self.commit(change))
    }

    /// Swap the deck. The index goes back to 0 and a running autoplay gets a
    /// fresh timer.
    pub fn replace_slides(&mut self, slides: Vec<Slide>) -> SlideChange {
        self.timer = None;
        self.slides = slides;
        let change = self.state.reload(self.slides.len());
        info!(slides = self.slides.len(), "Carousel deck replaced");
        self.commit(change)
    }

    /// Wait for the autoplay timer and advance one slide.
    ///
    /// The first call arms the timer, so the first tick lands one period
    /// later. Never resolves in MANUAL mode or with an empty deck. Cancel
    /// safe, so it can sit in a `select!` next to user input.
    pub async fn autoplay_tick(&mut self) -> SlideChange {
        loop {
            if self.wants_timer() && self.timer.is_none() {
                self.timer = Some(AutoplayTimer::start(self.config.autoplay_period));
            }
            match self.timer.as_mut() {
                Some(timer) => timer.tick().await,
                None => std::future::pending::<()>().await,
            }
            if let Some(change) = self.advance() {
                return change;
            }
        }
    }

    fn advance(&mut self) -> Option<SlideChange> {
        let change = self.state.advance()?;
        Some(self.commit(change))
    }

    fn commit(&mut self, change: SlideChange) -> SlideChange {
        self.sync_timer();
        debug!(
            index = change.index,
            previous = change.previous,
            cause = ?change.cause,
            mode = self.state.mode_label(),
            "Slide changed"
        );
        for listener in &mut self.listeners {
            listener(&change);
        }
        change
    }

    fn wants_timer(&self) -> bool {
        self.state.is_auto_playing() && !self.state.is_empty()
    }

    /// Drop the timer once it is no longer wanted
    fn sync_timer(&mut self) {
        if !self.wants_timer() {
            self.timer = None;
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.state.current_index())
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    pub fn is_auto_playing(&self) -> bool {
        self.state.is_auto_playing()
    }

    pub fn progress_fraction(&self) -> f64 {
        self.state.progress_fraction()
    }

    pub fn progress_percent(&self) -> f64 {
        pagination::progress_percent(self.state.current_index(), self.state.len())
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Whether an autoplay timer is currently armed
    pub fn timer_active(&self) -> bool {
        self.timer.is_some()
    }
}

impl fmt::Debug for SlideshowController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlideshowController")
            .field("slides", &self.slides.len())
            .field("state", &self.state)
            .field("timer_active", &self.timer.is_some())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Drop for SlideshowController {
    fn drop(&mut self) {
        debug!("Carousel disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcement::default_deck;
    use crate::carousel::state::ChangeCause;
    use std::sync::{Arc, Mutex};
    use tokio::time::timeout;

    const PERIOD: Duration = Duration::from_secs(5);

    fn controller(slides: Vec<Slide>, policy: GoToPolicy) -> SlideshowController {
        SlideshowController::new(
            slides,
            CarouselConfig {
                autoplay_period: PERIOD,
                go_to_policy: policy,
            },
        )
        .unwrap()
    }

    fn recorded(c: &mut SlideshowController) -> Arc<Mutex<Vec<SlideChange>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        c.on_slide_change(move |change| sink.lock().unwrap().push(*change));
        log
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_then_manual_scenario() {
        let mut c = controller(default_deck(), GoToPolicy::Reject);
        assert!(!c.timer_active());

        let change = c.autoplay_tick().await;
        assert_eq!(change.index, 1);
        assert_eq!(change.cause, ChangeCause::Autoplay);
        assert!(c.is_auto_playing());
        assert!(c.timer_active());

        c.next();
        assert_eq!(c.current_index(), 2);
        assert!(!c.is_auto_playing());
        assert!(!c.timer_active());
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_wraps_after_full_cycle() {
        let mut c = controller(default_deck(), GoToPolicy::Reject);
        let start = tokio::time::Instant::now();
        for _ in 0..5 {
            c.autoplay_tick().await;
        }
        assert_eq!(c.current_index(), 0);
        assert_eq!(start.elapsed(), PERIOD * 5);
        assert!(c.is_auto_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn manual_navigation_freezes_index() {
        let mut c = controller(default_deck(), GoToPolicy::Reject);
        tokio::time::advance(Duration::from_secs(3)).await;
        c.previous();
        assert_eq!(c.current_index(), 4);

        let frozen = timeout(Duration::from_secs(600), c.autoplay_tick()).await;
        assert!(frozen.is_err());
        assert_eq!(c.current_index(), 4);
        assert!(!c.is_auto_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn go_to_out_of_range_keeps_autoplay() {
        let mut c = controller(default_deck(), GoToPolicy::Reject);
        let log = recorded(&mut c);

        let err = c.go_to(7).unwrap_err();
        assert_eq!(err, CarouselError::OutOfRange { index: 7, len: 5 });
        assert_eq!(c.current_index(), 0);
        assert!(c.is_auto_playing());
        assert!(log.lock().unwrap().is_empty());

        let change = c.autoplay_tick().await;
        assert_eq!(change.index, 1);
        assert_eq!(change.cause, ChangeCause::Autoplay);
    }

    #[tokio::test(start_paused = true)]
    async fn go_to_clamp_policy_lands_on_last() {
        let mut c = controller(default_deck(), GoToPolicy::Clamp);
        let change = c.go_to(7).unwrap();
        assert_eq!(change.index, 4);
        assert_eq!(c.progress_fraction(), 1.0);
        assert!(!c.timer_active());
    }

    #[tokio::test(start_paused = true)]
    async fn go_to_reports_progress() {
        let mut c = controller(default_deck(), GoToPolicy::Reject);
        c.go_to(2).unwrap();
        assert_eq!(c.current_slide().map(|s| s.id), Some(3));
        assert_eq!(c.progress_fraction(), 3.0 / 5.0);
        assert_eq!(c.progress_percent(), 60.0);
    }

    #[tokio::test(start_paused = true)]
    async fn listener_sees_state_after_transition() {
        let mut c = controller(default_deck(), GoToPolicy::Reject);
        let log = recorded(&mut c);

        c.autoplay_tick().await;
        c.next();
        c.go_to(0).unwrap();

        let log = log.lock().unwrap();
        let seen: Vec<(usize, bool)> = log.iter().map(|c| (c.index, c.auto_playing)).collect();
        assert_eq!(seen, vec![(1, true), (2, false), (0, false)]);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_deck_never_arms_timer() {
        let mut c = controller(Vec::new(), GoToPolicy::Reject);
        assert!(!c.timer_active());
        assert!(c.current_slide().is_none());
        assert!(c.next().is_none());
        assert!(c.previous().is_none());
        assert_eq!(c.go_to(0), Err(CarouselError::Empty));
        assert!(c.is_auto_playing());
        assert_eq!(c.progress_fraction(), 0.0);

        let tick = timeout(Duration::from_secs(60), c.autoplay_tick()).await;
        assert!(tick.is_err());
    }

    #[test]
    fn construction_needs_no_runtime() {
        let mut c = controller(default_deck(), GoToPolicy::Reject);
        assert!(!c.timer_active());
        assert!(c.is_auto_playing());

        c.next();
        assert_eq!(c.current_index(), 1);
        assert!(!c.timer_active());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_is_rejected() {
        let result = SlideshowController::new(
            default_deck(),
            CarouselConfig {
                autoplay_period: Duration::ZERO,
                go_to_policy: GoToPolicy::Reject,
            },
        );
        assert!(matches!(result, Err(CarouselError::InvalidPeriod)));
    }

    #[tokio::test(start_paused = true)]
    async fn replace_slides_restarts_timer_from_empty() {
        let mut c = controller(Vec::new(), GoToPolicy::Reject);
        let start = tokio::time::Instant::now();
        tokio::time::advance(Duration::from_secs(2)).await;

        let change = c.replace_slides(default_deck());
        assert_eq!(change.cause, ChangeCause::Reload);
        assert!(change.auto_playing);

        let change = c.autoplay_tick().await;
        assert_eq!(change.index, 1);
        assert_eq!(start.elapsed(), Duration::from_secs(2) + PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn replace_slides_with_empty_cancels_timer() {
        let mut c = controller(default_deck(), GoToPolicy::Reject);
        c.replace_slides(Vec::new());
        assert!(!c.timer_active());
        assert!(c.current_slide().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn replace_slides_in_manual_stays_manual() {
        let mut c = controller(default_deck(), GoToPolicy::Reject);
        c.next();
        let change = c.replace_slides(default_deck());
        assert_eq!(change.index, 0);
        assert!(!change.auto_playing);
        assert!(!c.timer_active());
    }
}
