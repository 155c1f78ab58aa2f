//! Index and autoplay state of the carousel
//!
//! Pure transitions with no timer attached. The controller owns one of these
//! and decides when the timer has to be dropped.

use crate::error::CarouselError;

/// Which way the visible slide moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    /// Direct jump via `go_to` or a deck reload
    Jump,
}

/// What triggered a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Autoplay,
    Next,
    Previous,
    GoTo,
    Reload,
}

/// Snapshot of a transition, taken after it was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub index: usize,
    pub previous: usize,
    pub direction: Direction,
    pub auto_playing: bool,
    pub cause: ChangeCause,
}

/// How `go_to` treats an index outside the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoToPolicy {
    /// Return `OutOfRange` and leave the state alone
    Reject,
    /// Snap to the last slide
    Clamp,
    /// `Reject` in debug builds, `Clamp` in release builds
    #[default]
    Auto,
}

impl GoToPolicy {
    /// Resolve `Auto` against the current build profile
    pub fn effective(self) -> GoToPolicy {
        match self {
            GoToPolicy::Auto if cfg!(debug_assertions) => GoToPolicy::Reject,
            GoToPolicy::Auto => GoToPolicy::Clamp,
            other => other,
        }
    }
}

/// `current_index` is always `< len` unless `len == 0`, in which case it is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    current_index: usize,
    auto_playing: bool,
    len: usize,
}

impl CarouselState {
    pub fn new(len: usize) -> Self {
        Self {
            current_index: 0,
            auto_playing: true,
            len,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_playing
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Label shown by the autoplay indicator
    pub fn mode_label(&self) -> &'static str {
        if self.auto_playing { "AUTO" } else { "MANUAL" }
    }

    /// `(current_index + 1) / len`, or 0.0 for an empty deck
    pub fn progress_fraction(&self) -> f64 {
        super::pagination::progress_fraction(self.current_index, self.len)
    }

    /// Timer-driven step. Keeps the autoplay flag and refuses to run in MANUAL.
    pub fn advance(&mut self) -> Option<SlideChange> {
        if self.len == 0 || !self.auto_playing {
            return None;
        }
        let previous = self.current_index;
        self.current_index = (self.current_index + 1) % self.len;
        Some(self.change(previous, Direction::Forward, ChangeCause::Autoplay))
    }

    pub fn next(&mut self) -> Option<SlideChange> {
        if self.len == 0 {
            return None;
        }
        let previous = self.current_index;
        self.current_index = (self.current_index + 1) % self.len;
        self.auto_playing = false;
        Some(self.change(previous, Direction::Forward, ChangeCause::Next))
    }

    pub fn previous(&mut self) -> Option<SlideChange> {
        if self.len == 0 {
            return None;
        }
        let previous = self.current_index;
        self.current_index = (self.current_index + self.len - 1) % self.len;
        self.auto_playing = false;
        Some(self.change(previous, Direction::Backward, ChangeCause::Previous))
    }

    pub fn go_to(
        &mut self,
        index: usize,
        policy: GoToPolicy,
    ) -> Result<SlideChange, CarouselError> {
        if self.len == 0 {
            return Err(CarouselError::Empty);
        }
        let target = if index < self.len {
            index
        } else {
            match policy.effective() {
                GoToPolicy::Clamp => {
                    tracing::warn!(index, len = self.len, "go_to index clamped to last slide");
                    self.len - 1
                }
                _ => {
                    return Err(CarouselError::OutOfRange {
                        index,
                        len: self.len,
                    });
                }
            }
        };

        let previous = self.current_index;
        self.current_index = target;
        self.auto_playing = false;
        Ok(self.change(previous, Direction::Jump, ChangeCause::GoTo))
    }

    /// Swap in a deck of `len` slides. The autoplay flag survives a reload.
    pub fn reload(&mut self, len: usize) -> SlideChange {
        let previous = self.current_index;
        self.len = len;
        self.current_index = 0;
        self.change(previous, Direction::Jump, ChangeCause::Reload)
    }

    fn change(&self, previous: usize, direction: Direction, cause: ChangeCause) -> SlideChange {
        SlideChange {
            index: self.current_index,
            previous,
            direction,
            auto_playing: self.auto_playing,
            cause,
        }
    }
}
