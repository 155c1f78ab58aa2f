//! Derived indicators: progress bar fraction, pagination dots and hover flags
//!
//! Hover is tracked as plain booleans owned by the presentation. It never
//! feeds back into the carousel state.

/// `(index + 1) / len` in `(0, 1]`, or 0.0 when there are no slides
pub fn progress_fraction(index: usize, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    (index + 1) as f64 / len as f64
}

pub fn progress_percent(index: usize, len: usize) -> f64 {
    progress_fraction(index, len) * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    Active,
    /// Pointer is over an inactive dot
    Hovered,
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    pub index: usize,
    pub state: DotState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Previous,
    Next,
}

/// Hover flags for the banner's interactive elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverState {
    dot: Option<usize>,
    previous_arrow: bool,
    next_arrow: bool,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_dot(&mut self, index: usize) {
        self.dot = Some(index);
    }

    /// Leaving a dot only clears hover if that dot is the hovered one
    pub fn leave_dot(&mut self, index: usize) {
        if self.dot == Some(index) {
            self.dot = None;
        }
    }

    pub fn hovered_dot(&self) -> Option<usize> {
        self.dot
    }

    pub fn set_arrow(&mut self, arrow: Arrow, hovered: bool) {
        match arrow {
            Arrow::Previous => self.previous_arrow = hovered,
            Arrow::Next => self.next_arrow = hovered,
        }
    }

    pub fn is_arrow_hovered(&self, arrow: Arrow) -> bool {
        match arrow {
            Arrow::Previous => self.previous_arrow,
            Arrow::Next => self.next_arrow,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// One dot per slide. The active dot ignores hover.
pub fn dots(current_index: usize, len: usize, hover: &HoverState) -> Vec<Dot> {
    (0..len)
        .map(|index| {
            let state = if index == current_index {
                DotState::Active
            } else if hover.dot == Some(index) {
                DotState::Hovered
            } else {
                DotState::Idle
            };
            Dot { index, state }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_first_and_last() {
        assert_eq!(progress_fraction(0, 5), 0.2);
        assert_eq!(progress_fraction(4, 5), 1.0);
        assert_eq!(progress_percent(2, 5), 60.0);
        assert_eq!(progress_fraction(0, 0), 0.0);
    }

    #[test]
    fn one_active_dot_per_deck() {
        let dots = dots(3, 5, &HoverState::new());
        assert_eq!(dots.len(), 5);
        let active: Vec<usize> = dots
            .iter()
            .filter(|d| d.state == DotState::Active)
            .map(|d| d.index)
            .collect();
        assert_eq!(active, vec![3]);
    }

    #[test]
    fn hover_does_not_override_active_dot() {
        let mut hover = HoverState::new();
        hover.enter_dot(1);
        assert_eq!(dots(1, 3, &hover)[1].state, DotState::Active);
        assert_eq!(dots(0, 3, &hover)[1].state, DotState::Hovered);
    }

    #[test]
    fn leaving_other_dot_keeps_hover() {
        let mut hover = HoverState::new();
        hover.enter_dot(2);
        hover.leave_dot(1);
        assert_eq!(hover.hovered_dot(), Some(2));
        hover.leave_dot(2);
        assert_eq!(hover.hovered_dot(), None);
    }

    #[test]
    fn arrows_track_independently() {
        let mut hover = HoverState::new();
        hover.set_arrow(Arrow::Next, true);
        assert!(hover.is_arrow_hovered(Arrow::Next));
        assert!(!hover.is_arrow_hovered(Arrow::Previous));
        hover.clear();
        assert!(!hover.is_arrow_hovered(Arrow::Next));
    }

    #[test]
    fn empty_deck_has_no_dots() {
        assert!(dots(0, 0, &HoverState::new()).is_empty());
    }
}
