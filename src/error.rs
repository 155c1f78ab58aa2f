//! Error types shared by the carousel, deck loading and settings

use std::fmt;

/// Errors returned by carousel navigation and construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    /// `go_to` was given an index outside `0..len`
    OutOfRange { index: usize, len: usize },
    /// Navigation was requested on a carousel without slides
    Empty,
    /// Autoplay period of zero
    InvalidPeriod,
    /// The event loop behind a handle has stopped
    Closed,
}

impl fmt::Display for CarouselError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarouselError::OutOfRange { index, len } => {
                write!(f, "slide index {} out of range (0..{})", index, len)
            }
            CarouselError::Empty => write!(f, "carousel has no slides"),
            CarouselError::InvalidPeriod => write!(f, "autoplay period must be greater than zero"),
            CarouselError::Closed => write!(f, "carousel event loop has stopped"),
        }
    }
}

impl std::error::Error for CarouselError {}

/// Errors that can occur while loading an announcement deck
#[derive(Debug, Clone)]
pub enum DeckError {
    Io(String),
    Parse(String),
    /// Two slides share the same id
    DuplicateId(u32),
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::Io(e) => write!(f, "IO error: {}", e),
            DeckError::Parse(e) => write!(f, "Parse error: {}", e),
            DeckError::DuplicateId(id) => write!(f, "duplicate slide id {}", id),
        }
    }
}

impl std::error::Error for DeckError {}

/// Errors that can occur with settings
#[derive(Debug, Clone)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_bounds() {
        let err = CarouselError::OutOfRange { index: 7, len: 5 };
        assert_eq!(err.to_string(), "slide index 7 out of range (0..5)");
    }

    #[test]
    fn deck_duplicate_id_message() {
        assert_eq!(DeckError::DuplicateId(3).to_string(), "duplicate slide id 3");
    }
}
