//! Civic Banner - rotating announcement carousel for a civic grievance portal
//!
//! The [`carousel`] module holds the controller: timed auto-advance, manual
//! override and the derived progress indicator. [`ui`] and [`app`] are a
//! small terminal front end on top of it.

pub mod announcement;
pub mod app;
pub mod carousel;
pub mod error;
pub mod settings;
pub mod ui;

pub use announcement::Slide;
pub use carousel::{CarouselConfig, CarouselHandle, SlideChange, SlideshowController};
pub use error::CarouselError;
