//! Rotating announcement carousel
//!
//! Timed auto-advance with manual override. The carousel renders nothing;
//! presentations subscribe to [`SlideChange`]s or query a [`CarouselStatus`].

pub mod autoplay;
pub mod controller;
pub mod handle;
pub mod pagination;
pub mod state;

pub use autoplay::{AutoplayTimer, DEFAULT_AUTOPLAY_PERIOD};
pub use controller::{CarouselConfig, SlideListener, SlideshowController};
pub use handle::{CarouselHandle, CarouselStatus, Command, run, spawn};
pub use pagination::{Arrow, Dot, DotState, HoverState};
pub use state::{CarouselState, ChangeCause, Direction, GoToPolicy, SlideChange};
