//! Event loop and command handle
//!
//! [`run`] owns the controller and serializes user commands with autoplay
//! ticks. Commands are polled first, so a navigation that arrives together
//! with a tick always wins and the tick is discarded with the dropped timer.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::controller::SlideshowController;
use super::pagination;
use super::state::SlideChange;
use crate::announcement::Slide;
use crate::error::CarouselError;

/// Messages accepted by the event loop
#[derive(Debug)]
pub enum Command {
    Next,
    Previous,
    GoTo {
        index: usize,
        reply: oneshot::Sender<Result<SlideChange, CarouselError>>,
    },
    ReplaceSlides(Vec<Slide>),
    Status(oneshot::Sender<CarouselStatus>),
    Shutdown,
}

/// Read-only snapshot of the carousel
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselStatus {
    pub index: usize,
    pub len: usize,
    pub auto_playing: bool,
    pub slide: Option<Slide>,
}

impl CarouselStatus {
    pub fn from_controller(controller: &SlideshowController) -> Self {
        Self {
            index: controller.current_index(),
            len: controller.slides().len(),
            auto_playing: controller.is_auto_playing(),
            slide: controller.current_slide().cloned(),
        }
    }

    pub fn progress_fraction(&self) -> f64 {
        pagination::progress_fraction(self.index, self.len)
    }

    pub fn mode_label(&self) -> &'static str {
        if self.auto_playing { "AUTO" } else { "MANUAL" }
    }
}

/// Cloneable sender side of the event loop
#[derive(Debug, Clone)]
pub struct CarouselHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl CarouselHandle {
    pub fn next(&self) -> Result<(), CarouselError> {
        self.send(Command::Next)
    }

    pub fn previous(&self) -> Result<(), CarouselError> {
        self.send(Command::Previous)
    }

    pub async fn go_to(&self, index: usize) -> Result<SlideChange, CarouselError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::GoTo { index, reply })?;
        rx.await.map_err(|_| CarouselError::Closed)?
    }

    pub fn replace_slides(&self, slides: Vec<Slide>) -> Result<(), CarouselError> {
        self.send(Command::ReplaceSlides(slides))
    }

    pub async fn status(&self) -> Result<CarouselStatus, CarouselError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Status(reply))?;
        rx.await.map_err(|_| CarouselError::Closed)
    }

    pub fn shutdown(&self) -> Result<(), CarouselError> {
        self.send(Command::Shutdown)
    }

    fn send(&self, command: Command) -> Result<(), CarouselError> {
        self.tx.send(command).map_err(|_| CarouselError::Closed)
    }
}

pub fn channel() -> (CarouselHandle, mpsc::UnboundedReceiver<Command>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CarouselHandle { tx }, rx)
}

/// Move the controller onto its own task
pub fn spawn(controller: SlideshowController) -> (CarouselHandle, JoinHandle<()>) {
    let (handle, commands) = channel();
    let task = tokio::spawn(run(controller, commands));
    (handle, task)
}

/// Drive the controller until `Shutdown` or until every handle is dropped.
/// The controller, and with it the autoplay timer, is dropped on return.
pub async fn run(
    mut controller: SlideshowController,
    mut commands: mpsc::UnboundedReceiver<Command>,
) {
    info!("Carousel event loop started");
    loop {
        tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(Command::Shutdown) | None => break,
                Some(command) => execute(&mut controller, command),
            },
            _ = controller.autoplay_tick() => {}
        }
    }
    info!("Carousel event loop stopped");
}

fn execute(controller: &mut SlideshowController, command: Command) {
    match command {
        Command::Next => {
            controller.next();
        }
        Command::Previous => {
            controller.previous();
        }
        Command::GoTo { index, reply } => {
            let result = controller.go_to(index);
            if let Err(e) = &result {
                warn!("Rejected go_to({}): {}", index, e);
            }
            let _ = reply.send(result);
        }
        Command::ReplaceSlides(slides) => {
            controller.replace_slides(slides);
        }
        Command::Status(reply) => {
            let _ = reply.send(CarouselStatus::from_controller(controller));
        }
        Command::Shutdown => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcement::default_deck;
    use crate::carousel::controller::CarouselConfig;
    use crate::carousel::state::GoToPolicy;
    use std::time::Duration;
    use tokio::time::sleep;

    fn spawn_default() -> (CarouselHandle, JoinHandle<()>) {
        let controller = SlideshowController::new(
            default_deck(),
            CarouselConfig {
                autoplay_period: Duration::from_secs(5),
                go_to_policy: GoToPolicy::Reject,
            },
        )
        .unwrap();
        spawn(controller)
    }

    #[tokio::test(start_paused = true)]
    async fn loop_autoplays_on_period() {
        let (handle, _task) = spawn_default();

        sleep(Duration::from_millis(5_100)).await;
        let status = handle.status().await.unwrap();
        assert_eq!(status.index, 1);
        assert!(status.auto_playing);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(handle.status().await.unwrap().index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_command_stops_autoplay() {
        let (handle, _task) = spawn_default();

        sleep(Duration::from_millis(4_900)).await;
        handle.next().unwrap();
        sleep(Duration::from_secs(60)).await;

        let status = handle.status().await.unwrap();
        assert_eq!(status.index, 1);
        assert!(!status.auto_playing);
        assert_eq!(status.mode_label(), "MANUAL");
        assert_eq!(status.slide.map(|s| s.id), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn go_to_through_handle() {
        let (handle, _task) = spawn_default();

        let change = handle.go_to(2).await.unwrap();
        assert_eq!(change.index, 2);
        assert_eq!(handle.status().await.unwrap().progress_fraction(), 3.0 / 5.0);

        let err = handle.go_to(7).await.unwrap_err();
        assert_eq!(err, CarouselError::OutOfRange { index: 7, len: 5 });
        assert_eq!(handle.status().await.unwrap().index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn previous_through_handle_wraps() {
        let (handle, _task) = spawn_default();
        handle.previous().unwrap();
        assert_eq!(handle.status().await.unwrap().index, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn replace_slides_through_handle() {
        let (handle, _task) = spawn_default();
        handle.next().unwrap();
        handle.replace_slides(default_deck()[..2].to_vec()).unwrap();

        let status = handle.status().await.unwrap();
        assert_eq!(status.index, 0);
        assert_eq!(status.len, 2);
        assert_eq!(status.progress_fraction(), 0.5);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_ends_loop() {
        let (handle, task) = spawn_default();
        handle.shutdown().unwrap();
        task.await.unwrap();
        assert_eq!(handle.next(), Err(CarouselError::Closed));
        assert_eq!(handle.status().await, Err(CarouselError::Closed));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handles_ends_loop() {
        let (handle, task) = spawn_default();
        let clone = handle.clone();
        drop(handle);
        drop(clone);
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn empty_deck_loop_stays_idle() {
        let controller = SlideshowController::new(Vec::new(), CarouselConfig::default()).unwrap();
        let (handle, _task) = spawn(controller);

        sleep(Duration::from_secs(30)).await;
        let status = handle.status().await.unwrap();
        assert_eq!(status.index, 0);
        assert!(status.slide.is_none());
        assert_eq!(handle.go_to(0).await, Err(CarouselError::Empty));
    }
}
