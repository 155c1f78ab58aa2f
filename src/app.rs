//! Terminal front end for the announcement banner
//!
//! Turns terminal events into carousel commands and redraws the banner after
//! every input and every change the carousel reports.

pub mod message;

use std::io;
use std::path::PathBuf;

use crossterm::event::Event;
use futures_util::{Stream, StreamExt};
use ratatui::{
    Terminal,
    backend::Backend,
    layout::{Constraint, Flex, Layout, Position},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub use message::Message;

use crate::announcement::{self, Slide};
use crate::carousel::{Arrow, CarouselHandle, HoverState, SlideChange};
use crate::error::DeckError;
use crate::settings::Settings;
use crate::ui::banner::{self, BannerLayout, HitTarget};

const KEY_HINTS: &str = "←/→ navigate  1-9 jump  r reload  q quit";

pub struct App {
    handle: CarouselHandle,
    hover: HoverState,
    layout: BannerLayout,
    deck_path: Option<PathBuf>,
    /// Widest the banner may grow, in columns
    max_width: u16,
    notice: Option<String>,
    exit: bool,
}

impl App {
    pub fn new(handle: CarouselHandle, settings: &Settings) -> Self {
        Self {
            handle,
            hover: HoverState::new(),
            layout: BannerLayout::default(),
            deck_path: settings.carousel.deck_path.clone(),
            max_width: settings.display.width,
            notice: None,
            exit: false,
        }
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    /// Last error or info line shown under the banner
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub async fn update(&mut self, message: Message) -> anyhow::Result<()> {
        match message {
            Message::Next => {
                self.notice = None;
                self.handle.next()?;
            }
            Message::Previous => {
                self.notice = None;
                self.handle.previous()?;
            }
            Message::GoTo(index) => self.go_to(index).await,
            Message::ReloadDeck => self.reload()?,
            Message::Quit => {
                self.exit = true;
                self.handle.shutdown()?;
            }
            Message::PointerMoved(position) => self.hover_at(position),
            Message::PointerLeft => self.hover.clear(),
            Message::Clicked(position) => match self.layout.hit(position) {
                Some(HitTarget::Arrow(Arrow::Previous)) => self.handle.previous()?,
                Some(HitTarget::Arrow(Arrow::Next)) => self.handle.next()?,
                Some(HitTarget::Dot(index)) => self.go_to(index).await,
                None => {}
            },
            Message::Redraw | Message::SlideChanged(_) => {}
        }
        Ok(())
    }

    async fn go_to(&mut self, index: usize) {
        self.notice = match self.handle.go_to(index).await {
            Ok(_) => None,
            Err(e) => Some(format!("Cannot show announcement {}: {}", index + 1, e)),
        };
    }

    fn reload(&mut self) -> anyhow::Result<()> {
        match self.load_deck() {
            Ok(slides) => {
                self.notice = Some(format!("Loaded {} announcements", slides.len()));
                self.handle.replace_slides(slides)?;
            }
            Err(e) => {
                error!("Deck reload failed: {}", e);
                self.notice = Some(format!("Reload failed: {}", e));
            }
        }
        Ok(())
    }

    fn load_deck(&self) -> Result<Vec<Slide>, DeckError> {
        match &self.deck_path {
            Some(path) => announcement::load_deck(path),
            None => Ok(announcement::default_deck()),
        }
    }

    fn hover_at(&mut self, position: Position) {
        let target = self.layout.hit(position);
        if let Some(dot) = self.hover.hovered_dot() {
            if target != Some(HitTarget::Dot(dot)) {
                self.hover.leave_dot(dot);
            }
        }
        if let Some(HitTarget::Dot(dot)) = target {
            self.hover.enter_dot(dot);
        }
        for arrow in [Arrow::Previous, Arrow::Next] {
            self.hover
                .set_arrow(arrow, target == Some(HitTarget::Arrow(arrow)));
        }
    }

    pub async fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let status = self.handle.status().await?;
        terminal.draw(|frame| {
            let [column] = Layout::horizontal([Constraint::Max(self.max_width)])
                .flex(Flex::Center)
                .areas(frame.area());
            let [banner_area, footer_area] =
                Layout::vertical([Constraint::Min(8), Constraint::Length(1)]).areas(column);
            self.layout = banner::draw(frame, banner_area, &status, &self.hover);

            let footer = match &self.notice {
                Some(notice) => Line::from(Span::styled(
                    notice.as_str(),
                    Style::new().fg(Color::Yellow),
                )),
                None => Line::from(Span::styled(KEY_HINTS, Style::new().fg(Color::DarkGray))),
            };
            frame.render_widget(Paragraph::new(footer), footer_area);
        })?;
        Ok(())
    }

    /// Run until the events end or the user quits. The carousel is shut down
    /// on every exit path.
    pub async fn run<B, S>(
        mut self,
        terminal: &mut Terminal<B>,
        mut events: S,
        mut changes: mpsc::UnboundedReceiver<SlideChange>,
    ) -> anyhow::Result<()>
    where
        B: Backend,
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        let result = self.event_loop(terminal, &mut events, &mut changes).await;
        if !self.exit {
            let _ = self.handle.shutdown();
        }
        info!("Front end stopped");
        result
    }

    async fn event_loop<B, S>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut S,
        changes: &mut mpsc::UnboundedReceiver<SlideChange>,
    ) -> anyhow::Result<()>
    where
        B: Backend,
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        self.draw(terminal).await?;

        loop {
            let message = tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => match Message::from_event(&event) {
                        Some(message) => message,
                        None => continue,
                    },
                    Some(Err(e)) => {
                        warn!("Skipping unreadable terminal event: {}", e);
                        continue;
                    }
                    None => break,
                },
                Some(change) = changes.recv() => Message::SlideChanged(change),
            };

            self.update(message).await?;
            if self.exit {
                break;
            }
            self.draw(terminal).await?;
        }
        Ok(())
    }
}
