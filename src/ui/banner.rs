//! Announcement banner widget
//!
//! Draws the current slide with navigation arrows, pagination dots, a
//! progress gauge and the AUTO/MANUAL indicator, and reports where the
//! interactive elements ended up so mouse input can be hit-tested.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph, Wrap},
};

use crate::carousel::CarouselStatus;
use crate::carousel::pagination::{self, Arrow, DotState, HoverState};

/// Columns taken by one dot plus its gap
const DOT_STRIDE: u16 = 2;

/// Interactive element under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Arrow(Arrow),
    Dot(usize),
}

/// Screen areas of the interactive elements from the last draw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerLayout {
    pub previous: Rect,
    pub next: Rect,
    pub dots: Vec<Rect>,
}

impl BannerLayout {
    pub fn hit(&self, position: Position) -> Option<HitTarget> {
        if self.previous.contains(position) {
            return Some(HitTarget::Arrow(Arrow::Previous));
        }
        if self.next.contains(position) {
            return Some(HitTarget::Arrow(Arrow::Next));
        }
        self.dots
            .iter()
            .position(|dot| dot.contains(position))
            .map(HitTarget::Dot)
    }
}

/// Draw the banner into `area`
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    status: &CarouselStatus,
    hover: &HoverState,
) -> BannerLayout {
    let Some(slide) = status.slide.as_ref() else {
        draw_placeholder(frame, area);
        return BannerLayout::default();
    };

    let accent = accent_color(&slide.accent_color);
    let mode_style = if status.auto_playing {
        Style::new().fg(Color::Green)
    } else {
        Style::new().fg(Color::Red)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(accent))
        .title(Line::from(" Announcements ").style(Style::new().add_modifier(Modifier::BOLD)))
        .title(
            Line::from(vec![
                Span::styled("● ", mode_style),
                Span::raw(status.mode_label()),
                Span::raw(format!("  {}/{} ", status.index + 1, status.len)),
            ])
            .right_aligned(),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [heading, subtitle, _, description, nav, gauge] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let mut title = Vec::new();
    if !slide.icon.is_empty() {
        title.push(Span::raw(format!("{}  ", slide.icon)));
    }
    title.push(Span::styled(
        slide.title.as_str(),
        Style::new().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(Line::from(title)), heading);
    frame.render_widget(
        Paragraph::new(slide.subtitle.as_str()).style(Style::new().fg(accent)),
        subtitle,
    );
    frame.render_widget(
        Paragraph::new(slide.description.as_str()).wrap(Wrap { trim: true }),
        description,
    );

    let layout = draw_navigation(frame, nav, status, hover);

    let fraction = status.progress_fraction();
    frame.render_widget(
        LineGauge::default()
            .filled_style(Style::new().fg(accent))
            .unfilled_style(Style::new().fg(Color::DarkGray))
            .ratio(fraction)
            .label(format!("{:>3.0}%", fraction * 100.0)),
        gauge,
    );

    layout
}

fn draw_navigation(
    frame: &mut Frame,
    area: Rect,
    status: &CarouselStatus,
    hover: &HoverState,
) -> BannerLayout {
    let [previous, middle, next] = Layout::horizontal([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    for (arrow, rect) in [(Arrow::Previous, previous), (Arrow::Next, next)] {
        let hovered = hover.is_arrow_hovered(arrow);
        let glyph = match arrow {
            Arrow::Previous => "‹",
            Arrow::Next => "›",
        };
        let style = if hovered {
            Style::new().add_modifier(Modifier::REVERSED)
        } else {
            Style::new()
        };
        frame.render_widget(
            Paragraph::new(glyph).style(style).alignment(Alignment::Center),
            rect,
        );
    }

    let dots = dot_areas(middle, status.len);
    for (dot, rect) in pagination::dots(status.index, status.len, hover)
        .iter()
        .zip(&dots)
    {
        let glyph = match dot.state {
            DotState::Active => "●",
            DotState::Hovered => "◉",
            DotState::Idle => "○",
        };
        frame.render_widget(Paragraph::new(glyph), *rect);
    }

    BannerLayout {
        previous,
        next,
        dots,
    }
}

/// One cell per dot, centred in `area`. Dots that do not fit are dropped.
fn dot_areas(area: Rect, len: usize) -> Vec<Rect> {
    if len == 0 {
        return Vec::new();
    }
    let needed = (len as u16).saturating_mul(DOT_STRIDE) - 1;
    let start = area.x + area.width.saturating_sub(needed) / 2;
    (0..len as u16)
        .map(|i| start + i * DOT_STRIDE)
        .take_while(|&x| x < area.right())
        .map(|x| Rect::new(x, area.y, 1, 1))
        .collect()
}

fn draw_placeholder(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Civic Grievance Portal ");
    frame.render_widget(
        Paragraph::new("No announcements right now")
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

/// `#RRGGBB` or a colour name, falling back to yellow
fn accent_color(value: &str) -> Color {
    value.parse().unwrap_or(Color::Yellow)
}
