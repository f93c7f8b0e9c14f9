//! # Loading Indicator
//!
//! One line of dimmed text with animated trailing dots, e.g.
//! `Fetching comments..`. The caller passes the animation frame so the
//! component itself stays stateless.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const FRAMES_PER_DOT: usize = 3;

pub struct Loading<'a> {
    pub label: &'a str,
    pub frame_index: usize,
}

impl<'a> Loading<'a> {
    pub fn new(label: &'a str, frame_index: usize) -> Self {
        Self { label, frame_index }
    }

    /// The indicator as a line, for embedding in a larger paragraph.
    pub fn line(&self) -> Line<'static> {
        let dots = (self.frame_index / FRAMES_PER_DOT) % 4;
        Line::from(Span::styled(
            format!("{}{:<3}", self.label, ".".repeat(dots)),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    }
}

impl Component for Loading<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.line()), area);
    }
}
