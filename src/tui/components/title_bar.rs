//! # TitleBar Component
//!
//! Top status bar naming the current screen and its load status.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new("top", "Loading...", spinner_frame);
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"Hews (post 8863) | ⠋ Loading..."`
//! 2. **Default**: `"Hews (post 8863)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar<'a> {
    /// Which screen is showing (e.g. "top", "user pg")
    pub section: &'a str,
    /// Status message, empty when idle
    pub status_message: &'a str,
    /// Spinner frame, `None` when nothing is loading
    pub spinner_frame: Option<usize>,
}

impl<'a> TitleBar<'a> {
    pub fn new(section: &'a str, status_message: &'a str, spinner_frame: Option<usize>) -> Self {
        Self {
            section,
            status_message,
            spinner_frame,
        }
    }

    pub fn text(&self) -> String {
        let mut title = format!("Hews ({})", self.section);
        if !self.status_message.is_empty() {
            title.push_str(" | ");
            if let Some(frame) = self.spinner_frame {
                title.push_str(SPINNER[frame % SPINNER.len()]);
                title.push(' ');
            }
            title.push_str(self.status_message);
        }
        title
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default()
                .fg(Color::Rgb(255, 102, 0))
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
