//! # Story List Component
//!
//! Selectable list of posts, used by the front page and a user's submissions.
//! Each entry takes two rows:
//!
//! ```text
//!  1. Show HN: Something neat (example.com)
//!     123 points by pg on 4/4/2007, 7:16 PM with 71 comments
//! ```
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `StoryListState` lives in `TuiState`
//! - `StoryList` is created each frame with borrowed state and items

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use crate::api::Item;
use crate::tui::component::Component;
use crate::tui::format::{host, meta_line, truncate};

/// Rows per entry.
const ENTRY_HEIGHT: u16 = 2;

/// Selection for a story list. Must be persisted in the parent TuiState.
#[derive(Debug, Default)]
pub struct StoryListState {
    pub selected: usize,
    pub list_state: ListState,
    /// Entries visible in the last rendered area (for paging)
    pub page_size: usize,
}

impl StoryListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.page_size.max(1));
    }

    pub fn page_down(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + self.page_size.max(1)).min(len - 1);
        }
    }

    /// The selected entry, clamped to `items`.
    pub fn selected_in<'a>(&self, items: &'a [Item]) -> Option<&'a Item> {
        items.get(self.selected.min(items.len().saturating_sub(1)))
    }
}

/// Transient render wrapper for a story list.
pub struct StoryList<'a> {
    state: &'a mut StoryListState,
    items: &'a [Item],
}

impl<'a> StoryList<'a> {
    pub fn new(state: &'a mut StoryListState, items: &'a [Item]) -> Self {
        Self { state, items }
    }

    fn entry(rank: usize, item: &Item, width: usize, selected: bool) -> ListItem<'static> {
        let title = item.title.as_deref().unwrap_or("[untitled]");
        let prefix = format!("{rank:>3}. ");
        let site = item
            .url
            .as_deref()
            .and_then(host)
            .map(|h| format!(" ({h})"))
            .unwrap_or_default();
        let title_width = width.saturating_sub(prefix.len() + site.len());

        let title_style = if selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::White)
        };

        let mut meta = meta_line(item);
        if let Some(score) = item.score {
            meta = format!("{score} points {meta}");
        }

        let title_line = Line::from(vec![
            Span::styled(prefix, Style::default().fg(Color::DarkGray)),
            Span::styled(truncate(title, title_width), title_style),
            Span::styled(site, Style::default().fg(Color::DarkGray)),
        ]);
        let detail = Line::from(Span::styled(
            format!("     {}", truncate(&meta, width.saturating_sub(5))),
            Style::default().fg(Color::DarkGray),
        ));

        ListItem::new(vec![title_line, detail])
    }
}

impl Component for StoryList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.page_size = (area.height / ENTRY_HEIGHT) as usize;

        if self.items.is_empty() {
            self.state.list_state.select(None);
            return;
        }
        self.state.selected = self.state.selected.min(self.items.len() - 1);

        let width = area.width as usize;
        let entries: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| Self::entry(i + 1, item, width, i == self.state.selected))
            .collect();

        self.state.list_state.select(Some(self.state.selected));
        frame.render_stateful_widget(List::new(entries), area, &mut self.state.list_state);
    }
}
