//! # Post View Component
//!
//! A post and its top-level comments, revealed in stages:
//!
//! 1. post loading: only `Fetching post`
//! 2. post loaded, comments loading: header, body, then `Fetching comments`
//! 3. both loaded: header, body, then every comment
//!
//! Content is pre-wrapped with `textwrap` so the scroll view knows its exact
//! height before anything is drawn.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::Item;
use crate::core::phase::Phase;
use crate::tui::component::Component;
use crate::tui::components::loading::Loading;
use crate::tui::format::{format_date, html_to_text, meta_line, wrap_lines};

const COMMENT_INDENT: &str = "  ";

pub struct PostView<'a> {
    scroll: &'a mut ScrollViewState,
    post: &'a Phase<Item>,
    comments: &'a Phase<Vec<Item>>,
    frame_index: usize,
}

impl<'a> PostView<'a> {
    pub fn new(
        scroll: &'a mut ScrollViewState,
        post: &'a Phase<Item>,
        comments: &'a Phase<Vec<Item>>,
        frame_index: usize,
    ) -> Self {
        Self {
            scroll,
            post,
            comments,
            frame_index,
        }
    }
}

/// Everything below the loading stage, wrapped to `width`.
pub fn post_lines(
    post: &Item,
    comments: &Phase<Vec<Item>>,
    width: u16,
    frame_index: usize,
) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines: Vec<Line<'static>> = Vec::new();

    let title = post.title.as_deref().unwrap_or("[untitled]");
    let title_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    lines.extend(
        wrap_lines(title, width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, title_style))),
    );
    if let Some(link) = &post.url {
        lines.push(Line::from(Span::styled(link.clone(), Style::default().fg(Color::Blue))));
    }
    lines.extend(
        wrap_lines(&meta_line(post), width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, dim))),
    );

    if let Some(body) = &post.text {
        lines.push(Line::default());
        lines.extend(wrap_lines(&html_to_text(body), width).into_iter().map(Line::from));
    }
    lines.push(Line::default());

    match comments {
        Phase::Loading => lines.push(Loading::new("Fetching comments", frame_index).line()),
        Phase::Loaded(comments) if comments.is_empty() => {
            lines.push(Line::from(Span::styled("No comments yet", dim)));
        }
        Phase::Loaded(comments) => {
            lines.push(Line::from(Span::styled(
                format!("Comments ({})", comments.len()),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::default());
            let body_width = width.saturating_sub(COMMENT_INDENT.len() as u16);
            for comment in comments {
                lines.push(comment_header(comment));
                let body = comment.text.as_deref().map(html_to_text).unwrap_or_default();
                lines.extend(
                    wrap_lines(&body, body_width)
                        .into_iter()
                        .map(|l| Line::from(format!("{COMMENT_INDENT}{l}"))),
                );
                lines.push(Line::default());
            }
        }
    }

    lines
}

fn comment_header(comment: &Item) -> Line<'static> {
    let author = comment.by.clone().unwrap_or_else(|| "[deleted]".to_string());
    let mut spans = vec![Span::styled(author, Style::default().fg(Color::Cyan))];
    if let Some(time) = comment.time {
        spans.push(Span::styled(
            format!(" on {}", format_date(time)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

impl Component for PostView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let post = match self.post {
            Phase::Loading => {
                Loading::new("Fetching post", self.frame_index).render(frame, area);
                return;
            }
            Phase::Loaded(post) => post,
        };

        // One column for the scrollbar
        let width = area.width.saturating_sub(1);
        let lines = post_lines(post, self.comments, width, self.frame_index);
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

        let mut scroll_view = ScrollView::new(Size::new(width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(Paragraph::new(lines), Rect::new(0, 0, width, height));

        frame.render_stateful_widget(scroll_view, area, self.scroll);
    }
}
