//! # User View Component
//!
//! A profile header above the user's recent submissions. Like the post
//! view, the submissions indicator only appears once the user has loaded.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::api::{Item, User};
use crate::core::phase::Phase;
use crate::tui::component::Component;
use crate::tui::components::loading::Loading;
use crate::tui::components::story_list::{StoryList, StoryListState};
use crate::tui::format::{format_date, html_to_text, thousands, wrap_lines};

pub struct UserView<'a> {
    submissions: &'a mut StoryListState,
    user: &'a Phase<User>,
    posts: &'a Phase<Vec<Item>>,
    frame_index: usize,
}

impl<'a> UserView<'a> {
    pub fn new(
        submissions: &'a mut StoryListState,
        user: &'a Phase<User>,
        posts: &'a Phase<Vec<Item>>,
        frame_index: usize,
    ) -> Self {
        Self {
            submissions,
            user,
            posts,
            frame_index,
        }
    }
}

pub fn profile_lines(user: &User, width: u16) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            user.id.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!("joined {}", format_date(user.created)), dim)),
        Line::from(Span::styled(format!("has {} karma", thousands(user.karma)), dim)),
    ];
    if let Some(about) = &user.about {
        lines.push(Line::default());
        lines.extend(wrap_lines(&html_to_text(about), width).into_iter().map(Line::from));
    }
    lines
}

impl Component for UserView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let user = match self.user {
            Phase::Loading => {
                Loading::new("Fetching user", self.frame_index).render(frame, area);
                return;
            }
            Phase::Loaded(user) => user,
        };

        let header = profile_lines(user, area.width);
        // Long bios give up space to the submissions below.
        let header_height = u16::try_from(header.len())
            .unwrap_or(u16::MAX)
            .min(area.height / 2);

        use Constraint::{Length, Min};
        let [header_area, _, heading_area, list_area] =
            Layout::vertical([Length(header_height), Length(1), Length(1), Min(0)]).areas(area);

        frame.render_widget(Paragraph::new(header), header_area);

        match self.posts {
            Phase::Loading => {
                Loading::new("Fetching posts", self.frame_index).render(frame, heading_area);
            }
            Phase::Loaded(posts) if posts.is_empty() => {
                let empty = Span::styled("No posts yet", Style::default().fg(Color::DarkGray));
                frame.render_widget(Paragraph::new(empty), heading_area);
            }
            Phase::Loaded(posts) => {
                let heading = Span::styled("Posts", Style::default().add_modifier(Modifier::BOLD));
                frame.render_widget(Paragraph::new(heading), heading_area);
                StoryList::new(self.submissions, posts).render(frame, list_area);
            }
        }
    }
}
