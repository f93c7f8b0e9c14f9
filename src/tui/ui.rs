use crate::core::route::Route;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Loading, PostView, StoryList, TitleBar, UserView};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph, Wrap};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    // Main area - show error OR the current screen
    let error = app.current_error();
    match error {
        Some(err) => draw_error_view(frame, main_area, err.message()),
        None => draw_screen(frame, main_area, app, tui, spinner_frame),
    }

    // Title bar
    let section = section_label(&app.route);
    let loading = app.is_loading();
    let status = if error.is_some() {
        "Error"
    } else if loading {
        "Loading..."
    } else {
        ""
    };
    TitleBar::new(&section, status, loading.then_some(spinner_frame)).render(frame, title_area);

    // Help line
    let help = Span::styled(help_text(&app.route), Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(help), help_area);
}

fn draw_screen(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    match &app.route {
        Route::Stories(_) => match app.stories.state().items.loaded().map(Vec::as_slice) {
            Some([]) => {
                let empty = Paragraph::new("No stories")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center);
                frame.render_widget(empty, area);
            }
            Some(items) => StoryList::new(&mut tui.stories, items).render(frame, area),
            None => Loading::new("Fetching stories", spinner_frame).render(frame, area),
        },
        Route::Post(_) => {
            let state = app.post.state();
            PostView::new(&mut tui.post_scroll, &state.primary, &state.secondary, spinner_frame)
                .render(frame, area);
        }
        Route::User(_) => {
            let state = app.profile.state();
            UserView::new(&mut tui.submissions, &state.primary, &state.secondary, spinner_frame)
                .render(frame, area);
        }
    }
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(error_msg)
        .block(Block::bordered().title("ERROR"))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}

fn section_label(route: &Route) -> String {
    match route {
        Route::Stories(category) => category.label().to_string(),
        Route::Post(id) => format!("post {id}"),
        Route::User(id) => format!("user {id}"),
    }
}

fn help_text(route: &Route) -> &'static str {
    match route {
        Route::Stories(_) => " ↑↓ Select  Enter Open  u Author  t Top  n New  q Quit",
        Route::Post(_) => " ↑↓ Scroll  u Author  Esc Back  t Top  n New  q Quit",
        Route::User(_) => " ↑↓ Select  Enter Open  Esc Back  t Top  n New  q Quit",
    }
}
