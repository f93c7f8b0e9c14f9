//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Flow
//!
//! ```text
//!  keys ──► handle_event() ──► Action ──► update() ──► Effect::Load(req)
//!                                  ▲                        │
//!                                  │                        ▼
//!                           mpsc::Receiver ◄──── spawn_load() (tokio task)
//! ```
//!
//! Every state change happens on this thread, one action at a time. Loader
//! tasks only ever send ticket-tagged actions back over the channel.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (something is loading): draws every ~80ms for the spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events, results or resize.

mod component;
mod components;
mod event;
pub mod format;
mod ui;

use log::{debug, info, warn};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use tui_scrollview::ScrollViewState;

use crate::api::{Category, HnApi, HnClient};
use crate::core::action::{Action, Effect, LoadRequest, update};
use crate::core::config::ResolvedConfig;
use crate::core::loaders::{load_post, load_profile, load_stories};
use crate::core::route::Route;
use crate::core::state::App;
use crate::tui::components::StoryListState;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub stories: StoryListState,
    pub submissions: StoryListState,
    pub post_scroll: ScrollViewState,
    /// Route the component states above were last reset for
    shown: Option<Route>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            stories: StoryListState::new(),
            submissions: StoryListState::new(),
            post_scroll: ScrollViewState::default(),
            shown: None,
        }
    }

    /// Reset the presentation state of a screen when it is entered anew.
    pub fn sync(&mut self, route: &Route) {
        if self.shown.as_ref() == Some(route) {
            return;
        }
        match route {
            Route::Stories(_) => self.stories.reset(),
            Route::Post(_) => self.post_scroll = ScrollViewState::default(),
            Route::User(_) => self.submissions.reset(),
        }
        self.shown = Some(route.clone());
    }
}

/// Translate a TUI event into a core action, applying pure presentation
/// changes (selection, scrolling) directly to `tui`.
///
/// Open and OpenAuthor act on nothing while the error view is up.
pub fn handle_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Open | TuiEvent::OpenAuthor if app.current_error().is_some() => None,
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::Back => Some(Action::Back),
        TuiEvent::ShowTop => Some(Action::Navigate(Route::Stories(Category::Top))),
        TuiEvent::ShowNew => Some(Action::Navigate(Route::Stories(Category::New))),
        TuiEvent::Open => {
            let item = match &app.route {
                Route::Stories(_) => tui.stories.selected_in(app.stories.state().items.loaded()?),
                Route::User(_) => tui
                    .submissions
                    .selected_in(app.profile.state().secondary.loaded()?),
                Route::Post(_) => None,
            }?;
            Some(Action::Navigate(Route::Post(item.id)))
        }
        TuiEvent::OpenAuthor => {
            let author = match &app.route {
                Route::Stories(_) => tui
                    .stories
                    .selected_in(app.stories.state().items.loaded()?)?
                    .by
                    .clone(),
                Route::Post(_) => app.post.state().primary.loaded()?.by.clone(),
                Route::User(_) => None,
            }?;
            Some(Action::Navigate(Route::User(author)))
        }
        TuiEvent::Up | TuiEvent::Down | TuiEvent::PageUp | TuiEvent::PageDown => {
            scroll(app, tui, event);
            None
        }
        TuiEvent::Resize => None,
    }
}

fn scroll(app: &App, tui: &mut TuiState, event: TuiEvent) {
    match &app.route {
        Route::Stories(_) => {
            let len = app.stories.state().items.loaded().map_or(0, |items| items.len());
            move_selection(&mut tui.stories, len, event);
        }
        Route::User(_) => {
            let len = app.profile.state().secondary.loaded().map_or(0, |items| items.len());
            move_selection(&mut tui.submissions, len, event);
        }
        Route::Post(_) => match event {
            TuiEvent::Up => tui.post_scroll.scroll_up(),
            TuiEvent::Down => tui.post_scroll.scroll_down(),
            TuiEvent::PageUp => tui.post_scroll.scroll_page_up(),
            TuiEvent::PageDown => tui.post_scroll.scroll_page_down(),
            _ => {}
        },
    }
}

fn move_selection(list: &mut StoryListState, len: usize, event: TuiEvent) {
    match event {
        TuiEvent::Up => list.move_up(),
        TuiEvent::Down => list.move_down(len),
        TuiEvent::PageUp => list.page_up(),
        TuiEvent::PageDown => list.page_down(len),
        _ => {}
    }
}

/// Build the HTTP collaborator from a resolved config.
pub fn build_api(config: &ResolvedConfig) -> Arc<dyn HnApi> {
    Arc::new(HnClient::new(Some(config.base_url.clone())))
}

pub fn run(config: ResolvedConfig, route: Route) -> std::io::Result<()> {
    let api = build_api(&config);
    let mut app = App::from_config(route.clone(), &config);
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    if let Effect::Load(request) = update(&mut app, Action::Navigate(route)) {
        spawn_load(request, api.clone(), tx.clone());
    }

    let mut terminal = ratatui::init();

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        tui.sync(&app.route);

        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = handle_event(&app, &mut tui, event) else {
                continue;
            };
            if dispatch(&mut app, action, &api, &tx) {
                break 'main;
            }
            tui.sync(&app.route);
        }

        // Handle background task actions (loader results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &api, &tx) {
                break 'main;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Apply an action and carry out its effect. Returns `true` on quit.
fn dispatch(
    app: &mut App,
    action: Action,
    api: &Arc<dyn HnApi>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::Load(request) => {
            spawn_load(request, api.clone(), tx.clone());
            false
        }
        Effect::None => false,
    }
}

/// Run the loader for `request` on the tokio runtime, forwarding its events
/// as ticket-tagged actions.
fn spawn_load(request: LoadRequest, api: Arc<dyn HnApi>, tx: mpsc::Sender<Action>) {
    info!("Spawning load: {:?}", request);
    match request {
        LoadRequest::Stories {
            ticket,
            category,
            limit,
        } => {
            tokio::spawn(async move {
                load_stories(api.as_ref(), category, limit, |event| {
                    forward(&tx, Action::Stories { ticket, event })
                })
                .await;
            });
        }
        LoadRequest::Post { ticket, id } => {
            tokio::spawn(async move {
                load_post(api.as_ref(), id, |event| {
                    forward(&tx, Action::Post { ticket, event })
                })
                .await;
            });
        }
        LoadRequest::Profile { ticket, id } => {
            tokio::spawn(async move {
                load_profile(api.as_ref(), id, |event| {
                    forward(&tx, Action::Profile { ticket, event })
                })
                .await;
            });
        }
    }
}

fn forward(tx: &mpsc::Sender<Action>, action: Action) -> bool {
    if tx.send(action).is_err() {
        warn!("Failed to forward loader result: receiver dropped");
        return false;
    }
    true
}
