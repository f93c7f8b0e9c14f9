//! # Application State
//!
//! Core business state for Hews. Presentation state (selection, scroll
//! offsets) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── route: Route              // current screen + its identifier
//! ├── history: Vec<Route>       // back stack
//! ├── stories: ListLoader       // front page, keyed by Category
//! ├── post: ItemLoader          // post → comments, keyed by ItemId
//! ├── profile: ProfileLoader    // user → submissions, keyed by user id
//! └── story_limit: usize        // ranked ids kept per front page
//! ```
//!
//! Only the machine behind the current route is active. The others are torn
//! down, so anything they still had in flight is dropped on arrival.
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::{DEFAULT_MAX_STORIES, ResolvedConfig};
use crate::core::loaders::{ItemLoader, ListLoader, ProfileLoader};
use crate::core::machine::{FailurePolicy, SinglePhaseState};
use crate::core::phase::LoadError;
use crate::core::route::Route;

pub struct App {
    pub route: Route,
    pub history: Vec<Route>,
    pub stories: ListLoader,
    pub post: ItemLoader,
    pub profile: ProfileLoader,
    pub story_limit: usize,
}

impl App {
    /// Creates an app parked on `route`. Nothing is loading until the first
    /// `Action::Navigate`.
    pub fn new(route: Route, story_limit: usize, policy: FailurePolicy) -> Self {
        Self {
            route,
            history: Vec::new(),
            stories: ListLoader::with_state(SinglePhaseState::new(policy)),
            post: ItemLoader::default(),
            profile: ProfileLoader::default(),
            story_limit,
        }
    }

    pub fn from_config(route: Route, config: &ResolvedConfig) -> Self {
        Self::new(route, config.max_stories, config.on_failure)
    }

    /// Whether `route`'s machine is running with `route`'s identifier.
    pub fn is_showing(&self, route: &Route) -> bool {
        match route {
            Route::Stories(category) => self.stories.key() == Some(category),
            Route::Post(id) => self.post.key() == Some(id),
            Route::User(id) => self.profile.key() == Some(id),
        }
    }

    /// The failure of the machine behind the current route, if any. While set,
    /// nothing that machine loaded is shown or acted on.
    pub fn current_error(&self) -> Option<&LoadError> {
        match &self.route {
            Route::Stories(_) => self.stories.state().error.as_ref(),
            Route::Post(_) => self.post.state().error.as_ref(),
            Route::User(_) => self.profile.state().error.as_ref(),
        }
    }

    /// Whether the screen for the current route is still waiting on a phase.
    pub fn is_loading(&self) -> bool {
        match &self.route {
            Route::Stories(_) => {
                let state = self.stories.state();
                state.error.is_none() && state.items.is_loading()
            }
            Route::Post(_) => {
                let state = self.post.state();
                state.error.is_none() && state.secondary.is_loading()
            }
            Route::User(_) => {
                let state = self.profile.state();
                state.error.is_none() && state.secondary.is_loading()
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Route::default(), DEFAULT_MAX_STORIES, FailurePolicy::default())
    }
}
