//! # Actions
//!
//! Everything that can happen in Hews becomes an `Action`.
//! User opens a post? That's `Action::Navigate(Route::Post(id))`.
//! The post arrives? That's `Action::Post { ticket, event }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an [`Effect`] for the adapter to carry out. No I/O
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::api::{Category, ItemId};
use crate::core::loaders::{PostEvent, ProfileEvent, StoriesEvent};
use crate::core::machine::{Ticket, Transition};
use crate::core::route::Route;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Route),
    Back,
    Stories { ticket: Ticket, event: StoriesEvent },
    Post { ticket: Ticket, event: PostEvent },
    Profile { ticket: Ticket, event: ProfileEvent },
    Quit,
}

/// Background work a loader needs started, tagged with the run's ticket.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadRequest {
    Stories {
        ticket: Ticket,
        category: Category,
        limit: usize,
    },
    Post {
        ticket: Ticket,
        id: ItemId,
    },
    Profile {
        ticket: Ticket,
        id: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Load(LoadRequest),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Navigate(route) => {
            if app.is_showing(&route) {
                return Effect::None;
            }
            if route != app.route {
                let visited = app.is_showing(&app.route);
                let previous = std::mem::replace(&mut app.route, route.clone());
                if visited {
                    app.history.push(previous);
                }
            }
            enter(app, route)
        }
        Action::Back => match app.history.pop() {
            Some(route) => {
                app.route = route.clone();
                enter(app, route)
            }
            None => Effect::None,
        },
        Action::Stories { ticket, event } => {
            log_transition("stories", app.stories.apply(ticket, event));
            Effect::None
        }
        Action::Post { ticket, event } => {
            log_transition("post", app.post.apply(ticket, event));
            Effect::None
        }
        Action::Profile { ticket, event } => {
            log_transition("profile", app.profile.apply(ticket, event));
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Activates the machine for `route` and tears down the others.
fn enter(app: &mut App, route: Route) -> Effect {
    info!("Entering {}", route);
    match route {
        Route::Stories(category) => {
            app.post.teardown();
            app.profile.teardown();
            match app.stories.ensure(category) {
                Some(ticket) => Effect::Load(LoadRequest::Stories {
                    ticket,
                    category,
                    limit: app.story_limit,
                }),
                None => Effect::None,
            }
        }
        Route::Post(id) => {
            app.stories.teardown();
            app.profile.teardown();
            let ticket = app.post.start(id);
            Effect::Load(LoadRequest::Post { ticket, id })
        }
        Route::User(id) => {
            app.stories.teardown();
            app.post.teardown();
            let ticket = app.profile.start(id.clone());
            Effect::Load(LoadRequest::Profile { ticket, id })
        }
    }
}

fn log_transition(screen: &str, transition: Transition) {
    match transition {
        Transition::Applied => debug!("{} event applied", screen),
        Transition::Stale => debug!("{} event was stale", screen),
        Transition::Halted => debug!("{} event after failure ignored", screen),
        Transition::OutOfOrder => debug!("{} event out of order", screen),
    }
}
