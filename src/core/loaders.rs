//! # Loaders
//!
//! The three screens' load machines and the background drivers that feed them.
//!
//! | Loader          | Key        | Phase 1          | Phase 2                          |
//! |-----------------|------------|------------------|----------------------------------|
//! | `ListLoader`    | `Category` | ranked stories   | (none)                           |
//! | `ItemLoader`    | `ItemId`   | the post         | its `kids` as comments           |
//! | `ProfileLoader` | user id    | the user         | first 30 of `submitted` as posts |
//!
//! Drivers never touch a machine directly. They report through `emit`, and
//! whoever owns the machine applies the events with the run's ticket.

use log::{info, warn};

use crate::api::{Category, HnApi, Item, ItemId, User, fetch_comments, fetch_main_posts, fetch_posts};
use crate::core::machine::{
    AsyncPhaseMachine, ListEvent, PhaseEvent, SinglePhaseState, TwoPhaseState, run_single_phase,
    run_two_phase,
};

/// Upper bound on submitted items fetched for a profile.
pub const SUBMITTED_CAP: usize = 30;

pub type ListLoader = AsyncPhaseMachine<Category, SinglePhaseState<Item>>;
pub type ItemLoader = AsyncPhaseMachine<ItemId, TwoPhaseState<Item, Vec<Item>>>;
pub type ProfileLoader = AsyncPhaseMachine<String, TwoPhaseState<User, Vec<Item>>>;

pub type StoriesEvent = ListEvent<Item>;
pub type PostEvent = PhaseEvent<Item, Vec<Item>>;
pub type ProfileEvent = PhaseEvent<User, Vec<Item>>;

/// Comment ids to fetch for a post. A post without `kids` has no comments.
pub fn comment_ids(post: &Item) -> Vec<ItemId> {
    post.kids.clone()
}

/// The capped, order-preserving slice of a user's submissions.
pub fn submitted_ids(user: &User) -> Vec<ItemId> {
    user.submitted.iter().take(SUBMITTED_CAP).copied().collect()
}

pub async fn load_stories(
    api: &dyn HnApi,
    category: Category,
    limit: usize,
    emit: impl FnMut(StoriesEvent) -> bool,
) {
    info!("Loading {} stories (limit={})", category, limit);
    run_single_phase(fetch_main_posts(api, category, limit), log_list(emit)).await;
}

pub async fn load_post(api: &dyn HnApi, id: ItemId, emit: impl FnMut(PostEvent) -> bool) {
    info!("Loading post {}", id);
    run_two_phase(
        api.fetch_item(id),
        comment_ids,
        |ids| async move { fetch_comments(api, &ids).await },
        log_phases("post", emit),
    )
    .await;
}

pub async fn load_profile(api: &dyn HnApi, id: String, emit: impl FnMut(ProfileEvent) -> bool) {
    info!("Loading user {}", id);
    run_two_phase(
        api.fetch_user(&id),
        submitted_ids,
        |ids| async move { fetch_posts(api, &ids).await },
        log_phases("user", emit),
    )
    .await;
}

fn log_list(mut emit: impl FnMut(StoriesEvent) -> bool) -> impl FnMut(StoriesEvent) -> bool {
    move |event| {
        match &event {
            ListEvent::Loaded(items) => info!("Stories loaded: {} items", items.len()),
            ListEvent::Failed(err) => warn!("Stories failed: {}", err),
        }
        emit(event)
    }
}

fn log_phases<P, S>(
    label: &'static str,
    mut emit: impl FnMut(PhaseEvent<P, Vec<S>>) -> bool,
) -> impl FnMut(PhaseEvent<P, Vec<S>>) -> bool {
    move |event| {
        match &event {
            PhaseEvent::PrimaryLoaded(_) => info!("{} loaded, fetching dependents", label),
            PhaseEvent::SecondaryLoaded(items) => {
                info!("{} dependents loaded: {} items", label, items.len())
            }
            PhaseEvent::Failed(err) => warn!("{} load failed: {}", label, err),
        }
        emit(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::machine::{FailurePolicy, Reducer, Transition};
    use crate::core::phase::{LoadError, Phase};
    use crate::test_support::{ScriptedApi, comment, story, story_with_kids, user};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn ids(items: &[Item]) -> Vec<ItemId> {
        items.iter().map(|item| item.id).collect()
    }

    /// Runs a post load to completion, applying events as they arrive.
    async fn drive_post(api: &ScriptedApi, machine: &mut ItemLoader, id: ItemId) -> Vec<PostEvent> {
        let ticket = machine.start(id);
        let mut events = Vec::new();
        load_post(api, id, |event| {
            events.push(event.clone());
            machine.apply(ticket, event);
            true
        })
        .await;
        events
    }

    #[tokio::test]
    async fn test_post_scenario_loads_post_then_comments() {
        let api = ScriptedApi::new()
            .with_item(story_with_kids(42, vec![7, 8]))
            .with_item(comment(7, 42))
            .with_item(comment(8, 42));
        let mut machine = ItemLoader::default();

        drive_post(&api, &mut machine, 42).await;

        let state = machine.state();
        assert_eq!(state.primary.loaded().map(|p| p.id), Some(42));
        assert_eq!(state.secondary.loaded().map(|c| ids(c)), Some(vec![7, 8]));
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_post_failure_never_fetches_comments() {
        let api = ScriptedApi::new()
            .with_item(story_with_kids(42, vec![7]))
            .with_failure("item:42", "timeout");
        let mut machine = ItemLoader::default();

        let events = drive_post(&api, &mut machine, 42).await;

        assert_eq!(events.len(), 1);
        let state = machine.state();
        assert_eq!(state.error, Some(LoadError("network error: timeout".to_string())));
        assert!(state.secondary.is_loading());
        assert_eq!(api.calls(), vec!["item:42"]);
    }

    #[tokio::test]
    async fn test_comment_failure_sets_shared_error_after_post() {
        let api = ScriptedApi::new()
            .with_item(story_with_kids(42, vec![7, 8]))
            .with_item(comment(7, 42))
            .with_failure("item:8", "reset");
        let mut machine = ItemLoader::default();

        drive_post(&api, &mut machine, 42).await;

        let state = machine.state();
        assert!(state.primary.is_loaded());
        assert!(state.secondary.is_loading());
        assert_eq!(state.error, Some(LoadError("network error: reset".to_string())));
    }

    #[tokio::test]
    async fn test_post_without_kids_skips_comment_fetch() {
        let api = ScriptedApi::new().with_item(story(42));
        let mut machine = ItemLoader::default();

        drive_post(&api, &mut machine, 42).await;

        assert_eq!(machine.state().secondary, Phase::Loaded(Vec::new()));
        assert_eq!(api.item_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_comment_order_follows_kids_not_resolution() {
        let api = ScriptedApi::new()
            .with_item(story_with_kids(1, vec![3, 1_001, 2]))
            .with_item(comment(3, 1))
            .with_item(comment(1_001, 1))
            .with_item(comment(2, 1))
            .with_delay("item:3", 300)
            .with_delay("item:1001", 10)
            .with_delay("item:2", 100);
        let mut machine = ItemLoader::default();

        drive_post(&api, &mut machine, 1).await;

        let comments = machine.state().secondary.loaded().map(|c| ids(c));
        assert_eq!(comments, Some(vec![3, 1_001, 2]));
    }

    #[tokio::test]
    async fn test_profile_requests_first_thirty_submissions_in_order() {
        let submitted: Vec<ItemId> = (100..145).collect();
        let mut api = ScriptedApi::new().with_user(user("pg", submitted.clone()));
        for &id in &submitted {
            api = api.with_item(story(id));
        }
        let mut machine = ProfileLoader::default();
        let ticket = machine.start("pg".to_string());

        load_profile(&api, "pg".to_string(), |event| {
            machine.apply(ticket, event);
            true
        })
        .await;

        let expected: Vec<ItemId> = (100..130).collect();
        assert_eq!(api.item_calls(), SUBMITTED_CAP);
        let posts = machine.state().secondary.loaded().map(|p| ids(p));
        assert_eq!(posts, Some(expected));
    }

    #[test]
    fn test_submitted_ids_short_list_untouched() {
        let u = user("jl", vec![5, 4, 3]);
        assert_eq!(submitted_ids(&u), vec![5, 4, 3]);
        assert!(submitted_ids(&user("new", Vec::new())).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_post_response_is_dropped() {
        let api = Arc::new(
            ScriptedApi::new()
                .with_item(story_with_kids(1, vec![11]))
                .with_item(comment(11, 1))
                .with_item(story(2))
                .with_delay("item:1", 500),
        );
        let mut machine = ItemLoader::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let ticket_a = machine.start(1);
        let task_api = api.clone();
        let tx_a = tx.clone();
        tokio::spawn(async move {
            load_post(task_api.as_ref(), 1, |event| tx_a.send((ticket_a, event)).is_ok()).await;
        });

        let ticket_b = machine.start(2);
        let task_api = api.clone();
        tokio::spawn(async move {
            load_post(task_api.as_ref(), 2, |event| tx.send((ticket_b, event)).is_ok()).await;
        });

        let mut outcomes = Vec::new();
        while let Some((ticket, event)) = rx.recv().await {
            outcomes.push((ticket == ticket_a, machine.apply(ticket, event)));
        }

        assert!(
            outcomes
                .iter()
                .filter(|(from_a, _)| *from_a)
                .all(|(_, transition)| *transition == Transition::Stale)
        );
        assert!(outcomes.iter().any(|(from_a, _)| *from_a));
        let state = machine.state();
        assert_eq!(state.primary.loaded().map(|p| p.id), Some(2));
        assert_eq!(state.secondary, Phase::Loaded(Vec::new()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_post_visible_before_comments_under_delay() {
        let api = Arc::new(
            ScriptedApi::new()
                .with_item(story_with_kids(5, vec![6]))
                .with_item(comment(6, 5))
                .with_delay("item:6", 1_000),
        );
        let mut machine = ItemLoader::default();
        let ticket = machine.start(5);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let task_api = api.clone();
        tokio::spawn(async move {
            load_post(task_api.as_ref(), 5, |event| tx.send(event).is_ok()).await;
        });

        let mut snapshots = Vec::new();
        while let Some(event) = rx.recv().await {
            machine.apply(ticket, event);
            let state = machine.state();
            snapshots.push((state.primary.is_loaded(), state.secondary.is_loaded()));
        }

        assert_eq!(snapshots, vec![(true, false), (true, true)]);
    }

    #[tokio::test]
    async fn test_stories_single_phase_load() {
        let api = ScriptedApi::new()
            .with_ranked(Category::Top, vec![3, 1, 2])
            .with_item(story(1))
            .with_item(story(2))
            .with_item(story(3));
        let mut machine = ListLoader::with_state(SinglePhaseState::new(FailurePolicy::Retain));
        let ticket = machine.start(Category::Top);

        load_stories(&api, Category::Top, 50, |event| {
            machine.apply(ticket, event);
            true
        })
        .await;

        assert_eq!(machine.state().collection().map(ids), Some(vec![3, 1, 2]));
        assert!(!machine.state().is_failed());
    }

    #[tokio::test]
    async fn test_stories_failure_retains_previous_category() {
        let api = ScriptedApi::new()
            .with_ranked(Category::Top, vec![1])
            .with_item(story(1))
            .with_failure("ranked:new", "offline");
        let mut machine = ListLoader::default();

        let ticket = machine.start(Category::Top);
        load_stories(&api, Category::Top, 50, |event| {
            machine.apply(ticket, event);
            true
        })
        .await;

        let ticket = machine.start(Category::New);
        load_stories(&api, Category::New, 50, |event| {
            machine.apply(ticket, event);
            true
        })
        .await;

        let state = machine.state();
        assert_eq!(state.error, Some(LoadError("network error: offline".to_string())));
        assert_eq!(state.collection().map(ids), Some(vec![1]));
    }
}
