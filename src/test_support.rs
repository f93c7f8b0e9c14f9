//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ApiError, Category, HnApi, Item, ItemId, ItemKind, User};
use crate::core::phase::LoadError;

impl From<&str> for LoadError {
    fn from(message: &str) -> Self {
        LoadError(message.to_string())
    }
}

/// In-memory [`HnApi`] with scripted responses, per-call delays and failures.
///
/// Every call is recorded as `"item:7"`, `"user:pg"` or `"ranked:top"` so tests
/// can assert what was (or wasn't) requested. Delays are `tokio::time::sleep`s,
/// so they resolve deterministically under `start_paused = true`.
#[derive(Default)]
pub struct ScriptedApi {
    items: HashMap<ItemId, Item>,
    users: HashMap<String, User>,
    ranked: HashMap<Category, Vec<ItemId>>,
    delays: HashMap<String, Duration>,
    failures: HashMap<String, ApiError>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.insert(item.id, item);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    pub fn with_ranked(mut self, category: Category, ids: Vec<ItemId>) -> Self {
        self.ranked.insert(category, ids);
        self
    }

    /// Delay the response for a call key such as `"item:7"`.
    pub fn with_delay(mut self, key: &str, millis: u64) -> Self {
        self.delays
            .insert(key.to_string(), Duration::from_millis(millis));
        self
    }

    /// Fail the call key with a network error carrying `message`.
    pub fn with_failure(mut self, key: &str, message: &str) -> Self {
        self.failures
            .insert(key.to_string(), ApiError::Network(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn item_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with("item:"))
            .count()
    }

    async fn enter(&self, key: String) -> Result<(), ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(key.clone());
        }
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        match self.failures.get(&key) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl HnApi for ScriptedApi {
    async fn fetch_item(&self, id: ItemId) -> Result<Item, ApiError> {
        self.enter(format!("item:{id}")).await?;
        self.items.get(&id).cloned().ok_or(ApiError::NotFound {
            kind: "item",
            id: id.to_string(),
        })
    }

    async fn fetch_user(&self, id: &str) -> Result<User, ApiError> {
        self.enter(format!("user:{id}")).await?;
        self.users.get(id).cloned().ok_or_else(|| ApiError::NotFound {
            kind: "user",
            id: id.to_string(),
        })
    }

    async fn fetch_ranked_ids(&self, category: Category) -> Result<Vec<ItemId>, ApiError> {
        self.enter(format!("ranked:{category}")).await?;
        Ok(self.ranked.get(&category).cloned().unwrap_or_default())
    }
}

fn item(id: ItemId, kind: ItemKind) -> Item {
    Item {
        id,
        kind,
        by: Some("tester".to_string()),
        time: Some(1_700_000_000),
        title: None,
        url: None,
        text: None,
        kids: Vec::new(),
        descendants: None,
        score: None,
        parent: None,
        dead: false,
        deleted: false,
    }
}

pub fn story(id: ItemId) -> Item {
    Item {
        title: Some(format!("Story {id}")),
        url: Some(format!("https://example.com/{id}")),
        score: Some(1),
        descendants: Some(0),
        ..item(id, ItemKind::Story)
    }
}

pub fn story_with_kids(id: ItemId, kids: Vec<ItemId>) -> Item {
    Item {
        descendants: Some(kids.len() as u32),
        kids,
        ..story(id)
    }
}

pub fn comment(id: ItemId, parent: ItemId) -> Item {
    Item {
        parent: Some(parent),
        text: Some(format!("<p>comment {id}</p>")),
        ..item(id, ItemKind::Comment)
    }
}

pub fn user(id: &str, submitted: Vec<ItemId>) -> User {
    User {
        id: id.to_string(),
        created: 1_160_418_092,
        karma: 1234,
        about: None,
        submitted,
    }
}
