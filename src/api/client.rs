//! Read-only client for the Hacker News Firebase API.
//!
//! [`HnApi`] is the seam the loaders depend on; [`HnClient`] is the reqwest
//! implementation. The `fetch_*` free functions are the composite calls the
//! screens actually make (fan-out plus filtering of dead/deleted entries).

use async_trait::async_trait;
use futures::future::try_join_all;
use log::{debug, warn};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{Category, Item, ItemId, User};

pub const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

#[async_trait]
pub trait HnApi: Send + Sync {
    async fn fetch_item(&self, id: ItemId) -> Result<Item, ApiError>;

    async fn fetch_user(&self, id: &str) -> Result<User, ApiError>;

    async fn fetch_ranked_ids(&self, category: Category) -> Result<Vec<ItemId>, ApiError>;

    /// Fetches every id concurrently. Results come back in `ids` order and the
    /// first failure fails the whole batch. An empty slice never hits the network.
    async fn fetch_items(&self, ids: &[ItemId]) -> Result<Vec<Item>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        try_join_all(ids.iter().map(|&id| self.fetch_item(id))).await
    }
}

/// HTTP implementation of [`HnApi`].
pub struct HnClient {
    base_url: String,
    client: reqwest::Client,
}

impl HnClient {
    /// Creates a client against `base_url`, or the public API when `None`.
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}/{}.json", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("API error: {} - {}", status, body);
            return Err(ApiError::Api {
                status,
                message: body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl HnApi for HnClient {
    async fn fetch_item(&self, id: ItemId) -> Result<Item, ApiError> {
        self.get_json::<Option<Item>>(&format!("item/{id}"))
            .await?
            .ok_or_else(|| ApiError::NotFound {
                kind: "item",
                id: id.to_string(),
            })
    }

    async fn fetch_user(&self, id: &str) -> Result<User, ApiError> {
        self.get_json::<Option<User>>(&format!("user/{id}"))
            .await?
            .ok_or_else(|| ApiError::NotFound {
                kind: "user",
                id: id.to_string(),
            })
    }

    async fn fetch_ranked_ids(&self, category: Category) -> Result<Vec<ItemId>, ApiError> {
        Ok(self
            .get_json::<Option<Vec<ItemId>>>(category.endpoint())
            .await?
            .unwrap_or_default())
    }
}

/// Front-page stories for `category`: the first `limit` ranked ids, fetched
/// and stripped of comments and dead entries.
pub async fn fetch_main_posts(
    api: &dyn HnApi,
    category: Category,
    limit: usize,
) -> Result<Vec<Item>, ApiError> {
    let mut ids = api.fetch_ranked_ids(category).await?;
    ids.truncate(limit);
    let items = api.fetch_items(&ids).await?;
    Ok(only_posts(items))
}

/// Comment entities for a post's `kids`, in the order given.
pub async fn fetch_comments(api: &dyn HnApi, ids: &[ItemId]) -> Result<Vec<Item>, ApiError> {
    let items = api.fetch_items(ids).await?;
    Ok(items
        .into_iter()
        .filter(|item| item.is_live() && item.is_comment())
        .collect())
}

/// Non-comment entities for a user's `submitted` ids, in the order given.
pub async fn fetch_posts(api: &dyn HnApi, ids: &[ItemId]) -> Result<Vec<Item>, ApiError> {
    let items = api.fetch_items(ids).await?;
    Ok(only_posts(items))
}

fn only_posts(items: Vec<Item>) -> Vec<Item> {
    items
        .into_iter()
        .filter(|item| item.is_live() && !item.is_comment())
        .collect()
}
