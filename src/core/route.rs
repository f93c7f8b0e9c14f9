//! # Routes
//!
//! Where the user currently is. A route carries the identifier that keys the
//! screen's loader, so navigating is what (re)starts a load.
//!
//! Routes are written like the web client's URLs: `/`, `/new`,
//! `/post?id=8863`, `/user?id=pg`. Full `news.ycombinator.com` links
//! (`item?id=` / `user?id=`) are accepted too.

use std::fmt;

use url::Url;

use crate::api::{Category, ItemId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Stories(Category),
    Post(ItemId),
    User(String),
}

impl Default for Route {
    fn default() -> Self {
        Route::Stories(Category::default())
    }
}

impl Route {
    /// Parses a path-and-query or absolute URL. Unknown paths yield `None`.
    pub fn parse(input: &str) -> Option<Route> {
        let base = Url::parse("http://localhost/").ok()?;
        let url = base.join(input.trim()).ok()?;
        let id = url
            .query_pairs()
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty());

        match url.path().trim_end_matches('/') {
            "" | "/top" | "/news" => Some(Route::Stories(Category::Top)),
            "/new" | "/newest" => Some(Route::Stories(Category::New)),
            "/post" | "/item" => id?.parse().ok().map(Route::Post),
            "/user" => id.map(Route::User),
            _ => None,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Stories(Category::Top) => "/".to_string(),
            Route::Stories(Category::New) => "/new".to_string(),
            Route::Post(id) => format!("/post?id={id}"),
            Route::User(id) => format!("/user?id={id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}
