pub mod client;
pub mod error;
pub mod types;

pub use client::{HnApi, HnClient, fetch_comments, fetch_main_posts, fetch_posts};
pub use error::ApiError;
pub use types::{Category, Item, ItemId, ItemKind, User};
