use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream item identifier.
pub type ItemId = u64;

/// Ranked story feed. The upstream exposes one endpoint per variant.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Top,
    New,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::New => "new",
        }
    }

    /// Path segment of the ranked-ids endpoint, e.g. `topstories`.
    pub fn endpoint(self) -> &'static str {
        match self {
            Category::Top => "topstories",
            Category::New => "newstories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Story,
    Comment,
    Job,
    Poll,
    #[serde(rename = "pollopt")]
    PollOpt,
}

/// A story, comment, job or poll as returned by `item/{id}.json`.
///
/// Comments share the same shape, so a comment tree is just `kids` pointing
/// at further `Item`s.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub by: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// HTML fragment.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub kids: Vec<ItemId>,
    #[serde(default)]
    pub descendants: Option<u32>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub parent: Option<ItemId>,
    #[serde(default)]
    pub dead: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl Item {
    /// Dead and deleted items are placeholders with no usable content.
    pub fn is_live(&self) -> bool {
        !self.dead && !self.deleted
    }

    pub fn is_comment(&self) -> bool {
        self.kind == ItemKind::Comment
    }
}

/// A user profile as returned by `user/{id}.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    /// Unix seconds.
    pub created: i64,
    pub karma: i64,
    /// HTML fragment.
    #[serde(default)]
    pub about: Option<String>,
    /// Most recent first.
    #[serde(default)]
    pub submitted: Vec<ItemId>,
}
