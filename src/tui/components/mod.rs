//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top status bar showing the screen and load status
//! - `Loading`: Animated `Fetching …` indicator
//!
//! ### Stateful Components (Persistent State + Transient Wrapper)
//!
//! The state lives in `TuiState`; the component is built each frame around a
//! borrow of it plus the core data it shows:
//! - `StoryList` over `StoryListState`: front page and user submissions
//! - `PostView` over `ScrollViewState`: a post and its comments
//! - `UserView` over `StoryListState`: a profile and its submissions
//!
//! ### Props-Based Data Flow
//!
//! Components receive `Phase` values from the machines, never the machines
//! themselves. What a screen shows is decided entirely by those phases.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── loading.rs       (Fetching indicator)
//! ├── story_list.rs    (Selectable list of posts)
//! ├── post_view.rs     (Post + comments, scrollable)
//! └── user_view.rs     (Profile + submissions)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod loading;
pub mod post_view;
pub mod story_list;
pub mod user_view;
pub use loading::Loading;
pub use post_view::PostView;
pub use story_list::{StoryList, StoryListState};
pub use user_view::UserView;
