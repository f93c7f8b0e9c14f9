//! # Core Application Logic
//!
//! This module contains Hews' business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Phase machines       │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │    API     │
//!     │  Adapter   │                          │  (reqwest) │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum, everything that can happen in the app
//! - [`machine`]: The generation-tagged async phase machine
//! - [`loaders`]: The list/post/profile instantiations and their drivers
//! - [`phase`]: `Phase<T>` and `LoadError`, what screens render from
//! - [`route`]: Navigation targets and their identifiers
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod loaders;
pub mod machine;
pub mod phase;
pub mod route;
pub mod state;
