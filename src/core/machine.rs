//! # Async Phase Machine
//!
//! Drives a one- or two-phase load: fetch a primary entity, then (optionally)
//! a collection derived from it. The machine owns the only mutable load state;
//! screens render it as-is.
//!
//! ```text
//!  start(key) ──► Ticket(gen)           background task
//!      │                                     │
//!      │   ◄── apply(Ticket, event) ◄────────┘  PrimaryLoaded / SecondaryLoaded / Failed
//!      │
//!      └─ gen != current ──► Transition::Stale   (dropped, state untouched)
//! ```
//!
//! Every `start` bumps a generation counter and hands back a [`Ticket`].
//! Background work tags its events with that ticket, so a response belonging
//! to a superseded key is recognised and dropped on arrival. Nothing is
//! aborted over the wire.
//!
//! The state types implement [`Reducer`]: a closed set of events with an
//! exhaustive transition function. Events that cannot legally arrive in the
//! current state are rejected as [`Transition::OutOfOrder`] instead of being
//! silently ignored.

use std::future::Future;

use log::{debug, error};
use serde::{Deserialize, Serialize};

use super::phase::{LoadError, Phase};

/// Generation tag issued by [`AsyncPhaseMachine::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Outcome of [`AsyncPhaseMachine::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    /// Ticket belongs to a previous run (or the machine was torn down).
    Stale,
    /// The run already failed; failure is terminal.
    Halted,
    /// The event cannot arrive in the current state. A bug in the driver.
    OutOfOrder,
}

/// Why a reducer refused an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderViolation {
    SecondaryBeforePrimary,
    DuplicatePrimary,
    DuplicateSecondary,
    AfterCompletion,
}

/// A load state with a closed event set.
pub trait Reducer {
    type Event;

    /// Prepare for a new run under a new key.
    fn restart(&mut self);

    /// Forget everything, including anything `restart` keeps.
    fn clear(&mut self);

    fn reduce(&mut self, event: Self::Event) -> Result<(), OrderViolation>;

    fn is_failed(&self) -> bool;
}

/// Generation-tagged owner of one screen's load state.
#[derive(Debug)]
pub struct AsyncPhaseMachine<K, R> {
    key: Option<K>,
    generation: u64,
    state: R,
}

impl<K, R: Reducer + Default> Default for AsyncPhaseMachine<K, R> {
    fn default() -> Self {
        Self::with_state(R::default())
    }
}

impl<K, R: Reducer> AsyncPhaseMachine<K, R> {
    pub fn with_state(state: R) -> Self {
        Self {
            key: None,
            generation: 0,
            state,
        }
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn state(&self) -> &R {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.key.is_some()
    }

    /// Begin a fresh run for `key`, invalidating every earlier ticket.
    pub fn start(&mut self, key: K) -> Ticket {
        self.generation += 1;
        self.key = Some(key);
        self.state.restart();
        Ticket(self.generation)
    }

    /// Stop the machine. Results still in flight become stale.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.key = None;
        self.state.clear();
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.key.is_some() && ticket.0 == self.generation
    }

    pub fn apply(&mut self, ticket: Ticket, event: R::Event) -> Transition {
        if !self.is_current(ticket) {
            debug!(
                "Dropping stale event (ticket={}, current={})",
                ticket.0, self.generation
            );
            return Transition::Stale;
        }
        if self.state.is_failed() {
            debug!("Ignoring event after terminal failure (ticket={})", ticket.0);
            return Transition::Halted;
        }
        match self.state.reduce(event) {
            Ok(()) => Transition::Applied,
            Err(violation) => {
                error!(
                    "Out-of-order load event rejected: {:?} (ticket={})",
                    violation, ticket.0
                );
                Transition::OutOfOrder
            }
        }
    }
}

impl<K: PartialEq, R: Reducer> AsyncPhaseMachine<K, R> {
    /// Start only when `key` differs from the running key.
    pub fn ensure(&mut self, key: K) -> Option<Ticket> {
        if self.key.as_ref() == Some(&key) {
            None
        } else {
            Some(self.start(key))
        }
    }
}

// ============================================================================
// Two-phase state
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PhaseEvent<P, S> {
    PrimaryLoaded(P),
    SecondaryLoaded(S),
    Failed(LoadError),
}

/// Primary entity plus the collection derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoPhaseState<P, S> {
    pub primary: Phase<P>,
    pub secondary: Phase<S>,
    pub error: Option<LoadError>,
}

impl<P, S> Default for TwoPhaseState<P, S> {
    fn default() -> Self {
        Self {
            primary: Phase::Loading,
            secondary: Phase::Loading,
            error: None,
        }
    }
}

impl<P, S> Reducer for TwoPhaseState<P, S> {
    type Event = PhaseEvent<P, S>;

    fn restart(&mut self) {
        *self = Self::default();
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn reduce(&mut self, event: PhaseEvent<P, S>) -> Result<(), OrderViolation> {
        match event {
            PhaseEvent::PrimaryLoaded(primary) => {
                if self.primary.is_loaded() {
                    return Err(OrderViolation::DuplicatePrimary);
                }
                self.primary = Phase::Loaded(primary);
            }
            PhaseEvent::SecondaryLoaded(secondary) => {
                if self.primary.is_loading() {
                    return Err(OrderViolation::SecondaryBeforePrimary);
                }
                if self.secondary.is_loaded() {
                    return Err(OrderViolation::DuplicateSecondary);
                }
                self.secondary = Phase::Loaded(secondary);
            }
            PhaseEvent::Failed(err) => {
                if self.secondary.is_loaded() {
                    return Err(OrderViolation::AfterCompletion);
                }
                self.error = Some(err);
            }
        }
        Ok(())
    }

    fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

// ============================================================================
// Single-phase state
// ============================================================================

/// What a single-phase list keeps after a failed reload.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Keep the last successfully loaded collection around.
    #[default]
    Retain,
    /// Replace it with an empty collection.
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent<T> {
    Loaded(Vec<T>),
    Failed(LoadError),
}

/// A collection loaded in one phase. Survives key changes according to its
/// [`FailurePolicy`].
#[derive(Debug, Clone, PartialEq)]
pub struct SinglePhaseState<T> {
    pub items: Phase<Vec<T>>,
    /// Previous good collection, kept aside while a new run loads. After a
    /// failure it is whatever the policy leaves behind.
    pub retained: Option<Vec<T>>,
    pub error: Option<LoadError>,
    policy: FailurePolicy,
}

impl<T> Default for SinglePhaseState<T> {
    fn default() -> Self {
        Self::new(FailurePolicy::default())
    }
}

impl<T> SinglePhaseState<T> {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            items: Phase::Loading,
            retained: None,
            error: None,
            policy,
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// The collection for the current key once loaded. A failed run falls
    /// back to what the policy retained; a run in flight has nothing.
    pub fn collection(&self) -> Option<&[T]> {
        match &self.items {
            Phase::Loaded(items) => Some(items),
            Phase::Loading if self.error.is_some() => self.retained.as_deref(),
            Phase::Loading => None,
        }
    }
}

impl<T> Reducer for SinglePhaseState<T> {
    type Event = ListEvent<T>;

    fn restart(&mut self) {
        if let Phase::Loaded(items) = std::mem::take(&mut self.items) {
            self.retained = Some(items);
        }
        self.error = None;
    }

    fn clear(&mut self) {
        *self = Self::new(self.policy);
    }

    fn reduce(&mut self, event: ListEvent<T>) -> Result<(), OrderViolation> {
        if self.items.is_loaded() {
            return Err(OrderViolation::AfterCompletion);
        }
        match event {
            ListEvent::Loaded(items) => {
                self.items = Phase::Loaded(items);
                self.retained = None;
            }
            ListEvent::Failed(err) => {
                self.error = Some(err);
                match self.policy {
                    FailurePolicy::Retain => {}
                    FailurePolicy::Clear => self.retained = Some(Vec::new()),
                }
            }
        }
        Ok(())
    }

    fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

// ============================================================================
// Drivers
// ============================================================================

/// Runs primary then secondary fetch, reporting each outcome through `emit`.
///
/// `derive` turns the primary entity into the secondary request. A primary
/// failure ends the run before `fetch_secondary` is ever called. `emit`
/// returning `false` means nobody is listening any more and the run stops.
pub async fn run_two_phase<P, S, Req, E, FutP, D, F, FutS>(
    fetch_primary: FutP,
    derive: D,
    fetch_secondary: F,
    mut emit: impl FnMut(PhaseEvent<P, S>) -> bool,
) where
    FutP: Future<Output = Result<P, E>>,
    D: FnOnce(&P) -> Req,
    F: FnOnce(Req) -> FutS,
    FutS: Future<Output = Result<S, E>>,
    E: Into<LoadError>,
{
    let primary = match fetch_primary.await {
        Ok(primary) => primary,
        Err(e) => {
            emit(PhaseEvent::Failed(e.into()));
            return;
        }
    };

    let request = derive(&primary);
    if !emit(PhaseEvent::PrimaryLoaded(primary)) {
        return;
    }

    let event = match fetch_secondary(request).await {
        Ok(secondary) => PhaseEvent::SecondaryLoaded(secondary),
        Err(e) => PhaseEvent::Failed(e.into()),
    };
    emit(event);
}

/// Runs a single fetch and reports its outcome through `emit`.
pub async fn run_single_phase<T, E, Fut>(fetch: Fut, mut emit: impl FnMut(ListEvent<T>) -> bool)
where
    Fut: Future<Output = Result<Vec<T>, E>>,
    E: Into<LoadError>,
{
    let event = match fetch.await {
        Ok(items) => ListEvent::Loaded(items),
        Err(e) => ListEvent::Failed(e.into()),
    };
    emit(event);
}
