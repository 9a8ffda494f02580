//! Deterministic effect execution for reducer tests
//!
//! [`TestStore`] runs a reducer like the runtime `Store` does, but effects
//! are queued instead of spawned. A test decides when they run, can hold some
//! back, and feeds their actions back in the order it chooses.

#![allow(clippy::module_name_repetitions)] // TestStore is the natural name

use cinema_core::effect::{Effect, EffectFuture};
use cinema_core::reducer::Reducer;
use std::collections::VecDeque;

/// Single-threaded store with a queue of pending effects
///
/// # Example
///
/// ```ignore
/// let mut store = TestStore::new(AppReducer::new(), AppState::default(), env);
/// store.send(AppAction::Open { path: "/".into() });
/// store.settle().await;
/// assert!(matches!(store.state().page, Page::Listing(_)));
/// ```
pub struct TestStore<R>
where
    R: Reducer,
{
    reducer: R,
    environment: R::Environment,
    state: R::State,
    pending: VecDeque<EffectFuture<R::Action>>,
}

impl<R> TestStore<R>
where
    R: Reducer,
    R::Action: Send + 'static,
{
    /// Create a store with the given reducer, state and environment
    pub fn new(reducer: R, state: R::State, environment: R::Environment) -> Self {
        Self {
            reducer,
            environment,
            state,
            pending: VecDeque::new(),
        }
    }

    /// Reduce `action` and queue its effects without running them
    pub fn send(&mut self, action: R::Action) {
        let effects = self
            .reducer
            .reduce(&mut self.state, action, &self.environment);
        for effect in effects {
            self.enqueue(effect);
        }
    }

    fn enqueue(&mut self, effect: Effect<R::Action>) {
        match effect {
            Effect::None => {},
            Effect::Parallel(effects) => {
                for effect in effects {
                    self.enqueue(effect);
                }
            },
            Effect::Future(fut) => self.pending.push_back(fut),
        }
    }

    /// Run the oldest pending effect and feed its action back
    ///
    /// Returns `false` when nothing was pending.
    pub async fn step(&mut self) -> bool {
        match self.pending.pop_front() {
            Some(fut) => {
                self.feed(fut).await;
                true
            },
            None => false,
        }
    }

    /// Run pending effects, oldest first, until none remain
    ///
    /// Effects queued by fed-back actions run too. Returns how many effects ran.
    pub async fn settle(&mut self) -> usize {
        let mut ran = 0;
        while self.step().await {
            ran += 1;
        }
        ran
    }

    /// Run an effect taken out of the queue earlier and feed its action back
    pub async fn feed(&mut self, fut: EffectFuture<R::Action>) {
        if let Some(action) = fut.await {
            self.send(action);
        }
    }

    /// Remove every pending effect without running it
    ///
    /// Hold on to them to deliver responses later, e.g. after navigating away.
    pub fn take_pending(&mut self) -> Vec<EffectFuture<R::Action>> {
        self.pending.drain(..).collect()
    }

    /// Number of effects waiting to run
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.pending.len()
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &R::State {
        &self.state
    }
}

