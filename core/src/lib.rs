//! # Cinema Core
//!
//! Core traits and types shared by every page of the cinema booking client.
//!
//! Each page (show listing, seat booking, confirmation, admin) is a feature
//! built from the same four pieces:
//!
//! - **State**: the page's view-state (fetched entities plus user input)
//! - **Action**: every input the page reacts to (user intents and API results)
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a description of async work whose result is fed back as an action
//!
//! Reducers never perform I/O themselves. They return effects; the runtime
//! `Store` executes them and sends the produced actions back in.
//!
//! ## Example
//!
//! ```
//! use cinema_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Default)]
//! struct SeatCounter {
//!     picked: u32,
//! }
//!
//! enum SeatCounterAction {
//!     Pick,
//! }
//!
//! struct SeatCounterReducer;
//!
//! impl Reducer for SeatCounterReducer {
//!     type State = SeatCounter;
//!     type Action = SeatCounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut SeatCounter,
//!         action: SeatCounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<SeatCounterAction>; 4]> {
//!         match action {
//!             SeatCounterAction::Pick => state.picked += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = SeatCounter::default();
//! let _ = SeatCounterReducer.reduce(&mut state, SeatCounterAction::Pick, &());
//! assert_eq!(state.picked, 1);
//! ```

pub use smallvec::{smallvec, SmallVec};

/// View scopes: generation tags that tie in-flight requests to the view that issued them
pub mod scope;

pub use scope::{Generation, ViewScope};

/// Reducer module - the trait every page implements
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - all page logic lives behind it
    ///
    /// # Type Parameters
    ///
    /// - `State`: the view-state this reducer owns
    /// - `Action`: user intents and API results the page reacts to
    /// - `Environment`: injected dependencies (API handle, timings)
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates `state` in place and returns descriptions of the async
        /// work to run next. Must not block or perform I/O.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects are values, not execution. The runtime decides when and where
/// they run; tests can run them one at a time.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Arc;

    /// Boxed future produced by an [`Effect::Future`]
    pub type EffectFuture<Action> = Pin<Box<dyn Future<Output = Option<Action>> + Send>>;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: the action type effects feed back into the reducer
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects concurrently; each feeds its own action back
        Parallel(Vec<Effect<Action>>),

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(EffectFuture<Action>),
    }

    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action>
    where
        Action: Send + 'static,
    {
        /// Wrap an async block as an effect
        pub fn future<F>(future: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(future))
        }

        /// Feed `action` back immediately
        pub fn send(action: Action) -> Self {
            Effect::future(async move { Some(action) })
        }

        /// Combine effects to run concurrently
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Self {
            Effect::Parallel(effects)
        }

        /// Transform the action this effect produces
        ///
        /// Used by parent reducers to lift a page's effects into the app's
        /// action type.
        pub fn map<B, F>(self, f: F) -> Effect<B>
        where
            B: Send + 'static,
            F: Fn(Action) -> B + Send + Sync + 'static,
        {
            self.map_shared(Arc::new(f))
        }

        fn map_shared<B>(self, f: Arc<dyn Fn(Action) -> B + Send + Sync>) -> Effect<B>
        where
            B: Send + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Parallel(effects) => Effect::Parallel(
                    effects
                        .into_iter()
                        .map(|effect| effect.map_shared(Arc::clone(&f)))
                        .collect(),
                ),
                Effect::Future(fut) => Effect::Future(Box::pin(async move { fut.await.map(&*f) })),
            }
        }

        /// Whether this effect does nothing when executed
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) => effects.iter().all(Effect::is_none),
                Effect::Future(_) => false,
            }
        }
    }
}
