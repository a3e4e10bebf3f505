//! Warm-path discovery engine
//!
//! Orchestrates the relationship graph: reconciles typed edges from
//! shared person attributes, scores pairwise connection strength, and
//! finds ranked introduction chains from a source person to a fuzzily
//! resolved target.
//!
//! The engine is synchronous and store-agnostic: all graph access goes
//! through the [`warmpath_domain::GraphStore`] trait, and interaction
//! signals come from a pluggable [`warmpath_domain::InteractionSource`].
//!
//! # Examples
//!
//! ```no_run
//! use warmpath_engine::{Engine, SearchOptions, TargetQuery};
//! use warmpath_domain::{Person, PersonId};
//! # use warmpath_engine::EngineError;
//! # fn demo<S: warmpath_domain::GraphStore>(store: &mut S) -> Result<(), EngineError>
//! # where S::Error: std::fmt::Display {
//! let mut engine = Engine::default_config();
//!
//! let alice = engine.upsert_person(store, Person::new(PersonId::new("alice"), "Alice"))?;
//! engine.reconcile_relationships(store, &alice.id)?;
//!
//! let result = engine.find_introduction_paths(
//!     store,
//!     &alice.id,
//!     &TargetQuery::at_company("Jane Doe", "Acme"),
//!     &SearchOptions::default(),
//! )?;
//! for path in &result.paths {
//!     println!("{} hops, strength {}", path.hops, path.total_strength);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod pathfinder;
pub mod reconciler;
pub mod resolver;
pub mod scorer;

pub use config::EngineConfig;
pub use engine::{Engine, IntroSearchResult};
pub use error::EngineError;
pub use metrics::EngineMetrics;
pub use pathfinder::{IntroductionPath, PathOutcome, SearchOptions};
pub use reconciler::{derive_kinds, PersonFacts, ReconcileOutcome};
pub use resolver::{Candidate, TargetQuery};
pub use scorer::connection_strength;
