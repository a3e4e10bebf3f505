//! Warmpath Domain Layer
//!
//! This crate contains the core business logic and domain model for the
//! Warmpath relationship graph. It has no infrastructure dependencies and
//! defines the fundamental concepts, value objects, and trait interfaces
//! that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Person**: a node representing one individual in the relationship graph
//! - **Relationship**: a typed, weighted, bidirectional edge between two Persons
//! - **Kind**: the fixed relationship category (coworker, education, family, ...)
//! - **Connection strength**: a derived [0, 100] score for a pair of Persons
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - No infrastructure crate dependencies
//! - Pure business logic only
//! - Store and interaction-data implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod person;
pub mod relationship;
pub mod strength;
pub mod traits;

// Re-exports for convenience
pub use person::{Education, GreekLife, Hometown, Person, PersonId, SocialHandle};
pub use relationship::{Relationship, RelationshipKind};
pub use strength::{compute_strength, StrengthFactors};
pub use traits::{GraphStore, InteractionSource, Neighbor, NoInteractionData, PersonQuery};
