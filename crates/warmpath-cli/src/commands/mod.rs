//! Command implementations.

pub mod import;
pub mod paths;
pub mod person;
pub mod reconcile;
pub mod strength;

pub use self::import::execute_import;
pub use self::paths::execute_paths;
pub use self::person::execute_person;
pub use self::reconcile::execute_reconcile;
pub use self::strength::execute_strength;
