//! Repository contracts and SQLite persistence for portal records.
//!
//! # Responsibility
//! - Define the data access contract the rating and reputation services use.
//! - Keep SQL, row parsing and cascade order inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate records before touching SQL.
//! - Missing rows surface as `RepoError::NotFound`, never as silent no-ops.
//! - Deletes cascade explicitly and atomically; the schema declares no
//!   `ON DELETE` actions.

pub mod content_repo;
mod schema;
