//! Use-case services over the content repository.
//!
//! # Responsibility
//! - Orchestrate repository calls into rating, reputation and content
//!   management use-cases.
//! - Keep callers (CLI, future HTTP layer) decoupled from SQL.
//!
//! # Invariants
//! - Like/dislike never recomputes reputation; callers trigger recompute
//!   explicitly, so cached scores may lag behind raw ratings.

pub mod content_service;
pub mod rating_service;
pub mod reputation_service;
