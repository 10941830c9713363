//! Collision resolution for scoped identifiers.
//!
//! This crate wraps an identifier [`Generator`](pinhole_generator::Generator)
//! with a bounded retry loop against a backend's existence check, so callers
//! get identifiers that are unique within a [`Scope`](pinhole_core::Scope).

pub mod resolver;

pub use resolver::{assign_unique, CollisionResolver, ResolverSettings, DEFAULT_MAX_ATTEMPTS};
