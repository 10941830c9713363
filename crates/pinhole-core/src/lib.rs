//! Core types and traits for Pinhole identifiers.
//!
//! This crate provides the types shared by the generator, the collision
//! resolver and the storage backends: alphabets, identifiers, generation
//! requests, uniqueness scopes and the error taxonomy.

pub mod alphabet;
pub mod error;
pub mod identifier;
pub mod request;
pub mod store;

pub use alphabet::Alphabet;
pub use error::{Error, Result, StorageError};
pub use identifier::Identifier;
pub use request::{CharClass, Filters, GenerationRequest, DEFAULT_LENGTH};
pub use store::{ExistenceCheck, Scope, UniqueStore};
