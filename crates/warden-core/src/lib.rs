//! # Warden Core
//!
//! Pure primitives for Warden: entity type and permission identifiers,
//! canonical encoding, and content fingerprints.
//!
//! This crate contains no I/O and no registry state. It is the vocabulary
//! shared by the registry and by the modules that register into it.
//!
//! ## Key Types
//!
//! - [`EntityType`] - Identifier for a class of managed objects
//! - [`Permission`] - Identifier for an operation on instances of an entity type
//! - [`Blake3Hash`] - Content digest used for registry fingerprints
//!
//! ## Canonicalization
//!
//! Registry contents are hashed over deterministic CBOR. See [`canonical`] module.

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod types;

pub use canonical::canonical_value_bytes;
pub use crypto::Blake3Hash;
pub use error::{CoreError, Result};
pub use types::{EntityType, Permission};
