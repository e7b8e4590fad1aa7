//! # Warden Testkit
//!
//! Testing utilities for Warden.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: ready-made registries for common scenarios
//! - **Generators**: Proptest strategies for property-based testing
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use warden_testkit::generators::{registration_script, apply_script};
//!
//! proptest! {
//!     #[test]
//!     fn replay_is_deterministic(script in registration_script(8)) {
//!         let a = apply_script(&script);
//!         let b = apply_script(&script);
//!         prop_assert_eq!(a.snapshot(), b.snapshot());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use warden_testkit::fixtures::RegistryFixture;
//!
//! let fixture = RegistryFixture::user_management();
//! assert_eq!(fixture.registry.permissions_for("Group").len(), 5);
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::RegistryFixture;
pub use generators::{apply_script, registration_script, Registration};
