//! # canonid testkit
//!
//! Testing utilities for canonid.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known inputs with pinned canonical forms and SHA-256
//!   digests for cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Record shapes (audit entries, credentials, cyclic graphs)
//!
//! ## Golden Vectors
//!
//! ```rust
//! use canonid_testkit::vectors::verify_all_vectors;
//!
//! for (name, passed, detail) in verify_all_vectors() {
//!     assert!(passed, "{}: {}", name, detail);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use canonid_testkit::generators::value_and_shuffled;
//!
//! proptest! {
//!     #[test]
//!     fn key_order_is_irrelevant((v, shuffled) in value_and_shuffled()) {
//!         prop_assert_eq!(canonid::digest(&v)?, canonid::digest(&shuffled)?);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use canonid_testkit::fixtures::credential;
//!
//! let cred = credential("alice", "seal-hub", "auditor", 3);
//! let id = canonid::identifier("cred", &cred).unwrap();
//! assert_eq!(id.as_str(), "cred_ee574069e7ae7e468a82c97da774e7e3");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    audit_entry, break_cycle, credential, cyclic_graph, deep_chain, shared_graph, wide_record,
};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
