//! A bidirectional multi-map where every association can be looked up from both of its elements

#![deny(unused_imports, missing_debug_implementations, unreachable_pub)]
#![cfg_attr(doc, deny(missing_docs, rustdoc::broken_intra_doc_links))]
#![warn(rust_2018_idioms)]

/// The main data struct
pub mod symmetric_multimap;
pub use crate::symmetric_multimap::*;

/// Read-only views over sets
pub mod readonly_set;
pub use crate::readonly_set::*;

#[cfg(feature = "serde")]
mod serde;
