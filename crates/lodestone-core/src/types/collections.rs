//! Hash collections keyed by short strings and paths.
//!
//! FxHash beats SipHash for the small keys this engine uses everywhere
//! (file paths, symbol names, query words). Not DoS-resistant; all keys
//! come from the local project, never from untrusted input.

pub use rustc_hash::{FxHashMap, FxHashSet};
