//! Pure recursive trie operations: `find`, `assoc`, `without`.

pub mod get;
pub mod insert;
pub mod remove;
