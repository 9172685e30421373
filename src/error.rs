//! Error taxonomy for HAMT operations.

use thiserror::Error;

/// Errors returned by fallible [`Hamt`](crate::Hamt) operations.
///
/// Two failure kinds named by the node-algebra design have no runtime
/// counterpart here:
///
/// - *Unhashable key*: the `Hash` trait bound on every write path makes an
///   unhashable key a compile-time error rather than something a caller can
///   observe at runtime.
/// - *Structural invariant violation*: internal bugs in the node algebra
///   (e.g. a `BitmapNode` whose `popcount` disagrees with its slot count)
///   are asserted with `debug_assert!` at the point they'd occur, not
///   surfaced as a variant here — they must never be reachable on correct
///   input, so there is nothing for a caller to recover from.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum HamtError {
    /// The requested key is not present in the container.
    #[error("key not found")]
    KeyMissing,
}
