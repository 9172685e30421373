//! Test suite, split by concern.

mod basic;
mod stress;
mod traits;
