//! Winner selection by a truncated Knuth (Fisher-Yates) shuffle.
//!
//! The shuffled array `A[i] = i` for `i < n` is never allocated: positions that
//! have been swapped into live in a [`SparseOverlay`], every other position holds
//! its own index. At most `k <= 34` swaps happen, so the overlay stays tiny even
//! when `n` is close to `2^32`.

pub mod error;
pub mod overlay;
pub mod shuffle;

pub use error::SelectionError;
pub use overlay::{SparseOverlay, DEFAULT_BUCKETS};
pub use shuffle::{select_winners, SparseShuffle};
