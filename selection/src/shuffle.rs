//! Truncated Fisher-Yates over an implicit array.
//!
//! Positions are consumed from the tail: at step `i = n-1, n-2, ...` a uniform `j`
//! in `[0, i]` is drawn, the value at `j` is emitted as the next winner and the value
//! at `i` is moved into `j`. Position `i` is never read again, so it is not written
//! back.

use shuffle_pcg::Pcg128;
use shuffle_types::SelectionParams;

use crate::overlay::SparseOverlay;
use crate::SelectionError;

/// Stateful partial shuffle of `0..participants`.
#[derive(Clone, Debug)]
pub struct SparseShuffle {
    rng: Pcg128,
    overlay: SparseOverlay,
    participants: u32,
    /// Positions `0..remaining` are still in the pool.
    remaining: u32,
}

impl SparseShuffle {
    pub fn new(rng: Pcg128, participants: u32) -> Self {
        Self::with_overlay(rng, participants, SparseOverlay::default())
    }

    pub fn with_overlay(rng: Pcg128, participants: u32, overlay: SparseOverlay) -> Self {
        Self {
            rng,
            overlay,
            participants,
            remaining: participants,
        }
    }

    pub fn participants(&self) -> u32 {
        self.participants
    }

    /// Participants not yet drawn.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn overlay(&self) -> &SparseOverlay {
        &self.overlay
    }

    /// Draw the next winner, or `None` once every participant has been drawn.
    ///
    /// The last position (`i == 0`) is read directly: a range of one value would
    /// not consume any randomness worth drawing.
    pub fn next_winner(&mut self) -> Result<Option<u32>, SelectionError> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let i = self.remaining - 1;
        let j = if i == 0 {
            0
        } else {
            // `below(i + 1)` is strictly less than `i + 1 <= u32::MAX`.
            self.rng.below(u128::from(i) + 1)? as u32
        };

        let value_i = self.overlay.lookup(i);
        let value_j = self.overlay.lookup(j);
        if j != i {
            self.overlay.set(j, value_i);
        }
        self.remaining = i;
        Ok(Some(value_j))
    }

    /// Draw `winners` more winners in draw order.
    pub fn draw(&mut self, winners: u32) -> Result<Vec<u32>, SelectionError> {
        if winners > self.remaining {
            return Err(SelectionError::TooManyWinners {
                winners,
                participants: self.remaining,
            });
        }
        let mut out = Vec::with_capacity(winners as usize);
        for _ in 0..winners {
            match self.next_winner()? {
                Some(w) => out.push(w),
                None => break,
            }
        }
        Ok(out)
    }
}

/// Select the winners of a draw from a 32-byte seed.
///
/// Pure function of `(seed, params)`: anyone holding the seed can replay it.
pub fn select_winners(
    seed: &[u8; 32],
    params: SelectionParams,
) -> Result<Vec<u32>, SelectionError> {
    let mut shuffle = SparseShuffle::new(Pcg128::from_seed(seed), params.participants());
    shuffle.draw(u32::from(params.winners()))
}
