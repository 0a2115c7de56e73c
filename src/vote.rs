/*!
Per-position majority vote over the padded matrix.
Ties are always broken by the fixed priority in `VOTE_PRIORITY`, never by row order.

# Example usage
```rust
use refine_con::vote::SymbolCounts;

// A and C tie, A has priority
let counts = SymbolCounts { a: 3, c: 3, ..Default::default() };
assert_eq!(counts.vote(false, false), b'A');
```
*/

use itertools::Itertools;
use log::{debug, trace};
use std::cmp::Reverse;

use crate::padded_matrix::PaddedMatrix;

/// Symbol used for gaps in rows and in the gap-retaining consensus
pub const GAP_SYMBOL: u8 = b'-';
/// Ambiguous base, produced by insert groups and by N-majority positions
pub const AMBIGUOUS_SYMBOL: u8 = b'N';
/// Marker emitted when the very first position of the matrix is gap-majority (threshold mode off)
pub const AMBIGUOUS_START_SYMBOL: u8 = b'*';
/// In threshold mode, a gap-majority position only emits a gap if the gap fraction is at least `1 - GAP_THRESHOLD`
pub const GAP_THRESHOLD: f64 = 0.05;
/// Tie-break order for the vote, earlier symbols win ties against all later ones
pub const VOTE_PRIORITY: [u8; 6] = [b'A', b'C', b'G', b'T', GAP_SYMBOL, AMBIGUOUS_SYMBOL];

/// Returns true if the symbol is one of A, C, G, or T (any case)
pub fn is_real_base(symbol: u8) -> bool {
    matches!(symbol.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T')
}

/// Tally of the six voting classes at one position; anything else is ignored.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SymbolCounts {
    pub a: usize,
    pub c: usize,
    pub g: usize,
    pub t: usize,
    pub gap: usize,
    pub n: usize
}

impl SymbolCounts {
    /// Tallies a collection of symbols
    pub fn from_symbols(symbols: impl Iterator<Item = u8>) -> SymbolCounts {
        let mut counts = SymbolCounts::default();
        for s in symbols {
            counts.add(s);
        }
        counts
    }

    /// Adds one observation, case-insensitive for bases
    pub fn add(&mut self, symbol: u8) {
        match symbol.to_ascii_uppercase() {
            b'A' => self.a += 1,
            b'C' => self.c += 1,
            b'G' => self.g += 1,
            b'T' => self.t += 1,
            GAP_SYMBOL => self.gap += 1,
            AMBIGUOUS_SYMBOL => self.n += 1,
            _ => {}
        }
    }

    /// Counts in `VOTE_PRIORITY` order
    pub fn ordered(&self) -> [usize; 6] {
        [self.a, self.c, self.g, self.t, self.gap, self.n]
    }

    /// Fraction of gap among gaps plus real bases, N is not part of the denominator
    pub fn gap_fraction(&self) -> f64 {
        let total = self.gap + self.a + self.c + self.g + self.t;
        if total == 0 {
            0.0
        } else {
            self.gap as f64 / total as f64
        }
    }

    /// Picks the consensus symbol for this position.
    /// Walks `VOTE_PRIORITY` and takes the first symbol whose count is at least every count after it.
    /// # Arguments
    /// * `threshold_mode` - if true, a gap winner below the gap threshold is replaced by the most frequent of A, C, G, T, N
    /// * `is_first_position` - true only for the very first sub-position of the matrix
    pub fn vote(&self, threshold_mode: bool, is_first_position: bool) -> u8 {
        let ordered = self.ordered();
        let winner = (0..ordered.len())
            .find(|&i| ordered[i+1..].iter().all(|&c| ordered[i] >= c))
            .unwrap_or(ordered.len() - 1);

        let symbol = VOTE_PRIORITY[winner];
        if symbol != GAP_SYMBOL {
            if symbol == AMBIGUOUS_SYMBOL {
                trace!("N selected: {:?}", self);
            }
            return symbol;
        }

        if threshold_mode {
            if self.gap_fraction() < 1.0 - GAP_THRESHOLD {
                // first maximum wins, so ties keep the A > C > G > T > N order
                let non_gap = [b'A', b'C', b'G', b'T', AMBIGUOUS_SYMBOL];
                let counts = [self.a, self.c, self.g, self.t, self.n];
                let best = counts.iter()
                    .position_min_by_key(|&&c| Reverse(c))
                    .unwrap_or(0);
                trace!("Gap threshold reached: {:?}", self);
                non_gap[best]
            } else {
                GAP_SYMBOL
            }
        } else if is_first_position {
            AMBIGUOUS_START_SYMBOL
        } else {
            GAP_SYMBOL
        }
    }
}

/// Votes every sub-position of the matrix, columns in order and sub-positions in order within a column.
/// # Arguments
/// * `matrix` - the rectangular matrix
/// * `threshold_mode` - enables the gap threshold carve-out
pub fn vote_matrix(matrix: &PaddedMatrix, threshold_mode: bool) -> Vec<u8> {
    let mut consensus = Vec::with_capacity(matrix.total_width());
    for (column, &width) in matrix.widths().iter().enumerate() {
        for offset in 0..width {
            let counts = SymbolCounts::from_symbols(
                matrix.rows().iter().map(|row| row.cells()[column][offset])
            );
            let is_first_position = consensus.is_empty();
            consensus.push(counts.vote(threshold_mode, is_first_position));
        }
    }
    debug!("Voted {} consensus positions", consensus.len());
    consensus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(VOTE_PRIORITY, *b"ACGT-N");
        assert_eq!(GAP_THRESHOLD, 0.05);
        assert_eq!(GAP_SYMBOL, b'-');
        assert_eq!(AMBIGUOUS_START_SYMBOL, b'*');
    }

    #[test]
    fn test_counting() {
        let counts = SymbolCounts::from_symbols(b"AaCgT--NnX*".iter().cloned());
        assert_eq!(counts, SymbolCounts { a: 2, c: 1, g: 1, t: 1, gap: 2, n: 2 });
    }

    #[test]
    fn test_priority_ties() {
        let counts = SymbolCounts { a: 3, c: 3, ..Default::default() };
        assert_eq!(counts.vote(false, false), b'A');

        let counts = SymbolCounts { c: 2, g: 2, t: 2, ..Default::default() };
        assert_eq!(counts.vote(false, false), b'C');

        let counts = SymbolCounts { g: 1, t: 1, gap: 1, n: 1, ..Default::default() };
        assert_eq!(counts.vote(false, false), b'G');

        let counts = SymbolCounts { t: 4, gap: 4, n: 4, a: 1, ..Default::default() };
        assert_eq!(counts.vote(false, false), b'T');

        // a base always beats an equal number of gaps
        let counts = SymbolCounts { a: 1, gap: 1, ..Default::default() };
        assert_eq!(counts.vote(false, false), b'A');

        // all zero, A is the first rung
        assert_eq!(SymbolCounts::default().vote(false, false), b'A');
    }

    #[test]
    fn test_gap_and_n() {
        let counts = SymbolCounts { a: 1, gap: 2, n: 2, ..Default::default() };
        assert_eq!(counts.vote(false, false), b'-');

        let counts = SymbolCounts { a: 1, gap: 2, n: 3, ..Default::default() };
        assert_eq!(counts.vote(false, false), b'N');
        assert_eq!(counts.vote(true, true), b'N');
    }

    #[test]
    fn test_ambiguous_start() {
        let counts = SymbolCounts { gap: 2, a: 1, ..Default::default() };
        assert_eq!(counts.vote(false, true), AMBIGUOUS_START_SYMBOL);
        assert_eq!(counts.vote(false, false), GAP_SYMBOL);
    }

    #[test]
    fn test_threshold() {
        // 1 row, all gap
        let counts = SymbolCounts { gap: 1, ..Default::default() };
        assert_eq!(counts.gap_fraction(), 1.0);
        assert_eq!(counts.vote(true, false), b'-');
        // threshold mode never emits the start marker
        assert_eq!(counts.vote(true, true), b'-');

        // 20 rows, 19 A
        let counts = SymbolCounts { gap: 1, a: 19, ..Default::default() };
        assert_eq!(counts.gap_fraction(), 0.05);
        assert_eq!(counts.vote(true, false), b'A');

        // gap-majority but below 95%, falls back to the best base with priority ties
        let counts = SymbolCounts { gap: 10, c: 1, g: 1, ..Default::default() };
        assert!(counts.gap_fraction() < 1.0 - GAP_THRESHOLD);
        assert_eq!(counts.vote(true, false), b'C');
        assert_eq!(counts.vote(false, false), b'-');

        // exactly at 95% is still a gap
        let counts = SymbolCounts { gap: 19, t: 1, ..Default::default() };
        assert_eq!(counts.vote(true, false), b'-');
    }
}
