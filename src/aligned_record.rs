/*!
Core input types: a single aligned pair and the full alignment path of one query against the shared reference.
Records are validated on construction, so every downstream phase can assume a well-formed path.

# Example usage
```rust
use refine_con::aligned_record::{AlignedPair, AlignedRecord};

// query "ACGT" with the "G" inserted after reference position 1
let record = AlignedRecord::new(
    "read_1".to_string(),
    b"ACGT".to_vec(),
    vec![
        AlignedPair::matched(0, 0),
        AlignedPair::matched(1, 1),
        AlignedPair::insertion(2),
        AlignedPair::matched(3, 2)
    ]
).unwrap();
assert_eq!(record.last_reference_index(), 2);
```
*/

use crate::error::ConsensusError;

/// One step of an alignment path.
/// At most one coordinate is absent: no reference index is an insertion (or soft-clip), no query index is a deletion.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AlignedPair {
    query_index: Option<usize>,
    reference_index: Option<usize>
}

impl AlignedPair {
    /// General constructor, allows any combination so that validation can happen at the record level
    pub fn new(query_index: Option<usize>, reference_index: Option<usize>) -> AlignedPair {
        AlignedPair {
            query_index,
            reference_index
        }
    }

    /// A match or mismatch between a query base and a reference position
    pub fn matched(query_index: usize, reference_index: usize) -> AlignedPair {
        AlignedPair::new(Some(query_index), Some(reference_index))
    }

    /// A query base with no reference position
    pub fn insertion(query_index: usize) -> AlignedPair {
        AlignedPair::new(Some(query_index), None)
    }

    /// A reference position with no query base
    pub fn deletion(reference_index: usize) -> AlignedPair {
        AlignedPair::new(None, Some(reference_index))
    }

    // Getters
    pub fn query_index(&self) -> Option<usize> {
        self.query_index
    }

    pub fn reference_index(&self) -> Option<usize> {
        self.reference_index
    }
}

/// A query sequence with its full alignment path against the reference.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedRecord {
    /// Identifier for the query, used in error reporting and MSA output
    query_id: String,
    /// The query bases
    sequence: Vec<u8>,
    /// Ordered alignment path, monotonic in both coordinates
    path: Vec<AlignedPair>,
    /// Index into `path` of the first pair with a reference coordinate
    first_reference_pair: usize,
    /// Index into `path` of the last pair with a reference coordinate
    last_reference_pair: usize
}

impl AlignedRecord {
    /// Creates a new record and verifies the alignment path against the sequence.
    /// # Arguments
    /// * `query_id` - the query identifier
    /// * `sequence` - the query bases
    /// * `path` - the ordered alignment path
    /// # Errors
    /// * if no pair carries a reference coordinate
    /// * if a pair has neither coordinate
    /// * if either coordinate repeats or decreases along the path; repeated coordinates are rejected on purpose since two pairs sharing a coordinate would collide in the column layout
    /// * if the query coordinates do not cover the sequence exactly once
    pub fn new(query_id: String, sequence: Vec<u8>, path: Vec<AlignedPair>) -> Result<AlignedRecord, ConsensusError> {
        let mut first_reference_pair: Option<usize> = None;
        let mut last_reference_pair: Option<usize> = None;
        let mut previous_query: Option<usize> = None;
        let mut previous_reference: Option<usize> = None;
        let mut query_count: usize = 0;

        for (pair_index, pair) in path.iter().enumerate() {
            if pair.query_index.is_none() && pair.reference_index.is_none() {
                return Err(ConsensusError::malformed(&query_id, format!("pair {pair_index} has neither a query nor a reference coordinate")));
            }

            if let Some(qi) = pair.query_index {
                if previous_query.map_or(false, |pq| qi <= pq) {
                    return Err(ConsensusError::malformed(&query_id, format!("query coordinate {qi} at pair {pair_index} is not increasing")));
                }
                if qi >= sequence.len() {
                    return Err(ConsensusError::malformed(&query_id, format!("query coordinate {qi} is outside a sequence of length {}", sequence.len())));
                }
                previous_query = Some(qi);
                query_count += 1;
            }

            if let Some(ri) = pair.reference_index {
                if previous_reference.map_or(false, |pr| ri <= pr) {
                    return Err(ConsensusError::malformed(&query_id, format!("reference coordinate {ri} at pair {pair_index} is not increasing")));
                }
                previous_reference = Some(ri);
                first_reference_pair.get_or_insert(pair_index);
                last_reference_pair = Some(pair_index);
            }
        }

        if query_count != sequence.len() {
            return Err(ConsensusError::malformed(&query_id, format!("path covers {query_count} query bases, but the sequence has {}", sequence.len())));
        }

        let (first_reference_pair, last_reference_pair) = match (first_reference_pair, last_reference_pair) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(ConsensusError::malformed(&query_id, "no pair has a reference coordinate"))
        };

        Ok(AlignedRecord {
            query_id,
            sequence,
            path,
            first_reference_pair,
            last_reference_pair
        })
    }

    /// Returns the query base for a pair, or None if the pair is a deletion
    pub fn query_base(&self, pair: &AlignedPair) -> Option<u8> {
        // validated on construction, so the index is always in range
        pair.query_index.map(|qi| self.sequence[qi])
    }

    /// Returns the reference position of the last reference-bearing pair
    pub fn last_reference_index(&self) -> usize {
        self.reference_at(self.last_reference_pair)
    }

    /// Returns the reference position of the first reference-bearing pair
    pub fn first_reference_index(&self) -> usize {
        self.reference_at(self.first_reference_pair)
    }

    fn reference_at(&self, pair_index: usize) -> usize {
        // both cached indices point at reference-bearing pairs
        self.path[pair_index].reference_index.unwrap_or_default()
    }

    // Getters
    pub fn query_id(&self) -> &str {
        &self.query_id
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn path(&self) -> &[AlignedPair] {
        &self.path
    }

    pub fn first_reference_pair(&self) -> usize {
        self.first_reference_pair
    }

    pub fn last_reference_pair(&self) -> usize {
        self.last_reference_pair
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_reference_bounds() {
        // soft-clip, 3 matches with a deletion, then a trailing soft-clip
        let record = AlignedRecord::new(
            "r".to_string(),
            b"TACGA".to_vec(),
            vec![
                AlignedPair::insertion(0),
                AlignedPair::matched(1, 4),
                AlignedPair::deletion(5),
                AlignedPair::matched(2, 6),
                AlignedPair::matched(3, 7),
                AlignedPair::insertion(4)
            ]
        ).unwrap();
        assert_eq!(record.first_reference_pair(), 1);
        assert_eq!(record.last_reference_pair(), 4);
        assert_eq!(record.first_reference_index(), 4);
        assert_eq!(record.last_reference_index(), 7);
        assert_eq!(record.query_base(&record.path()[2]), None);
        assert_eq!(record.query_base(&record.path()[3]), Some(b'C'));
    }

    #[test]
    fn test_no_reference_pairs() {
        let result = AlignedRecord::new(
            "all_clip".to_string(),
            b"AC".to_vec(),
            vec![AlignedPair::insertion(0), AlignedPair::insertion(1)]
        );
        assert_eq!(result, Err(ConsensusError::malformed("all_clip", "no pair has a reference coordinate")));
    }

    #[test]
    fn test_empty_path() {
        let result = AlignedRecord::new("empty".to_string(), vec![], vec![]);
        assert!(matches!(result, Err(ConsensusError::MalformedAlignmentPath { .. })));
    }

    #[test]
    fn test_non_monotonic() {
        let result = AlignedRecord::new(
            "backwards".to_string(),
            b"AC".to_vec(),
            vec![AlignedPair::matched(0, 3), AlignedPair::matched(1, 2)]
        );
        assert!(matches!(result, Err(ConsensusError::MalformedAlignmentPath { .. })));

        let result = AlignedRecord::new(
            "repeat_query".to_string(),
            b"AC".to_vec(),
            vec![AlignedPair::matched(0, 0), AlignedPair::matched(0, 1)]
        );
        assert!(matches!(result, Err(ConsensusError::MalformedAlignmentPath { .. })));

        // non-decreasing is not enough, a repeated reference index is rejected
        let result = AlignedRecord::new(
            "repeat_reference".to_string(),
            b"AC".to_vec(),
            vec![AlignedPair::matched(0, 1), AlignedPair::matched(1, 1)]
        );
        assert!(matches!(result, Err(ConsensusError::MalformedAlignmentPath { .. })));
    }

    #[test]
    fn test_sequence_coverage() {
        // the path never visits the last base
        let result = AlignedRecord::new(
            "short_path".to_string(),
            b"ACG".to_vec(),
            vec![AlignedPair::matched(0, 0), AlignedPair::matched(1, 1)]
        );
        assert!(matches!(result, Err(ConsensusError::MalformedAlignmentPath { .. })));

        // the path points past the end
        let result = AlignedRecord::new(
            "long_path".to_string(),
            b"A".to_vec(),
            vec![AlignedPair::matched(0, 0), AlignedPair::matched(1, 1)]
        );
        assert!(matches!(result, Err(ConsensusError::MalformedAlignmentPath { .. })));
    }

    #[test]
    fn test_empty_pair() {
        let result = AlignedRecord::new(
            "bad_pair".to_string(),
            b"A".to_vec(),
            vec![AlignedPair::matched(0, 0), AlignedPair::new(None, None)]
        );
        assert!(matches!(result, Err(ConsensusError::MalformedAlignmentPath { .. })));
    }
}
