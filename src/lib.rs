/*!
# refine_con
This library rebuilds a single consensus sequence from reads that were independently aligned to a shared reference, typically to produce a refined reference for a second alignment pass.

Key steps:
* Every read is rebuilt into reference-indexed columns, keeping soft-clipped prefixes and insertions
* Columns are padded to a common width so that all rows form a rectangular multiple sequence alignment
* Optionally, insertion columns are padded into groups of 3 so a codon-based consumer stays in frame
* Each position is decided by majority vote with a fixed A > C > G > T > gap > N tie-break

Alignment itself is not done here; records come from an `AlignmentSource` or are added directly.

# Example usage
```rust
use refine_con::cigar::record_from_cigar;
use refine_con::consensus::MsaConsensus;
use refine_con::consensus_config::ConsensusConfigBuilder;

let records = [
    record_from_cigar("r1".to_string(), b"ACGTA".to_vec(), 0, "5M").unwrap(),
    // inserts a G after reference position 1, deletes the last position
    record_from_cigar("r2".to_string(), b"ACGTA".to_vec(), 0, "2M1I2M1D").unwrap()
];

let config = ConsensusConfigBuilder::default()
    .keep_gaps(true)
    .build()
    .unwrap();
let mut msa_consensus = MsaConsensus::with_config(config);
for r in records.into_iter() {
    msa_consensus.add_record(r);
}

let consensus = msa_consensus.consensus().unwrap();
assert_eq!(consensus.matrix().widths(), &[0, 1, 2, 1, 1, 1]);
assert_eq!(consensus.record().sequence(), b"ACGGAA");
```
*/

/// Input records and aligned pairs
pub mod aligned_record;
/// Abstract providers of aligned records
pub mod alignment_source;
/// CIGAR parsing and expansion into alignment paths
pub mod cigar;
/// Main functionality for the consensus component
pub mod consensus;
/// Configuration for MsaConsensus
pub mod consensus_config;
/// Error kinds for a consensus run
pub mod error;
/// Utility for generating examples
pub mod example_gen;
/// Column width reconciliation and insertion frame correction
pub mod padded_matrix;
/// Sizing of the shared reference frame
pub mod reference_frame;
/// Rebuilding a single record into reference columns
pub mod row_reconstruction;
/// Output records and gap stripping
pub mod sequence_record;
/// Per-position majority vote
pub mod vote;
