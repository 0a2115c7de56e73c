/*!
This module provides access to the MsaConsensus, which rebuilds a consensus from a set of alignments against a shared reference.

# Example usage
```rust
use refine_con::cigar::record_from_cigar;
use refine_con::consensus::MsaConsensus;

let records = [
    record_from_cigar("r1".to_string(), b"ACGTA".to_vec(), 0, "5M").unwrap(),
    record_from_cigar("r2".to_string(), b"ACGTA".to_vec(), 0, "5M").unwrap(),
    record_from_cigar("r3".to_string(), b"ACCTA".to_vec(), 0, "5M").unwrap()
];

// add all the records
let mut msa_consensus: MsaConsensus = Default::default();
for r in records.into_iter() {
    msa_consensus.add_record(r);
}

// run consensus and check the results
let consensus = msa_consensus.consensus().unwrap();
assert_eq!(consensus.record().sequence(), b"ACGTA");
assert_eq!(consensus.matrix().widths(), &[0, 1, 1, 1, 1, 1]);
```
*/

use log::debug;

use crate::aligned_record::AlignedRecord;
use crate::alignment_source::AlignmentSource;
use crate::consensus_config::ConsensusConfig;
use crate::error::ConsensusError;
use crate::padded_matrix::PaddedMatrix;
use crate::reference_frame::ReferenceFrame;
use crate::row_reconstruction::reconstruct_rows;
use crate::sequence_record::{format_consensus, SequenceRecord};
use crate::vote::vote_matrix;

/// Contains a final consensus result
#[derive(Clone, Debug, PartialEq)]
pub struct Consensus {
    /// The formatted output record
    record: SequenceRecord,
    /// The voted consensus with one symbol per matrix position, gaps included
    gapped_sequence: Vec<u8>,
    /// The matrix the consensus was voted from
    matrix: PaddedMatrix
}

impl Consensus {
    /// Returns every padded row as a record, giving the multiple sequence alignment the consensus came from
    pub fn msa_records(&self) -> Vec<SequenceRecord> {
        self.matrix.rows().iter()
            .zip(self.matrix.row_strings())
            .map(|(row, sequence)| SequenceRecord::new(
                row.query_id().to_string(),
                row.query_id().to_string(),
                String::new(),
                sequence
            ))
            .collect()
    }

    // Getters
    pub fn record(&self) -> &SequenceRecord {
        &self.record
    }

    pub fn gapped_sequence(&self) -> &[u8] {
        &self.gapped_sequence
    }

    pub fn matrix(&self) -> &PaddedMatrix {
        &self.matrix
    }
}

/// Core utility that generates a consensus from pre-computed alignments.
/// All records must share the same reference coordinates.
#[derive(Debug, Default)]
pub struct MsaConsensus {
    /// Contains all the records that have been added so far
    records: Vec<AlignedRecord>,
    /// The config for this consensus run
    config: ConsensusConfig
}

impl MsaConsensus {
    /// Creates a new instance of MsaConsensus.
    /// # Arguments
    /// * `config` - the configuration for the run
    pub fn with_config(config: ConsensusConfig) -> MsaConsensus {
        MsaConsensus {
            records: vec![],
            config
        }
    }

    /// Creates a new instance and drains every record from a source.
    /// The source is owned by this call, so whatever it holds is released before returning, even on failure.
    /// # Arguments
    /// * `source` - the record provider
    /// * `config` - the configuration for the run
    /// # Errors
    /// * if the source cannot be opened or yields an error
    pub fn from_source<S: AlignmentSource>(mut source: S, config: ConsensusConfig) -> Result<MsaConsensus, ConsensusError> {
        let mut msa_consensus = MsaConsensus::with_config(config);
        msa_consensus.add_source(&mut source)?;
        Ok(msa_consensus)
    }

    /// Adds a new record to the list
    /// # Arguments
    /// * `record` - the validated record to add
    pub fn add_record(&mut self, record: AlignedRecord) {
        self.records.push(record);
    }

    /// Adds every record from a source, returning how many were added.
    /// # Arguments
    /// * `source` - the record provider
    /// # Errors
    /// * if the source cannot be opened or yields an error; records read before the failure are discarded
    pub fn add_source<S: AlignmentSource + ?Sized>(&mut self, source: &mut S) -> Result<usize, ConsensusError> {
        let loaded = source.records()?.collect::<Result<Vec<AlignedRecord>, ConsensusError>>()?;
        let count = loaded.len();
        self.records.extend(loaded);
        debug!("Loaded {count} records from source");
        Ok(count)
    }

    /// The core function that gets called after adding all the records we care about
    /// # Errors
    /// * `EmptyInputSet` if no records were added
    pub fn consensus(&self) -> Result<Consensus, ConsensusError> {
        if self.records.is_empty() {
            return Err(ConsensusError::EmptyInputSet);
        }
        debug!("Building consensus from {} records", self.records.len());

        let frame = ReferenceFrame::from_records(&self.records)?;
        let rows = reconstruct_rows(&self.records);
        let mut matrix = PaddedMatrix::new(rows, &frame)?;
        if self.config.insert_groups_mode {
            matrix.apply_insert_groups();
        }

        let gapped_sequence = vote_matrix(&matrix, self.config.threshold_mode);
        let record = format_consensus(&self.config.consensus_id, &gapped_sequence, self.config.keep_gaps);
        debug!("Consensus length: {} ({} with gaps)", record.sequence().len(), gapped_sequence.len());

        Ok(Consensus {
            record,
            gapped_sequence,
            matrix
        })
    }

    // getters
    pub fn records(&self) -> &[AlignedRecord] {
        &self.records
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }
}

/// Runs a full consensus over a source in one call.
/// # Arguments
/// * `source` - the record provider, dropped before this returns
/// * `config` - the configuration for the run
/// # Errors
/// * `SourceUnavailable` if the source fails
/// * `MalformedAlignmentPath` if the source yields a bad record
/// * `EmptyInputSet` if the source is empty
pub fn run_consensus<S: AlignmentSource>(source: S, config: ConsensusConfig) -> Result<Consensus, ConsensusError> {
    MsaConsensus::from_source(source, config)?.consensus()
}
