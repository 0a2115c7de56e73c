/*!
Output records and the final formatting step for a consensus.
*/

use std::io::Write;

use crate::vote::GAP_SYMBOL;

/// Description used when the consensus keeps its gaps
pub const GAPPED_DESCRIPTION: &str = "consensus";
/// Description used when gaps are stripped from the consensus
pub const STRIPPED_DESCRIPTION: &str = "gap stripped consensus";

/// A named sequence ready for a sequence sink.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SequenceRecord {
    id: String,
    name: String,
    description: String,
    sequence: Vec<u8>
}

impl SequenceRecord {
    /// Constructor
    pub fn new(id: String, name: String, description: String, sequence: Vec<u8>) -> SequenceRecord {
        SequenceRecord {
            id,
            name,
            description,
            sequence
        }
    }

    /// Writes the record as a single FASTA entry, with the sequence on one line
    /// # Arguments
    /// * `writer` - the output sink
    /// # Errors
    /// * if the writer fails
    pub fn write_fasta<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        if self.description.is_empty() {
            writeln!(writer, ">{}", self.id)?;
        } else {
            writeln!(writer, ">{} {}", self.id, self.description)?;
        }
        writer.write_all(&self.sequence)?;
        writeln!(writer)
    }

    // Getters
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }
}

/// Removes every gap symbol, preserving the order of everything else
pub fn strip_gaps(sequence: &[u8]) -> Vec<u8> {
    sequence.iter()
        .cloned()
        .filter(|&s| s != GAP_SYMBOL)
        .collect()
}

/// Builds the single output record for a run.
/// # Arguments
/// * `consensus_id` - identifier for the record
/// * `consensus` - the voted consensus, one symbol per matrix position
/// * `keep_gaps` - if false, gaps are removed
pub fn format_consensus(consensus_id: &str, consensus: &[u8], keep_gaps: bool) -> SequenceRecord {
    let (description, sequence) = if keep_gaps {
        (GAPPED_DESCRIPTION, consensus.to_vec())
    } else {
        (STRIPPED_DESCRIPTION, strip_gaps(consensus))
    };
    SequenceRecord::new(
        consensus_id.to_string(),
        "consensus".to_string(),
        description.to_string(),
        sequence
    )
}
