use log::debug;

use crate::aligned_record::AlignedRecord;
use crate::error::ConsensusError;

/// The shared reference coordinate system.
/// Column 0 holds prefix (soft-clipped) bases, columns `1..=frame_length` map to reference positions `0..frame_length`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReferenceFrame {
    frame_length: usize
}

impl ReferenceFrame {
    /// Sizes the frame to the farthest last reachable reference position across all records.
    /// Trailing insertions and soft-clips do not extend the frame.
    /// # Arguments
    /// * `records` - all records for the run
    /// # Errors
    /// * `EmptyInputSet` if there are no records
    pub fn from_records(records: &[AlignedRecord]) -> Result<ReferenceFrame, ConsensusError> {
        let max_reference = records.iter()
            .map(|r| r.last_reference_index())
            .max()
            .ok_or(ConsensusError::EmptyInputSet)?;
        let frame_length = max_reference + 1;
        debug!("Reference frame length: {frame_length}");
        Ok(ReferenceFrame {
            frame_length
        })
    }

    /// Number of reference positions covered by the frame
    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    /// Number of columns in a reconstructed row, including the prefix column
    pub fn num_columns(&self) -> usize {
        self.frame_length + 1
    }
}
