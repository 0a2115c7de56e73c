/*!
Abstraction over anything that can hand out aligned records, e.g. an indexed alignment file reader.
The consensus engine only ever drains a source inside a single call, so any handle a source holds is dropped when that call returns.
*/

use crate::aligned_record::AlignedRecord;
use crate::error::ConsensusError;

/// Iterator type handed out by a source
pub type RecordIter<'a> = Box<dyn Iterator<Item = Result<AlignedRecord, ConsensusError>> + 'a>;

/// A provider of aligned records.
pub trait AlignmentSource {
    /// Opens the source for iteration.
    /// # Errors
    /// * `SourceUnavailable` if the underlying data cannot be opened; individual items may also fail while iterating
    fn records(&mut self) -> Result<RecordIter<'_>, ConsensusError>;
}

/// A source backed by records already in memory, can be iterated repeatedly.
#[derive(Clone, Debug, Default)]
pub struct VecSource {
    records: Vec<AlignedRecord>
}

impl VecSource {
    pub fn new(records: Vec<AlignedRecord>) -> VecSource {
        VecSource {
            records
        }
    }

    pub fn records_ref(&self) -> &[AlignedRecord] {
        &self.records
    }
}

impl AlignmentSource for VecSource {
    fn records(&mut self) -> Result<RecordIter<'_>, ConsensusError> {
        Ok(Box::new(self.records.iter().cloned().map(Ok)))
    }
}

/// A single-pass source wrapping any fallible iterator, such as a streaming file reader.
/// Once drained, it reports itself as unavailable.
#[derive(Debug)]
pub struct IterSource<I> {
    iter: Option<I>
}

impl<I> IterSource<I>
where
    I: Iterator<Item = Result<AlignedRecord, ConsensusError>>
{
    pub fn new(iter: I) -> IterSource<I> {
        IterSource {
            iter: Some(iter)
        }
    }
}

impl<I> AlignmentSource for IterSource<I>
where
    I: Iterator<Item = Result<AlignedRecord, ConsensusError>>
{
    fn records(&mut self) -> Result<RecordIter<'_>, ConsensusError> {
        match self.iter.take() {
            Some(iter) => Ok(Box::new(iter)),
            None => Err(ConsensusError::SourceUnavailable("single-pass source was already consumed".to_string()))
        }
    }
}
