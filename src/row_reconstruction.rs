/*!
Converts one alignment path into a ragged row of reference-indexed cells.
Each cell holds the base (or gap) at one reference position followed by any bases the query inserts before the next reference position.
Rows are independent of each other, so they are reconstructed in parallel.
*/

use log::debug;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::aligned_record::AlignedRecord;
use crate::vote::GAP_SYMBOL;

/// One record rebuilt into reference columns.
/// Cell 0 holds the prefix, cell `i` holds reference position `i-1` plus trailing insertions.
/// Rows may stop short of the frame; padding happens once all rows are known.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReconstructedRow {
    /// Identifier of the source record
    query_id: String,
    /// The ragged cells
    cells: Vec<Vec<u8>>
}

impl ReconstructedRow {
    /// Rebuilds a single record into cells.
    /// # Arguments
    /// * `record` - the validated record
    pub fn from_record(record: &AlignedRecord) -> ReconstructedRow {
        let path = record.path();
        let first_reference_pair = record.first_reference_pair();

        // prefix, everything before the first reference-bearing pair goes into cell 0
        let prefix: Vec<u8> = path[..first_reference_pair].iter()
            .map(|pair| record.query_base(pair).unwrap_or(GAP_SYMBOL))
            .collect();
        let mut cells: Vec<Vec<u8>> = vec![prefix];

        // this covers both the main body and the tail past the last reference position;
        // insertions always fold into the most recent reference column
        for pair in path[first_reference_pair..].iter() {
            let symbol = record.query_base(pair).unwrap_or(GAP_SYMBOL);
            match pair.reference_index() {
                Some(reference_index) => {
                    // leading gaps and any skipped reference positions
                    let column = reference_index + 1;
                    while cells.len() < column {
                        cells.push(vec![GAP_SYMBOL]);
                    }
                    cells.push(vec![symbol]);
                },
                None => {
                    let current = cells.len() - 1;
                    cells[current].push(symbol);
                }
            }
        }

        ReconstructedRow {
            query_id: record.query_id().to_string(),
            cells
        }
    }

    /// Extends the row with single-gap cells until it has `num_columns` cells
    pub fn extend_to(&mut self, num_columns: usize) {
        while self.cells.len() < num_columns {
            self.cells.push(vec![GAP_SYMBOL]);
        }
    }

    /// Right-pads every cell with gaps up to the matching width
    pub(crate) fn pad_to_widths(&mut self, widths: &[usize]) {
        debug_assert_eq!(self.cells.len(), widths.len());
        for (cell, &width) in self.cells.iter_mut().zip(widths.iter()) {
            cell.resize(width.max(cell.len()), GAP_SYMBOL);
        }
    }

    // Getters
    pub fn query_id(&self) -> &str {
        &self.query_id
    }

    pub fn cells(&self) -> &[Vec<u8>] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Vec<u8>] {
        &mut self.cells
    }
}

/// Reconstructs every record, preserving the input order.
/// # Arguments
/// * `records` - all records for the run
pub fn reconstruct_rows(records: &[AlignedRecord]) -> Vec<ReconstructedRow> {
    let rows: Vec<ReconstructedRow> = records
        .par_iter()
        .map(ReconstructedRow::from_record)
        .collect();
    debug!("Reconstructed {} rows", rows.len());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aligned_record::AlignedPair;
    use crate::cigar::record_from_cigar;

    fn cell_strings(row: &ReconstructedRow) -> Vec<String> {
        row.cells().iter()
            .map(|c| String::from_utf8(c.clone()).unwrap())
            .collect()
    }

    #[test]
    fn test_clean_match() {
        let record = record_from_cigar("r".to_string(), b"ACGTA".to_vec(), 0, "5M").unwrap();
        let row = ReconstructedRow::from_record(&record);
        assert_eq!(cell_strings(&row), vec!["", "A", "C", "G", "T", "A"]);
        assert_eq!(row.query_id(), "r");
    }

    #[test]
    fn test_prefix_and_leading_gaps() {
        // two soft-clipped bases, then the read starts at reference position 3
        let record = record_from_cigar("r".to_string(), b"TTACG".to_vec(), 3, "2S3M").unwrap();
        let row = ReconstructedRow::from_record(&record);
        assert_eq!(cell_strings(&row), vec!["TT", "-", "-", "-", "A", "C", "G"]);
    }

    #[test]
    fn test_insertion_folds_left() {
        let record = record_from_cigar("r".to_string(), b"ACGGT".to_vec(), 0, "2M2I1M").unwrap();
        let row = ReconstructedRow::from_record(&record);
        assert_eq!(cell_strings(&row), vec!["", "A", "CGG", "T"]);
    }

    #[test]
    fn test_deletions_and_tail() {
        // deletion in the middle, then a trailing insertion and soft-clip on the last base
        let record = record_from_cigar("r".to_string(), b"ACTGA".to_vec(), 0, "2M1D1M1I1S").unwrap();
        let row = ReconstructedRow::from_record(&record);
        assert_eq!(cell_strings(&row), vec!["", "A", "C", "-", "TGA"]);
    }

    #[test]
    fn test_skipped_reference_positions() {
        // a path may jump reference positions, those become gap cells
        let record = AlignedRecord::new(
            "jump".to_string(),
            b"AC".to_vec(),
            vec![AlignedPair::matched(0, 0), AlignedPair::matched(1, 3)]
        ).unwrap();
        let row = ReconstructedRow::from_record(&record);
        assert_eq!(cell_strings(&row), vec!["", "A", "-", "-", "C"]);
    }

    #[test]
    fn test_extend_and_pad() {
        let record = record_from_cigar("r".to_string(), b"AC".to_vec(), 0, "2M").unwrap();
        let mut row = ReconstructedRow::from_record(&record);
        row.extend_to(4);
        assert_eq!(cell_strings(&row), vec!["", "A", "C", "-"]);
        row.pad_to_widths(&[1, 2, 1, 3]);
        assert_eq!(cell_strings(&row), vec!["-", "A-", "C", "---"]);
    }

    #[test]
    fn test_parallel_order() {
        let records: Vec<AlignedRecord> = (0..50)
            .map(|i| record_from_cigar(format!("r{i}"), b"ACGT".to_vec(), i, "4M").unwrap())
            .collect();
        let rows = reconstruct_rows(&records);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.query_id(), format!("r{i}"));
            assert_eq!(row.cells().len(), i + 5);
        }
    }
}
