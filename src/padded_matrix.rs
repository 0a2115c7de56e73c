/*!
Reconciles ragged rows into a rectangular matrix.
Rows are first extended to the full frame, then every column is padded to the widest cell seen in that column.
Optionally, insertion columns are adjusted so that inserted sequence comes in groups of 3 (see `PaddedMatrix::apply_insert_groups`).
*/

use log::debug;

use crate::error::ConsensusError;
use crate::reference_frame::ReferenceFrame;
use crate::row_reconstruction::ReconstructedRow;
use crate::vote::{is_real_base, AMBIGUOUS_SYMBOL, GAP_SYMBOL};

/// Size of a codon, insert groups are padded to a multiple of this after the anchor base
pub const CODON_LENGTH: usize = 3;

/// All rows padded to identical column widths.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaddedMatrix {
    /// The padded rows, in input order
    rows: Vec<ReconstructedRow>,
    /// Width of each column, shared by every row
    widths: Vec<usize>
}

impl PaddedMatrix {
    /// Builds the rectangular matrix from the reconstructed rows.
    /// # Arguments
    /// * `rows` - ragged rows, in input order
    /// * `frame` - the reference frame all rows are placed into
    /// # Errors
    /// * `EmptyInputSet` if there are no rows
    pub fn new(mut rows: Vec<ReconstructedRow>, frame: &ReferenceFrame) -> Result<PaddedMatrix, ConsensusError> {
        if rows.is_empty() {
            return Err(ConsensusError::EmptyInputSet);
        }

        // first pass, make every row span the full frame
        let num_columns = frame.num_columns();
        for row in rows.iter_mut() {
            row.extend_to(num_columns);
        }

        // second pass, find the widest cell in each column
        let mut widths = vec![0; num_columns];
        for row in rows.iter() {
            for (width, cell) in widths.iter_mut().zip(row.cells().iter()) {
                *width = (*width).max(cell.len());
            }
        }

        // final pass, pad everything out
        for row in rows.iter_mut() {
            row.pad_to_widths(&widths);
        }

        let matrix = PaddedMatrix {
            rows,
            widths
        };
        debug!("Padded matrix: {} rows x {} positions", matrix.rows.len(), matrix.total_width());
        Ok(matrix)
    }

    /// Applies the insertion frame correction to every column, the prefix column included.
    /// Each column is widened with gaps until its width is 1 mod 3, i.e. the leading sub-position followed by whole groups of 3.
    /// An empty prefix column therefore becomes a single gap position.
    /// Then, within each cell, any group of 3 containing a real base has its gaps rewritten to N.
    /// Groups are judged per cell; a base in one row does not affect another row's group.
    /// A column-wide trigger (any row's base rewriting every row's group) is not used.
    pub fn apply_insert_groups(&mut self) {
        let mut widened: usize = 0;
        for column in 0..self.widths.len() {
            let mut target = self.widths[column];
            while target % CODON_LENGTH != 1 {
                target += 1;
            }
            if target != self.widths[column] {
                widened += 1;
                self.widths[column] = target;
            }

            for row in self.rows.iter_mut() {
                let cell = &mut row.cells_mut()[column];
                cell.resize(target, GAP_SYMBOL);
                for group in cell[1..].chunks_mut(CODON_LENGTH) {
                    if group.iter().any(|&s| is_real_base(s)) {
                        for symbol in group.iter_mut().filter(|s| **s == GAP_SYMBOL) {
                            *symbol = AMBIGUOUS_SYMBOL;
                        }
                    }
                }
            }
        }
        debug!("Insert groups widened {widened} columns");
    }

    /// Total number of sub-positions in each row
    pub fn total_width(&self) -> usize {
        self.widths.iter().sum()
    }

    /// Returns each row flattened into a single aligned sequence
    pub fn row_strings(&self) -> Vec<Vec<u8>> {
        self.rows.iter()
            .map(|row| row.cells().concat())
            .collect()
    }

    // Getters
    pub fn rows(&self) -> &[ReconstructedRow] {
        &self.rows
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }
}
