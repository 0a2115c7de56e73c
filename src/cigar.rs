/*!
Expands SAM-style CIGAR strings into alignment paths.
The expansion matches the usual "aligned pairs with soft clips" view of a mapped read:
* `M`, `=`, `X` - both coordinates advance
* `I`, `S` - query only
* `D`, `N` - reference only
* `H`, `P` - neither

# Example usage
```rust
use refine_con::aligned_record::AlignedPair;
use refine_con::cigar::cigar_to_path;

let path = cigar_to_path("1S2M1D", 10).unwrap();
assert_eq!(path, vec![
    AlignedPair::insertion(0),
    AlignedPair::matched(1, 10),
    AlignedPair::matched(2, 11),
    AlignedPair::deletion(12)
]);
```
*/

use simple_error::bail;

use crate::aligned_record::{AlignedPair, AlignedRecord};
use crate::error::ConsensusError;

/// Parses a CIGAR string into (length, operation) tuples.
/// # Arguments
/// * `cigar` - the CIGAR string, e.g. "5S10M2I"
/// # Errors
/// * if the string is empty or "*"
/// * if an operation is missing its length, has a zero length, or is not a CIGAR operation
pub fn parse_cigar(cigar: &str) -> Result<Vec<(usize, u8)>, Box<dyn std::error::Error>> {
    if cigar.is_empty() || cigar == "*" {
        bail!("CIGAR string is unavailable: {:?}", cigar);
    }

    let mut ret = vec![];
    let mut length: Option<usize> = None;
    for c in cigar.bytes() {
        if c.is_ascii_digit() {
            let digit = (c - b'0') as usize;
            length = Some(length.unwrap_or(0) * 10 + digit);
        } else {
            let op_len = match length.take() {
                Some(0) => {
                    bail!("Zero length operation {:?} in CIGAR {:?}", c as char, cigar);
                },
                Some(l) => l,
                None => {
                    bail!("Operation {:?} has no length in CIGAR {:?}", c as char, cigar);
                }
            };
            match c {
                b'M' | b'=' | b'X' | b'I' | b'S' | b'D' | b'N' | b'H' | b'P' => ret.push((op_len, c)),
                _ => {
                    bail!("Unknown operation {:?} in CIGAR {:?}", c as char, cigar);
                }
            }
        }
    }

    if length.is_some() {
        bail!("CIGAR {:?} ends with a length but no operation", cigar);
    }
    Ok(ret)
}

/// Expands a CIGAR string into an ordered alignment path.
/// # Arguments
/// * `cigar` - the CIGAR string
/// * `reference_start` - 0-based reference position of the first reference-consuming operation
/// # Errors
/// * if the CIGAR fails to parse
pub fn cigar_to_path(cigar: &str, reference_start: usize) -> Result<Vec<AlignedPair>, Box<dyn std::error::Error>> {
    let operations = parse_cigar(cigar)?;
    let mut query_pos = 0;
    let mut ref_pos = reference_start;
    let mut path = vec![];
    for (op_len, op) in operations.into_iter() {
        match op {
            b'M' | b'=' | b'X' => {
                path.extend((0..op_len).map(|i| AlignedPair::matched(query_pos + i, ref_pos + i)));
                query_pos += op_len;
                ref_pos += op_len;
            },
            b'I' | b'S' => {
                path.extend((0..op_len).map(|i| AlignedPair::insertion(query_pos + i)));
                query_pos += op_len;
            },
            b'D' | b'N' => {
                path.extend((0..op_len).map(|i| AlignedPair::deletion(ref_pos + i)));
                ref_pos += op_len;
            },
            // H and P consume nothing
            _ => {}
        }
    }
    Ok(path)
}

/// Builds a validated record from a CIGAR-described alignment.
/// # Arguments
/// * `query_id` - the query identifier
/// * `sequence` - the query bases, excluding hard-clipped bases
/// * `reference_start` - 0-based reference position of the alignment start
/// * `cigar` - the CIGAR string
/// # Errors
/// * `MalformedAlignmentPath` if the CIGAR fails to parse or does not describe the sequence
pub fn record_from_cigar(query_id: String, sequence: Vec<u8>, reference_start: usize, cigar: &str) -> Result<AlignedRecord, ConsensusError> {
    let path = match cigar_to_path(cigar, reference_start) {
        Ok(p) => p,
        Err(e) => return Err(ConsensusError::malformed(&query_id, e.to_string()))
    };
    AlignedRecord::new(query_id, sequence, path)
}
