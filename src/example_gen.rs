use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};

use crate::aligned_record::{AlignedPair, AlignedRecord};
use crate::error::ConsensusError;

const BASES: [u8; 4] = *b"ACGT";

/// Creates a test set of alignments against a random reference that we can verify is working.
/// Each record is fully aligned from reference position 0 with its true alignment path.
/// # Arguments
/// * `seq_len` - the length of the reference
/// * `num_samples` - the number of records to generate
/// * `error_rate` - overall error rate, assumes mismatch, insertion, and deletion are equally likely sub-components of this error rate
/// # Errors
/// * if a generated record fails validation, which would be a bug in the generator
pub fn generate_test(seq_len: usize, num_samples: usize, error_rate: f64) -> Result<(Vec<u8>, Vec<AlignedRecord>), ConsensusError> {
    assert!(seq_len > 0);
    assert!((0.0..=1.0).contains(&error_rate));

    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let base_distribution = Uniform::new(0, BASES.len());
    let basem1_distribution = Uniform::new(1, BASES.len());
    let error_distribution = Uniform::new(0.0, 1.0);
    let error_type_distribution = Uniform::new(0, 3);

    let reference: Vec<u8> = (0..seq_len)
        .map(|_i| BASES[rng.sample(base_distribution)])
        .collect();

    let mut records = Vec::with_capacity(num_samples);
    for sample_index in 0..num_samples {
        let mut seq = vec![];
        let mut path = vec![];
        let mut ref_index = 0;
        while ref_index < reference.len() {
            let is_error = rng.sample(error_distribution) < error_rate;
            let error_type = if is_error { rng.sample(error_type_distribution) } else { usize::MAX };
            match error_type {
                0 => {
                    // substitution
                    let c = BASES.iter().position(|&b| b == reference[ref_index]).unwrap_or(0);
                    let alt_c = (c + rng.sample(basem1_distribution)) % BASES.len();
                    path.push(AlignedPair::matched(seq.len(), ref_index));
                    seq.push(BASES[alt_c]);
                    ref_index += 1;
                },
                1 => {
                    // deletion
                    path.push(AlignedPair::deletion(ref_index));
                    ref_index += 1;
                },
                2 => {
                    // insertion; the reference position is not consumed
                    path.push(AlignedPair::insertion(seq.len()));
                    seq.push(BASES[rng.sample(base_distribution)]);
                },
                _ => {
                    path.push(AlignedPair::matched(seq.len(), ref_index));
                    seq.push(reference[ref_index]);
                    ref_index += 1;
                }
            }
        }
        records.push(AlignedRecord::new(format!("sample_{sample_index}"), seq, path)?);
    }

    Ok((reference, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::MsaConsensus;

    #[test]
    fn test_generate_exact() {
        let (reference, records) = generate_test(50, 3, 0.0).unwrap();
        assert_eq!(reference.len(), 50);
        assert_eq!(records.len(), 3);
        for r in records.iter() {
            assert_eq!(r.sequence(), reference.as_slice());
        }
    }

    #[test]
    fn test_low_error_recovery() {
        // with enough depth the majority vote should recover the reference
        let (reference, records) = generate_test(200, 15, 0.02).unwrap();
        let mut msa_consensus = MsaConsensus::default();
        for r in records.into_iter() {
            msa_consensus.add_record(r);
        }
        let consensus = msa_consensus.consensus().unwrap();
        assert_eq!(consensus.record().sequence(), reference.as_slice());
    }
}
