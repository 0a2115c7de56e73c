/*!
Contains configuration information for the consensus run.
Typical usage is to the use the builder to construct the config, e.g.
```
use refine_con::consensus_config::{ConsensusConfig, ConsensusConfigBuilder};
let config: ConsensusConfig = ConsensusConfigBuilder::default()
    .threshold_mode(true)
    .keep_gaps(true)
    .build()
    .unwrap();
```
*/

/**
Contains configuration information for the consensus run.
Typical usage is to the use the builder to construct the config, e.g.
```
use refine_con::consensus_config::{ConsensusConfig, ConsensusConfigBuilder};
let config: ConsensusConfig = ConsensusConfigBuilder::default()
    .insert_groups_mode(true)
    .consensus_id("refined".to_string())
    .build()
    .unwrap();
```
*/
#[derive(derive_builder::Builder, Clone, Debug, PartialEq)]
#[builder(default)]
pub struct ConsensusConfig {
    /// If true, a gap-majority position only emits a gap when the gap fraction reaches `1 - GAP_THRESHOLD`
    pub threshold_mode: bool,
    /// If true, insertion columns are padded to length 1 mod 3 and gaps inside base-bearing groups of 3 become N
    pub insert_groups_mode: bool,
    /// If true, the output consensus retains gap symbols
    pub keep_gaps: bool,
    /// Identifier written on the output consensus record
    pub consensus_id: String
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            // historical option, it does not keep frame in practice
            threshold_mode: false,
            // only useful for codon-aware consumers
            insert_groups_mode: false,
            // most consumers want a usable reference, so strip by default
            keep_gaps: false,
            consensus_id: "consensus".to_string()
        }
    }
}
