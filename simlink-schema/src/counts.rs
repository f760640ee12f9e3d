use std::fmt::Display;

use crate::MapTable;

/// Collects counts of the entries in a model catalog
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Counts {
    pub num_model_params: usize,
    pub num_block_params: usize,
    pub num_signals: usize,
    /// Number of distinct block paths referenced by block parameters and signals
    pub num_blocks: usize,
    /// Entries with at least one dynamically-sized dimension
    pub num_dynamic: usize,
}

impl Display for Counts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog Counts")
            .field("Model parameters", &self.num_model_params)
            .field("Block parameters", &self.num_block_params)
            .field("Signals", &self.num_signals)
            .field("Blocks", &self.num_blocks)
            .field("Dynamic", &self.num_dynamic)
            .finish()
    }
}

pub trait CatalogCounts {
    fn counts(&self) -> Counts;
}

impl CatalogCounts for MapTable {
    fn counts(&self) -> Counts {
        let blocks: std::collections::HashSet<_> = self
            .block_params
            .iter()
            .chain(&self.signals)
            .filter_map(|rec| rec.block_name.as_deref())
            .collect();
        Counts {
            num_model_params: self.model_params.len(),
            num_block_params: self.block_params.len(),
            num_signals: self.signals.len(),
            num_blocks: blocks.len(),
            num_dynamic: itertools::chain!(&self.model_params, &self.block_params, &self.signals)
                .filter(|rec| rec.dims.is_dynamic())
                .count(),
        }
    }
}
