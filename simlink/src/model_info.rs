use crate::{
    catalog::{Catalog, CatalogEntry},
    key::{Key1, Key2, MapId},
    schema::{
        counts::{CatalogCounts, Counts},
        BlockParam, ModelParam, Signal,
    },
    Result,
};

/// Lifecycle of a [`ModelInfo`]. Unloading is dropping the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Entries are still being inserted by a loader.
    Loading,
    /// The catalog is complete and read-only.
    Loaded,
}

/// The catalog of one loaded model: its parameters, block parameters and signals.
///
/// All keys are scoped by the [`MapId`] of the model's metadata map, so catalogs of models that
/// share element names never answer for each other.
#[derive(Debug)]
pub struct ModelInfo {
    model_name: String,
    state: LoadState,
    model_params: Catalog<ModelParam>,
    block_params: Catalog<BlockParam>,
    signals: Catalog<Signal>,
}

impl ModelInfo {
    /// Start an empty catalog in the [`LoadState::Loading`] state.
    pub fn new(model_name: impl Into<String>, owner: MapId) -> Self {
        Self {
            model_name: model_name.into(),
            state: LoadState::Loading,
            model_params: Catalog::new(owner),
            block_params: Catalog::new(owner),
            signals: Catalog::new(owner),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn owner(&self) -> MapId {
        self.signals.owner()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Mark the catalog as complete.
    pub fn finish_loading(&mut self) {
        log::debug!(
            "Model '{}' ({}) loaded: {} params, {} block params, {} signals",
            self.model_name,
            self.owner(),
            self.model_params.len(),
            self.block_params.len(),
            self.signals.len()
        );
        self.state = LoadState::Loaded;
    }

    fn check_loading(&self) {
        if self.state == LoadState::Loaded {
            log::warn!(
                "Inserting into model '{}' after it finished loading",
                self.model_name
            );
        }
    }

    pub fn insert_model_param(&mut self, param: ModelParam) -> Result<()> {
        self.check_loading();
        self.model_params.insert(param)
    }

    pub fn insert_block_param(&mut self, param: BlockParam) -> Result<()> {
        self.check_loading();
        self.block_params.insert(param)
    }

    pub fn insert_signal(&mut self, signal: Signal) -> Result<()> {
        self.check_loading();
        self.signals.insert(signal)
    }

    pub fn lookup_signal(&self, block_name: &str, signal_name: &str) -> Result<&Signal> {
        self.signals
            .lookup(&Key2::new(block_name, signal_name, self.owner()))
    }

    pub fn lookup_block_param(&self, block_name: &str, param_name: &str) -> Result<&BlockParam> {
        self.block_params
            .lookup(&Key2::new(block_name, param_name, self.owner()))
    }

    pub fn lookup_model_param(&self, name: &str) -> Result<&ModelParam> {
        self.model_params.lookup(&Key1::new(name, self.owner()))
    }

    pub fn model_params(&self) -> &Catalog<ModelParam> {
        &self.model_params
    }

    pub fn block_params(&self) -> &Catalog<BlockParam> {
        &self.block_params
    }

    pub fn signals(&self) -> &Catalog<Signal> {
        &self.signals
    }

    /// Distinct block paths referenced by block parameters and signals, sorted.
    pub fn blocks(&self) -> Vec<&str> {
        use itertools::Itertools;
        self.block_params
            .iter()
            .filter_map(CatalogEntry::block_name)
            .chain(self.signals.iter().filter_map(CatalogEntry::block_name))
            .sorted_unstable()
            .dedup()
            .collect()
    }
}

impl CatalogCounts for ModelInfo {
    fn counts(&self) -> Counts {
        Counts {
            num_model_params: self.model_params.len(),
            num_block_params: self.block_params.len(),
            num_signals: self.signals.len(),
            num_blocks: self.blocks().len(),
            num_dynamic: self
                .model_params
                .iter()
                .map(CatalogEntry::data_type)
                .chain(self.block_params.iter().map(CatalogEntry::data_type))
                .chain(self.signals.iter().map(CatalogEntry::data_type))
                .filter(|ty| ty.dims.is_dynamic())
                .count(),
        }
    }
}
