//! Process-wide bookkeeping of loaded models.
//!
//! A generated model may reference child models, each with its own metadata map. The
//! [`ModelRegistry`] owns every map together with the catalog built from it, so a catalog can never
//! outlive its map, and models that share element names stay independent.

use std::collections::HashMap;

use crate::{
    host_type::HostTypeMapper,
    loader::{load_model, OwningMap},
    model_info::ModelInfo,
    schema::{BlockParam, MapTable, ModelParam, Signal},
    Error, Result,
};

#[derive(Debug)]
struct LoadedModel {
    // Dropped before `map`.
    info: ModelInfo,
    map: OwningMap,
    parent: Option<String>,
    children: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: HashMap<String, LoadedModel>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `table` and every referenced child table, returning the root model's catalog.
    ///
    /// Loading is all-or-nothing: on error the registry is left exactly as it was.
    pub fn load(&mut self, table: MapTable, mapper: &impl HostTypeMapper) -> Result<&ModelInfo> {
        let mut seen = std::collections::HashSet::new();
        for name in table.walk().map(|t| t.model_name.as_str()) {
            if self.models.contains_key(name) || !seen.insert(name) {
                return Err(Error::DuplicateModel(name.to_string()));
            }
        }

        let root_name = table.model_name.clone();
        let mut batch = Vec::new();
        Self::load_tree(table, None, mapper, &mut batch)?;

        for loaded in batch {
            self.models
                .insert(loaded.info.model_name().to_string(), loaded);
        }
        log::info!("Loaded model '{root_name}'");
        self.model(&root_name)
    }

    fn load_tree(
        mut table: MapTable,
        parent: Option<&str>,
        mapper: &impl HostTypeMapper,
        batch: &mut Vec<LoadedModel>,
    ) -> Result<()> {
        let child_tables = std::mem::take(&mut table.children);
        let map = OwningMap::new(table);
        let info = load_model(&map, mapper)?;
        let name = info.model_name().to_string();
        let children = child_tables
            .iter()
            .map(|child| child.model_name.clone())
            .collect();

        batch.push(LoadedModel {
            info,
            map,
            parent: parent.map(str::to_string),
            children,
        });

        for child in child_tables {
            Self::load_tree(child, Some(name.as_str()), mapper, batch)?;
        }
        Ok(())
    }

    /// Parse a JSON dump of a [`MapTable`] and load it.
    #[cfg(feature = "serde")]
    pub fn load_json(&mut self, json: &str, mapper: &impl HostTypeMapper) -> Result<&ModelInfo> {
        let table: MapTable = crate::schema::deserialize(json)?;
        self.load(table, mapper)
    }

    /// Unload `model_name` and all of its referenced children.
    pub fn unload(&mut self, model_name: &str) -> Result<()> {
        let loaded = self
            .models
            .remove(model_name)
            .ok_or_else(|| Error::UnknownModel(model_name.to_string()))?;

        if let Some(parent) = loaded.parent.as_deref().and_then(|p| self.models.get_mut(p)) {
            parent.children.retain(|c| c != model_name);
        }

        let LoadedModel {
            info,
            map,
            children,
            ..
        } = loaded;
        drop(info);
        drop(map);
        log::info!("Unloaded model '{model_name}'");

        for child in children {
            self.unload(&child)?;
        }
        Ok(())
    }

    fn loaded(&self, model_name: &str) -> Result<&LoadedModel> {
        self.models
            .get(model_name)
            .ok_or_else(|| Error::UnknownModel(model_name.to_string()))
    }

    pub fn model(&self, model_name: &str) -> Result<&ModelInfo> {
        self.loaded(model_name).map(|loaded| &loaded.info)
    }

    /// The metadata map `model_name` was loaded from.
    pub fn map(&self, model_name: &str) -> Result<&OwningMap> {
        self.loaded(model_name).map(|loaded| &loaded.map)
    }

    /// Names of the models directly referenced by `model_name`.
    pub fn children(&self, model_name: &str) -> Result<&[String]> {
        self.loaded(model_name)
            .map(|loaded| loaded.children.as_slice())
    }

    /// Names of all loaded models, sorted.
    pub fn models(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of loaded models that are not referenced by another model, sorted.
    pub fn root_models(&self) -> Vec<&str> {
        let mut names: Vec<_> = self
            .models
            .iter()
            .filter(|(_, loaded)| loaded.parent.is_none())
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn lookup_signal(
        &self,
        model_name: &str,
        block_name: &str,
        signal_name: &str,
    ) -> Result<&Signal> {
        self.model(model_name)?
            .lookup_signal(block_name, signal_name)
    }

    pub fn lookup_block_param(
        &self,
        model_name: &str,
        block_name: &str,
        param_name: &str,
    ) -> Result<&BlockParam> {
        self.model(model_name)?
            .lookup_block_param(block_name, param_name)
    }

    pub fn lookup_model_param(&self, model_name: &str, name: &str) -> Result<&ModelParam> {
        self.model(model_name)?.lookup_model_param(name)
    }
}
