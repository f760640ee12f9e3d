//! Populating a [`ModelInfo`] from one model's metadata table.

use crate::{
    host_type::HostTypeMapper,
    key::MapId,
    model_info::ModelInfo,
    schema::{
        counts::CatalogCounts, BlockParam, DataType, ElementRecord, EntryKind, MapTable, ModelParam,
        Signal,
    },
    Error, Result,
};

/// One model's metadata table together with the identity that scopes its names.
///
/// Catalogs built from an `OwningMap` only hold its [`MapId`]; whoever owns the map must keep it
/// alive for as long as those catalogs are in use.
#[derive(Debug)]
pub struct OwningMap {
    id: MapId,
    table: MapTable,
}

impl OwningMap {
    /// Take ownership of `table` and assign it a fresh identity. [`load_model`] ignores
    /// `table.children`; a [`crate::ModelRegistry`] gives each child a map of its own.
    pub fn new(table: MapTable) -> Self {
        Self {
            id: MapId::next(),
            table,
        }
    }

    pub fn id(&self) -> MapId {
        self.id
    }

    pub fn table(&self) -> &MapTable {
        &self.table
    }

    pub fn model_name(&self) -> &str {
        &self.table.model_name
    }
}

/// Resolve the host type of `record` and check its shape against its orientation.
pub fn resolve_data_type(record: &ElementRecord, mapper: &impl HostTypeMapper) -> Result<DataType> {
    if !record.orientation.accepts(&record.dims) {
        return Err(Error::InvalidDimensions {
            orientation: record.orientation,
            dims: record.dims.clone(),
        });
    }
    Ok(DataType {
        native_type: record.native_type.clone(),
        host_type: mapper.host_type(&record.native_type)?,
        dims: record.dims.clone(),
        orientation: record.orientation,
    })
}

fn block_name(record: &ElementRecord, kind: EntryKind) -> Result<String> {
    record
        .block_name
        .clone()
        .ok_or_else(|| Error::MissingBlockName {
            kind,
            name: record.name.clone(),
        })
}

/// Build the catalog for `map`'s own table (children are not visited).
///
/// Any error aborts the whole load: a partially populated catalog is never returned.
pub fn load_model(map: &OwningMap, mapper: &impl HostTypeMapper) -> Result<ModelInfo> {
    let table = map.table();
    log::debug!(
        "Loading model '{}' ({}): {}",
        table.model_name,
        map.id(),
        table.counts()
    );

    let mut info = ModelInfo::new(table.model_name.as_str(), map.id());

    for record in &table.model_params {
        info.insert_model_param(ModelParam {
            name: record.name.clone(),
            data_type: resolve_data_type(record, mapper)?,
        })?;
    }

    for record in &table.block_params {
        info.insert_block_param(BlockParam {
            block_name: block_name(record, EntryKind::BlockParam)?,
            param_name: record.name.clone(),
            data_type: resolve_data_type(record, mapper)?,
        })?;
    }

    for record in &table.signals {
        info.insert_signal(Signal {
            block_name: block_name(record, EntryKind::Signal)?,
            signal_name: record.name.clone(),
            data_type: resolve_data_type(record, mapper)?,
        })?;
    }

    info.finish_loading();
    Ok(info)
}
