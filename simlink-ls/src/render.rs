use std::io::Write;

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use itertools::Itertools;
use serde::Serialize;
use simlink::{
    schema::counts::{CatalogCounts, Counts},
    CatalogEntry, ModelInfo, ModelRegistry,
};

use crate::{EntryKindArg, OutputFormat};

fn write_json<T: Serialize + ?Sized>(value: &T, out: &mut impl Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().copied());
    table
}

const ENTRY_HEADER: [&str; 6] = ["Kind", "Block", "Name", "Native", "Host", "Shape"];

fn push_row<E: CatalogEntry>(table: &mut Table, entry: &E) {
    let ty = entry.data_type();
    table.add_row(vec![
        E::KIND.to_string(),
        entry.block_name().unwrap_or("-").to_string(),
        entry.name().to_string(),
        ty.native_type.clone(),
        ty.host_type.clone(),
        format!("{} {}", ty.dims, ty.orientation),
    ]);
}

pub fn models(
    registry: &ModelRegistry,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => write_json(&registry.models(), out),
        OutputFormat::Table => {
            let mut table = new_table(&["Model", "Map", "References"]);
            for name in registry.models() {
                let map = registry.map(name)?;
                let children = registry.children(name)?.iter().join(", ");
                table.add_row(vec![name.to_string(), map.id().to_string(), children]);
            }
            writeln!(out, "{table}")?;
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    model: &'a str,
    #[serde(flatten)]
    counts: Counts,
}

pub fn summary(model: &ModelInfo, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let counts = model.counts();
    match format {
        OutputFormat::Json => write_json(
            &Summary {
                model: model.model_name(),
                counts,
            },
            out,
        ),
        OutputFormat::Table => {
            writeln!(out, "Model: {}", model.model_name())?;
            writeln!(out, "{counts}")?;
            Ok(())
        }
    }
}

#[derive(Serialize, Default)]
struct Listing<'a> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    model_params: Vec<&'a simlink::schema::ModelParam>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    block_params: Vec<&'a simlink::schema::BlockParam>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    signals: Vec<&'a simlink::schema::Signal>,
}

pub fn list(
    model: &ModelInfo,
    kind: Option<EntryKindArg>,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let wants = |k: EntryKindArg| kind.is_none_or(|kind| kind == k);

    let mut listing = Listing::default();
    if wants(EntryKindArg::Params) {
        listing.model_params = model.model_params().sorted();
    }
    if wants(EntryKindArg::BlockParams) {
        listing.block_params = model.block_params().sorted();
    }
    if wants(EntryKindArg::Signals) {
        listing.signals = model.signals().sorted();
    }

    match format {
        OutputFormat::Json => write_json(&listing, out),
        OutputFormat::Table => {
            let mut table = new_table(&ENTRY_HEADER);
            listing
                .model_params
                .iter()
                .for_each(|e| push_row(&mut table, *e));
            listing
                .block_params
                .iter()
                .for_each(|e| push_row(&mut table, *e));
            listing
                .signals
                .iter()
                .for_each(|e| push_row(&mut table, *e));
            writeln!(out, "{table}")?;
            Ok(())
        }
    }
}

pub fn entry<E: CatalogEntry + Serialize>(
    entry: &E,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => write_json(entry, out),
        OutputFormat::Table => {
            let mut table = new_table(&ENTRY_HEADER);
            push_row(&mut table, entry);
            writeln!(out, "{table}")?;
            Ok(())
        }
    }
}
