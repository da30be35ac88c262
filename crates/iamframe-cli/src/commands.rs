//! Subcommand implementations.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use iamframe_ingest::{read_iam_csv, write_iam_csv};
use iamframe_model::{IamFrame, TimeDomain};
use iamframe_transform::{Subannual, downcast_in_place, upcast_in_place};
use serde::Serialize;
use tracing::info_span;

/// Key structure of a loaded frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub time_domain: TimeDomain,
    pub index: Vec<String>,
    pub extra_cols: Vec<String>,
    pub value_columns: Vec<String>,
    pub rows: usize,
    /// Distinct value counts per key column.
    pub distinct: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Vec<i64>>,
}

impl InspectReport {
    pub fn from_frame(frame: &IamFrame) -> Self {
        Self {
            time_domain: frame.time_domain(),
            index: frame.index().to_vec(),
            extra_cols: frame.extra_cols().iter().map(str::to_string).collect(),
            value_columns: frame.value_columns(),
            rows: frame.len(),
            distinct: frame
                .dimensions()
                .iter()
                .map(|(column, values)| (column.clone(), values.len()))
                .collect(),
            year: frame.year().map(<[i64]>::to_vec),
        }
    }
}

pub fn run_downcast(input: &Path, output: &Path, subannual: &Subannual) -> Result<IamFrame> {
    let span = info_span!("downcast", input = %input.display());
    let _guard = span.enter();
    let mut frame = read_iam_csv(input).with_context(|| format!("read {}", input.display()))?;
    downcast_in_place(&mut frame, subannual).context("swap time for year")?;
    write_iam_csv(&frame, output).with_context(|| format!("write {}", output.display()))?;
    Ok(frame)
}

pub fn run_upcast(input: &Path, output: &Path) -> Result<IamFrame> {
    let span = info_span!("upcast", input = %input.display());
    let _guard = span.enter();
    let mut frame = read_iam_csv(input).with_context(|| format!("read {}", input.display()))?;
    upcast_in_place(&mut frame).context("swap year for time")?;
    write_iam_csv(&frame, output).with_context(|| format!("write {}", output.display()))?;
    Ok(frame)
}

pub fn run_inspect(input: &Path) -> Result<InspectReport> {
    let frame = read_iam_csv(input).with_context(|| format!("read {}", input.display()))?;
    Ok(InspectReport::from_frame(&frame))
}

pub fn report_json(report: &InspectReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize report")
}

pub fn report_table(report: &InspectReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key column"),
        header_cell("Role"),
        header_cell("Distinct"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    let time_col = report.time_domain.column_name();
    for name in &report.index {
        let role = if name == time_col {
            "time domain"
        } else if report.extra_cols.contains(name) {
            "extra"
        } else {
            "dimension"
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(role),
            Cell::new(report.distinct.get(name).copied().unwrap_or_default()),
        ]);
    }
    table.add_row(vec![
        Cell::new("ROWS")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.time_domain.to_string()).fg(Color::DarkGrey),
        Cell::new(report.rows).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn print_summary(report: &InspectReport) {
    println!("Domain: {}", report.time_domain);
    if !report.value_columns.is_empty() {
        println!("Values: {}", report.value_columns.join(", "));
    }
    println!("{}", report_table(report));
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
