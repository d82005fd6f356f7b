// src/fetch/table.rs

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use tracing::{debug, warn};

use crate::config::TableLocator;
use crate::schema::RawRow;

static TBODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody").expect("tbody selector should parse"));
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("tr selector should parse"));
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("td selector should parse"));

/// Why a `<tr>` did not become a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Header or spacer row with no `<td>` at all.
    NoDataCells,
    /// The row has cells, but not the one at `index`.
    MissingCell { index: usize },
    /// The cell for `column` had no visible text.
    EmptyValue { column: &'static str },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoDataCells => write!(f, "no data cells"),
            SkipReason::MissingCell { index } => write!(f, "no cell at index {}", index),
            SkipReason::EmptyValue { column } => write!(f, "empty {}", column),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Zero-based position of the `<tr>` inside the table body.
    pub position: usize,
    pub reason: SkipReason,
}

/// Rows pulled out of the table, plus every row that was passed over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub rows: Vec<RawRow>,
    pub skipped: Vec<SkippedRow>,
}

impl Extraction {
    /// Skips other than header rows, i.e. rows that looked like data but were unusable.
    pub fn malformed(&self) -> impl Iterator<Item = &SkippedRow> {
        self.skipped
            .iter()
            .filter(|s| s.reason != SkipReason::NoDataCells)
    }
}

/// Elements whose text never renders.
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "template"];

/// Visible text of an element: every descendant text node outside
/// `<script>`/`<style>`/`<template>`, trimmed, joined with no separator.
fn visible_text(el: ElementRef<'_>) -> String {
    el.descendants()
        .filter(|node| {
            !node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .map(|e| HIDDEN_ELEMENTS.iter().any(|h| *h == e.name()))
                    .unwrap_or(false)
            })
        })
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

fn read_row(tr: ElementRef<'_>, table: &TableLocator) -> Result<RawRow, SkipReason> {
    let cells: Vec<ElementRef<'_>> = tr.select(&TD).collect();
    if cells.is_empty() {
        return Err(SkipReason::NoDataCells);
    }

    let cell = |index: usize| {
        cells
            .get(index)
            .copied()
            .map(visible_text)
            .ok_or(SkipReason::MissingCell { index })
    };
    let name = cell(table.name_cell)?;
    let mc_usd_billion = cell(table.value_cell)?;

    if name.is_empty() {
        return Err(SkipReason::EmptyValue {
            column: RawRow::COLUMNS[0].name,
        });
    }
    if mc_usd_billion.is_empty() {
        return Err(SkipReason::EmptyValue {
            column: RawRow::COLUMNS[1].name,
        });
    }

    Ok(RawRow {
        name,
        mc_usd_billion,
    })
}

/// Parse `html`, locate the configured `<tbody>` and read one `RawRow` per
/// usable `<tr>`. Fails only when the document has too few table bodies.
pub fn extract_rows(html: &str, table: &TableLocator) -> Result<Extraction> {
    let doc = Html::parse_document(html);
    let bodies: Vec<ElementRef<'_>> = doc.select(&TBODY).collect();
    let tbody = bodies.get(table.tbody_index).copied().ok_or_else(|| {
        anyhow!(
            "expected at least {} <tbody> elements, found {}",
            table.tbody_index + 1,
            bodies.len()
        )
    })?;

    let mut out = Extraction::default();
    for (position, tr) in tbody.select(&TR).enumerate() {
        match read_row(tr, table) {
            Ok(row) => out.rows.push(row),
            Err(reason) => {
                match reason {
                    SkipReason::NoDataCells => debug!(position, "skipping header row"),
                    SkipReason::MissingCell { .. } => {
                        warn!(position, %reason, "error processing row")
                    }
                    SkipReason::EmptyValue { .. } => debug!(position, %reason, "skipping row"),
                }
                out.skipped.push(SkippedRow { position, reason });
            }
        }
    }

    debug!(
        rows = out.rows.len(),
        skipped = out.skipped.len(),
        "extracted table body {}",
        table.tbody_index
    );
    Ok(out)
}
