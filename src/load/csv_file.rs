use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::{fs, path::Path};
use tracing::info;

use crate::schema::EnrichedRow;

/// Write `rows` to `path` with a header line, truncating any existing file.
/// The header is written even when there are no rows.
pub fn write_csv(rows: &[EnrichedRow], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {:?}", path))?;
    wtr.write_record(EnrichedRow::column_names())
        .with_context(|| format!("writing header to {:?}", path))?;
    for row in rows {
        wtr.serialize(row)
            .with_context(|| format!("writing `{}` to {:?}", row.name, path))?;
    }
    wtr.flush().with_context(|| format!("flushing {:?}", path))?;

    info!(path = %path.display(), rows = rows.len(), "wrote csv");
    Ok(())
}

/// Read an enriched table written by [`write_csv`].
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<EnrichedRow>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("opening {:?}", path))?;
    let rows = rdr
        .deserialize::<EnrichedRow>()
        .enumerate()
        .map(|(i, rec)| rec.with_context(|| format!("record #{} in {:?}", i + 1, path)))
        .collect::<Result<Vec<_>>>()?;
    Ok(rows)
}

/// Column names from the header line of `path`.
pub fn read_csv_headers(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("opening {:?}", path))?;
    let headers = rdr
        .headers()
        .with_context(|| format!("reading header of {:?}", path))?
        .iter()
        .map(str::to_string)
        .collect();
    Ok(headers)
}
