// src/pipeline.rs

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    config::EtlConfig,
    fetch::{self, Extraction},
    history::History,
    load, process,
    query::{self, QueryOutput},
};

/// What one run produced, for callers that want more than the printout.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub extraction: Extraction,
    pub loaded: usize,
    pub queries: Vec<QueryOutput>,
}

/// Fetch the configured page and run the whole pass over it.
pub fn run(config: &EtlConfig) -> Result<RunSummary> {
    let history = History::new(&config.log_path)?;
    history.record("Preliminaries complete. Initiating ETL process\n")?;

    let client = fetch::build_client(config.request_timeout())?;
    let html = fetch::fetch_page(&client, &config.url)?;
    run_stages(config, &history, &html)
}

/// Run the pass over markup that has already been fetched.
pub fn run_with_page(config: &EtlConfig, html: &str) -> Result<RunSummary> {
    let history = History::new(&config.log_path)?;
    history.record("Preliminaries complete. Initiating ETL process\n")?;
    run_stages(config, &history, html)
}

fn run_stages(config: &EtlConfig, history: &History, html: &str) -> Result<RunSummary> {
    // ─── 1) extract ─────────────────────────────────────────────────
    let extraction = fetch::extract_rows(html, &config.table)
        .with_context(|| format!("extracting table from {}", config.url))?;
    for skip in extraction.malformed() {
        warn!(position = skip.position, reason = %skip.reason, "row skipped");
    }
    info!(
        rows = extraction.rows.len(),
        skipped = extraction.skipped.len(),
        "extraction done"
    );
    history.record("Data extraction complete. Initiating Transformation process")?;

    // ─── 2) transform ───────────────────────────────────────────────
    let enriched = process::transform_file(extraction.rows.clone(), &config.exchange_rate_csv)?;
    history.record("Data transformation complete. Initiating Loading process")?;

    // ─── 3) load: csv, then database ────────────────────────────────
    load::write_csv(&enriched, &config.output_csv)?;
    history.record("Data saved to CSV file")?;

    let mut conn = load::open_database(&config.db_path)?;
    history.record("SQL Connection initiated")?;

    let loaded = load::load_table(&mut conn, &config.table_name, &enriched)?;
    history.record("Data loaded to Database as a table, Executing queries")?;

    // ─── 4) query ───────────────────────────────────────────────────
    let queries = query::run_all(&conn, &config.table_name)?;
    for out in &queries {
        println!("{}", out.statement);
        println!("{}", out);
    }
    history.record("Process Complete\n")?;

    conn.close()
        .map_err(|(_, e)| e)
        .with_context(|| format!("closing {}", config.db_path.display()))?;
    history.record("Server Connection closed")?;

    Ok(RunSummary {
        extraction,
        loaded,
        queries,
    })
}
