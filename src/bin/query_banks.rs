//! query_banks.rs
//!
//! Re-runs the fixed queries against the database a previous run left
//! behind, without touching the network, and checks that the CSV output
//! and the table still agree on row count.
//!
//! Usage: query_banks [config.yaml]

use anyhow::{bail, Result};
use bankscraper::{load, query, EtlConfig};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let arg = std::env::args().nth(1);
    let config = EtlConfig::from_optional_path(arg.as_deref())?;

    if !config.db_path.exists() {
        bail!(
            "no database at {}; run bankscraper first",
            config.db_path.display()
        );
    }

    let conn = load::open_database(&config.db_path)?;
    for out in query::run_all(&conn, &config.table_name)? {
        println!("{}", out.statement);
        println!("{}", out);
    }

    let in_db = load::count_rows(&conn, &config.table_name)?;
    if config.output_csv.exists() {
        let in_csv = load::read_csv(&config.output_csv)?.len() as i64;
        if in_csv == in_db {
            info!(rows = in_db, "csv and table agree");
        } else {
            warn!(csv = in_csv, table = in_db, "csv and table disagree");
        }
    } else {
        warn!(path = %config.output_csv.display(), "no csv output to compare");
    }

    Ok(())
}
