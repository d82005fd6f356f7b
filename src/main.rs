use anyhow::Result;
use bankscraper::{pipeline, EtlConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) configure ────────────────────────────────────────────────
    let arg = std::env::args().nth(1);
    let config = EtlConfig::from_optional_path(arg.as_deref())?;
    info!(url = %config.url, table = %config.table_name, "startup");

    // ─── 3) run ──────────────────────────────────────────────────────
    let summary = pipeline::run(&config)?;
    info!(
        loaded = summary.loaded,
        skipped = summary.extraction.skipped.len(),
        "all done"
    );
    Ok(())
}
