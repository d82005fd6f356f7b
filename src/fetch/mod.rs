// src/fetch/mod.rs

pub mod page;
pub mod table;

pub use page::{build_client, fetch_page};
pub use table::{extract_rows, Extraction, SkipReason, SkippedRow};
