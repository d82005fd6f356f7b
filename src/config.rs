// src/config.rs

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

/// Page listing the largest banks by market capitalisation.
pub const DEFAULT_URL: &str = "https://en.wikipedia.org/wiki/List_of_largest_banks";

/// Where the market-cap table lives inside the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableLocator {
    /// Zero-based index among all `<tbody>` elements in the document.
    pub tbody_index: usize,
    /// Zero-based `<td>` index holding the bank name.
    pub name_cell: usize,
    /// Zero-based `<td>` index holding the market cap in USD billions.
    pub value_cell: usize,
}

impl Default for TableLocator {
    fn default() -> Self {
        Self {
            tbody_index: 2,
            name_cell: 1,
            value_cell: 2,
        }
    }
}

/// Everything one ETL run needs to know. `Default` reproduces the fixed
/// locations the pass has always used; a YAML file may override any field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EtlConfig {
    pub url: Url,
    pub table: TableLocator,
    pub exchange_rate_csv: PathBuf,
    pub output_csv: PathBuf,
    pub db_path: PathBuf,
    pub table_name: String,
    pub log_path: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_URL).expect("default URL should parse"),
            table: TableLocator::default(),
            exchange_rate_csv: PathBuf::from("./exchange_rate.csv"),
            output_csv: PathBuf::from("./Largest_banks_data.csv"),
            db_path: PathBuf::from("Banks.db"),
            table_name: "Largest_banks".to_string(),
            log_path: PathBuf::from("./code_log.txt"),
            request_timeout_secs: 60,
        }
    }
}

impl EtlConfig {
    /// Read a YAML config; fields missing from the file keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults, or the YAML file at `path` when one is given.
    pub fn from_optional_path(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        match self.url.scheme() {
            "http" | "https" => {}
            other => bail!("unsupported URL scheme `{}` in {}", other, self.url),
        }
        if self.table.name_cell == self.table.value_cell {
            bail!(
                "name_cell and value_cell both point at cell {}",
                self.table.name_cell
            );
        }
        crate::schema::check_identifier(&self.table_name)?;
        Ok(())
    }
}
