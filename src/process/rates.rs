// src/process/rates.rs

use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::{collections::HashMap, io::Read, path::Path};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RateRecord {
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "Rate")]
    rate: f64,
}

/// Currency code → multiplier relative to USD.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeRateTable {
    rates: HashMap<String, f64>,
}

impl ExchangeRateTable {
    /// Load a `Currency,Rate` CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening exchange rate table {}", path.display()))?;
        let table = Self::from_reader(file)
            .with_context(|| format!("reading exchange rate table {}", path.display()))?;
        debug!(path = %path.display(), currencies = table.len(), "loaded exchange rates");
        Ok(table)
    }

    /// Parse `Currency,Rate` CSV from any reader. A repeated code keeps the
    /// last rate seen.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
        let mut rates = HashMap::new();
        for (i, rec) in rdr.deserialize::<RateRecord>().enumerate() {
            let rec = rec.with_context(|| format!("bad rate record #{}", i + 1))?;
            rates.insert(rec.currency, rec.rate);
        }
        Ok(Self { rates })
    }

    /// Multiplier for `code`; a missing code is an error.
    pub fn rate(&self, code: &str) -> Result<f64> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| anyhow!("currency `{}` missing from exchange rate table", code))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ExchangeRateTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn parses_currency_rate_csv() {
        let csv = "Currency,Rate\nEUR,0.93\nGBP,0.8\nINR,82.95\n";
        let table = ExchangeRateTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rate("GBP").unwrap(), 0.8);
        assert_eq!(table.rate("INR").unwrap(), 82.95);
    }

    #[test]
    fn last_duplicate_wins_and_whitespace_is_trimmed() {
        let csv = "Currency,Rate\n GBP , 0.7\nGBP,0.8\n";
        let table = ExchangeRateTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rate("GBP").unwrap(), 0.8);
    }

    #[test]
    fn missing_code_is_an_error() {
        let table: ExchangeRateTable = [("GBP", 0.8)].into_iter().collect();
        let err = table.rate("JPY").unwrap_err();
        assert!(err.to_string().contains("JPY"));
    }

    #[test]
    fn malformed_rate_is_an_error() {
        let csv = "Currency,Rate\nGBP,lots\n";
        assert!(ExchangeRateTable::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = tempdir().unwrap();
        assert!(ExchangeRateTable::load(tmp.path().join("nope.csv")).is_err());
    }

    #[test]
    fn loads_from_disk() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("exchange_rate.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "Currency,Rate\nEUR,0.93").unwrap();
        let table = ExchangeRateTable::load(&path).unwrap();
        assert_eq!(table.rate("EUR").unwrap(), 0.93);
    }
}
