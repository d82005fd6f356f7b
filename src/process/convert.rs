use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use super::rates::ExchangeRateTable;
use super::utils::{clean_number, round2};
use crate::schema::{EnrichedRow, RawRow};

/// Parse a market-cap cell such as `"1,234.5"` into a number.
pub fn parse_market_cap(text: &str) -> Result<f64> {
    clean_number(text)
        .parse::<f64>()
        .with_context(|| format!("market cap `{}` is not numeric", text))
}

/// Rates for the three derived columns, resolved once per transform.
#[derive(Debug, Clone, Copy)]
struct DerivedRates {
    gbp: f64,
    eur: f64,
    inr: f64,
}

impl DerivedRates {
    fn resolve(rates: &ExchangeRateTable) -> Result<Self> {
        Ok(Self {
            gbp: rates.rate("GBP")?,
            eur: rates.rate("EUR")?,
            inr: rates.rate("INR")?,
        })
    }
}

fn derive(name: String, usd: f64, r: DerivedRates) -> EnrichedRow {
    EnrichedRow {
        name,
        mc_usd_billion: usd,
        mc_gbp_billion: round2(usd * r.gbp),
        mc_eur_billion: round2(usd * r.eur),
        mc_inr_billion: round2(usd * r.inr),
    }
}

/// Convert every row, keeping order. The first unparsable market cap or
/// missing currency fails the whole batch.
pub fn transform(rows: Vec<RawRow>, rates: &ExchangeRateTable) -> Result<Vec<EnrichedRow>> {
    let r = DerivedRates::resolve(rates)?;
    let out = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let usd = parse_market_cap(&row.mc_usd_billion)
                .with_context(|| format!("row {} ({})", i, row.name))?;
            Ok(derive(row.name, usd, r))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(rows = out.len(), "transformed rows");
    Ok(out)
}

/// Load the rate table at `rates_csv` and convert `rows` with it.
pub fn transform_file(rows: Vec<RawRow>, rates_csv: impl AsRef<Path>) -> Result<Vec<EnrichedRow>> {
    let rates = ExchangeRateTable::load(rates_csv)?;
    transform(rows, &rates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> ExchangeRateTable {
        [("GBP", 0.8), ("EUR", 0.93), ("INR", 82.5)]
            .into_iter()
            .collect()
    }

    fn raw(name: &str, mc: &str) -> RawRow {
        RawRow {
            name: name.to_string(),
            mc_usd_billion: mc.to_string(),
        }
    }

    #[test]
    fn parses_with_separators() {
        assert_eq!(parse_market_cap("1,234.5").unwrap(), 1234.5);
        assert_eq!(parse_market_cap("100.00").unwrap(), 100.0);
        assert!(parse_market_cap("n/a").is_err());
        assert!(parse_market_cap("12[a]").is_err());
    }

    #[test]
    fn gbp_of_one_hundred() {
        let out = transform(vec![raw("Bank A", "100.0")], &rates()).unwrap();
        assert_eq!(out[0].mc_gbp_billion, 80.0);
    }

    #[test]
    fn end_to_end_row() {
        let out = transform(vec![raw("Bank A", "100.00")], &rates()).unwrap();
        assert_eq!(
            out,
            vec![EnrichedRow {
                name: "Bank A".into(),
                mc_usd_billion: 100.0,
                mc_gbp_billion: 80.0,
                mc_eur_billion: 93.0,
                mc_inr_billion: 8250.0,
            }]
        );
    }

    #[test]
    fn keeps_order() {
        let out = transform(
            vec![raw("B", "2"), raw("A", "1,000"), raw("C", "3.333")],
            &rates(),
        )
        .unwrap();
        let names: Vec<_> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(out[1].mc_usd_billion, 1000.0);
        assert_eq!(out[2].mc_gbp_billion, 2.67);
    }

    #[test]
    fn missing_currency_fails() {
        let partial: ExchangeRateTable = [("GBP", 0.8), ("EUR", 0.93)].into_iter().collect();
        let err = transform(vec![raw("A", "1")], &partial).unwrap_err();
        assert!(format!("{:#}", err).contains("INR"));
    }

    #[test]
    fn missing_currency_fails_even_without_rows() {
        let empty = ExchangeRateTable::default();
        assert!(transform(Vec::new(), &empty).is_err());
    }

    #[test]
    fn non_numeric_fails_and_names_the_row() {
        let err = transform(vec![raw("A", "1"), raw("Bad", "N/A")], &rates()).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("Bad"));
        assert!(msg.contains("not numeric"));
    }
}
