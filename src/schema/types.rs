// src/schema/types.rs

use serde::{Deserialize, Serialize};

/// Storage type of a column in the loaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Text,
    Real,
}

/// A single column definition of a fixed-schema row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
}

/// One row as scraped from the page, both cells still as visible text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "MC_USD_Billion")]
    pub mc_usd_billion: String,
}

impl RawRow {
    pub const COLUMNS: [Column; 2] = [
        Column {
            name: "Name",
            ty: ColumnType::Text,
        },
        Column {
            name: "MC_USD_Billion",
            ty: ColumnType::Text,
        },
    ];
}

/// A row after currency conversion. Field order is the column order of
/// both the CSV file and the database table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "MC_USD_Billion")]
    pub mc_usd_billion: f64,
    #[serde(rename = "MC_GBP_Billion")]
    pub mc_gbp_billion: f64,
    #[serde(rename = "MC_EUR_Billion")]
    pub mc_eur_billion: f64,
    #[serde(rename = "MC_INR_Billion")]
    pub mc_inr_billion: f64,
}

impl EnrichedRow {
    pub const COLUMNS: [Column; 5] = [
        Column {
            name: "Name",
            ty: ColumnType::Text,
        },
        Column {
            name: "MC_USD_Billion",
            ty: ColumnType::Real,
        },
        Column {
            name: "MC_GBP_Billion",
            ty: ColumnType::Real,
        },
        Column {
            name: "MC_EUR_Billion",
            ty: ColumnType::Real,
        },
        Column {
            name: "MC_INR_Billion",
            ty: ColumnType::Real,
        },
    ];

    pub fn column_names() -> Vec<&'static str> {
        Self::COLUMNS.iter().map(|c| c.name).collect()
    }
}
