// src/process/mod.rs

pub mod convert;
pub mod rates;
pub mod utils;

pub use convert::{parse_market_cap, transform, transform_file};
pub use rates::ExchangeRateTable;
pub use utils::round2;
