pub mod config;
pub mod fetch;
pub mod history;
pub mod load;
pub mod pipeline;
pub mod process;
pub mod query;
pub mod schema;

pub use config::EtlConfig;
pub use pipeline::RunSummary;
