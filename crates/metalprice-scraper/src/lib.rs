pub mod aggregate;
pub mod correct;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod pipeline;
pub mod price;
pub mod report;
pub(crate) mod text;

pub use aggregate::{MatrixRow, PriceMatrix, RunSummary};
pub use correct::apply_correction;
pub use error::ScraperError;
pub use extract::{AutoStage, StrategyRegistry};
pub use fetch::Fetcher;
pub use filter::TargetItemMatcher;
pub use pipeline::{Pipeline, SiteScrape, UrlFailure};
pub use price::{normalize_price, tax_inclusive};
pub use report::{MappingReport, MappingRow};
