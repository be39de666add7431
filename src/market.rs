//! # Market Data
//!
//! $$
//! P = \{p_{t,i}\}_{t \in \mathcal{T},\ i \in \text{symbols}}
//! $$
//!
//! Data-source seam and inner-joined close-price tables.

pub mod source;
pub mod table;

pub use source::Candle;
pub use source::FinancialReport;
pub use source::FixedPriceSource;
pub use source::ReportKind;
pub use source::ReportPeriod;
pub use source::StockDataSource;
pub use table::PriceTable;
pub use table::fetch_price_table;
pub use table::fetch_trailing_history;
