//! Price trend and KPI analytics for vehicle price datasets.
//!
//! A dataset of `Actual` and `Forecast` price records is filtered by an
//! immutable [`FilterSelection`], summarized into KPIs with year-over-year
//! deltas, and analyzed per model into trend, forecast outlook and volatility
//! figures that are ranked and classified.
//!
//! Every computation is a pure function of the dataset and the selection and
//! works in the dataset's base currency; [`Currency`] conversion only happens
//! when rendering.

pub mod analyzer;
pub mod breakdown;
pub mod config;
pub mod currency;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod utils;

pub use analyzer::{
    analyze, analyze_and_rank, compute_kpis, rank_and_classify, Analyzer, AnalyzerImpl,
};
pub use currency::Currency;
pub use filter::{filter, FilterOptions, FilterSelection};
pub use model::{
    AnalysisError, Dataset, GrowthCategory, KpiSnapshot, KpiValue, LoadError, ModelTrendSummary,
    OutlookSignal, PriceRecord, RankedReport, RecordType, Transmission,
};
pub use pipeline::{run, InsightReport};
