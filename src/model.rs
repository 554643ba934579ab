// Core structs: PriceRecord, Dataset, derived summaries and errors
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordType {
    Actual,
    Forecast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Transmission {
    Automatic,
    Manual,
}

impl Transmission {
    pub const ALL: [Transmission; 2] = [Transmission::Automatic, Transmission::Manual];
}

/// One price observation. Prices are always in the dataset's base currency (USD).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Type")]
    pub record_type: RecordType,
    #[serde(rename = "Transmission")]
    pub transmission: Transmission,
    #[serde(rename = "Price_USD")]
    pub price_usd: f64,
}

impl PriceRecord {
    pub fn new(
        model: impl Into<String>,
        year: i32,
        record_type: RecordType,
        transmission: Transmission,
        price_usd: f64,
    ) -> Self {
        Self {
            model: model.into(),
            year,
            record_type,
            transmission,
            price_usd,
        }
    }

    pub fn is_actual(&self) -> bool {
        self.record_type == RecordType::Actual
    }

    pub fn is_forecast(&self) -> bool {
        self.record_type == RecordType::Forecast
    }
}

/// Ordered, immutable collection of price records loaded once per session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<PriceRecord>,
}

impl Dataset {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<PriceRecord>> for Dataset {
    fn from(records: Vec<PriceRecord>) -> Self {
        Self::new(records)
    }
}

/// Per-model trend and volatility figures derived from the filtered subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelTrendSummary {
    pub model: String,
    pub actual_count: usize,
    pub recent_avg_price: f64,
    pub older_avg_price: f64,
    pub trend_pct: f64,
    /// Mean of the model's forecast rows; `None` means there is no forecast signal.
    pub forecast_avg_price: Option<f64>,
    pub future_trend_pct: f64,
    pub volatility: f64,
}

impl ModelTrendSummary {
    pub fn has_forecast(&self) -> bool {
        self.forecast_avg_price.is_some()
    }
}

/// A KPI amount together with its year-over-year change, when one was computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiValue {
    pub value: f64,
    pub delta_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSnapshot {
    pub min: KpiValue,
    pub max: KpiValue,
    pub mean: KpiValue,
    pub predicted: KpiValue,
    pub baseline_year: Option<i32>,
    pub record_count: usize,
}

/// Narrative bucket for the model with the strongest historical trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GrowthCategory {
    StrongGrowthLeader,
    StableGrowth,
    NoGrowth,
}

/// Investment signal derived from the forecast-relative trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutlookSignal {
    Buy,
    Hold,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedReport {
    pub best_model: ModelTrendSummary,
    pub worst_model: ModelTrendSummary,
    pub best_future_model: ModelTrendSummary,
    pub most_stable_model: ModelTrendSummary,
    pub spread: f64,
    pub growth: GrowthCategory,
    pub outlook: OutlookSignal,
    /// Every summary, ordered by trend descending.
    pub summaries: Vec<ModelTrendSummary>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("no records match the current filter selection")]
    EmptyResult,
    #[error("not enough data: no model has at least {required} actual records")]
    InsufficientData { required: usize },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },
}
