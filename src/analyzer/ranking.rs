use crate::analyzer::trend::{analyze, MIN_ACTUAL_RECORDS};
use crate::model::{
    AnalysisError, Dataset, GrowthCategory, ModelTrendSummary, OutlookSignal, RankedReport,
};
use std::cmp::Ordering;

/// Historical trend above this percentage marks a strong growth leader.
pub const STRONG_GROWTH_PCT: f64 = 5.0;
/// Forecast-relative trend beyond +/- this percentage turns into buy/sell.
pub const SIGNAL_PCT: f64 = 3.0;

impl GrowthCategory {
    pub fn from_trend(trend_pct: f64) -> Self {
        if trend_pct > STRONG_GROWTH_PCT {
            GrowthCategory::StrongGrowthLeader
        } else if trend_pct > 0.0 {
            GrowthCategory::StableGrowth
        } else {
            GrowthCategory::NoGrowth
        }
    }
}

impl OutlookSignal {
    pub fn from_future_trend(future_trend_pct: f64) -> Self {
        if future_trend_pct > SIGNAL_PCT {
            OutlookSignal::Buy
        } else if future_trend_pct < -SIGNAL_PCT {
            OutlookSignal::Sell
        } else {
            OutlookSignal::Hold
        }
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn ascending(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Orders the summaries and picks best, worst, best-future and most-stable models.
/// All sorts are stable, so ties keep the analyzer's iteration order.
pub fn rank_and_classify(summaries: Vec<ModelTrendSummary>) -> Result<RankedReport, AnalysisError> {
    let mut by_trend = summaries;
    by_trend.sort_by(|a, b| descending(a.trend_pct, b.trend_pct));

    let (Some(best), Some(worst)) = (by_trend.first(), by_trend.last()) else {
        return Err(AnalysisError::InsufficientData {
            required: MIN_ACTUAL_RECORDS,
        });
    };
    let best = best.clone();
    let worst = worst.clone();

    let mut by_future: Vec<&ModelTrendSummary> = by_trend.iter().collect();
    by_future.sort_by(|a, b| descending(a.future_trend_pct, b.future_trend_pct));
    let best_future = by_future[0].clone();

    let mut by_volatility: Vec<&ModelTrendSummary> = by_trend.iter().collect();
    by_volatility.sort_by(|a, b| ascending(a.volatility, b.volatility));
    let most_stable = by_volatility[0].clone();

    Ok(RankedReport {
        spread: (best.trend_pct - worst.trend_pct).abs(),
        growth: GrowthCategory::from_trend(best.trend_pct),
        outlook: OutlookSignal::from_future_trend(best_future.future_trend_pct),
        best_model: best,
        worst_model: worst,
        best_future_model: best_future,
        most_stable_model: most_stable,
        summaries: by_trend,
    })
}

/// Trend analysis followed by ranking, for one filtered subset.
pub fn analyze_and_rank(subset: &Dataset) -> Result<RankedReport, AnalysisError> {
    rank_and_classify(analyze(subset))
}
