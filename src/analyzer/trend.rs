use crate::analyzer::indicators::{mean, pct_change, sample_std_dev};
use crate::model::{Dataset, ModelTrendSummary, PriceRecord};
use std::collections::HashMap;
use tracing::debug;

/// Models need at least this many actual records to get a trend.
pub const MIN_ACTUAL_RECORDS: usize = 2;

/// Size of the recent and (minimum) older comparison windows.
const WINDOW: usize = 3;

/// Builds one trend summary per model with enough actual history.
///
/// Models are visited in order of first appearance in the subset, which is the
/// tie-break order used later by the ranking.
pub fn analyze(subset: &Dataset) -> Vec<ModelTrendSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<&PriceRecord>> = HashMap::new();
    for record in subset.records() {
        let model = record.model.as_str();
        let entry = grouped.entry(model).or_default();
        if entry.is_empty() {
            order.push(model);
        }
        entry.push(record);
    }

    order
        .into_iter()
        .filter_map(|model| summarize_model(model, grouped.get(model)?))
        .collect()
}

/// Trend figures for one model, or `None` if it has fewer than two actual records.
pub fn summarize_model(model: &str, records: &[&PriceRecord]) -> Option<ModelTrendSummary> {
    let mut actual: Vec<&PriceRecord> =
        records.iter().copied().filter(|r| r.is_actual()).collect();
    if actual.len() < MIN_ACTUAL_RECORDS {
        debug!("Skipping {}: only {} actual records", model, actual.len());
        return None;
    }
    actual.sort_by_key(|r| r.year);

    let prices: Vec<f64> = actual.iter().map(|r| r.price_usd).collect();
    let n = prices.len();

    // The two windows overlap when n < 6.
    let recent = &prices[n - WINDOW.min(n)..];
    let older = &prices[..WINDOW.max(n.saturating_sub(WINDOW)).min(n)];

    let recent_avg = mean(recent)?;
    let older_avg = mean(older)?;
    let trend_pct = pct_change(recent_avg, older_avg);

    let forecast_prices: Vec<f64> = records
        .iter()
        .filter(|r| r.is_forecast())
        .map(|r| r.price_usd)
        .collect();
    let forecast_avg = mean(&forecast_prices);
    let future_trend_pct = forecast_avg
        .map(|avg| pct_change(avg, recent_avg))
        .unwrap_or(0.0);

    let volatility = sample_std_dev(&prices);

    debug!(
        "{}: n={}, recent={:.2}, older={:.2}, trend={:.2}%, future={:.2}%, volatility={:.2}",
        model, n, recent_avg, older_avg, trend_pct, future_trend_pct, volatility
    );

    Some(ModelTrendSummary {
        model: model.to_string(),
        actual_count: n,
        recent_avg_price: recent_avg,
        older_avg_price: older_avg,
        trend_pct,
        forecast_avg_price: forecast_avg,
        future_trend_pct,
        volatility,
    })
}
