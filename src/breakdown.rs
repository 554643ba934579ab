// Per-model and per-year breakdowns of the filtered subset.
use crate::analyzer::indicators::mean;
use crate::model::{Dataset, PriceRecord};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPriceRow {
    pub model: String,
    pub avg_price: f64,
    pub predicted_price: f64,
}

/// Average and predicted price per model plus a `Total` row over the whole subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPriceTable {
    pub rows: Vec<ModelPriceRow>,
    pub total: ModelPriceRow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyAverage {
    pub year: i32,
    pub model: String,
    pub avg_price: f64,
}

fn price_row(model: &str, records: &[&PriceRecord]) -> ModelPriceRow {
    let prices: Vec<f64> = records.iter().map(|r| r.price_usd).collect();
    let forecast: Vec<f64> = records
        .iter()
        .filter(|r| r.is_forecast())
        .map(|r| r.price_usd)
        .collect();
    let avg_price = mean(&prices).unwrap_or(0.0);

    ModelPriceRow {
        model: model.to_string(),
        avg_price,
        predicted_price: mean(&forecast).unwrap_or(avg_price),
    }
}

fn group_by_model(subset: &Dataset) -> BTreeMap<&str, Vec<&PriceRecord>> {
    let mut groups: BTreeMap<&str, Vec<&PriceRecord>> = BTreeMap::new();
    for record in subset.records() {
        groups.entry(record.model.as_str()).or_default().push(record);
    }
    groups
}

/// Rows sorted by model name; predicted falls back to the average when a model
/// has no forecast rows.
pub fn model_price_table(subset: &Dataset) -> ModelPriceTable {
    let rows = group_by_model(subset)
        .into_iter()
        .map(|(model, records)| price_row(model, &records))
        .collect();
    let all: Vec<&PriceRecord> = subset.records().iter().collect();

    ModelPriceTable {
        rows,
        total: price_row("Total", &all),
    }
}

/// Mean price per model, cheapest first.
pub fn model_averages(subset: &Dataset) -> Vec<(String, f64)> {
    let mut averages: Vec<(String, f64)> = group_by_model(subset)
        .into_iter()
        .map(|(model, records)| {
            let prices: Vec<f64> = records.iter().map(|r| r.price_usd).collect();
            (model.to_string(), mean(&prices).unwrap_or(0.0))
        })
        .collect();
    averages.sort_by(|a, b| a.1.total_cmp(&b.1));
    averages
}

/// Mean price per (year, model), ordered by year then model.
pub fn yearly_model_averages(subset: &Dataset) -> Vec<YearlyAverage> {
    let mut groups: BTreeMap<(i32, &str), Vec<f64>> = BTreeMap::new();
    for record in subset.records() {
        groups
            .entry((record.year, record.model.as_str()))
            .or_default()
            .push(record.price_usd);
    }

    groups
        .into_iter()
        .map(|((year, model), prices)| YearlyAverage {
            year,
            model: model.to_string(),
            avg_price: mean(&prices).unwrap_or(0.0),
        })
        .collect()
}
