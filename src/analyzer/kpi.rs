use crate::analyzer::indicators::{max, mean, min, pct_change};
use crate::filter::{filter_ignoring_year, FilterSelection};
use crate::model::{Dataset, KpiSnapshot, KpiValue, PriceRecord};
use std::collections::BTreeSet;
use tracing::debug;

/// Raw price levels of a set of records, before any comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PriceLevels {
    min: f64,
    max: f64,
    mean: f64,
    predicted: f64,
}

impl PriceLevels {
    /// Min, max and mean mix actual and forecast rows. The predicted price is the
    /// forecast mean, falling back to the overall mean when there is no forecast.
    fn from_records<'a, I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a PriceRecord>,
    {
        let mut prices = Vec::new();
        let mut forecast_prices = Vec::new();
        for record in records {
            prices.push(record.price_usd);
            if record.is_forecast() {
                forecast_prices.push(record.price_usd);
            }
        }

        let avg = mean(&prices)?;
        Some(Self {
            min: min(&prices)?,
            max: max(&prices)?,
            mean: avg,
            predicted: mean(&forecast_prices).unwrap_or(avg),
        })
    }
}

/// Year the current KPIs are compared against.
///
/// With a concrete year selected this is the previous calendar year, or none at
/// all when that year is not representable. Otherwise it
/// is the second most recent year with actual records once the transmission and
/// model filters are applied to the full dataset.
pub fn baseline_year(dataset: &Dataset, selection: &FilterSelection) -> Option<i32> {
    match selection.year {
        Some(year) => year.checked_sub(1),
        None => {
            let comparable = filter_ignoring_year(dataset, selection);
            let actual_years: BTreeSet<i32> = comparable
                .records()
                .iter()
                .filter(|r| r.is_actual())
                .map(|r| r.year)
                .collect();
            actual_years.iter().rev().nth(1).copied()
        }
    }
}

/// `baseline` is `None` when there is no comparison across time and `Some(None)`
/// when the baseline set is empty, which yields a 0 delta.
fn with_delta(value: f64, baseline: Option<Option<f64>>) -> KpiValue {
    KpiValue {
        value,
        delta_pct: baseline.map(|base| base.map_or(0.0, |base| pct_change(value, base))),
    }
}

/// Computes min/max/mean/predicted for the subset together with year-over-year
/// deltas whenever a baseline year can be determined.
pub fn compute_kpis(
    subset: &Dataset,
    dataset: &Dataset,
    selection: &FilterSelection,
) -> KpiSnapshot {
    let current = PriceLevels::from_records(subset.records()).unwrap_or(PriceLevels {
        min: 0.0,
        max: 0.0,
        mean: 0.0,
        predicted: 0.0,
    });

    let baseline_year = baseline_year(dataset, selection);
    let baseline = baseline_year.map(|year| {
        let comparable = filter_ignoring_year(dataset, selection);
        PriceLevels::from_records(comparable.records().iter().filter(|r| r.year == year))
    });

    debug!(
        "KPI baseline year: {:?}, baseline levels: {:?}",
        baseline_year, baseline
    );

    let level = |pick: fn(&PriceLevels) -> f64| baseline.map(|levels| levels.as_ref().map(pick));

    KpiSnapshot {
        min: with_delta(current.min, level(|l: &PriceLevels| l.min)),
        max: with_delta(current.max, level(|l: &PriceLevels| l.max)),
        mean: with_delta(current.mean, level(|l: &PriceLevels| l.mean)),
        predicted: with_delta(current.predicted, level(|l: &PriceLevels| l.predicted)),
        baseline_year,
        record_count: subset.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter;
    use crate::model::{RecordType, Transmission};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn dataset() -> Dataset {
        use RecordType::*;
        use Transmission::*;
        Dataset::new(vec![
            PriceRecord::new("X3", 2022, Actual, Automatic, 40000.0),
            PriceRecord::new("X3", 2023, Actual, Automatic, 44000.0),
            PriceRecord::new("X5", 2022, Actual, Manual, 60000.0),
            PriceRecord::new("X5", 2023, Actual, Manual, 66000.0),
            PriceRecord::new("X3", 2025, Forecast, Automatic, 46000.0),
            PriceRecord::new("X5", 2025, Forecast, Manual, 70000.0),
        ])
    }

    #[test]
    fn test_levels_mix_actual_and_forecast_rows() {
        let data = dataset();
        let selection = FilterSelection::all();
        let subset = filter(&data, &selection).unwrap();
        let kpis = compute_kpis(&subset, &data, &selection);

        assert!(approx(kpis.min.value, 40000.0));
        assert!(approx(kpis.max.value, 70000.0));
        assert!(approx(kpis.mean.value, 326000.0 / 6.0));
        assert!(approx(kpis.predicted.value, 58000.0));
        assert_eq!(kpis.record_count, 6);
    }

    #[test]
    fn test_predicted_falls_back_to_mean_without_forecast() {
        let data = dataset();
        let selection = FilterSelection::all().with_year(Some(2023));
        let subset = filter(&data, &selection).unwrap();
        let kpis = compute_kpis(&subset, &data, &selection);

        assert!(approx(kpis.predicted.value, 55000.0));
        assert!(approx(kpis.predicted.value, kpis.mean.value));
    }

    #[test]
    fn test_selected_year_compares_with_previous_year() {
        let data = dataset();
        let selection = FilterSelection::all().with_year(Some(2023));
        let subset = filter(&data, &selection).unwrap();
        let kpis = compute_kpis(&subset, &data, &selection);

        assert_eq!(kpis.baseline_year, Some(2022));
        // 2023 mean 55000 vs 2022 mean 50000.
        assert!(approx(kpis.mean.delta_pct.unwrap(), 10.0));
        assert!(approx(kpis.min.delta_pct.unwrap(), 10.0));
        assert!(approx(kpis.max.delta_pct.unwrap(), 10.0));
    }

    #[test]
    fn test_baseline_reapplies_transmission_and_model_filters() {
        let data = dataset();
        let selection = FilterSelection::all()
            .with_year(Some(2023))
            .with_transmissions([Transmission::Manual]);
        let subset = filter(&data, &selection).unwrap();
        let kpis = compute_kpis(&subset, &data, &selection);

        // Only X5 rows: 66000 vs 60000.
        assert!(approx(kpis.mean.delta_pct.unwrap(), 10.0));
    }

    #[test]
    fn test_missing_baseline_year_gives_zero_delta() {
        let data = dataset();
        let selection = FilterSelection::all().with_year(Some(2022));
        let subset = filter(&data, &selection).unwrap();
        let kpis = compute_kpis(&subset, &data, &selection);

        assert_eq!(kpis.baseline_year, Some(2021));
        assert_eq!(kpis.mean.delta_pct, Some(0.0));
        assert_eq!(kpis.predicted.delta_pct, Some(0.0));
    }

    #[test]
    fn test_all_years_deltas_against_second_most_recent_year() {
        let data = dataset();
        let selection = FilterSelection::all();
        let subset = filter(&data, &selection).unwrap();
        let kpis = compute_kpis(&subset, &data, &selection);

        // 2022 rows: 40000 and 60000, no forecast, so predicted falls back to 50000.
        assert_eq!(kpis.baseline_year, Some(2022));
        assert!(approx(kpis.min.delta_pct.unwrap(), 0.0));
        assert!(approx(kpis.max.delta_pct.unwrap(), 10000.0 / 60000.0 * 100.0));
        assert!(approx(
            kpis.mean.delta_pct.unwrap(),
            (326000.0 / 6.0 - 50000.0) / 50000.0 * 100.0
        ));
        assert!(approx(kpis.predicted.delta_pct.unwrap(), 16.0));
    }

    #[test]
    fn test_all_years_baseline_keeps_transmission_filter() {
        let data = dataset();
        let selection = FilterSelection::all().with_transmissions([Transmission::Manual]);
        let subset = filter(&data, &selection).unwrap();
        let kpis = compute_kpis(&subset, &data, &selection);

        // Manual rows only: X5 60000, 66000 and a 70000 forecast vs 2022's 60000.
        assert_eq!(kpis.baseline_year, Some(2022));
        assert!(approx(kpis.min.delta_pct.unwrap(), 0.0));
        assert!(approx(
            kpis.mean.delta_pct.unwrap(),
            (196000.0 / 3.0 - 60000.0) / 60000.0 * 100.0
        ));
        assert!(approx(kpis.predicted.delta_pct.unwrap(), 10000.0 / 60000.0 * 100.0));
    }

    #[test]
    fn test_unrepresentable_previous_year_has_no_comparison() {
        let data = dataset();
        let selection = FilterSelection::all().with_year(Some(i32::MIN));
        let kpis = compute_kpis(&data, &data, &selection);

        assert_eq!(kpis.baseline_year, None);
        assert_eq!(kpis.mean.delta_pct, None);
        assert_eq!(kpis.predicted.delta_pct, None);
    }

    #[test]
    fn test_all_years_uses_second_most_recent_actual_year() {
        let data = dataset();
        let selection = FilterSelection::all();
        assert_eq!(baseline_year(&data, &selection), Some(2022));
    }

    #[test]
    fn test_single_actual_year_has_no_comparison() {
        use RecordType::*;
        use Transmission::*;
        let data = Dataset::new(vec![
            PriceRecord::new("Z4", 2024, Actual, Manual, 45000.0),
            PriceRecord::new("Z4", 2026, Forecast, Manual, 50000.0),
        ]);
        let selection = FilterSelection::all();
        let subset = filter(&data, &selection).unwrap();
        let kpis = compute_kpis(&subset, &data, &selection);

        assert_eq!(kpis.baseline_year, None);
        assert_eq!(kpis.mean.delta_pct, None);
        assert_eq!(kpis.min.delta_pct, None);
    }

    #[test]
    fn test_zero_baseline_gives_zero_delta() {
        use RecordType::*;
        use Transmission::*;
        let data = Dataset::new(vec![
            PriceRecord::new("i3", 2022, Actual, Automatic, 0.0),
            PriceRecord::new("i3", 2023, Actual, Automatic, 25000.0),
        ]);
        let selection = FilterSelection::all().with_year(Some(2023));
        let subset = filter(&data, &selection).unwrap();
        let kpis = compute_kpis(&subset, &data, &selection);

        assert_eq!(kpis.mean.delta_pct, Some(0.0));
    }
}
