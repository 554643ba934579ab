// Plain-text rendering of an insight report.
use crate::currency::Currency;
use crate::model::{GrowthCategory, KpiValue, OutlookSignal, RankedReport};
use crate::pipeline::InsightReport;
use crate::utils::signed_pct;
use std::fmt::Write;

fn kpi_line(label: &str, kpi: &KpiValue, currency: Currency) -> String {
    match kpi.delta_pct {
        Some(delta) => format!(
            "{:<16}{} ({} YoY)",
            label,
            currency.display(kpi.value),
            signed_pct(delta)
        ),
        None => format!("{:<16}{}", label, currency.display(kpi.value)),
    }
}

fn growth_card(ranking: &RankedReport, currency: Currency) -> Option<String> {
    let best = &ranking.best_model;
    let price = currency.display(best.recent_avg_price);
    match ranking.growth {
        GrowthCategory::StrongGrowthLeader => Some(format!(
            "🏆 Strong growth leader: {} with an increase of {:.1}% between older and recent \
             years, now at {}.",
            best.model, best.trend_pct, price
        )),
        GrowthCategory::StableGrowth => Some(format!(
            "📈 Stable growth: {} rose {:.1}%, now at {}.",
            best.model, best.trend_pct, price
        )),
        GrowthCategory::NoGrowth => None,
    }
}

fn outlook_card(ranking: &RankedReport, currency: Currency) -> String {
    let model = &ranking.best_future_model;
    let forecast = model
        .forecast_avg_price
        .map(|p| format!(" to {}", currency.display(p)))
        .unwrap_or_default();
    match ranking.outlook {
        OutlookSignal::Buy => format!(
            "💰 Buy signal: {} is forecast to rise {:.1}%{}.",
            model.model, model.future_trend_pct, forecast
        ),
        OutlookSignal::Sell => format!(
            "⚠️ Sell signal: {} is forecast to drop about {:.1}%{}.",
            model.model,
            model.future_trend_pct.abs(),
            forecast
        ),
        OutlookSignal::Hold => format!(
            "⏸ Hold: {} is expected to stay flat (change: {}).",
            model.model,
            signed_pct(model.future_trend_pct)
        ),
    }
}

/// Renders KPIs, narrative cards and the model table. Amounts are converted to
/// `currency` here and nowhere earlier.
pub fn render_report(report: &InsightReport, currency: Currency) -> String {
    let mut out = String::new();
    let kpis = &report.kpis;

    let _ = writeln!(out, "📊 Key metrics ({} records)", kpis.record_count);
    if let Some(year) = kpis.baseline_year {
        let _ = writeln!(out, "   compared with {}", year);
    }
    for (label, kpi) in [
        ("Min price", &kpis.min),
        ("Max price", &kpis.max),
        ("Average price", &kpis.mean),
        ("Predicted price", &kpis.predicted),
    ] {
        let _ = writeln!(out, "  {}", kpi_line(label, kpi, currency));
    }

    let _ = writeln!(out, "\n📖 Market analysis");
    match &report.ranking {
        Some(ranking) => {
            if let Some(card) = growth_card(ranking, currency) {
                let _ = writeln!(out, "  {}", card);
            }
            let _ = writeln!(out, "  {}", outlook_card(ranking, currency));
            let stable = &ranking.most_stable_model;
            let _ = writeln!(
                out,
                "  🛡 Most stable: {} (std dev {}), average of recent years {}.",
                stable.model,
                currency.display(stable.volatility),
                currency.display(stable.recent_avg_price)
            );
            // A comparison needs at least two ranked models.
            if ranking.summaries.len() > 1 {
                let _ = writeln!(
                    out,
                    "  ⚖️ Best vs worst: {} ({}) vs {} ({}), spread {:.1}%.",
                    ranking.best_model.model,
                    signed_pct(ranking.best_model.trend_pct),
                    ranking.worst_model.model,
                    signed_pct(ranking.worst_model.trend_pct),
                    ranking.spread
                );
            }
        }
        None if report.actual_record_count == 0 => {
            let _ = writeln!(out, "  No actual data to analyze. Adjust the filters.");
        }
        None => {
            let _ = writeln!(
                out,
                "  Not enough actual data for a trend analysis. Adjust the filters."
            );
        }
    }

    let _ = writeln!(out, "\n{:<12}{:>20}{:>20}", "Model", "Average", "Predicted");
    let table = &report.model_table;
    for row in table.rows.iter().chain(std::iter::once(&table.total)) {
        let _ = writeln!(
            out,
            "{:<12}{:>20}{:>20}",
            row.model,
            currency.display(row.avg_price),
            currency.display(row.predicted_price)
        );
    }
    out
}
