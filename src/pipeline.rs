// Filter -> KPI / trend / ranking -> report, for one selection.
use crate::analyzer::{Analyzer, AnalyzerImpl};
use crate::breakdown::{
    model_averages, model_price_table, yearly_model_averages, ModelPriceTable, YearlyAverage,
};
use crate::filter::{filter, FilterSelection};
use crate::model::{AnalysisError, Dataset, KpiSnapshot, RankedReport};
use serde::Serialize;
use tracing::{info, warn};

/// Everything a front end needs to present one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightReport {
    pub selection: FilterSelection,
    pub kpis: KpiSnapshot,
    /// `None` when no model has enough actual history for a trend narrative.
    pub ranking: Option<RankedReport>,
    /// Number of actual (historical) records in the filtered subset.
    pub actual_record_count: usize,
    pub model_table: ModelPriceTable,
    /// Mean price per model, cheapest first.
    pub model_averages: Vec<(String, f64)>,
    pub yearly_averages: Vec<YearlyAverage>,
}

/// Runs the whole pipeline with the default analyzer.
pub fn run(dataset: &Dataset, selection: &FilterSelection) -> Result<InsightReport, AnalysisError> {
    run_with(&AnalyzerImpl::new(), dataset, selection)
}

/// Runs the pipeline. An empty filter result stops it; a lack of trend data only
/// drops the ranking.
pub fn run_with<A: Analyzer>(
    analyzer: &A,
    dataset: &Dataset,
    selection: &FilterSelection,
) -> Result<InsightReport, AnalysisError> {
    let subset = filter(dataset, selection)?;
    info!("Analyzing {} of {} records", subset.len(), dataset.len());

    let kpis = analyzer.compute_kpis(&subset, dataset, selection);

    let ranking = match analyzer.analyze_and_rank(&subset) {
        Ok(report) => {
            info!(
                "Ranked {} models: best {} ({:.2}%), worst {} ({:.2}%)",
                report.summaries.len(),
                report.best_model.model,
                report.best_model.trend_pct,
                report.worst_model.model,
                report.worst_model.trend_pct
            );
            Some(report)
        }
        Err(e @ AnalysisError::InsufficientData { .. }) => {
            warn!("Skipping trend narrative: {}", e);
            None
        }
        Err(e) => return Err(e),
    };

    Ok(InsightReport {
        selection: selection.clone(),
        kpis,
        ranking,
        actual_record_count: subset.records().iter().filter(|r| r.is_actual()).count(),
        model_table: model_price_table(&subset),
        model_averages: model_averages(&subset),
        yearly_averages: yearly_model_averages(&subset),
    })
}
