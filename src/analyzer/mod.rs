// Analyzer module: KPI calculator, trend analyzer and ranking/classification.

pub mod indicators;
pub mod kpi;
pub mod ranking;
pub mod trend;

use crate::filter::FilterSelection;
use crate::model::{AnalysisError, Dataset, KpiSnapshot, RankedReport};

pub use kpi::compute_kpis;
pub use ranking::{analyze_and_rank, rank_and_classify};
pub use trend::analyze;

/// Trait defining the interface for the price analytics engine.
pub trait Analyzer {
    fn compute_kpis(
        &self,
        subset: &Dataset,
        dataset: &Dataset,
        selection: &FilterSelection,
    ) -> KpiSnapshot;
    fn analyze_and_rank(&self, subset: &Dataset) -> Result<RankedReport, AnalysisError>;
}

/// Default implementation backed by the pure functions of this module.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for AnalyzerImpl {
    fn compute_kpis(
        &self,
        subset: &Dataset,
        dataset: &Dataset,
        selection: &FilterSelection,
    ) -> KpiSnapshot {
        kpi::compute_kpis(subset, dataset, selection)
    }

    fn analyze_and_rank(&self, subset: &Dataset) -> Result<RankedReport, AnalysisError> {
        ranking::analyze_and_rank(subset)
    }
}
