// Filter engine: reduces the dataset to the working subset for one selection.
use crate::model::{AnalysisError, Dataset, PriceRecord, Transmission};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Immutable filter choices for a single pipeline run.
///
/// An empty `transmissions` set selects every transmission. An empty `models`
/// set selects every model only when `empty_models_select_all` is set; otherwise
/// it matches nothing and the run reports an empty result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub transmissions: BTreeSet<Transmission>,
    pub year: Option<i32>,
    pub models: BTreeSet<String>,
    pub empty_models_select_all: bool,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl FilterSelection {
    /// Selection that passes every record.
    pub fn all() -> Self {
        Self {
            transmissions: BTreeSet::new(),
            year: None,
            models: BTreeSet::new(),
            empty_models_select_all: true,
        }
    }

    pub fn with_transmissions<I>(mut self, transmissions: I) -> Self
    where
        I: IntoIterator<Item = Transmission>,
    {
        self.transmissions = transmissions.into_iter().collect();
        self
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_empty_models_select_all(mut self, enabled: bool) -> Self {
        self.empty_models_select_all = enabled;
        self
    }

    fn matches_transmission(&self, record: &PriceRecord) -> bool {
        self.transmissions.is_empty() || self.transmissions.contains(&record.transmission)
    }

    fn matches_year(&self, record: &PriceRecord) -> bool {
        self.year.is_none_or(|year| record.year == year)
    }

    fn matches_model(&self, record: &PriceRecord) -> bool {
        if self.models.is_empty() {
            return self.empty_models_select_all;
        }
        self.models.contains(&record.model)
    }
}

/// Applies all three predicates (transmission, year, model) to the dataset.
pub fn filter(dataset: &Dataset, selection: &FilterSelection) -> Result<Dataset, AnalysisError> {
    let subset: Vec<PriceRecord> = dataset
        .records()
        .iter()
        .filter(|r| {
            selection.matches_transmission(r)
                && selection.matches_year(r)
                && selection.matches_model(r)
        })
        .cloned()
        .collect();

    debug!(
        "Filter kept {} of {} records (year: {:?}, models: {}, transmissions: {})",
        subset.len(),
        dataset.len(),
        selection.year,
        selection.models.len(),
        selection.transmissions.len()
    );

    if subset.is_empty() {
        return Err(AnalysisError::EmptyResult);
    }
    Ok(Dataset::new(subset))
}

/// Applies the transmission and model predicates only, keeping every year.
/// Used to build the prior-year comparison set for KPI deltas.
pub fn filter_ignoring_year(dataset: &Dataset, selection: &FilterSelection) -> Dataset {
    dataset
        .records()
        .iter()
        .filter(|r| selection.matches_transmission(r) && selection.matches_model(r))
        .cloned()
        .collect::<Vec<_>>()
        .into()
}

/// The choices a front end can offer for a loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Model names, sorted ascending.
    pub models: Vec<String>,
    /// Years present in the dataset, most recent first.
    pub years: Vec<i32>,
    /// Number of records per transmission type.
    pub transmission_counts: Vec<(Transmission, usize)>,
}

impl FilterOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let models: BTreeSet<&str> = dataset.records().iter().map(|r| r.model.as_str()).collect();
        let years: BTreeSet<i32> = dataset.records().iter().map(|r| r.year).collect();
        let transmission_counts = Transmission::ALL
            .iter()
            .map(|&t| {
                let count = dataset.records().iter().filter(|r| r.transmission == t).count();
                (t, count)
            })
            .collect();

        Self {
            models: models.into_iter().map(String::from).collect(),
            years: years.into_iter().rev().collect(),
            transmission_counts,
        }
    }
}
