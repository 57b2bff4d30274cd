use serde::{
    Deserialize,
    Serialize,
};

use super::grid::DensityGrid;
use super::measurement::{
    DataQualityWarning,
    RowKey,
};
use crate::io::export::ExportTable;

/// One study's weighted contribution to the pooled density, on the
/// presentation grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyCurve {
    pub key:     RowKey,
    pub density: ndarray::Array1<f64>,
}

/// Outcome of a single aggregation call.
///
/// Curves are stored at presentation resolution; the scalar statistics were
/// computed on the full computation grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Number of contributing studies.
    pub(crate) m:           usize,
    /// Pooled sample size.
    pub(crate) n:           u64,
    /// Sample-size weighted sum of the per-study densities.
    pub(crate) combined:    DensityGrid,
    /// Gaussian with the pooled mean and sigma.
    pub(crate) fitted:      DensityGrid,
    pub(crate) mean:        f64,
    pub(crate) sigma:       f64,
    pub(crate) chi_squared: f64,
    pub(crate) p_value:     f64,
    /// Area under the full-resolution pooled density.
    pub(crate) area:        f64,
    pub(crate) studies:     Option<Vec<StudyCurve>>,
    pub(crate) warnings:    Vec<DataQualityWarning>,
}

impl AggregateResult {
    pub fn m(&self) -> usize { self.m }

    pub fn n(&self) -> u64 { self.n }

    pub fn combined(&self) -> &DensityGrid { &self.combined }

    pub fn fitted(&self) -> &DensityGrid { &self.fitted }

    pub fn mean(&self) -> f64 { self.mean }

    pub fn sigma(&self) -> f64 { self.sigma }

    /// Lower end of the two-sigma range.
    pub fn lo(&self) -> f64 { self.mean - 2.0 * self.sigma }

    /// Upper end of the two-sigma range.
    pub fn hi(&self) -> f64 { self.mean + 2.0 * self.sigma }

    pub fn chi_squared(&self) -> f64 { self.chi_squared }

    /// Probability of a chi-squared statistic at least this large if the
    /// pooled density were exactly Gaussian.
    pub fn p_value(&self) -> f64 { self.p_value }

    pub fn area(&self) -> f64 { self.area }

    /// Per-study weighted curves, if they were requested.
    pub fn studies(&self) -> Option<&[StudyCurve]> { self.studies.as_deref() }

    pub fn warnings(&self) -> &[DataQualityWarning] { &self.warnings }

    /// Flattened statistics for tables.
    pub fn summary(&self) -> AggregateSummary { AggregateSummary::from(self) }

    /// Column-aligned view of the presentation curves.
    pub fn table(&self) -> ExportTable { ExportTable::from_result(self) }
}

/// Flat row of the statistics of an [`AggregateResult`], in the column order
/// of the subgroup tables: reports, cells, mean, stddev, lo, hi, p.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub reports: usize,
    pub cells:   u64,
    pub mean:    f64,
    pub stddev:  f64,
    pub lo:      f64,
    pub hi:      f64,
    pub p:       f64,
}

impl From<&AggregateResult> for AggregateSummary {
    fn from(value: &AggregateResult) -> Self {
        AggregateSummary {
            reports: value.m,
            cells:   value.n,
            mean:    value.mean,
            stddev:  value.sigma,
            lo:      value.lo(),
            hi:      value.hi(),
            p:       value.p_value,
        }
    }
}

impl From<AggregateResult> for AggregateSummary {
    fn from(value: AggregateResult) -> Self { AggregateSummary::from(&value) }
}
