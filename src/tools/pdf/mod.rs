//! Pooled probability density reconstruction.
//!
//! Each study reporting `(mean, sem, n, std)` is modelled as a normal density
//! with the reported mean and standard deviation. The pooled density is the
//! sum of these curves weighted by `n / Σn`, sampled on a fine computation
//! grid. From it the engine derives the pooled mean and standard deviation,
//! the two-sigma range, and a chi-squared p-value for the hypothesis that the
//! pooled density is itself Gaussian.
//!
//! ```
//! use pooled_pdf::prelude::*;
//!
//! let rows: Vec<(&str, f64, f64, i64, f64)> = vec![
//!     ("A", -40.0, 2.0, 4, 4.0),
//!     ("B", -60.0, 2.0, 4, 4.0),
//! ];
//! let result = aggregate(rows, false).unwrap();
//! assert_eq!(result.m(), 2);
//! assert_eq!(result.n(), 8);
//! assert!((result.mean() + 50.0).abs() < 1e-3);
//! ```

pub mod config;
pub mod reduce;

use std::fmt::Display;

pub use config::PdfConfig;
use itertools::Itertools;
use log::{
    debug,
    info,
    trace,
    warn,
};
use ndarray::Array1;
use rayon::prelude::*;

use crate::data_structs::{
    AggregateResult,
    DataQualityWarning,
    DensityGrid,
    RowKey,
    StudyCurve,
    StudyMeasurement,
};
use crate::error::{
    PdfError,
    PdfResult,
};
use crate::utils::{
    chi_squared_test,
    gaussian,
    n_threads,
    THREAD_POOL,
};
use reduce::downsample;

/// Builds pooled densities with a fixed [`PdfConfig`].
///
/// The aggregator holds no state besides its configuration; calls are
/// independent of each other.
#[derive(Debug, Clone, Default)]
pub struct PdfAggregator {
    config: PdfConfig,
}

/// Rows that contribute to the pooled density, with their keys.
struct Gathered {
    rows:     Vec<(RowKey, StudyMeasurement)>,
    total_n:  u64,
    warnings: Vec<DataQualityWarning>,
}

impl PdfAggregator {
    pub fn new(config: PdfConfig) -> PdfResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PdfConfig { &self.config }

    /// Reconstructs the pooled density of `rows`.
    ///
    /// Rows with a zero sample size are skipped. A listed standard deviation
    /// that disagrees with `sem * sqrt(n)` is logged and recorded as a
    /// [`DataQualityWarning`], and the listed value is used regardless.
    ///
    /// With `emit_individual`, the weighted curve of every contributing row
    /// is kept (at presentation resolution) in input order.
    ///
    /// # Errors
    ///
    /// * [`PdfError::InsufficientData`] if no row has a positive sample size.
    /// * [`PdfError::NegativeSampleSize`] / [`PdfError::InvalidMeasurement`]
    ///   naming the first offending row.
    /// * [`PdfError::BelowResolution`] naming the first row whose standard
    ///   deviation is smaller than the grid spacing.
    /// * [`PdfError::NoMassInSupport`] if every study lies so far outside the
    ///   support that the pooled density vanishes on the grid.
    pub fn aggregate<I, R>(
        &self,
        rows: I,
        emit_individual: bool,
    ) -> PdfResult<AggregateResult>
    where
        I: IntoIterator<Item = R>,
        R: Into<StudyMeasurement>, {
        let config = &self.config;
        let Gathered {
            rows,
            total_n,
            warnings,
        } = self.gather(rows)?;

        info!(
            "Aggregating {} studies ({} cells) over [{}, {}]",
            rows.len(),
            total_n,
            config.lower,
            config.upper
        );

        let x = config.computation_grid();
        let stride = config.stride();

        let (y, studies) = rows.iter().try_fold(
            (Array1::<f64>::zeros(x.len()), Vec::new()),
            |(sum, mut studies), (key, row)| -> PdfResult<_> {
                let weight = row.sample_size as f64 / total_n as f64;
                let pdf = gaussian(x.view(), row.mean, row.standard_deviation)?
                    * weight;
                trace!("{}: weight {:.4}", key, weight);
                if emit_individual {
                    studies.push(StudyCurve {
                        key:     key.clone(),
                        density: downsample(pdf.view(), stride),
                    });
                }
                Ok((sum + &pdf, studies))
            },
        )?;

        let combined = DensityGrid::from_aligned(x.clone(), y);
        let (mean, sigma) = combined.moments().ok_or(PdfError::NoMassInSupport {
            lower: config.lower,
            upper: config.upper,
        })?;

        let z = gaussian(x.view(), mean, sigma)?;
        let fitted = DensityGrid::from_aligned(x, z);
        let (chi_squared, p_value) =
            chi_squared_test(&combined, &fitted, config.estimated_params)?;
        let area = combined.area();

        debug!(
            "Pooled density: mean={:.4}, sigma={:.4}, area={:.6}, chi2={:.4e}, \
             p={:.4}",
            mean, sigma, area, chi_squared, p_value
        );

        Ok(AggregateResult {
            m: rows.len(),
            n: total_n,
            combined: combined.downsample(stride),
            fitted: fitted.downsample(stride),
            mean,
            sigma,
            chi_squared,
            p_value,
            area,
            studies: emit_individual.then_some(studies),
            warnings,
        })
    }

    /// Aggregates several independent row sets, e.g. subgroups of one
    /// query, on the crate thread pool. Results keep the order of `groups`;
    /// a failing group does not affect the others.
    pub fn aggregate_groups<N, I, R>(
        &self,
        groups: Vec<(N, I)>,
        emit_individual: bool,
    ) -> Vec<(N, PdfResult<AggregateResult>)>
    where
        N: Display + Send,
        I: IntoIterator<Item = R> + Send,
        R: Into<StudyMeasurement>, {
        info!(
            "Aggregating {} groups on {} threads",
            groups.len(),
            n_threads()
        );
        THREAD_POOL.install(|| {
            groups
                .into_par_iter()
                .map(|(name, rows)| {
                    let result = self.aggregate(rows, emit_individual);
                    if let Err(e) = &result {
                        warn!("Group {}: {}", name, e);
                    }
                    (name, result)
                })
                .collect()
        })
    }

    /// Assigns keys, drops skipped rows, validates the rest and runs the
    /// standard deviation consistency check.
    fn gather<I, R>(
        &self,
        rows: I,
    ) -> PdfResult<Gathered>
    where
        I: IntoIterator<Item = R>,
        R: Into<StudyMeasurement>, {
        let mut warnings = Vec::new();
        let mut retained = Vec::new();
        let spacing = self.config.spacing();

        for (index, row) in rows.into_iter().enumerate() {
            let row: StudyMeasurement = row.into();
            let key = RowKey::new(index, row.label.as_str());

            if row.is_skipped() {
                trace!("{}: no measurement, skipped", key);
                continue;
            }
            if row.sample_size < 0 {
                return Err(PdfError::NegativeSampleSize {
                    key,
                    sample_size: row.sample_size,
                });
            }
            if !(row.mean.is_finite()
                && row.standard_deviation.is_finite()
                && row.standard_deviation > 0.0)
            {
                return Err(PdfError::InvalidMeasurement {
                    key,
                    mean: row.mean,
                    standard_deviation: row.standard_deviation,
                });
            }
            if row.standard_deviation < spacing {
                return Err(PdfError::BelowResolution {
                    key,
                    standard_deviation: row.standard_deviation,
                    spacing,
                });
            }
            if !row.is_consistent(self.config.std_tolerance) {
                let warning = DataQualityWarning {
                    key:        key.clone(),
                    listed:     row.standard_deviation,
                    calculated: row.calculated_standard_deviation(),
                };
                warn!("{}", warning);
                warnings.push(warning);
            }
            retained.push((key, row));
        }

        let total_n = retained
            .iter()
            .map(|(_, row)| row.sample_size as u64)
            .sum::<u64>();
        if retained.is_empty() || total_n == 0 {
            return Err(PdfError::InsufficientData);
        }
        if !warnings.is_empty() {
            debug!(
                "Inconsistent standard deviations: {}",
                warnings.iter().map(|w| &w.key).join(", ")
            );
        }

        Ok(Gathered {
            rows: retained,
            total_n,
            warnings,
        })
    }
}

/// [`PdfAggregator::aggregate`] with the default configuration.
pub fn aggregate<I, R>(
    rows: I,
    emit_individual: bool,
) -> PdfResult<AggregateResult>
where
    I: IntoIterator<Item = R>,
    R: Into<StudyMeasurement>, {
    PdfAggregator::default().aggregate(rows, emit_individual)
}
