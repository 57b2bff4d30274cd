use log::{
    debug,
    warn,
};
use ndarray::{
    Array1,
    ArrayView1,
};
use statrs::distribution::{
    ChiSquared,
    Continuous,
    ContinuousCDF,
    Normal,
};

use crate::data_structs::DensityGrid;
use crate::error::{
    PdfError,
    PdfResult,
};

/// Normal probability density with mean `mu` and standard deviation `sigma`,
/// evaluated at every point of `x`:
///
/// `1 / (sigma * sqrt(2π)) * exp(-0.5 * ((x - mu) / sigma)^2)`
///
/// Fails with [`PdfError::InvalidKernel`] unless `mu` is finite and `sigma`
/// is positive and finite, so the output never contains `inf` or `nan`.
pub fn gaussian(
    x: ArrayView1<f64>,
    mu: f64,
    sigma: f64,
) -> PdfResult<Array1<f64>> {
    if !(mu.is_finite() && sigma.is_finite() && sigma > 0.0) {
        return Err(PdfError::InvalidKernel { mu, sigma });
    }
    let normal =
        Normal::new(mu, sigma).map_err(|_| PdfError::InvalidKernel { mu, sigma })?;
    Ok(x.mapv(|v| normal.pdf(v)))
}

/// Rescales `values` so they sum to one.
pub fn normalize(values: ArrayView1<f64>) -> PdfResult<Array1<f64>> {
    let total = values.sum();
    if !(total > 0.0 && total.is_finite()) {
        return Err(PdfError::InvalidFitInput(format!(
            "values sum to {}, cannot normalize",
            total
        )));
    }
    Ok(values.mapv(|v| v / total))
}

/// Pearson's chi-squared goodness-of-fit test of `observed` against
/// `expected`, both treated as discrete distributions over the same bins.
///
/// Both inputs are normalized to sum to one first. The statistic is
/// `Σ (o - e)^2 / e` with `bins - 1 - ddof` degrees of freedom, where `ddof`
/// is the number of parameters estimated from the data to build `expected`.
/// Returns `(statistic, p_value)`, the p-value being the upper tail of the
/// chi-squared distribution.
///
/// Bins where both distributions are zero are ignored. A bin where only the
/// expectation is zero makes the statistic infinite and the p-value zero.
pub fn chi_squared(
    observed: ArrayView1<f64>,
    expected: ArrayView1<f64>,
    ddof: usize,
) -> PdfResult<(f64, f64)> {
    if observed.len() != expected.len() {
        return Err(PdfError::InvalidFitInput(format!(
            "observed has {} bins but expected has {}",
            observed.len(),
            expected.len()
        )));
    }
    let bins = observed.len();
    if bins < ddof + 2 {
        return Err(PdfError::InvalidFitInput(format!(
            "{} bins leave no degrees of freedom with {} estimated parameters",
            bins, ddof
        )));
    }

    let observed = normalize(observed)?;
    let expected = normalize(expected)?;

    let statistic = observed
        .iter()
        .zip(expected.iter())
        .map(|(&o, &e)| {
            if e > 0.0 {
                (o - e).powi(2) / e
            }
            else if o == 0.0 {
                0.0
            }
            else {
                f64::INFINITY
            }
        })
        .sum::<f64>();
    let dof = (bins - 1 - ddof) as f64;

    let p_value = if statistic.is_infinite() {
        warn!("Chi-squared test: observed mass where expectation is zero");
        0.0
    }
    else {
        ChiSquared::new(dof)
            .map_err(|e| PdfError::InvalidFitInput(e.to_string()))?
            .sf(statistic)
            .clamp(0.0, 1.0)
    };

    debug!(
        "Chi-squared test: statistic={:.6e}, dof={}, p={:.6}",
        statistic, dof, p_value
    );
    Ok((statistic, p_value))
}

/// [`chi_squared`] over the densities of two grids.
pub fn chi_squared_test(
    observed: &DensityGrid,
    expected: &DensityGrid,
    estimated_params: usize,
) -> PdfResult<(f64, f64)> {
    chi_squared(observed.density(), expected.density(), estimated_params)
}
