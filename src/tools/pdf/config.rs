use anyhow::Context as AnyhowContext;
use ndarray::Array1;
use serde::{
    Deserialize,
    Serialize,
};

use crate::error::{
    PdfError,
    PdfResult,
};
use crate::with_field_fn;

/// Parameters of a pooled-density reconstruction.
///
/// Defaults describe membrane-potential midpoints: a support of
/// `[-140, 20]` mV sampled at 100 000 points, reduced to 1000 points for
/// presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Lower bound of the support (inclusive).
    pub lower:               f64,
    /// Upper bound of the support (inclusive).
    pub upper:               f64,
    /// Number of points of the computation grid.
    pub n_points:            usize,
    /// Target number of points of the presentation grid.
    pub presentation_points: usize,
    /// Allowed absolute difference between a listed standard deviation and
    /// `sem * sqrt(n)`.
    pub std_tolerance:       f64,
    /// Parameters estimated from the data for the fitted Gaussian, subtracted
    /// from the goodness-of-fit degrees of freedom.
    pub estimated_params:    usize,
}

impl PdfConfig {
    pub fn new(
        lower: f64,
        upper: f64,
        n_points: usize,
        presentation_points: usize,
        std_tolerance: f64,
        estimated_params: usize,
    ) -> Self {
        Self {
            lower,
            upper,
            n_points,
            presentation_points,
            std_tolerance,
            estimated_params,
        }
    }

    with_field_fn!(lower, f64);

    with_field_fn!(upper, f64);

    with_field_fn!(n_points, usize);

    with_field_fn!(presentation_points, usize);

    with_field_fn!(std_tolerance, f64);

    with_field_fn!(estimated_params, usize);

    /// Sets both bounds of the support.
    pub fn with_bounds(
        self,
        lower: f64,
        upper: f64,
    ) -> Self {
        self.with_lower(lower).with_upper(upper)
    }

    /// Reads a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self =
            serde_json::from_str(json).context("Failed to parse PdfConfig")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PdfResult<()> {
        if !(self.lower.is_finite() && self.upper.is_finite()) {
            return Err(PdfError::InvalidConfig(format!(
                "bounds must be finite, got [{}, {}]",
                self.lower, self.upper
            )));
        }
        if self.lower >= self.upper {
            return Err(PdfError::InvalidConfig(format!(
                "lower bound {} is not below upper bound {}",
                self.lower, self.upper
            )));
        }
        if self.n_points < 2 {
            return Err(PdfError::InvalidConfig(format!(
                "computation grid needs at least 2 points, got {}",
                self.n_points
            )));
        }
        if self.presentation_points == 0 || self.presentation_points > self.n_points {
            return Err(PdfError::InvalidConfig(format!(
                "presentation points must be in 1..={}, got {}",
                self.n_points, self.presentation_points
            )));
        }
        if !(self.std_tolerance >= 0.0) {
            return Err(PdfError::InvalidConfig(format!(
                "standard deviation tolerance must be non-negative, got {}",
                self.std_tolerance
            )));
        }
        if self.n_points < self.estimated_params + 2 {
            return Err(PdfError::InvalidConfig(format!(
                "{} points leave no degrees of freedom for {} estimated \
                 parameters",
                self.n_points, self.estimated_params
            )));
        }
        Ok(())
    }

    /// Distance in computation-grid indices between presentation points.
    pub fn stride(&self) -> usize { (self.n_points / self.presentation_points).max(1) }

    /// Distance between consecutive computation-grid points.
    pub fn spacing(&self) -> f64 {
        (self.upper - self.lower) / (self.n_points - 1) as f64
    }

    /// Evenly spaced points from `lower` to `upper`, both included.
    pub fn computation_grid(&self) -> Array1<f64> {
        Array1::linspace(self.lower, self.upper, self.n_points)
    }
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            lower:               -140.0,
            upper:               20.0,
            n_points:            100_000,
            presentation_points: 1000,
            std_tolerance:       1e-6,
            estimated_params:    2,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn default_grid() {
        let config = PdfConfig::default();
        config.validate().unwrap();
        assert_eq!(config.stride(), 100);
        let x = config.computation_grid();
        assert_eq!(x.len(), 100_000);
        assert_eq!(x[0], -140.0);
        assert_approx_eq!(x[99_999], 20.0, 1e-9);
        assert_approx_eq!(x[1] - x[0], config.spacing(), 1e-12);
    }

    #[test]
    fn rejects_invalid() {
        let base = PdfConfig::default();
        assert!(base.clone().with_bounds(20.0, -140.0).validate().is_err());
        assert!(base.clone().with_bounds(0.0, 0.0).validate().is_err());
        assert!(base.clone().with_bounds(f64::NAN, 1.0).validate().is_err());
        assert!(base.clone().with_n_points(1).validate().is_err());
        assert!(base.clone().with_presentation_points(0).validate().is_err());
        assert!(base
            .clone()
            .with_presentation_points(200_000)
            .validate()
            .is_err());
        assert!(base.clone().with_std_tolerance(-1.0).validate().is_err());
        assert!(base
            .clone()
            .with_n_points(3)
            .with_presentation_points(3)
            .with_estimated_params(2)
            .validate()
            .is_err());
    }

    #[test]
    fn field_setters() {
        let config = PdfConfig::default()
            .with_lower(-100.0)
            .with_upper(40.0)
            .with_n_points(5000)
            .with_presentation_points(50)
            .with_std_tolerance(0.1)
            .with_estimated_params(0);
        assert_eq!(config, PdfConfig::new(-100.0, 40.0, 5000, 50, 0.1, 0));
        assert_eq!(config.stride(), 100);
        assert_eq!(
            PdfConfig::default().with_bounds(-100.0, 40.0),
            PdfConfig::default().with_lower(-100.0).with_upper(40.0)
        );
    }

    #[test]
    fn from_json_fills_defaults() {
        let config =
            PdfConfig::from_json(r#"{"lower": -100.0, "upper": 0.0}"#).unwrap();
        assert_eq!(config.lower, -100.0);
        assert_eq!(config.n_points, 100_000);
        assert_eq!(config.std_tolerance, 1e-6);

        assert!(PdfConfig::from_json(r#"{"lower": 5.0, "upper": 0.0}"#).is_err());
        assert!(PdfConfig::from_json("not json").is_err());
    }
}
