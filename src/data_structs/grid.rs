use ndarray::{
    Array1,
    ArrayView1,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::error::{
    PdfError,
    PdfResult,
};
use crate::tools::pdf::reduce::downsample;
use crate::utils::normalize;

/// A density sampled on an ordered support: parallel `x` and `density`
/// arrays of equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityGrid {
    x:       Array1<f64>,
    density: Array1<f64>,
}

impl DensityGrid {
    pub fn try_new(
        x: Array1<f64>,
        density: Array1<f64>,
    ) -> PdfResult<Self> {
        if x.len() != density.len() {
            return Err(PdfError::LengthMismatch {
                x:       x.len(),
                density: density.len(),
            });
        }
        Ok(Self { x, density })
    }

    /// Caller guarantees equal lengths.
    pub(crate) fn from_aligned(
        x: Array1<f64>,
        density: Array1<f64>,
    ) -> Self {
        debug_assert_eq!(x.len(), density.len());
        Self { x, density }
    }

    pub fn len(&self) -> usize { self.x.len() }

    pub fn is_empty(&self) -> bool { self.x.is_empty() }

    pub fn x(&self) -> ArrayView1<'_, f64> { self.x.view() }

    pub fn density(&self) -> ArrayView1<'_, f64> { self.density.view() }

    /// `(x, density)` pairs in grid order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x
            .iter()
            .copied()
            .zip(self.density.iter().copied())
    }

    /// Distance between the first two points, `0.0` for grids shorter than
    /// two points. Grids built by this crate are evenly spaced.
    pub fn spacing(&self) -> f64 {
        if self.x.len() < 2 {
            0.0
        }
        else {
            self.x[1] - self.x[0]
        }
    }

    /// Plain sum of the density values.
    pub fn total(&self) -> f64 { self.density.sum() }

    /// Riemann approximation of the area under the curve, `Σ density · Δx`.
    pub fn area(&self) -> f64 { self.total() * self.spacing() }

    /// Same support, density rescaled to sum to one.
    pub fn normalized(&self) -> PdfResult<Self> {
        Ok(Self::from_aligned(
            self.x.clone(),
            normalize(self.density.view())?,
        ))
    }

    /// First moment and square root of the second central moment of the
    /// sampled density, or `None` if it has no mass.
    ///
    /// Both are discrete approximations; their accuracy follows the grid
    /// resolution.
    pub fn moments(&self) -> Option<(f64, f64)> {
        let total = self.total();
        if !(total > 0.0 && total.is_finite()) {
            return None;
        }
        let mean = (&self.x * &self.density).sum() / total;
        let variance = self
            .iter()
            .map(|(x, y)| y * (x - mean).powi(2))
            .sum::<f64>()
            / total;
        Some((mean, variance.sqrt()))
    }

    /// Every `stride`-th point, starting with the first.
    pub fn downsample(
        &self,
        stride: usize,
    ) -> Self {
        Self::from_aligned(
            downsample(self.x.view(), stride),
            downsample(self.density.view(), stride),
        )
    }

    pub fn into_parts(self) -> (Array1<f64>, Array1<f64>) {
        (self.x, self.density)
    }
}
