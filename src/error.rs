use thiserror::Error;

use crate::data_structs::RowKey;

/// Errors raised while building a pooled density.
///
/// Data-quality problems that do not prevent aggregation are reported as
/// [`DataQualityWarning`](crate::data_structs::DataQualityWarning)s instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PdfError {
    /// No row with a positive sample size was supplied.
    #[error("insufficient data: no measurements with a positive sample size")]
    InsufficientData,

    /// Every retained density vanished on the configured support, i.e. the
    /// studies lie outside `[lower, upper]`.
    #[error(
        "pooled density has no mass inside the support [{lower}, {upper}]"
    )]
    NoMassInSupport { lower: f64, upper: f64 },

    #[error("row {key}: negative sample size {sample_size}")]
    NegativeSampleSize { key: RowKey, sample_size: i64 },

    #[error(
        "row {key}: unusable measurement (mean = {mean}, standard deviation \
         = {standard_deviation})"
    )]
    InvalidMeasurement {
        key:                RowKey,
        mean:               f64,
        standard_deviation: f64,
    },

    /// The row's density is narrower than the computation grid can resolve.
    #[error(
        "row {key}: standard deviation {standard_deviation} is below the grid \
         spacing {spacing}"
    )]
    BelowResolution {
        key:                RowKey,
        standard_deviation: f64,
        spacing:            f64,
    },

    /// The Gaussian kernel needs a finite mean and a positive, finite sigma.
    #[error("gaussian kernel: invalid parameters (mu = {mu}, sigma = {sigma})")]
    InvalidKernel { mu: f64, sigma: f64 },

    #[error("grid has {x} x values but {density} density values")]
    LengthMismatch { x: usize, density: usize },

    #[error("goodness-of-fit: {0}")]
    InvalidFitInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type PdfResult<T> = Result<T, PdfError>;
