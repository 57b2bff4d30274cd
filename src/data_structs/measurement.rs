use std::fmt::{
    self,
    Display,
};

use serde::{
    Deserialize,
    Serialize,
};

/// A single published report: the summary statistics one study gives for
/// one quantity (e.g. a midpoint of activation, in mV).
///
/// Rows are read-only input. A `sample_size` of zero marks a report that did
/// not measure the quantity; such rows are skipped by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyMeasurement {
    /// Study identifier. Not necessarily unique.
    pub label:              String,
    /// Reported central value.
    pub mean:               f64,
    pub standard_error:     f64,
    /// Number of cells; `0` means "not measured".
    pub sample_size:        i64,
    pub standard_deviation: f64,
}

impl StudyMeasurement {
    pub fn new<S: Into<String>>(
        label: S,
        mean: f64,
        standard_error: f64,
        sample_size: i64,
        standard_deviation: f64,
    ) -> Self {
        Self {
            label: label.into(),
            mean,
            standard_error,
            sample_size,
            standard_deviation,
        }
    }

    /// Rows with a zero sample size carry no measurement.
    pub fn is_skipped(&self) -> bool { self.sample_size == 0 }

    /// Standard deviation implied by the standard error, `sem * sqrt(n)`.
    pub fn calculated_standard_deviation(&self) -> f64 {
        self.standard_error * (self.sample_size as f64).sqrt()
    }

    /// Whether the listed standard deviation agrees with `sem * sqrt(n)`
    /// within `tolerance`.
    pub fn is_consistent(
        &self,
        tolerance: f64,
    ) -> bool {
        (self.standard_deviation - self.calculated_standard_deviation()).abs()
            <= tolerance
    }
}

impl<S: Into<String>> From<(S, f64, f64, i64, f64)> for StudyMeasurement {
    /// Builds a measurement from a `(label, mean, sem, n, std)` row, the
    /// column order of the midpoint queries.
    fn from(value: (S, f64, f64, i64, f64)) -> Self {
        let (label, mean, sem, n, std) = value;
        Self::new(label, mean, sem, n, std)
    }
}

/// Identity of an input row: its position in the input sequence plus its
/// label. Positions count skipped rows too, so keys stay stable when rows
/// without data are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowKey {
    pub index: usize,
    pub label: String,
}

impl RowKey {
    pub fn new<S: Into<String>>(
        index: usize,
        label: S,
    ) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }
}

impl Display for RowKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}-{}", self.index, self.label)
    }
}

/// Non-fatal: the listed standard deviation disagrees with `sem * sqrt(n)`.
/// The listed value is still used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityWarning {
    pub key:        RowKey,
    pub listed:     f64,
    pub calculated: f64,
}

impl Display for DataQualityWarning {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "error in standard deviation for {}: listed {}, calculated {}",
            self.key, self.listed, self.calculated
        )
    }
}
