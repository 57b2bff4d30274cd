//! # pooled-pdf
//!
//! `pooled-pdf` reconstructs a pooled probability density function from the
//! summary statistics that published studies report for a quantity, such as
//! the activation or inactivation midpoints of an ion channel. Every study
//! reporting a mean, a standard error, a sample size and a standard deviation
//! becomes a normal density. The pooled density is their sum, weighted by
//! sample size.
//!
//! From the pooled density the crate derives its mean and standard deviation
//! and the two-sigma range `mean ± 2σ`, and it runs a chi-squared test of
//! whether the pooled density is itself Gaussian.
//!
//! ## Key Features
//!
//! * **Pooled densities**: [`PdfAggregator`] validates the input rows, skips
//!   reports without a measurement (`n == 0`), warns about standard deviations
//!   that disagree with `sem * sqrt(n)` and builds the weighted sum on a fine
//!   grid.
//! * **Configurable support**: bounds, grid resolution and presentation
//!   resolution live in [`PdfConfig`]. The defaults cover membrane potentials
//!   from -140 to 20 mV.
//! * **Goodness of fit**: [`chi_squared`] compares the pooled density with the
//!   Gaussian of the same mean and sigma.
//! * **Export**: results reduce to a 1000-point presentation grid and export
//!   as a CSV table (`x, sum, gauss, <per-study columns>`) or a summary line
//!   (`reports, cells, mean, stddev, lo, hi, p`).
//! * **Subgroups**: [`PdfAggregator::aggregate_groups`] runs independent row
//!   sets in parallel with Rayon.
//!
//! The number of threads used for subgroups can be set with the
//! `POOLED_PDF_NUM_THREADS` environment variable.
//!
//! ## Structure
//!
//! * [`data_structs`]: input rows ([`StudyMeasurement`]), row identity
//!   ([`RowKey`]), sampled densities ([`DensityGrid`]) and results
//!   ([`AggregateResult`], [`AggregateSummary`]).
//! * [`tools`]: the aggregation engine and its configuration.
//! * [`utils`]: the Gaussian kernel and the chi-squared test.
//! * [`io`]: reading measurement tables and writing results.
//! * [`error`]: the [`PdfError`] type.
//!
//! ## Usage
//!
//! ```no_run
//! use pooled_pdf::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let rows = read_measurements_from_path("midpoints-wt-a.csv")?;
//!     let result = PdfAggregator::default().aggregate(rows, true)?;
//!
//!     println!(
//!         "m={} n={} mean={:.3} sigma={:.3} p={:.3}",
//!         result.m(),
//!         result.n(),
//!         result.mean(),
//!         result.sigma(),
//!         result.p_value()
//!     );
//!     for warning in result.warnings() {
//!         println!("{}", warning);
//!     }
//!     result.table().write_csv_path("midpoints-wt-a-pdf.csv")?;
//!     Ok(())
//! }
//! ```

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

#[allow(unused_imports)]
use prelude::*;
