//! Analytical tools built on the data structures of this crate.
//!
//! - [`pdf`]: reconstruction of a pooled probability density from per-study
//!   summary statistics, with its moments, two-sigma range and a chi-squared
//!   normality test. Includes the grid configuration and the reduction to
//!   presentation resolution.
pub mod pdf;
