//! Statistical primitives shared by the aggregation engine, the thread
//! pool used for multi-group aggregation, and helper macros.
//!
//! - [`gaussian`]: normal density evaluated over a grid.
//! - [`normalize`]: rescale a non-negative array to sum to one.
//! - [`chi_squared`] / [`chi_squared_test`]: goodness-of-fit of a sampled
//!   density against an expected one.
//! - [`THREAD_POOL`]: rayon pool shared by
//!   [`PdfAggregator::aggregate_groups`](crate::tools::pdf::PdfAggregator::aggregate_groups).
//!   Its size is read once from [`NUM_THREADS_ENV`]; unset or unparsable
//!   values let rayon pick one thread per core. [`n_threads`] reports the
//!   resulting size.
//! - [`with_field_fn!`](crate::with_field_fn): generates builder-style
//!   `with_<field>` setters, as used by
//!   [`PdfConfig`](crate::tools::pdf::PdfConfig).

use once_cell::sync::Lazy;
use rayon::{
    ThreadPool,
    ThreadPoolBuilder,
};

mod stats;
pub use stats::*;

/// Environment variable limiting the threads used by
/// [`PdfAggregator::aggregate_groups`](crate::tools::pdf::PdfAggregator::aggregate_groups).
pub const NUM_THREADS_ENV: &str = "POOLED_PDF_NUM_THREADS";

/// Thread pool for parallel aggregation, built on first use.
pub static THREAD_POOL: Lazy<ThreadPool> = Lazy::new(|| {
    let num_threads: Option<usize> = std::env::var(NUM_THREADS_ENV)
        .ok()
        .and_then(|str| str.parse::<usize>().ok());
    ThreadPoolBuilder::new()
        .num_threads(num_threads.unwrap_or(0))
        .build()
        .expect("Failed to create thread pool")
});

/// Number of threads in [`THREAD_POOL`].
pub fn n_threads() -> usize { THREAD_POOL.current_num_threads() }

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
                self.$field_name = value;
                self
            }
        }
    };
}
