//! Reduction from the computation grid to the presentation grid.
//!
//! Every column of a result goes through [`downsample`] with the same
//! stride, so `x`, the pooled density, the fitted curve and the per-study
//! curves stay aligned index for index.

use ndarray::{
    s,
    Array1,
    ArrayView1,
};

/// Keeps index 0 and every `stride`-th index after it. A stride of zero is
/// treated as one.
pub fn downsample(
    values: ArrayView1<f64>,
    stride: usize,
) -> Array1<f64> {
    let step = stride.max(1) as isize;
    values.slice(s![..;step]).to_owned()
}

/// Length of a grid of `len` points after [`downsample`].
pub fn downsampled_len(
    len: usize,
    stride: usize,
) -> usize {
    let stride = stride.max(1);
    len.div_ceil(stride)
}

#[cfg(test)]
mod tests {
    use ndarray::Array1;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::even(10, 2)]
    #[case::uneven(10, 3)]
    #[case::unit(7, 1)]
    #[case::zero(7, 0)]
    #[case::wider_than_grid(5, 9)]
    #[case::default_grid(100_000, 100)]
    fn keeps_every_nth(
        #[case] len: usize,
        #[case] stride: usize,
    ) {
        let values = Array1::from_iter((0..len).map(|i| i as f64));
        let reduced = downsample(values.view(), stride);
        assert_eq!(reduced.len(), downsampled_len(len, stride));
        for (k, v) in reduced.iter().enumerate() {
            assert_eq!(*v, (k * stride.max(1)) as f64);
        }
    }
}
