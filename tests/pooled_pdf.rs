use assert_approx_eq::assert_approx_eq;
use pooled_pdf::prelude::*;
use rstest::rstest;

mod common;
use common::{
    init_logger,
    random_rows,
    row,
    with_skipped_rows,
};

#[test]
fn symmetric_studies_pool_to_the_midpoint() {
    init_logger();
    let rows: Vec<(&str, f64, f64, i64, f64)> =
        vec![("A", -40.0, 2.0, 4, 4.0), ("B", -60.0, 2.0, 4, 4.0)];
    let result = aggregate(rows, false).unwrap();

    assert_eq!(result.m(), 2);
    assert_eq!(result.n(), 8);
    assert_approx_eq!(result.mean(), -50.0, 1e-3);
    assert!(result.lo() < -50.0);
    assert!(result.hi() > -50.0);
}

#[test]
fn unmeasured_row_does_not_shift_the_mean() {
    init_logger();
    let base = vec![row("A", -40.0, 2.0, 4, 4.0), row("B", -60.0, 2.0, 4, 4.0)];
    let mut extended = base.clone();
    extended.push(row("C", -10.0, 1.0, 0, 0.0));

    let a = aggregate(base, false).unwrap();
    let b = aggregate(extended, false).unwrap();
    assert_eq!(b.m(), 2);
    assert_eq!(b.n(), 8);
    assert_eq!(a.mean(), b.mean());
}

#[test]
fn inconsistent_std_is_reported_and_kept() {
    init_logger();
    let result = aggregate(vec![row("A", -40.0, 2.0, 4, 99.0)], false).unwrap();
    assert_eq!(result.warnings().len(), 1);
    assert_eq!(result.warnings()[0].listed, 99.0);
    assert!(result.sigma() > 4.0 * 5.0);
}

#[test]
fn identical_gaussians_fit_perfectly() {
    let x = PdfConfig::default().computation_grid();
    let y = gaussian(x.view(), -50.0, 5.0).unwrap();
    let grid = DensityGrid::try_new(x, y).unwrap();
    let (stat, p) = chi_squared_test(&grid, &grid, 2).unwrap();
    assert_eq!(stat, 0.0);
    assert_eq!(p, 1.0);
}

#[rstest]
#[case(1, 1)]
#[case(2, 5)]
#[case(3, 20)]
#[case(4, 60)]
fn random_inputs_are_normalized(
    #[case] seed: u64,
    #[case] count: usize,
) {
    let result = aggregate(random_rows(seed, count), false).unwrap();
    assert_eq!(result.m(), count);
    assert_approx_eq!(result.area(), 1.0, 1e-5);
    assert!(result.lo() < result.mean() && result.mean() < result.hi());
    assert!(result.warnings().is_empty());
    assert!((0.0..=1.0).contains(&result.p_value()));
}

#[rstest]
#[case(11, 8, 2)]
#[case(12, 15, 3)]
#[case(13, 30, 1)]
fn skip_rule_is_idempotent(
    #[case] seed: u64,
    #[case] count: usize,
    #[case] every: usize,
) {
    let rows = random_rows(seed, count);
    let padded = with_skipped_rows(&rows, every);
    assert!(padded.len() > rows.len());

    let a = aggregate(rows, false).unwrap();
    let b = aggregate(padded, false).unwrap();
    assert_eq!(a.m(), b.m());
    assert_eq!(a.n(), b.n());
    assert_eq!(a.mean(), b.mean());
    assert_eq!(a.sigma(), b.sigma());
    assert_eq!(a.combined(), b.combined());
    assert_eq!(a.fitted(), b.fitted());
}

#[test]
fn total_sample_size_is_pooled() {
    let rows = random_rows(21, 12);
    let expected: i64 = rows.iter().map(|r| r.sample_size).sum();
    let result = aggregate(rows, false).unwrap();
    assert_eq!(result.n(), expected as u64);
}

#[test]
fn errors_carry_row_context() {
    let rows = vec![row("A", -40.0, 2.0, 4, 4.0), row("Bad", -50.0, 1.0, 4, 0.0)];
    let err = aggregate(rows, false).unwrap_err();
    assert!(err.to_string().contains("1-Bad"));

    let narrow: Vec<(&str, f64, f64, i64, f64)> = vec![("Narrow", -50.0, 1e-5, 1, 1e-5)];
    let err = aggregate(narrow, false).unwrap_err();
    assert!(err.to_string().contains("0-Narrow"));
    assert!(!matches!(err, PdfError::NoMassInSupport { .. }));

    assert_eq!(
        aggregate(Vec::<StudyMeasurement>::new(), false).unwrap_err(),
        PdfError::InsufficientData
    );
}

#[test]
fn subgroups_from_one_table() {
    init_logger();
    let rows = random_rows(31, 40);
    let groups = vec![
        ("Combined".to_string(), rows.clone()),
        ("First half".to_string(), rows[..20].to_vec()),
        ("Second half".to_string(), rows[20..].to_vec()),
    ];
    let results = PdfAggregator::default().aggregate_groups(groups, false);
    let ns = results
        .iter()
        .map(|(_, r)| r.as_ref().unwrap().n())
        .collect::<Vec<_>>();
    assert_eq!(ns[0], ns[1] + ns[2]);
    assert_eq!(results[1].0, "First half");
}
