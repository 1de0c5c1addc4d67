use drought_duration::{
    DurationError, DurationMatrix, apply_duration_threshold, apply_duration_threshold_into,
    duration_thresholded, summarize,
};

fn filtered(series: &[f64], threshold: f64) -> Vec<f64> {
    duration_thresholded(series, threshold).expect("well-formed series")
}

// ---------------------------------------------------------------------------
// 1. short_episode_removed_long_kept
// ---------------------------------------------------------------------------
#[test]
fn short_episode_removed_long_kept() {
    let series = [0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0, 0.0];
    assert_eq!(
        filtered(&series, 3.0),
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 0.0]
    );
}

// ---------------------------------------------------------------------------
// 2. empty_series
// ---------------------------------------------------------------------------
#[test]
fn empty_series() {
    let mut series: Vec<f64> = Vec::new();
    let out = apply_duration_threshold(&mut series, 5.0).expect("empty input is valid");
    assert!(out.is_empty());
}

// ---------------------------------------------------------------------------
// 3. no_episodes
// ---------------------------------------------------------------------------
#[test]
fn no_episodes() {
    assert_eq!(filtered(&[0.0, 0.0, 0.0], 1.0), vec![0.0, 0.0, 0.0]);
}

// ---------------------------------------------------------------------------
// 4. duration_equal_to_threshold_kept
// ---------------------------------------------------------------------------
#[test]
fn duration_equal_to_threshold_kept() {
    let series = [0.0, 0.0, 0.0, 4.0];
    assert_eq!(filtered(&series, 4.0), series.to_vec());

    let running = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(filtered(&running, 4.0), running.to_vec());
}

// ---------------------------------------------------------------------------
// 5. whole_series_episode_removed
// ---------------------------------------------------------------------------
#[test]
fn whole_series_episode_removed() {
    assert_eq!(filtered(&[0.0, 0.0, 0.0, 4.0], 5.0), vec![0.0; 4]);
    assert_eq!(filtered(&[1.0, 2.0, 3.0, 4.0], 5.0), vec![0.0; 4]);
}

// ---------------------------------------------------------------------------
// 6. non_positive_threshold_removes_nothing
// ---------------------------------------------------------------------------
#[test]
fn non_positive_threshold_removes_nothing() {
    let series = [0.0, 1.0, 0.0, 1.0, 2.0, 0.0, 0.0, 1.0];
    assert_eq!(filtered(&series, 0.0), series.to_vec());
    assert_eq!(filtered(&series, -3.5), series.to_vec());
}

// ---------------------------------------------------------------------------
// 7. malformed_inputs_rejected
// ---------------------------------------------------------------------------
#[test]
fn malformed_inputs_rejected() {
    let err = duration_thresholded(&[0.0, 0.0, -1.0], 3.0).unwrap_err();
    assert!(matches!(err, DurationError::NegativeDuration { index: 2, .. }));

    let err = duration_thresholded(&[0.0, 0.0, 1.5], 3.0).unwrap_err();
    assert!(matches!(err, DurationError::FractionalDuration { index: 2, .. }));

    let err = duration_thresholded(&[0.0, f64::NAN], 3.0).unwrap_err();
    assert!(matches!(err, DurationError::NonFiniteDuration { index: 1, .. }));

    let err = duration_thresholded(&[0.0, 0.0, 4.0], 3.0).unwrap_err();
    assert!(matches!(err, DurationError::SpanOutOfBounds { index: 2, .. }));

    let err = duration_thresholded(&[0.0, 1.0], f64::NAN).unwrap_err();
    assert!(matches!(err, DurationError::InvalidThreshold { .. }));
}

// ---------------------------------------------------------------------------
// 8. stray_value_inside_skipped_region_is_ignored
// ---------------------------------------------------------------------------
#[test]
fn stray_value_inside_skipped_region_is_ignored() {
    // Indices 2 and 3 lie inside the 3-step episode ending at index 4 and
    // are never read, so the negative value there is not an error.
    let series = [0.0, 0.0, -7.0, 9.0, 3.0];
    assert_eq!(filtered(&series, 2.0), series.to_vec());
}

// ---------------------------------------------------------------------------
// 9. variants_agree
// ---------------------------------------------------------------------------
#[test]
fn variants_agree() {
    let series = [0.0, 1.0, 2.0, 0.0, 1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 0.0];
    let copied = filtered(&series, 3.0);

    let mut in_place = series;
    apply_duration_threshold(&mut in_place, 3.0).unwrap();

    let mut buf = vec![0.0; series.len()];
    apply_duration_threshold_into(&series, 3.0, &mut buf).unwrap();

    assert_eq!(copied, in_place.to_vec());
    assert_eq!(copied, buf);
    assert_eq!(
        copied,
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 0.0]
    );
}

// ---------------------------------------------------------------------------
// 10. summary_before_and_after
// ---------------------------------------------------------------------------
#[test]
fn summary_before_and_after() {
    let series = [0.0, 1.0, 2.0, 0.0, 1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 0.0];
    let before = summarize(&series).unwrap();
    assert_eq!(before.count, 3);
    assert_eq!(before.total_steps, 7);

    let after = summarize(&filtered(&series, 3.0)).unwrap();
    assert_eq!(after.count, 1);
    assert_eq!(after.max_duration, 4);
}

// ---------------------------------------------------------------------------
// 11. matrix_rows_like_source_layout
// ---------------------------------------------------------------------------
#[test]
fn matrix_rows_like_source_layout() {
    // Grid cells in rows, months in columns.
    let mut m = DurationMatrix::from_rows(vec![
        vec![0.0, 1.0, 0.0, 0.0, 1.0, 2.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
    ])
    .unwrap();
    let removed = m.apply_duration_threshold(2.0).unwrap();
    assert_eq!(removed, 1);
    assert_eq!(m.row(0), &[0.0, 0.0, 0.0, 0.0, 1.0, 2.0]);
    assert_eq!(m.row(1), &[0.0; 6]);
    assert_eq!(m.row(2), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
}
