/// Common helpers for the integration tests
use pairwise_corr::verify::reference_correlation;

/// Compare two arrays with a tolerance
pub fn assert_array_close(actual: &[f32], expected: &[f32], atol: f32, name: &str) {
    assert_eq!(actual.len(), expected.len(),
        "{}: Length mismatch: actual {} vs expected {}", name, actual.len(), expected.len());

    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        if a.is_nan() && e.is_nan() {
            continue;
        }
        let diff = (a - e).abs();
        assert!(diff <= atol,
            "{}: Value mismatch at index {}: actual {} vs expected {} (diff: {}, tol: {})",
            name, i, a, e, diff, atol);
    }
}

/// Full naive lower triangle; the upper triangle is filled with `upper`.
pub fn reference_matrix(data: &[f32], ny: usize, nx: usize, upper: f32) -> Vec<f32> {
    let mut out = vec![upper; ny * ny];
    for i in 0..ny {
        for j in 0..=i {
            out[i + j * ny] = reference_correlation(data, nx, i, j) as f32;
        }
    }
    out
}
