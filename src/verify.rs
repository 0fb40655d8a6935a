//! Spot check of a correlate result against a naive double-precision reference.
//!
//! Meant for small matrices: each checked cell costs a full pass over two rows.

use thiserror::Error;

/// Rows checked by default, each against every partner `j <= i`.
pub const DEFAULT_CHECK_ROWS: usize = 8;
pub const DEFAULT_TOLERANCE: f32 = 1e-4;

#[derive(Debug, Error, PartialEq)]
pub enum VerifyError {
	#[error("verify: Buffer too short for ny = {ny}, nx = {nx}")]
	BufferTooShort { ny: usize, nx: usize },
	#[error("verify: Mismatch at ({i}, {j}): expected = {expected}, actual = {actual}")]
	Mismatch { i: usize, j: usize, expected: f32, actual: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerifyReport {
	pub rows: usize,
	pub cells: usize,
	pub max_abs_diff: f32,
}

/// Pearson correlation of rows `i` and `j` computed directly; `0.0` when
/// either row has zero variance.
pub fn reference_correlation(data: &[f32], nx: usize, i: usize, j: usize) -> f64 {
	let ri = &data[i * nx..(i + 1) * nx];
	let rj = &data[j * nx..(j + 1) * nx];
	let mi = ri.iter().map(|&v| v as f64).sum::<f64>() / nx as f64;
	let mj = rj.iter().map(|&v| v as f64).sum::<f64>() / nx as f64;

	let mut num = 0.0f64;
	let mut di2 = 0.0f64;
	let mut dj2 = 0.0f64;
	for (&a, &b) in ri.iter().zip(rj) {
		let ai = a as f64 - mi;
		let aj = b as f64 - mj;
		num += ai * aj;
		di2 += ai * ai;
		dj2 += aj * aj;
	}
	let denom = (di2 * dj2).sqrt();
	if denom > 0.0 {
		num / denom
	} else {
		0.0
	}
}

/// Checks `result[i + j*ny]` for the first `min(ny, rows)` rows `i` and all `j <= i`.
pub fn verify_lower_triangle(
	ny: usize,
	nx: usize,
	data: &[f32],
	result: &[f32],
	rows: usize,
	tolerance: f32,
) -> Result<VerifyReport, VerifyError> {
	if data.len() < ny * nx || result.len() < ny * ny {
		return Err(VerifyError::BufferTooShort { ny, nx });
	}

	let check = ny.min(rows);
	let mut report = VerifyReport {
		rows: check,
		cells: 0,
		max_abs_diff: 0.0,
	};
	for i in 0..check {
		for j in 0..=i {
			let expected = reference_correlation(data, nx, i, j) as f32;
			let actual = result[i + j * ny];
			let diff = (expected - actual).abs();
			if !(diff <= tolerance) {
				return Err(VerifyError::Mismatch { i, j, expected, actual });
			}
			report.cells += 1;
			report.max_abs_diff = report.max_abs_diff.max(diff);
		}
	}
	Ok(report)
}
