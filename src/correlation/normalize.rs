//! Row normalization: zero mean, unit L2 norm, in `f64`.
//!
//! A constant row (every element equal, zero variance) becomes the zero
//! vector, so its correlation with any row, itself included, is `0.0`.

use crate::utilities::enums::Schedule;
use crate::utilities::parallel::{for_each_row, for_each_row_seq};
use aligned_vec::{AVec, CACHELINE_ALIGN};

/// Normalizes one row of `src` into `dst` (same length).
#[inline]
pub fn normalize_row(src: &[f32], dst: &mut [f64]) {
	debug_assert_eq!(src.len(), dst.len());
	let n = src.len();
	if n == 0 {
		return;
	}

	let first = src[0];
	let mut constant = true;
	let mut sum = 0.0f64;
	for &v in src {
		sum += v as f64;
		constant &= v == first;
	}
	let mean = sum / n as f64;

	let mut sq = 0.0f64;
	for (d, &v) in dst.iter_mut().zip(src) {
		let c = v as f64 - mean;
		*d = c;
		sq += c * c;
	}

	if constant || sq == 0.0 {
		dst.fill(0.0);
		return;
	}
	let inv = 1.0 / sq.sqrt();
	for d in dst.iter_mut() {
		*d *= inv;
	}
}

/// Normalizes the `ny × nx` row-major matrix `data` into a fresh
/// cache-line-aligned buffer. `None` runs on the calling thread.
pub fn normalize_rows(data: &[f32], ny: usize, nx: usize, schedule: Option<Schedule>) -> AVec<f64> {
	let mut norm: AVec<f64> = AVec::with_capacity(CACHELINE_ALIGN, ny * nx);
	norm.resize(ny * nx, 0.0);

	let body = |y: usize, row: &mut [f64]| normalize_row(&data[y * nx..(y + 1) * nx], row);
	match schedule {
		Some(schedule) => for_each_row(&mut norm[..], nx, schedule, body),
		None => for_each_row_seq(&mut norm[..], nx, body),
	}
	norm
}

#[cfg(test)]
mod tests {
	use super::*;
	use rayon::ThreadPoolBuilder;

	fn mean_and_norm(row: &[f64]) -> (f64, f64) {
		let mean = row.iter().sum::<f64>() / row.len() as f64;
		let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
		(mean, norm)
	}

	#[test]
	fn row_has_zero_mean_and_unit_norm() {
		let src = [1.0f32, 2.0, 3.0, 4.0];
		let mut dst = [0.0f64; 4];
		normalize_row(&src, &mut dst);
		let (mean, norm) = mean_and_norm(&dst);
		assert!(mean.abs() < 1e-12);
		assert!((norm - 1.0).abs() < 1e-12);
		// centered: -1.5, -0.5, 0.5, 1.5; norm sqrt(5)
		assert!((dst[0] + 1.5 / 5f64.sqrt()).abs() < 1e-12);
	}

	#[test]
	fn constant_row_becomes_zero_vector() {
		for value in [0.0f32, 2.0, 0.1, -7.3e-3, 1.0e30] {
			let src = [value; 37];
			let mut dst = [f64::NAN; 37];
			normalize_row(&src, &mut dst);
			assert!(dst.iter().all(|&v| v == 0.0), "value {} left {:?}", value, &dst[..4]);
		}
	}

	#[test]
	fn long_row_keeps_precision() {
		// large offset, tiny spread: single-precision means would cancel badly
		let src: Vec<f32> = (0..10_000).map(|i| 1.0e4 + (i % 7) as f32 * 1.0e-2).collect();
		let mut dst = vec![0.0f64; src.len()];
		normalize_row(&src, &mut dst);
		let (mean, norm) = mean_and_norm(&dst);
		assert!(mean.abs() < 1e-9, "mean {}", mean);
		assert!((norm - 1.0).abs() < 1e-9, "norm {}", norm);
	}

	#[test]
	fn matrix_normalization_is_schedule_independent() {
		let ny = 53;
		let nx = 19;
		let data: Vec<f32> = (0..ny * nx).map(|i| ((i * 7919) % 113) as f32 / 17.0 - 3.0).collect();
		let reference = normalize_rows(&data, ny, nx, None);

		let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
		for schedule in [Schedule::Contiguous, Schedule::Dynamic { grain: 5 }, Schedule::Interleaved { grain: 2 }] {
			let got = pool.install(|| normalize_rows(&data, ny, nx, Some(schedule)));
			assert_eq!(got.len(), ny * nx);
			for (a, b) in got.iter().zip(reference.iter()) {
				assert_eq!(a.to_bits(), b.to_bits(), "{:?}", schedule);
			}
		}
	}

	#[test]
	fn buffer_is_cacheline_aligned() {
		let data = vec![1.0f32, 2.0, 3.0, 5.0, 8.0, 13.0];
		let norm = normalize_rows(&data, 2, 3, None);
		assert_eq!(norm.as_ptr() as usize % CACHELINE_ALIGN, 0);
	}
}
