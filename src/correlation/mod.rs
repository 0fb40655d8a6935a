//! # Pairwise Row Correlation
//!
//! Pearson correlation coefficient between every pair of rows of an
//! `ny × nx` single-precision matrix, stored as the lower triangle of an
//! `ny × ny` output: for all `0 <= j <= i < ny`, `result[i + j*ny]` holds the
//! correlation of rows `i` and `j`. Cells with `j > i` are never written.
//!
//! ## Pipeline
//! 1. Each row is normalized to zero mean and unit L2 norm in `f64`.
//! 2. Each lower-triangle cell is the dot product of two normalized rows,
//!    clamped to `[-1, 1]`.
//!
//! ## Parameters
//! - **tier**: `Sequential`, `Threaded` or `Vectorized` (default).
//! - **kernel**: reducer used by the `Vectorized` tier. Defaults to `Auto`.
//!   The other tiers always reduce with the scalar kernel.
//! - **threads**: size of a dedicated pool. Defaults to the current rayon pool.
//! - **grain**: rows per unit of work for the pair loop. Defaults to 16.
//! - **schedule**: distribution policy of the pair loop. Defaults to `Dynamic`.
//!
//! ## Errors
//! - **EmptyDimensions**: correlate: `ny` or `nx` is zero.
//! - **DimensionOverflow**: correlate: `ny*nx` or `ny*ny` does not fit in `usize`.
//! - **InputTooShort** / **OutputTooShort**: correlate: buffer smaller than the matrix.
//! - **InvalidThreads** / **InvalidGrain**: correlate: zero thread count or grain.
//! - **UnsupportedKernel**: correlate: the requested kernel cannot run on this build/CPU.
//! - **ThreadPool**: correlate: the dedicated pool could not be built.
//!
//! Zero-variance rows are not an error: they correlate to `0.0` with every
//! row, themselves included.

pub mod dot;
pub mod driver;
pub mod normalize;

use crate::utilities::enums::{Kernel, Schedule, Tier};
use dot::{select_reducer, DotFn};
use driver::correlate_rows;
use normalize::normalize_rows;
use rayon::{ThreadPool, ThreadPoolBuilder};
use thiserror::Error;
use tracing::{debug, trace};

pub const DEFAULT_GRAIN: usize = 16;

#[derive(Debug, Error)]
pub enum CorrelateError {
	#[error("correlate: Empty dimensions: ny = {ny}, nx = {nx}")]
	EmptyDimensions { ny: usize, nx: usize },
	#[error("correlate: Matrix dimensions overflow usize: ny = {ny}, nx = {nx}")]
	DimensionOverflow { ny: usize, nx: usize },
	#[error("correlate: Input too short: needed = {needed}, len = {len}")]
	InputTooShort { needed: usize, len: usize },
	#[error("correlate: Output too short: needed = {needed}, len = {len}")]
	OutputTooShort { needed: usize, len: usize },
	#[error("correlate: Invalid thread count: {threads}")]
	InvalidThreads { threads: usize },
	#[error("correlate: Invalid grain: {grain}")]
	InvalidGrain { grain: usize },
	#[error("correlate: Kernel {kernel:?} is not supported on this build or CPU")]
	UnsupportedKernel { kernel: Kernel },
	#[error("correlate: Failed to build thread pool: {0}")]
	ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorrelateParams {
	pub tier: Option<Tier>,
	pub kernel: Option<Kernel>,
	pub threads: Option<usize>,
	pub grain: Option<usize>,
	pub schedule: Option<Schedule>,
}

impl CorrelateParams {
	#[inline]
	pub fn get_tier(&self) -> Tier {
		self.tier.unwrap_or_default()
	}

	#[inline]
	pub fn get_kernel(&self) -> Kernel {
		match self.get_tier() {
			Tier::Vectorized => self.kernel.unwrap_or_default(),
			Tier::Sequential | Tier::Threaded => Kernel::Scalar,
		}
	}

	#[inline]
	pub fn get_grain(&self) -> usize {
		self.grain
			.or_else(|| self.schedule.and_then(Schedule::grain))
			.unwrap_or(DEFAULT_GRAIN)
	}

	/// Pair-loop schedule; an explicit `grain` overrides the one inside `schedule`.
	#[inline]
	pub fn get_schedule(&self) -> Schedule {
		let grain = self.get_grain();
		self.schedule
			.unwrap_or(Schedule::Dynamic { grain })
			.with_grain(grain)
	}

	fn validate(&self) -> Result<(), CorrelateError> {
		if let Some(threads @ 0) = self.threads {
			return Err(CorrelateError::InvalidThreads { threads });
		}
		if let Some(grain @ 0) = self.get_schedule().grain() {
			return Err(CorrelateError::InvalidGrain { grain });
		}
		Ok(())
	}
}

#[derive(Debug, Clone)]
pub struct CorrelateInput<'a> {
	pub data: &'a [f32],
	pub ny: usize,
	pub nx: usize,
	pub params: CorrelateParams,
}

impl<'a> CorrelateInput<'a> {
	#[inline]
	pub fn from_slice(data: &'a [f32], ny: usize, nx: usize, params: CorrelateParams) -> Self {
		Self { data, ny, nx, params }
	}

	#[inline]
	pub fn with_default_params(data: &'a [f32], ny: usize, nx: usize) -> Self {
		Self::from_slice(data, ny, nx, CorrelateParams::default())
	}
}

/// Owned `ny × ny` result; the upper triangle stays `0.0`.
#[derive(Debug, Clone)]
pub struct CorrelateOutput {
	pub values: Vec<f32>,
	pub ny: usize,
	pub kernel: Kernel,
}

impl CorrelateOutput {
	/// Stored cell `result[i + j*ny]`; `None` outside the lower triangle.
	#[inline]
	pub fn get(&self, i: usize, j: usize) -> Option<f32> {
		if j > i || i >= self.ny {
			return None;
		}
		self.values.get(i + j * self.ny).copied()
	}

	/// Correlation of rows `a` and `b` in either order.
	#[inline]
	pub fn pair(&self, a: usize, b: usize) -> Option<f32> {
		self.get(a.max(b), a.min(b))
	}
}

/// Checks dimensions against buffer sizes; returns `(ny*nx, ny*ny)`.
fn check_dims(ny: usize, nx: usize, data_len: usize, out_len: usize) -> Result<(usize, usize), CorrelateError> {
	if ny == 0 || nx == 0 {
		return Err(CorrelateError::EmptyDimensions { ny, nx });
	}
	let cells_in = ny.checked_mul(nx).ok_or(CorrelateError::DimensionOverflow { ny, nx })?;
	let cells_out = ny.checked_mul(ny).ok_or(CorrelateError::DimensionOverflow { ny, nx })?;
	if data_len < cells_in {
		return Err(CorrelateError::InputTooShort { needed: cells_in, len: data_len });
	}
	if out_len < cells_out {
		return Err(CorrelateError::OutputTooShort { needed: cells_out, len: out_len });
	}
	Ok((cells_in, cells_out))
}

/// Reusable correlate engine: configuration resolved once, optional dedicated pool.
#[derive(Debug)]
pub struct Correlator {
	tier: Tier,
	kernel: Kernel,
	schedule: Schedule,
	dot: DotFn,
	pool: Option<ThreadPool>,
}

impl Correlator {
	pub fn new(params: CorrelateParams) -> Result<Self, CorrelateError> {
		params.validate()?;
		let tier = params.get_tier();
		let (kernel, dot) = select_reducer(params.get_kernel())?;
		let pool = match params.threads {
			Some(threads) if tier.is_parallel() => Some(
				ThreadPoolBuilder::new()
					.num_threads(threads)
					.thread_name(|idx| format!("pairwise-corr-{idx}"))
					.build()?,
			),
			_ => None,
		};
		Ok(Self {
			tier,
			kernel,
			schedule: params.get_schedule(),
			dot,
			pool,
		})
	}

	#[inline]
	pub fn tier(&self) -> Tier {
		self.tier
	}

	/// Resolved kernel (never `Auto`).
	#[inline]
	pub fn kernel(&self) -> Kernel {
		self.kernel
	}

	#[inline]
	pub fn schedule(&self) -> Schedule {
		self.schedule
	}

	/// Workers a call will use.
	pub fn threads(&self) -> usize {
		match (&self.pool, self.tier.is_parallel()) {
			(_, false) => 1,
			(Some(pool), true) => pool.current_num_threads(),
			(None, true) => rayon::current_num_threads(),
		}
	}

	/// Writes the lower triangle of `result` (at least `ny*ny` long).
	pub fn correlate_into(&self, ny: usize, nx: usize, data: &[f32], result: &mut [f32]) -> Result<(), CorrelateError> {
		let (cells_in, cells_out) = check_dims(ny, nx, data.len(), result.len())?;
		let data = &data[..cells_in];
		let result = &mut result[..cells_out];

		debug!(
			tier = self.tier.name(),
			kernel = self.kernel.name(),
			schedule = ?self.schedule,
			threads = self.threads(),
			ny,
			nx,
			"correlate"
		);

		match &self.pool {
			Some(pool) => pool.install(|| self.run(ny, nx, data, result)),
			None => self.run(ny, nx, data, result),
		}
		Ok(())
	}

	/// Allocates and fills a fresh `ny × ny` result.
	pub fn correlate(&self, ny: usize, nx: usize, data: &[f32]) -> Result<CorrelateOutput, CorrelateError> {
		let cells_out = ny.checked_mul(ny).ok_or(CorrelateError::DimensionOverflow { ny, nx })?;
		let mut values = vec![0.0f32; cells_out];
		self.correlate_into(ny, nx, data, &mut values)?;
		Ok(CorrelateOutput {
			values,
			ny,
			kernel: self.kernel,
		})
	}

	fn run(&self, ny: usize, nx: usize, data: &[f32], result: &mut [f32]) {
		let parallel = self.tier.is_parallel();
		let norm = normalize_rows(data, ny, nx, parallel.then_some(Schedule::Contiguous));
		trace!(rows = ny, "rows normalized");
		correlate_rows(&norm, ny, nx, result, self.dot, parallel.then_some(self.schedule));
		trace!(cells = ny * (ny + 1) / 2, "lower triangle written");
	}
}

/// For all `0 <= j <= i < ny`, writes the Pearson correlation of rows `i`
/// and `j` of `data` to `result[i + j*ny]`, using the vectorized tier.
#[inline]
pub fn correlate(ny: usize, nx: usize, data: &[f32], result: &mut [f32]) -> Result<(), CorrelateError> {
	correlate_with_tier(ny, nx, data, result, Tier::Vectorized)
}

pub fn correlate_with_tier(
	ny: usize,
	nx: usize,
	data: &[f32],
	result: &mut [f32],
	tier: Tier,
) -> Result<(), CorrelateError> {
	let params = CorrelateParams {
		tier: Some(tier),
		..CorrelateParams::default()
	};
	Correlator::new(params)?.correlate_into(ny, nx, data, result)
}

pub fn correlate_with_kernel(
	ny: usize,
	nx: usize,
	data: &[f32],
	result: &mut [f32],
	kernel: Kernel,
) -> Result<(), CorrelateError> {
	let params = CorrelateParams {
		tier: Some(Tier::Vectorized),
		kernel: Some(kernel),
		..CorrelateParams::default()
	};
	Correlator::new(params)?.correlate_into(ny, nx, data, result)
}

/// Writes into a caller-owned buffer; returns the kernel that ran.
pub fn correlate_into(input: &CorrelateInput, result: &mut [f32]) -> Result<Kernel, CorrelateError> {
	let engine = Correlator::new(input.params)?;
	engine.correlate_into(input.ny, input.nx, input.data, result)?;
	Ok(engine.kernel())
}

pub fn correlate_with_params(input: &CorrelateInput) -> Result<CorrelateOutput, CorrelateError> {
	Correlator::new(input.params)?.correlate(input.ny, input.nx, input.data)
}

#[derive(Copy, Clone, Debug, Default)]
pub struct CorrelateBuilder {
	params: CorrelateParams,
}

impl CorrelateBuilder {
	#[inline(always)]
	pub fn new() -> Self {
		Self::default()
	}
	#[inline(always)]
	pub fn tier(mut self, t: Tier) -> Self {
		self.params.tier = Some(t);
		self
	}
	#[inline(always)]
	pub fn kernel(mut self, k: Kernel) -> Self {
		self.params.kernel = Some(k);
		self
	}
	#[inline(always)]
	pub fn threads(mut self, n: usize) -> Self {
		self.params.threads = Some(n);
		self
	}
	#[inline(always)]
	pub fn grain(mut self, g: usize) -> Self {
		self.params.grain = Some(g);
		self
	}
	#[inline(always)]
	pub fn schedule(mut self, s: Schedule) -> Self {
		self.params.schedule = Some(s);
		self
	}

	#[inline(always)]
	pub fn params(self) -> CorrelateParams {
		self.params
	}

	#[inline(always)]
	pub fn apply_slice(self, data: &[f32], ny: usize, nx: usize) -> Result<CorrelateOutput, CorrelateError> {
		let input = CorrelateInput::from_slice(data, ny, nx, self.params);
		correlate_with_params(&input)
	}

	#[inline(always)]
	pub fn apply_into(self, data: &[f32], ny: usize, nx: usize, result: &mut [f32]) -> Result<Kernel, CorrelateError> {
		let input = CorrelateInput::from_slice(data, ny, nx, self.params);
		correlate_into(&input, result)
	}

	#[inline(always)]
	pub fn into_correlator(self) -> Result<Correlator, CorrelateError> {
		Correlator::new(self.params)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::skip_if_unsupported;
	use std::error::Error;

	const SENTINEL: f32 = -7.0;

	fn scenario() -> Vec<f32> {
		vec![
			1.0, 2.0, 3.0, 4.0, //
			4.0, 3.0, 2.0, 1.0, //
			2.0, 2.0, 2.0, 2.0,
		]
	}

	fn wavy(ny: usize, nx: usize) -> Vec<f32> {
		(0..ny * nx)
			.map(|k| {
				let (y, x) = (k / nx, k % nx);
				((x as f32 * 0.31 * (1 + y % 5) as f32) + y as f32).sin() + (y % 3) as f32 * 0.01 * x as f32
			})
			.collect()
	}

	fn run(tier: Tier, kernel: Kernel, ny: usize, nx: usize, data: &[f32]) -> Result<Vec<f32>, CorrelateError> {
		let mut out = vec![SENTINEL; ny * ny];
		CorrelateBuilder::new()
			.tier(tier)
			.kernel(kernel)
			.threads(3)
			.apply_into(data, ny, nx, &mut out)?;
		Ok(out)
	}

	fn check_scenario(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		skip_if_unsupported!(kernel, test_name);
		let out = run(Tier::Vectorized, kernel, 3, 4, &scenario())?;
		assert!((out[0] - 1.0).abs() < 1e-6, "[{}] r00 = {}", test_name, out[0]);
		assert!((out[4] - 1.0).abs() < 1e-6, "[{}] r11 = {}", test_name, out[4]);
		assert!((out[1] + 1.0).abs() < 1e-6, "[{}] r10 = {}", test_name, out[1]);
		assert_eq!(out[2], 0.0);
		assert_eq!(out[5], 0.0);
		assert_eq!(out[8], 0.0);
		for upper in [3, 6, 7] {
			assert_eq!(out[upper], SENTINEL, "[{}] upper cell {} touched", test_name, upper);
		}
		Ok(())
	}

	fn check_single_row(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		skip_if_unsupported!(kernel, test_name);
		let data = [0.5f32, -1.0, 3.0];
		let mut out = vec![SENTINEL; 4];
		correlate_with_kernel(1, 3, &data, &mut out, kernel)?;
		assert_eq!(out[0], 1.0);
		assert_eq!(&out[1..], &[SENTINEL; 3]);
		Ok(())
	}

	fn check_diagonal_and_range(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		skip_if_unsupported!(kernel, test_name);
		let (ny, nx) = (40, 23);
		let out = run(Tier::Vectorized, kernel, ny, nx, &wavy(ny, nx))?;
		for i in 0..ny {
			assert!((out[i + i * ny] - 1.0).abs() < 1e-4, "[{}] diag {} = {}", test_name, i, out[i + i * ny]);
			for j in 0..=i {
				let v = out[i + j * ny];
				assert!((-1.0..=1.0).contains(&v), "[{}] ({}, {}) = {}", test_name, i, j, v);
			}
		}
		Ok(())
	}

	fn check_tiers_agree(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		skip_if_unsupported!(kernel, test_name);
		let (ny, nx) = (57, 101);
		let data = wavy(ny, nx);
		let seq = run(Tier::Sequential, kernel, ny, nx, &data)?;
		let thr = run(Tier::Threaded, kernel, ny, nx, &data)?;
		let vec = run(Tier::Vectorized, kernel, ny, nx, &data)?;
		for k in 0..ny * ny {
			assert!((seq[k] - thr[k]).abs() <= 1e-4, "[{}] seq/thr cell {}", test_name, k);
			assert!((seq[k] - vec[k]).abs() <= 1e-4, "[{}] seq/vec cell {}", test_name, k);
		}
		Ok(())
	}

	fn check_deterministic(test_name: &str, kernel: Kernel) -> Result<(), Box<dyn Error>> {
		skip_if_unsupported!(kernel, test_name);
		let (ny, nx) = (65, 31);
		let data = wavy(ny, nx);
		let engine = CorrelateBuilder::new().kernel(kernel).threads(4).grain(3).into_correlator()?;
		let a = engine.correlate(ny, nx, &data)?;
		let b = engine.correlate(ny, nx, &data)?;
		assert!(a.values.iter().zip(&b.values).all(|(x, y)| x.to_bits() == y.to_bits()), "[{}]", test_name);
		Ok(())
	}

	macro_rules! generate_all_correlate_tests {
		($($test_fn:ident),*) => {
			paste::paste! {
				$(
					#[test]
					fn [<$test_fn _scalar>]() {
						$test_fn(stringify!([<$test_fn _scalar>]), Kernel::Scalar).unwrap();
					}
					#[test]
					fn [<$test_fn _avx2>]() {
						$test_fn(stringify!([<$test_fn _avx2>]), Kernel::Avx2).unwrap();
					}
					#[test]
					fn [<$test_fn _auto_detect>]() {
						$test_fn(stringify!([<$test_fn _auto_detect>]), Kernel::Auto).unwrap();
					}
				)*
			}
		}
	}

	generate_all_correlate_tests!(
		check_scenario,
		check_single_row,
		check_diagonal_and_range,
		check_tiers_agree,
		check_deterministic
	);

	#[test]
	fn default_entry_point_matches_contract() {
		let data = scenario();
		let mut out = vec![SENTINEL; 9];
		correlate(3, 4, &data, &mut out).unwrap();
		assert!((out[1] + 1.0).abs() < 1e-6);
		assert_eq!(out[2], 0.0);
	}

	#[test]
	fn output_tail_beyond_matrix_untouched() {
		let data = scenario();
		let mut out = vec![SENTINEL; 12];
		correlate_with_tier(3, 4, &data, &mut out, Tier::Threaded).unwrap();
		assert_eq!(&out[9..], &[SENTINEL; 3]);
	}

	#[test]
	fn owned_output_lookup() {
		let out = CorrelateBuilder::new().tier(Tier::Sequential).apply_slice(&scenario(), 3, 4).unwrap();
		assert_eq!(out.get(0, 1), None);
		assert_eq!(out.get(3, 0), None);
		assert_eq!(out.pair(0, 1), out.get(1, 0));
		assert_eq!(out.pair(2, 2), Some(0.0));
		assert_eq!(out.kernel, Kernel::Scalar);
	}

	#[test]
	fn rejects_bad_dimensions_before_writing() {
		let data = scenario();
		let mut out = vec![SENTINEL; 9];
		assert!(matches!(correlate(0, 4, &data, &mut out), Err(CorrelateError::EmptyDimensions { .. })));
		assert!(matches!(correlate(3, 0, &data, &mut out), Err(CorrelateError::EmptyDimensions { .. })));
		assert!(matches!(
			correlate(4, 4, &data, &mut vec![0.0; 16]),
			Err(CorrelateError::InputTooShort { needed: 16, len: 12 })
		));
		assert!(matches!(
			correlate(3, 4, &data, &mut out[..8]),
			Err(CorrelateError::OutputTooShort { needed: 9, len: 8 })
		));
		assert!(matches!(
			correlate(usize::MAX, 2, &data, &mut out),
			Err(CorrelateError::DimensionOverflow { .. })
		));
		assert!(out.iter().all(|&v| v == SENTINEL));
	}

	#[test]
	fn rejects_zero_threads_and_grain() {
		let data = scenario();
		let mut out = vec![0.0; 9];
		let err = CorrelateBuilder::new().threads(0).apply_into(&data, 3, 4, &mut out);
		assert!(matches!(err, Err(CorrelateError::InvalidThreads { threads: 0 })));
		let err = CorrelateBuilder::new().grain(0).apply_into(&data, 3, 4, &mut out);
		assert!(matches!(err, Err(CorrelateError::InvalidGrain { grain: 0 })));
		let err = CorrelateBuilder::new()
			.schedule(Schedule::Interleaved { grain: 0 })
			.apply_into(&data, 3, 4, &mut out);
		assert!(matches!(err, Err(CorrelateError::InvalidGrain { grain: 0 })));
	}

	#[test]
	fn oversized_grain_runs_like_sequential() {
		let data = [1.0f32, 2.0, 3.0, 5.0];
		let mut expected = vec![SENTINEL; 4];
		correlate_with_tier(2, 2, &data, &mut expected, Tier::Sequential).unwrap();
		let huge = 1usize << 63;
		for schedule in [Schedule::Dynamic { grain: huge }, Schedule::Interleaved { grain: huge }] {
			let mut out = vec![SENTINEL; 4];
			CorrelateBuilder::new()
				.tier(Tier::Threaded)
				.threads(2)
				.grain(huge)
				.schedule(schedule)
				.apply_into(&data, 2, 2, &mut out)
				.unwrap();
			assert_eq!(out, expected, "{:?}", schedule);
		}
	}

	#[test]
	fn default_input_and_builder_params() {
		let data = scenario();
		let input = CorrelateInput::with_default_params(&data, 3, 4);
		assert_eq!(input.params, CorrelateBuilder::new().params());
		let out = correlate_with_params(&input).unwrap();
		assert!((out.pair(0, 1).unwrap() + 1.0).abs() < 1e-6);

		let params = CorrelateBuilder::new().tier(Tier::Sequential).grain(4).params();
		assert_eq!(params.tier, Some(Tier::Sequential));
		assert_eq!(params.get_grain(), 4);
	}

	#[test]
	fn nan_input_propagates_to_its_cells_only() {
		let mut data = scenario();
		data[1] = f32::NAN;
		let mut out = vec![SENTINEL; 9];
		correlate(3, 4, &data, &mut out).unwrap();
		assert!(out[0].is_nan() && out[1].is_nan() && out[2].is_nan());
		assert!((out[4] - 1.0).abs() < 1e-6);
		assert_eq!(out[5], 0.0);
	}

	#[test]
	fn params_defaults() {
		let p = CorrelateParams::default();
		assert_eq!(p.get_tier(), Tier::Vectorized);
		assert_eq!(p.get_kernel(), Kernel::Auto);
		assert_eq!(p.get_schedule(), Schedule::Dynamic { grain: DEFAULT_GRAIN });

		let p = CorrelateParams {
			tier: Some(Tier::Threaded),
			kernel: Some(Kernel::Avx2),
			schedule: Some(Schedule::Interleaved { grain: 4 }),
			..CorrelateParams::default()
		};
		assert_eq!(p.get_kernel(), Kernel::Scalar);
		assert_eq!(p.get_schedule(), Schedule::Interleaved { grain: 4 });

		let p = CorrelateParams {
			grain: Some(9),
			schedule: Some(Schedule::Interleaved { grain: 4 }),
			..CorrelateParams::default()
		};
		assert_eq!(p.get_schedule(), Schedule::Interleaved { grain: 9 });
	}

	#[test]
	fn dedicated_pool_size_is_honoured() {
		let engine = CorrelateBuilder::new().threads(2).into_correlator().unwrap();
		assert_eq!(engine.threads(), 2);
		let seq = CorrelateBuilder::new().tier(Tier::Sequential).threads(8).into_correlator().unwrap();
		assert_eq!(seq.threads(), 1);
	}

	#[test]
	fn every_schedule_gives_identical_results() {
		let (ny, nx) = (48, 17);
		let data = wavy(ny, nx);
		let reference = CorrelateBuilder::new().tier(Tier::Threaded).apply_slice(&data, ny, nx).unwrap();
		for schedule in [Schedule::Contiguous, Schedule::Dynamic { grain: 1 }, Schedule::Interleaved { grain: 5 }] {
			let got = CorrelateBuilder::new()
				.tier(Tier::Threaded)
				.schedule(schedule)
				.threads(4)
				.apply_slice(&data, ny, nx)
				.unwrap();
			assert_eq!(got.values, reference.values, "{:?}", schedule);
		}
	}
}
