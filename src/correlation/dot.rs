//! Dot product of two normalized rows.
//!
//! | Kernel | Width        | Intrinsics                              |
//! |--------|--------------|-----------------------------------------|
//! | Avx2   | 4×f64 (256b) | `_mm256_loadu_pd`, `_mm256_fmadd_pd`    |
//! | Scalar | 1×f64        | single running accumulator              |
//!
//! The AVX2 kernel exists only on x86_64 builds with feature `simd`; elsewhere
//! every request resolves to the scalar kernel.

use super::CorrelateError;
use crate::utilities::enums::Kernel;
use crate::utilities::helpers::resolve_kernel;
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
use core::arch::x86_64::*;

/// Reducer signature shared by every kernel.
pub type DotFn = fn(&[f64], &[f64]) -> f64;

#[inline]
pub fn dot_scalar(a: &[f64], b: &[f64]) -> f64 {
	debug_assert_eq!(a.len(), b.len());
	let mut acc = 0.0f64;
	for x in 0..a.len() {
		acc += a[x] * b[x];
	}
	acc
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
#[inline(always)]
unsafe fn hsum256_pd(v: __m256d) -> f64 {
	let hi = _mm256_extractf128_pd(v, 1);
	let lo = _mm256_castpd256_pd128(v);
	let sum2 = _mm_add_pd(lo, hi);
	let hi64 = _mm_unpackhi_pd(sum2, sum2);
	_mm_cvtsd_f64(_mm_add_sd(sum2, hi64))
}

/// AVX2+FMA dot product: 4 doubles per step into one accumulator, scalar tail.
///
/// # Safety
/// The CPU must support `avx2` and `fma`.
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
#[target_feature(enable = "avx2,fma")]
pub unsafe fn dot_avx2(a: &[f64], b: &[f64]) -> f64 {
	debug_assert_eq!(a.len(), b.len());
	let n = a.len().min(b.len());
	let pa = a.as_ptr();
	let pb = b.as_ptr();

	let mut acc = _mm256_setzero_pd();
	let mut x = 0usize;
	while x + 4 <= n {
		let va = _mm256_loadu_pd(pa.add(x));
		let vb = _mm256_loadu_pd(pb.add(x));
		acc = _mm256_fmadd_pd(va, vb, acc);
		x += 4;
	}

	let mut dot = hsum256_pd(acc);
	while x < n {
		dot += *pa.add(x) * *pb.add(x);
		x += 1;
	}
	dot
}

// Only ever handed out by `select_reducer` after `resolve_kernel` confirmed AVX2+FMA.
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
fn dot_avx2_checked(a: &[f64], b: &[f64]) -> f64 {
	unsafe { dot_avx2(a, b) }
}

/// Picks the reducer for `kernel` once; `Auto` resolves to the best kernel available.
pub fn select_reducer(kernel: Kernel) -> Result<(Kernel, DotFn), CorrelateError> {
	let chosen = resolve_kernel(kernel).ok_or(CorrelateError::UnsupportedKernel { kernel })?;
	let f: DotFn = match chosen {
		#[cfg(all(feature = "simd", target_arch = "x86_64"))]
		Kernel::Avx2 => dot_avx2_checked,
		_ => dot_scalar,
	};
	Ok((chosen, f))
}

#[inline]
pub fn dot_with_kernel(a: &[f64], b: &[f64], kernel: Kernel) -> Result<f64, CorrelateError> {
	let (_, f) = select_reducer(kernel)?;
	Ok(f(a, b))
}

/// Dot product with the best kernel for this CPU.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
	match select_reducer(Kernel::Auto) {
		Ok((_, f)) => f(a, b),
		Err(_) => dot_scalar(a, b),
	}
}
