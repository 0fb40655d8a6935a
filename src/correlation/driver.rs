//! Triangular pair loop.
//!
//! The unit of work is output row `j`, the contiguous slice
//! `out[j*ny .. (j+1)*ny]`, of which only columns `i = j..ny` are written
//! (`out[i + j*ny]` for `j <= i`). Row `j` costs `ny - j` reductions, so the
//! total work is a triangle and the parallel path wants a balancing schedule.

use super::dot::DotFn;
use crate::utilities::enums::Schedule;
use crate::utilities::parallel::{for_each_row, for_each_row_seq};

#[inline(always)]
fn correlate_output_row(normalized: &[f64], ny: usize, nx: usize, j: usize, out_row: &mut [f32], dot: DotFn) {
	let rj = &normalized[j * nx..(j + 1) * nx];
	for i in j..ny {
		let ri = &normalized[i * nx..(i + 1) * nx];
		out_row[i] = dot(rj, ri).clamp(-1.0, 1.0) as f32;
	}
}

/// Fills the lower triangle of the `ny × ny` buffer `out` from the
/// normalized rows. Cells `out[i + j*ny]` with `j > i` are left untouched.
/// `None` runs on the calling thread.
pub fn correlate_rows(
	normalized: &[f64],
	ny: usize,
	nx: usize,
	out: &mut [f32],
	dot: DotFn,
	schedule: Option<Schedule>,
) {
	debug_assert!(normalized.len() >= ny * nx);
	debug_assert_eq!(out.len(), ny * ny);

	let body = |j: usize, out_row: &mut [f32]| correlate_output_row(normalized, ny, nx, j, out_row, dot);
	match schedule {
		Some(schedule) => for_each_row(out, ny, schedule, body),
		None => for_each_row_seq(out, ny, body),
	}
}
