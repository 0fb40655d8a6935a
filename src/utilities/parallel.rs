//! Work-sharing loop over the rows of a flat row-major buffer.
//!
//! Every unit of work owns a disjoint `&mut` run of rows obtained from
//! `chunks_mut`/`par_chunks_mut`, so the loop body needs no synchronization.
//! Runs on the rayon pool the caller is installed in.

use crate::utilities::enums::Schedule;
use rayon::prelude::*;

/// Applies `body(row_index, row)` to every `row_len`-sized row of `buf`,
/// distributing rows across the current rayon pool according to `schedule`.
///
/// `row_len` must be nonzero and `buf.len()` a multiple of it.
pub fn for_each_row<T, F>(buf: &mut [T], row_len: usize, schedule: Schedule, body: F)
where
	T: Send,
	F: Fn(usize, &mut [T]) + Sync,
{
	debug_assert!(row_len > 0);
	debug_assert_eq!(buf.len() % row_len, 0);

	let rows = buf.len() / row_len;
	if rows == 0 {
		return;
	}
	let workers = rayon::current_num_threads().max(1);
	let unit_rows = schedule.unit_rows(rows, workers);
	let run_unit = |first: usize, unit: &mut [T]| {
		for (k, row) in unit.chunks_mut(row_len).enumerate() {
			body(first + k, row);
		}
	};

	match schedule {
		Schedule::Contiguous | Schedule::Dynamic { .. } => {
			buf.par_chunks_mut(unit_rows * row_len)
				.with_max_len(1)
				.enumerate()
				.for_each(|(unit, chunk)| run_unit(unit * unit_rows, chunk));
		}
		Schedule::Interleaved { .. } => {
			let mut lanes: Vec<Vec<(usize, &mut [T])>> = (0..workers).map(|_| Vec::new()).collect();
			for (unit, chunk) in buf.chunks_mut(unit_rows * row_len).enumerate() {
				let lane = schedule.owner(unit, workers).unwrap_or(0);
				lanes[lane].push((unit * unit_rows, chunk));
			}
			lanes.into_par_iter().for_each(|lane| {
				for (first, chunk) in lane {
					run_unit(first, chunk);
				}
			});
		}
	}
}

/// Sequential counterpart of [`for_each_row`].
#[inline]
pub fn for_each_row_seq<T, F>(buf: &mut [T], row_len: usize, body: F)
where
	F: Fn(usize, &mut [T]),
{
	debug_assert!(row_len > 0);
	for (row_idx, row) in buf.chunks_mut(row_len).enumerate() {
		body(row_idx, row);
	}
}

/// Per-lane cost of a static schedule when row `r` costs `cost(r)`.
/// Returns `None` for `Schedule::Dynamic`, whose assignment is decided at run time.
pub fn static_worker_costs<C>(schedule: Schedule, rows: usize, workers: usize, cost: C) -> Option<Vec<u64>>
where
	C: Fn(usize) -> u64,
{
	let workers = workers.max(1);
	let unit_rows = schedule.unit_rows(rows, workers);
	let mut loads = vec![0u64; workers];
	let units = rows.div_ceil(unit_rows);
	for unit in 0..units {
		let owner = schedule.owner(unit, workers)?;
		let start = unit.saturating_mul(unit_rows);
		let end = start.saturating_add(unit_rows).min(rows);
		loads[owner] += (start..end).map(&cost).sum::<u64>();
	}
	Some(loads)
}
