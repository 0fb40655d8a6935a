/// Dot-product kernel used for the pairwise reduction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Kernel {
	Auto,
	Scalar,
	Avx2,
}

impl Default for Kernel {
	fn default() -> Self {
		Kernel::Auto
	}
}

impl Kernel {
	#[inline(always)]
	pub const fn is_simd(self) -> bool {
		matches!(self, Kernel::Avx2)
	}

	pub const fn name(self) -> &'static str {
		match self {
			Kernel::Auto => "auto",
			Kernel::Scalar => "scalar",
			Kernel::Avx2 => "avx2",
		}
	}
}

/// Performance tier of a correlate call. All tiers produce the same numbers
/// within 1e-4; they differ in threading and in the reducer they may use.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Tier {
	Sequential,
	Threaded,
	Vectorized,
}

impl Default for Tier {
	fn default() -> Self {
		Tier::Vectorized
	}
}

impl Tier {
	#[inline(always)]
	pub const fn is_parallel(self) -> bool {
		!matches!(self, Tier::Sequential)
	}

	pub const fn name(self) -> &'static str {
		match self {
			Tier::Sequential => "sequential",
			Tier::Threaded => "threaded",
			Tier::Vectorized => "vectorized",
		}
	}
}

/// How the rows of a work-sharing loop are handed to pool workers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Schedule {
	/// One contiguous block of `ceil(rows / workers)` rows per worker.
	Contiguous,
	/// Blocks of `grain` rows, claimed on demand by whichever worker is idle.
	Dynamic { grain: usize },
	/// Blocks of `grain` rows dealt round-robin into `workers` lanes: block `b` goes to
	/// lane `b % workers`. Each lane runs its blocks in order as one pool task; which
	/// thread picks up a lane is left to the pool.
	Interleaved { grain: usize },
}

impl Schedule {
	/// Rows per unit of work handed out, in `1..=max(rows, 1)`.
	#[inline]
	pub fn unit_rows(self, rows: usize, workers: usize) -> usize {
		let cap = rows.max(1);
		match self {
			Schedule::Contiguous => rows.div_ceil(workers.max(1)).clamp(1, cap),
			Schedule::Dynamic { grain } | Schedule::Interleaved { grain } => grain.clamp(1, cap),
		}
	}

	/// Lane statically bound to `unit`, or `None` when the binding is decided at run time.
	#[inline]
	pub fn owner(self, unit: usize, workers: usize) -> Option<usize> {
		match self {
			Schedule::Contiguous => Some(unit),
			Schedule::Interleaved { .. } => Some(unit % workers.max(1)),
			Schedule::Dynamic { .. } => None,
		}
	}

	#[inline]
	pub const fn grain(self) -> Option<usize> {
		match self {
			Schedule::Contiguous => None,
			Schedule::Dynamic { grain } | Schedule::Interleaved { grain } => Some(grain),
		}
	}

	/// Same policy with a different grain; `Contiguous` has none and is returned as is.
	#[inline]
	pub const fn with_grain(self, grain: usize) -> Self {
		match self {
			Schedule::Contiguous => Schedule::Contiguous,
			Schedule::Dynamic { .. } => Schedule::Dynamic { grain },
			Schedule::Interleaved { .. } => Schedule::Interleaved { grain },
		}
	}
}
