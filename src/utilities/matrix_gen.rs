//! Reproducible pseudo-random input matrices.
//!
//! Linear congruential generator, `seed = seed * 1664525 + 1013904223 (mod 2^32)`,
//! starting from seed 42. Each step yields one element from the low 16 bits of
//! the new seed, centered and scaled into `[-1, 1)`.

pub const LCG_SEED: u32 = 42;
const LCG_MUL: u32 = 1_664_525;
const LCG_INC: u32 = 1_013_904_223;

#[derive(Debug, Clone)]
pub struct LcgMatrix {
	seed: u32,
}

impl LcgMatrix {
	#[inline]
	pub fn new(seed: u32) -> Self {
		Self { seed }
	}
}

impl Default for LcgMatrix {
	fn default() -> Self {
		Self::new(LCG_SEED)
	}
}

impl Iterator for LcgMatrix {
	type Item = f32;

	#[inline]
	fn next(&mut self) -> Option<f32> {
		self.seed = self.seed.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
		Some(((self.seed & 0xFFFF) as i32 - 32768) as f32 / 32768.0)
	}
}

/// `ny × nx` row-major matrix from the default seed.
pub fn lcg_matrix(ny: usize, nx: usize) -> Vec<f32> {
	LcgMatrix::default().take(ny * nx).collect()
}
