#![allow(clippy::needless_range_loop)]

//! Pairwise Pearson correlation of the rows of a single-precision matrix.
//!
//! ```
//! use pairwise_corr::correlation::correlate;
//!
//! let (ny, nx) = (3, 4);
//! let data = [1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0, 2.0, 2.0, 2.0, 2.0];
//! let mut result = vec![0.0f32; ny * ny];
//! correlate(ny, nx, &data, &mut result).unwrap();
//! assert!((result[1] + 1.0).abs() < 1e-6);
//! assert_eq!(result[2 + 2 * ny], 0.0);
//! ```

pub mod correlation;
pub mod utilities;
pub mod verify;

pub use correlation::{
	correlate, correlate_into, correlate_with_kernel, correlate_with_params, correlate_with_tier, CorrelateBuilder,
	CorrelateError, CorrelateInput, CorrelateOutput, CorrelateParams, Correlator, DEFAULT_GRAIN,
};
pub use utilities::enums::{Kernel, Schedule, Tier};
