pub mod enums;
pub mod helpers;
pub mod matrix_gen;
pub mod parallel;
