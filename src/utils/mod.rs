//! Module for additional computational capabilities
pub mod math_utils;
pub mod uom_macros;
pub use math_utils::{f64_to_usize, orthonormal_basis, sign, usize_to_f64, SPEED_OF_LIGHT};
