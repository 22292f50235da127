//! 2-D affine matrix algebra in homogeneous coordinates.
//!
//! Everything here is pure: every operation takes matrices by value and
//! returns a new one.

mod mat3;

pub use mat3::Mat3;
