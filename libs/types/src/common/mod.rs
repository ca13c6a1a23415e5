//! Building blocks shared by every exchange crate

pub mod errors;
pub mod fixed_point;
pub mod identifiers;
pub mod wide;
