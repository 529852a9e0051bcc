//! Command implementations.

pub mod compare;
pub mod normalize;
pub mod paths;
