//! Exit codes returned by [`crate::run`].

pub const SUCCESS: i32 = 0;

/// Any failure: bad arguments, configuration or I/O.
pub const ERROR: i32 = 2;
