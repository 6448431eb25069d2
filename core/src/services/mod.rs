//! Business services orchestrating the domain.

pub mod verification;

pub use verification::*;
