//! Repository interfaces for persistence operations.

pub mod two_step;

pub use two_step::{MockTwoStepRepository, TwoStepRepository};
