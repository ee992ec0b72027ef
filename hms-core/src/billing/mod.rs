//! Bill amount computation and bill numbering.

pub mod calculator;
pub mod number;
