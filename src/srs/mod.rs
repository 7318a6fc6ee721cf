//! Spaced-repetition scheduling (SM-2 derived).

pub mod sm2;

pub use sm2::{schedule, Sm2Result, SrsError};
