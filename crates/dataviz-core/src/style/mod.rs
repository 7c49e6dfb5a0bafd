//! Highlight styling
//!
//! Detectors name a style with a token; the [`StyleContract`] turns tokens
//! into drawing instructions.

mod contract;
mod token;

pub use contract::{StyleContract, StylePrimitive, StyleSpec};
pub use token::{StyleCategory, StyleToken};
