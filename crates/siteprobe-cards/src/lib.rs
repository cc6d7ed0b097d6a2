//! Synthetic card-number test strings.
//!
//! Independent of the scanner. Output is cosmetic: numbers carry no check
//! digit and are not drawn from any issuer range.

pub mod error;
pub mod synthesizer;

pub use error::{CardError, Result};
pub use synthesizer::{CardRecord, CardSynthesizer};
