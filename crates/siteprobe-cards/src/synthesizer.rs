use crate::error::{CardError, Result};
use chrono::Datelike;
use rand::Rng;
use regex::Regex;
use siteprobe_core::{CardConfig, MAX_YEAR_SPAN};
use std::fmt;
use std::sync::OnceLock;

/// Random digits appended after the prefix.
pub const SUFFIX_DIGITS: usize = 10;

/// A synthetic, disposable card-like record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    pub number: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub cvv: String,
}

impl fmt::Display for CardRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{:02}|{}|{}",
            self.number, self.expiry_month, self.expiry_year, self.cvv
        )
    }
}

/// Generates cosmetic card-number strings from a numeric prefix.
///
/// Numbers are prefix plus random digits: no check digit, no uniqueness.
#[derive(Debug, Clone)]
pub struct CardSynthesizer {
    max_count: usize,
    year_span: i32,
}

impl CardSynthesizer {
    #[must_use]
    pub fn new(config: &CardConfig) -> Self {
        Self {
            max_count: config.max_count,
            year_span: config.year_span.clamp(0, MAX_YEAR_SPAN),
        }
    }

    /// Generate `count` records with expiry years starting at the current UTC year.
    pub fn generate(&self, prefix: &str, count: usize) -> Result<Vec<CardRecord>> {
        let base_year = chrono::Utc::now().year();
        self.generate_with_rng(&mut rand::thread_rng(), prefix, count, base_year)
    }

    pub fn generate_with_rng<R: Rng>(
        &self,
        rng: &mut R,
        prefix: &str,
        count: usize,
        base_year: i32,
    ) -> Result<Vec<CardRecord>> {
        validate_prefix(prefix)?;
        if count == 0 || count > self.max_count {
            return Err(CardError::InvalidCount {
                max: self.max_count,
                actual: count,
            });
        }

        let last_year = base_year.saturating_add(self.year_span);
        let records = (0..count)
            .map(|_| {
                let mut number = String::with_capacity(prefix.len() + SUFFIX_DIGITS);
                number.push_str(prefix);
                for _ in 0..SUFFIX_DIGITS {
                    number.push(char::from(b'0' + rng.gen_range(0..10u8)));
                }

                CardRecord {
                    number,
                    expiry_month: rng.gen_range(1..=12),
                    expiry_year: rng.gen_range(base_year..=last_year),
                    cvv: rng.gen_range(100..=999u16).to_string(),
                }
            })
            .collect();

        Ok(records)
    }
}

impl Default for CardSynthesizer {
    fn default() -> Self {
        Self::new(&CardConfig::default())
    }
}

fn validate_prefix(prefix: &str) -> Result<()> {
    static PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PREFIX_REGEX.get_or_init(|| Regex::new(r"^[0-9]{1,12}$").expect("valid regex"));

    if regex.is_match(prefix) {
        Ok(())
    } else {
        Err(CardError::InvalidPrefix(prefix.to_string()))
    }
}
