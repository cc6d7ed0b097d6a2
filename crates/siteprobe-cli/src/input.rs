//! Parsing of command arguments, event lines, and address files.

use siteprobe_core::{Address, RequesterId, Result, SiteProbeError};
use std::path::{Path, PathBuf};

/// A request to the core, already syntactically validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Probe one address.
    Check(Address),
    /// Probe every address listed in a `.txt` file.
    Batch(PathBuf),
    /// Generate synthetic card records.
    Gen { prefix: String, count: usize },
}

impl Command {
    /// Build a `Gen` command, rejecting a non-numeric count.
    pub fn gen(prefix: &str, count: &str) -> Result<Self> {
        let count = count.parse().map_err(|_| {
            SiteProbeError::Validation(format!("amount must be a number, got '{count}'"))
        })?;
        Ok(Self::Gen {
            prefix: prefix.to_string(),
            count,
        })
    }
}

/// Parse one `listen` event: `<requester> /check <address>`,
/// `<requester> /batch <file>`, or `<requester> /gen <prefix> <amount>`.
pub fn parse_event(line: &str) -> Result<(RequesterId, Command)> {
    let mut parts = line.split_whitespace();
    let requester = parts
        .next()
        .ok_or_else(|| SiteProbeError::Validation("empty event".to_string()))?;
    let verb = parts
        .next()
        .ok_or_else(|| SiteProbeError::Validation("missing command".to_string()))?;
    let args: Vec<&str> = parts.collect();

    let command = match (verb, args.as_slice()) {
        ("/check", [address, ..]) => Command::Check(Address::new(*address)),
        ("/check", []) => {
            return Err(SiteProbeError::Validation(
                "provide a URL after /check".to_string(),
            ))
        }
        ("/batch", [file, ..]) => Command::Batch(PathBuf::from(*file)),
        ("/batch", []) => {
            return Err(SiteProbeError::Validation(
                "provide a .txt file after /batch".to_string(),
            ))
        }
        ("/gen", [prefix, count, ..]) => Command::gen(prefix, count)?,
        ("/gen", _) => {
            return Err(SiteProbeError::Validation(
                "provide a BIN and an amount after /gen".to_string(),
            ))
        }
        (other, _) => {
            return Err(SiteProbeError::Validation(format!(
                "unknown command '{other}'"
            )))
        }
    };

    Ok((RequesterId::new(requester), command))
}

/// Parse an address list: one address per line, blank lines skipped.
#[must_use]
pub fn parse_address_list(contents: &str) -> Vec<Address> {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(Address::new)
        .collect()
}

/// Read an address list from a `.txt` file.
pub async fn read_address_file(path: &Path) -> Result<Vec<Address>> {
    let is_txt = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if !is_txt {
        return Err(SiteProbeError::Validation(format!(
            "{} is not a .txt file",
            path.display()
        )));
    }

    let contents = tokio::fs::read_to_string(path).await?;
    Ok(parse_address_list(&contents))
}
