use anyhow::{Context, Result, bail};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Seed used when the command line names none.
pub const DEFAULT_SEED: u64 = 1337;

/// Resolved seed plus the token it came from, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: u64,
    pub phrase: Option<String>,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self { seed, phrase: None }
    }

    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        Self {
            seed: phrase_seed(phrase),
            phrase: Some(phrase.to_string()),
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        match &self.phrase {
            Some(phrase) => format!("{phrase} ({})", self.seed),
            None => self.seed.to_string(),
        }
    }
}

/// Resolve CLI seed arguments into concrete seeds.
///
/// Supports decimal and `0x` hex integers, the keyword `now` (current time),
/// and seed phrases such as `mossy-oak` which hash to a stable seed.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<SeedInfo>> {
    let mut resolved: Vec<SeedInfo> = Vec::new();
    let mut seen = HashSet::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }
        let info = resolve_token(token)?;
        if seen.insert(info.seed) {
            resolved.push(info);
        }
    }

    if resolved.is_empty() {
        resolved.push(SeedInfo::from_numeric(DEFAULT_SEED));
    }

    Ok(resolved)
}

fn resolve_token(token: &str) -> Result<SeedInfo> {
    if token.eq_ignore_ascii_case("now") {
        let nanos = Utc::now()
            .timestamp_nanos_opt()
            .context("clock is outside the representable range")?;
        return Ok(SeedInfo::from_numeric(nanos.unsigned_abs()));
    }

    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        let value = u64::from_str_radix(hex, 16)
            .with_context(|| format!("invalid hex seed: {token}"))?;
        return Ok(SeedInfo::from_numeric(value));
    }

    if let Ok(value) = token.parse::<u64>() {
        return Ok(SeedInfo::from_numeric(value));
    }

    if let Ok(value) = token.parse::<i64>() {
        return Ok(SeedInfo::from_numeric(value.unsigned_abs()));
    }

    if token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Ok(SeedInfo::from_phrase(&token.to_ascii_lowercase()));
    }

    bail!("Unrecognized seed token: {token}");
}

fn phrase_seed(phrase: &str) -> u64 {
    let digest = Sha256::digest(phrase.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
