//! Human-readable byte sizes (`500K`, `1M`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SplitError;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// A size in bytes, parsed from `<digits><K|k|M>[B|b]`.
///
/// Only kilobytes and megabytes are understood; bare numbers, signs,
/// decimals and spaces are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "u64")]
pub struct ByteSize(u64);

impl ByteSize {
    pub const fn new(bytes: u64) -> Self {
        ByteSize(bytes)
    }

    pub const fn bytes(self) -> u64 {
        self.0
    }
}

impl FromStr for ByteSize {
    type Err = SplitError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = || SplitError::InvalidSize(spec.to_string());

        let digits_end = spec
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(spec.len());
        if digits_end == 0 {
            return Err(invalid());
        }

        let (digits, unit) = spec.split_at(digits_end);
        let multiplier = match unit {
            "K" | "KB" | "Kb" | "k" | "kB" | "kb" => KIB,
            "M" | "MB" | "Mb" => MIB,
            _ => return Err(invalid()),
        };

        let value: u64 = digits.parse().map_err(|_| invalid())?;
        value
            .checked_mul(multiplier)
            .map(ByteSize)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for ByteSize {
    type Error = SplitError;

    fn try_from(spec: String) -> Result<Self, Self::Error> {
        spec.parse()
    }
}

impl From<ByteSize> for u64 {
    fn from(size: ByteSize) -> u64 {
        size.0
    }
}

/// Formats as whole kilobytes, or megabytes with one decimal from 1024 KB up.
impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kb = self.0 as f64 / KIB as f64;
        if kb >= KIB as f64 {
            write!(f, "{:.1} MB", kb / KIB as f64)
        } else {
            write!(f, "{:.0} KB", kb)
        }
    }
}
