//! Scroll scale configuration, read once from the environment at startup.

use std::num::IntErrorKind;

use serde::Serialize;

pub const TRACK_SCALE_Y_LINEAR: &str = "TRACK_SCALE_Y_LINEAR";
pub const TRACK_SCALE_Y_QUADRATIC: &str = "TRACK_SCALE_Y_QUADRATIC";

pub const DEFAULT_LINEAR_COEFFICIENT: i32 = 1;
pub const DEFAULT_QUADRATIC_COEFFICIENT: i32 = 1;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name}: invalid integer {value:?}")]
    InvalidInteger { name: &'static str, value: String },
    #[error("{name}: value {value:?} does not fit in 32 bits")]
    OutOfRange { name: &'static str, value: String },
}

/// Coefficients of the linear + quadratic scroll response curve.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScaleConfig {
    pub linear: i32,
    pub quadratic: i32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            linear: DEFAULT_LINEAR_COEFFICIENT,
            quadratic: DEFAULT_QUADRATIC_COEFFICIENT,
        }
    }
}

impl ScaleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Unset or blank
    /// variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let linear = read_coefficient(&lookup, TRACK_SCALE_Y_LINEAR, DEFAULT_LINEAR_COEFFICIENT)?;
        let quadratic = read_coefficient(
            &lookup,
            TRACK_SCALE_Y_QUADRATIC,
            DEFAULT_QUADRATIC_COEFFICIENT,
        )?;
        Ok(Self { linear, quadratic })
    }
}

fn read_coefficient<F>(lookup: &F, name: &'static str, default: i32) -> Result<i32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }

    parse_base_auto_i32(trimmed).map_err(|failure| match failure {
        IntParseFailure::Invalid => ConfigError::InvalidInteger {
            name,
            value: raw.clone(),
        },
        IntParseFailure::OutOfRange => ConfigError::OutOfRange {
            name,
            value: raw.clone(),
        },
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntParseFailure {
    Invalid,
    OutOfRange,
}

/// Parses a signed 32-bit integer whose base is picked from its prefix:
/// `0x` hex, `0o` or a bare leading `0` octal, `0b` binary, decimal otherwise.
/// Single underscores may separate digits in any base.
pub fn parse_base_auto_i32(input: &str) -> Result<i32, IntParseFailure> {
    let (negative, body) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let (radix, digits, prefixed) = split_radix_prefix(body);
    // A prefix may be followed directly by `_`; otherwise `_` must sit between digits.
    let leading_underscore = !prefixed && digits.starts_with('_');
    if leading_underscore || digits.ends_with('_') || digits.contains("__") {
        return Err(IntParseFailure::Invalid);
    }

    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(IntParseFailure::Invalid);
    }

    let magnitude = u64::from_str_radix(&cleaned, radix).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow => IntParseFailure::OutOfRange,
        _ => IntParseFailure::Invalid,
    })?;

    let value = if negative {
        -(i64::try_from(magnitude).map_err(|_| IntParseFailure::OutOfRange)?)
    } else {
        i64::try_from(magnitude).map_err(|_| IntParseFailure::OutOfRange)?
    };
    i32::try_from(value).map_err(|_| IntParseFailure::OutOfRange)
}

fn split_radix_prefix(body: &str) -> (u32, &str, bool) {
    let bytes = body.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' {
        match bytes[1] {
            b'x' | b'X' => return (16, &body[2..], true),
            b'o' | b'O' => return (8, &body[2..], true),
            b'b' | b'B' => return (2, &body[2..], true),
            _ => return (8, &body[1..], true),
        }
    }
    (10, body, false)
}
