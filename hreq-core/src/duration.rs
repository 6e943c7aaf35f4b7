//! Parser for Go-style duration strings such as `10s`, `1ms` or `1h30m`.

use std::iter::Peekable;
use std::str::Chars;
use std::time::Duration;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("negative duration {0:?}")]
    Negative(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} is too large")]
    Overflow(String),
}

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Parse a duration: a sequence of decimal numbers, each with an optional
/// fraction and a required unit (`ns`, `us`, `µs`, `ms`, `s`, `m`, `h`).
/// A bare `0` is accepted without a unit.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());
    let overflow = || DurationError::Overflow(input.to_string());

    let mut chars = input.chars().peekable();
    match chars.peek() {
        Some('-') => return Err(DurationError::Negative(input.to_string())),
        Some('+') => {
            chars.next();
        }
        _ => {}
    }

    let rest: String = chars.clone().collect();
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while chars.peek().is_some() {
        let whole = read_digits(&mut chars);
        let frac = if chars.peek() == Some(&'.') {
            chars.next();
            Some(read_digits(&mut chars))
        } else {
            None
        };

        let no_whole = whole.is_empty();
        let no_frac = frac.as_ref().map_or(true, |f| f.is_empty());
        if no_whole && no_frac {
            return Err(invalid());
        }

        let mut unit = String::new();
        while let Some(&c) = chars.peek() {
            if c == '.' || c.is_ascii_digit() {
                break;
            }
            unit.push(c);
            chars.next();
        }
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let scale = unit_nanos(&unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.clone(),
            input: input.to_string(),
        })?;

        let whole_value: u64 = if no_whole {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let mut nanos = whole_value.checked_mul(scale).ok_or_else(overflow)?;
        if let Some(frac) = frac {
            nanos = nanos
                .checked_add(fraction_nanos(&frac, scale))
                .ok_or_else(overflow)?;
        }
        total = total.checked_add(nanos).ok_or_else(overflow)?;
    }

    Ok(Duration::from_nanos(total))
}

fn read_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}

// Digits past nanosecond precision of the largest unit cannot matter.
fn fraction_nanos(digits: &str, scale: u64) -> u64 {
    let mut numerator: u128 = 0;
    let mut denominator: u128 = 1;
    for d in digits.bytes().take(20) {
        numerator = numerator * 10 + u128::from(d - b'0');
        denominator *= 10;
    }
    (numerator * u128::from(scale) / denominator) as u64
}
