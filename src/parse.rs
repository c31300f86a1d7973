// Copyright 2021 the numeric-rs authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Numeric parsing utilities.

use crate::error::NumericParseError;
use crate::magnitude::LimbBuf;
use crate::numeric::{Numeric, MAX_EXPONENT, MIN_EXPONENT};
use std::str::FromStr;

#[derive(PartialEq)]
enum Sign {
    Positive,
    Negative,
}

struct Parts<'a> {
    sign: Sign,
    integral: &'a [u8],
    fractional: &'a [u8],
    exp: i32,
}

/// Carves off whitespace up to the first non-whitespace character.
#[inline]
fn eat_whitespaces(s: &[u8]) -> &[u8] {
    let i = s
        .iter()
        .position(|&b| !b.is_ascii_whitespace())
        .unwrap_or(s.len());
    &s[i..]
}

/// Splits a leading sign off the slice, defaulting to positive.
#[inline]
fn extract_sign(s: &[u8]) -> (Sign, &[u8]) {
    match s.first() {
        Some(b'+') => (Sign::Positive, &s[1..]),
        Some(b'-') => (Sign::Negative, &s[1..]),
        _ => (Sign::Positive, s),
    }
}

/// Carves off decimal digits up to the first non-digit character.
#[inline]
fn eat_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let i = s
        .iter()
        .position(|&b| !b.is_ascii_digit())
        .unwrap_or(s.len());
    (&s[..i], &s[i..])
}

/// Extracts the exponent after the `e` marker. More than six digits is
/// already far outside the representable range.
fn extract_exponent(s: &[u8]) -> Result<(i32, &[u8]), NumericParseError> {
    let (sign, s) = extract_sign(s);
    let (digits, rest) = eat_digits(s);
    if digits.is_empty() {
        return Err(NumericParseError::Invalid);
    }
    if digits.len() > 6 {
        return Err(match sign {
            Sign::Positive => NumericParseError::Overflow,
            Sign::Negative => NumericParseError::Underflow,
        });
    }
    let mut exp = 0i32;
    for &d in digits {
        exp = exp * 10 + (d - b'0') as i32;
    }
    if sign == Sign::Negative {
        exp = -exp;
    }
    Ok((exp, rest))
}

fn parse_parts(s: &[u8]) -> Result<Parts, NumericParseError> {
    if s.is_empty() {
        return Err(NumericParseError::Empty);
    }
    let s = eat_whitespaces(s);
    if s.is_empty() {
        return Err(NumericParseError::Empty);
    }

    let (sign, s) = extract_sign(s);
    let (integral, s) = eat_digits(s);

    let (fractional, exp, rest) = match s.first() {
        Some(b'.') => {
            let (fractional, s) = eat_digits(&s[1..]);
            if integral.is_empty() && fractional.is_empty() {
                return Err(NumericParseError::Invalid);
            }
            match s.first() {
                Some(&c) if c == b'e' || c == b'E' => {
                    let (exp, rest) = extract_exponent(&s[1..])?;
                    (fractional, exp, rest)
                }
                _ => (fractional, 0, s),
            }
        }
        Some(&c) if c == b'e' || c == b'E' => {
            if integral.is_empty() {
                return Err(NumericParseError::Invalid);
            }
            let (exp, rest) = extract_exponent(&s[1..])?;
            (&b""[..], exp, rest)
        }
        _ => {
            if integral.is_empty() {
                return Err(NumericParseError::Invalid);
            }
            (&b""[..], 0, s)
        }
    };

    if !eat_whitespaces(rest).is_empty() {
        return Err(NumericParseError::Invalid);
    }

    Ok(Parts {
        sign,
        integral,
        fractional,
        exp,
    })
}

impl<const N: usize, const D: u32> Numeric<N, D> {
    /// Parses a numeric from ASCII bytes.
    ///
    /// The first `DIGITS + 1` significant digits are packed into the limb
    /// grid; the normalizer then rounds half-up on the extra digit, so long
    /// inputs round rather than fail.
    pub(crate) fn from_ascii(s: &[u8]) -> Result<Self, NumericParseError> {
        let parts = parse_parts(s)?;
        let int_len = parts.integral.len() as i64;

        let mut buf = LimbBuf::new();
        let mut limb = 0u32;
        let mut count = 0u32;
        let mut taken = 0u32;
        let mut leading = 0i64;
        let mut seen_nonzero = false;
        for &b in parts.integral.iter().chain(parts.fractional.iter()) {
            let d = (b - b'0') as u32;
            if !seen_nonzero {
                if d == 0 {
                    leading += 1;
                    continue;
                }
                seen_nonzero = true;
            }
            limb = limb * 10 + d;
            count += 1;
            taken += 1;
            if count == D {
                buf.push(limb);
                limb = 0;
                count = 0;
            }
            if taken == Self::DIGITS + 1 {
                // only the first discarded digit matters for rounding
                break;
            }
        }
        if !seen_nonzero {
            return Ok(Self::zero());
        }
        if count > 0 {
            while count < D {
                limb *= 10;
                count += 1;
            }
            buf.push(limb);
        }

        let top_power = parts.exp as i64 + int_len - 1 - leading;
        if top_power > MAX_EXPONENT as i64 {
            return Err(NumericParseError::Overflow);
        }
        if top_power < MIN_EXPONENT as i64 {
            return Err(NumericParseError::Underflow);
        }

        let negative = parts.sign == Sign::Negative;
        match Self::from_wide(buf.as_slice(), top_power as i32, negative) {
            Ok(v) => Ok(v),
            // rounding carried past the exponent ceiling
            Err(_) => Err(NumericParseError::Overflow),
        }
    }
}

impl<const N: usize, const D: u32> FromStr for Numeric<N, D> {
    type Err = NumericParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ascii(s.as_bytes())
    }
}
