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

//! Numeric type implementation.

use crate::buf::Buf;
use crate::error::{NumericConvertError, NumericError};
use crate::magnitude;
use std::cmp::Ordering;
use std::fmt;

/// Largest representable decimal exponent.
pub const MAX_EXPONENT: i32 = 65535;
/// Smallest representable decimal exponent; results below it flush to zero.
pub const MIN_EXPONENT: i32 = -65536;

/// A numeric with 16 decimal digits of precision.
pub type Numeric16 = Numeric<2, 8>;
/// A numeric with 32 decimal digits of precision.
pub type Numeric32 = Numeric<4, 8>;
/// A numeric with 64 decimal digits of precision.
pub type Numeric64 = Numeric<8, 8>;

/// An exact decimal value with `N * D` digits of precision.
///
/// The value is stored as a sign, a decimal exponent and a mantissa of `N`
/// limbs of `D` digits each, most significant limb first. A non-zero value is
/// always normalized: its first digit is non-zero and sits at the power
/// `exponent`, so the magnitude lies in `[10^exponent, 10^(exponent + 1))`.
/// Zero is canonical: positive sign, zero exponent, zero mantissa.
///
/// `D` must be in `1..=8` and `N` in `1..=32`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Numeric<const N: usize, const D: u32> {
    pub(crate) negative: bool,
    pub(crate) exponent: i32,
    pub(crate) limbs: [u32; N],
}

impl<const N: usize, const D: u32> Numeric<N, D> {
    /// Total decimal digits of precision.
    pub const DIGITS: u32 = N as u32 * D;
    /// Size in bytes of the binary encoding.
    pub const BINARY_SIZE: usize = 5 + 4 * N;

    pub(crate) const BASE: u32 = magnitude::pow10(D);
    const LEAD: u32 = Self::BASE / 10;

    /// Returns a `Numeric` which value is `0`.
    #[inline]
    pub const fn zero() -> Self {
        assert!(N >= 1 && N <= 32, "limb count out of range");
        assert!(D >= 1 && D <= 8, "digits per limb out of range");
        Numeric {
            negative: false,
            exponent: 0,
            limbs: [0; N],
        }
    }

    /// Returns a `Numeric` which value is `1`.
    #[inline]
    pub const fn one() -> Self {
        Self::small(1, 0, false)
    }

    #[inline]
    pub(crate) const fn two() -> Self {
        Self::small(2, 0, false)
    }

    /// A single-digit value `digit * 10^exponent` with `digit` in `1..=9`.
    #[inline]
    pub(crate) const fn small(digit: u32, exponent: i32, negative: bool) -> Self {
        let mut limbs = [0; N];
        limbs[0] = digit * Self::LEAD;
        Numeric {
            negative,
            exponent,
            limbs,
        }
    }

    #[inline]
    pub(crate) const fn power_of_ten(exponent: i32) -> Self {
        Self::small(1, exponent, false)
    }

    /// The smallest increment distinguishable from `1`, i.e.
    /// `10^(1 - DIGITS)`.
    #[inline]
    pub fn epsilon() -> Self {
        Self::power_of_ten(1 - Self::DIGITS as i32)
    }

    /// The weight of this value's least significant mantissa digit.
    #[inline]
    pub(crate) fn ulp(&self) -> Self {
        if self.is_zero() {
            Self::epsilon()
        } else {
            Self::power_of_ten(self.exponent - Self::DIGITS as i32 + 1)
        }
    }

    /// Checks if `self` is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs[0] == 0
    }

    /// Returns `true` if the sign bit is set.
    #[inline]
    pub const fn is_sign_negative(&self) -> bool {
        self.negative
    }

    /// Returns `true` if the sign bit is clear.
    #[inline]
    pub const fn is_sign_positive(&self) -> bool {
        !self.negative
    }

    /// The decimal exponent, i.e. the power of the leading digit.
    #[inline]
    pub const fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Computes the absolute value of `self`.
    #[inline]
    pub fn abs(&self) -> Self {
        let mut v = *self;
        v.negative = false;
        v
    }

    #[inline]
    pub(crate) fn neg_value(&self) -> Self {
        let mut v = *self;
        if !v.is_zero() {
            v.negative = !v.negative;
        }
        v
    }

    /// Number of significant digits, counted from the leading digit to the
    /// last non-zero digit. Zero has precision 1.
    pub fn precision(&self) -> u32 {
        for i in (0..N).rev() {
            let mut limb = self.limbs[i];
            if limb != 0 {
                let mut tz = 0;
                while limb % 10 == 0 {
                    limb /= 10;
                    tz += 1;
                }
                return (i as u32 + 1) * D - tz;
            }
        }
        1
    }

    /// The mantissa digit at index `idx` (0 = leading digit), or 0 past the
    /// mantissa.
    #[inline]
    pub(crate) fn digit(&self, idx: usize) -> u32 {
        if idx >= Self::DIGITS as usize {
            0
        } else {
            magnitude::digit_at(&self.limbs, idx, D)
        }
    }

    /// Builds a normalized value from a wide digit buffer.
    ///
    /// `top_power` is the decimal power of the first digit of `wide`. The
    /// leading zeros are skipped, the first `DIGITS` significant digits are
    /// kept, and the first discarded digit rounds half-up into the mantissa.
    /// An exponent above [`MAX_EXPONENT`] is an overflow; below
    /// [`MIN_EXPONENT`] the value flushes to zero.
    pub(crate) fn from_wide(
        wide: &[u32],
        top_power: i32,
        negative: bool,
    ) -> Result<Self, NumericError> {
        let fz = match magnitude::first_nonzero_digit(wide, D) {
            Some(fz) => fz,
            None => return Ok(Self::zero()),
        };

        let exponent = top_power as i64 - fz as i64;
        if exponent > MAX_EXPONENT as i64 {
            return Err(NumericError::Overflow);
        }
        if exponent < MIN_EXPONENT as i64 {
            return Ok(Self::zero());
        }
        let mut exponent = exponent as i32;

        let total = wide.len() * D as usize;
        let mut limbs = [0u32; N];
        for t in 0..Self::DIGITS as usize {
            let digit = if fz + t < total {
                magnitude::digit_at(wide, fz + t, D)
            } else {
                0
            };
            limbs[t / D as usize] = limbs[t / D as usize] * 10 + digit;
        }

        let round_digit = if fz + (Self::DIGITS as usize) < total {
            magnitude::digit_at(wide, fz + Self::DIGITS as usize, D)
        } else {
            0
        };
        if round_digit >= 5 {
            let mut i = N - 1;
            let mut carry = 1u32;
            loop {
                let sum = limbs[i] + carry;
                limbs[i] = sum % Self::BASE;
                carry = sum / Self::BASE;
                if carry == 0 {
                    break;
                }
                if i == 0 {
                    // all retained digits were nines
                    if exponent >= MAX_EXPONENT {
                        return Err(NumericError::Overflow);
                    }
                    exponent += 1;
                    limbs = [0; N];
                    limbs[0] = Self::LEAD;
                    break;
                }
                i -= 1;
            }
        }

        Ok(Numeric {
            negative,
            exponent,
            limbs,
        })
    }

    /// Normalizes `self`. Values produced by this crate are already
    /// normalized, so this is a fixed point: `v.normalize() == v`.
    #[inline]
    pub fn normalize(&self) -> Self {
        match Self::from_wide(&self.limbs, self.exponent, self.negative) {
            Ok(v) => v,
            Err(_) => *self,
        }
    }

    /// Truncate a value to `scale` digits after the decimal point, toward
    /// zero. `scale` can be negative to truncate before the point.
    #[inline]
    pub fn trunc(&self, scale: i32) -> Self {
        self.rescale(scale, false)
    }

    /// Round a value to `scale` digits after the decimal point, half away
    /// from zero. `scale` can be negative to round before the point.
    #[inline]
    pub fn round(&self, scale: i32) -> Self {
        self.rescale(scale, true)
    }

    fn rescale(&self, scale: i32, rounding: bool) -> Self {
        if self.is_zero() {
            return Self::zero();
        }

        // number of mantissa digits that survive
        let retain = self.exponent as i64 + scale as i64 + 1;
        if retain >= Self::DIGITS as i64 {
            return *self;
        }
        if retain < 0 {
            return Self::zero();
        }
        if retain == 0 {
            // the leading digit itself is cut; it may round up into the
            // next power of ten
            return if rounding && self.digit(0) >= 5 {
                self.unit_above()
            } else {
                Self::zero()
            };
        }
        let retain = retain as u32;

        let mut limbs = self.limbs;
        let cut = (retain / D) as usize;
        let part = retain % D;
        if part == 0 {
            for limb in limbs[cut..].iter_mut() {
                *limb = 0;
            }
        } else {
            let keep = magnitude::pow10(D - part);
            limbs[cut] -= limbs[cut] % keep;
            for limb in limbs[cut + 1..].iter_mut() {
                *limb = 0;
            }
        }

        if rounding && self.digit(retain as usize) >= 5 {
            let pos = (retain - 1) as usize;
            let unit = magnitude::pow10(D - 1 - pos as u32 % D);
            let mut i = pos / D as usize;
            let mut carry = unit;
            loop {
                let sum = limbs[i] + carry;
                limbs[i] = sum % Self::BASE;
                carry = sum / Self::BASE;
                if carry == 0 {
                    break;
                }
                if i == 0 {
                    return self.unit_above();
                }
                i -= 1;
            }
        }

        Numeric {
            negative: self.negative,
            exponent: self.exponent,
            limbs,
        }
    }

    /// `10^(exponent + 1)` with this value's sign; saturates at the exponent
    /// ceiling so rounding never throws.
    fn unit_above(&self) -> Self {
        if self.exponent >= MAX_EXPONENT {
            return *self;
        }
        let mut v = Self::power_of_ten(self.exponent + 1);
        v.negative = self.negative;
        v
    }

    /// Largest integer not greater than `self`.
    #[inline]
    pub fn floor(&self) -> Self {
        let t = self.trunc(0);
        if self.negative && *self != t {
            t - Self::one()
        } else {
            t
        }
    }

    /// Smallest integer not less than `self`.
    #[inline]
    pub fn ceil(&self) -> Self {
        let t = self.trunc(0);
        if !self.negative && *self != t {
            t + Self::one()
        } else {
            t
        }
    }

    /// Fractional part, `self - self.floor()`, always in `[0, 1)`.
    #[inline]
    pub fn fract(&self) -> Self {
        *self - self.floor()
    }

    /// Compares magnitudes of two non-zero values. Normalization makes this
    /// an exponent compare followed by a lexicographic limb compare.
    #[inline]
    pub(crate) fn magnitude_cmp(&self, other: &Self) -> Ordering {
        debug_assert!(!self.is_zero() && !other.is_zero());
        match self.exponent.cmp(&other.exponent) {
            Ordering::Equal => magnitude::cmp_slices(&self.limbs, &other.limbs),
            ord => ord,
        }
    }

    /// Encodes the value to `writer`: sign byte, big-endian exponent,
    /// big-endian limbs. Returns the number of bytes written, always
    /// [`Self::BINARY_SIZE`].
    pub fn encode<W: std::io::Write>(&self, mut writer: W) -> std::io::Result<usize> {
        writer.write_all(&[self.negative as u8])?;
        writer.write_all(&self.exponent.to_be_bytes())?;
        for limb in self.limbs.iter() {
            writer.write_all(&limb.to_be_bytes())?;
        }
        Ok(Self::BINARY_SIZE)
    }

    /// Decodes a value previously produced by [`encode`](Self::encode).
    /// Foreign bytes with a denormal mantissa are renormalized.
    pub fn decode(bytes: &[u8]) -> Result<Self, NumericConvertError> {
        if bytes.len() != Self::BINARY_SIZE {
            return Err(NumericConvertError::Invalid);
        }
        let negative = match bytes[0] {
            0 => false,
            1 => true,
            _ => return Err(NumericConvertError::Invalid),
        };

        let mut int_buf = [0u8; 4];
        int_buf.copy_from_slice(&bytes[1..5]);
        let exponent = i32::from_be_bytes(int_buf);

        let mut limbs = [0u32; N];
        for (i, limb) in limbs.iter_mut().enumerate() {
            int_buf.copy_from_slice(&bytes[5 + 4 * i..9 + 4 * i]);
            *limb = u32::from_be_bytes(int_buf);
            if *limb >= Self::BASE {
                return Err(NumericConvertError::Invalid);
            }
        }

        Self::from_wide(&limbs, exponent, negative).map_err(|_| NumericConvertError::Overflow)
    }

    /// Writes the digits of `self` (rounded if a precision is given) without
    /// a sign, and returns whether the written value is non-negative.
    fn fmt_internal(&self, precision: Option<usize>, w: &mut Buf) -> bool {
        const PLAIN_MAX_EXPONENT: i32 = 40;
        const PLAIN_MIN_EXPONENT: i32 = -8;

        // cap the requested precision at the mantissa width plus slack so
        // every rendering fits the byte buffer
        let precision = precision.map(|p| p.min(Self::DIGITS as usize + 16));
        let v = match precision {
            Some(p) => self.round(p as i32),
            None => *self,
        };
        if v.is_zero() {
            w.write_u8(b'0');
            if let Some(p) = precision {
                if p > 0 {
                    w.write_u8(b'.');
                    w.write_bytes(b'0', p);
                }
            }
            return true;
        }

        let mut digits = [0u8; 260];
        for (i, &limb) in v.limbs.iter().enumerate() {
            let mut limb = limb;
            for j in (0..D as usize).rev() {
                digits[i * D as usize + j] = b'0' + (limb % 10) as u8;
                limb /= 10;
            }
        }
        let mut sig = Self::DIGITS as usize;
        while sig > 1 && digits[sig - 1] == b'0' {
            sig -= 1;
        }

        let e = v.exponent;
        if e < PLAIN_MIN_EXPONENT || e >= PLAIN_MAX_EXPONENT {
            w.write_u8(digits[0]);
            if sig > 1 {
                w.write_u8(b'.');
                w.write_slice(&digits[1..sig]);
            }
            w.write_u8(b'E');
            w.write_u8(if e < 0 { b'-' } else { b'+' });
            let mut exp_digits = [0u8; 10];
            let mut len = 0;
            let mut abs = e.unsigned_abs();
            loop {
                exp_digits[len] = b'0' + (abs % 10) as u8;
                abs /= 10;
                len += 1;
                if abs == 0 {
                    break;
                }
            }
            for i in (0..len).rev() {
                w.write_u8(exp_digits[i]);
            }
        } else if e >= 0 {
            let int_len = e as usize + 1;
            if sig <= int_len {
                w.write_slice(&digits[..sig]);
                w.write_bytes(b'0', int_len - sig);
                if let Some(p) = precision {
                    if p > 0 {
                        w.write_u8(b'.');
                        w.write_bytes(b'0', p);
                    }
                }
            } else {
                w.write_slice(&digits[..int_len]);
                let frac = &digits[int_len..sig];
                match precision {
                    Some(0) => {}
                    Some(p) => {
                        w.write_u8(b'.');
                        w.write_slice(frac);
                        w.write_bytes(b'0', p - frac.len());
                    }
                    None => {
                        w.write_u8(b'.');
                        w.write_slice(frac);
                    }
                }
            }
        } else {
            let zeros = (-e - 1) as usize;
            w.write_slice(b"0.");
            w.write_bytes(b'0', zeros);
            w.write_slice(&digits[..sig]);
            if let Some(p) = precision {
                w.write_bytes(b'0', p - zeros - sig);
            }
        }
        v.is_sign_positive()
    }
}

impl<const N: usize, const D: u32> Default for Numeric<N, D> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize, const D: u32> PartialOrd for Numeric<N, D> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize, const D: u32> Ord for Numeric<N, D> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => {
                if other.negative {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (false, true) => {
                if self.negative {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (false, false) => {
                if self.negative != other.negative {
                    return if self.negative {
                        Ordering::Less
                    } else {
                        Ordering::Greater
                    };
                }
                let ord = self.magnitude_cmp(other);
                if self.negative {
                    ord.reverse()
                } else {
                    ord
                }
            }
        }
    }
}

impl<const N: usize, const D: u32> fmt::Display for Numeric<N, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = Buf::new();
        let non_negative = self.fmt_internal(f.precision(), &mut buf);
        let str = unsafe { std::str::from_utf8_unchecked(buf.as_slice()) };
        f.pad_integral(non_negative, "", str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n64(s: &str) -> Numeric64 {
        s.parse().unwrap()
    }

    #[test]
    fn test_normalized_layout() {
        let v = n64("123.456");
        assert_eq!(v.exponent(), 2);
        assert_eq!(v.precision(), 6);
        assert!(v.is_sign_positive());

        let v = n64("-0.00012");
        assert_eq!(v.exponent(), -4);
        assert_eq!(v.precision(), 2);
        assert!(v.is_sign_negative());
    }

    #[test]
    fn test_normalize_idempotent() {
        for s in ["0", "1", "-1", "123.456", "-0.00012", "9.995", "1E+65535"] {
            let v = n64(s);
            assert_eq!(v.normalize(), v);
            assert_eq!(v.normalize().normalize(), v);
        }
    }

    #[test]
    fn test_zero_is_canonical() {
        let zero = Numeric64::zero();
        assert!(zero.is_zero());
        assert!(zero.is_sign_positive());
        assert_eq!(zero.exponent(), 0);
        assert_eq!(n64("0.000"), zero);
        assert_eq!(n64("-0"), zero);
        assert_eq!(n64("1") - n64("1"), zero);
    }

    #[test]
    fn test_cmp() {
        fn assert_cmp(x: &str, ord: Ordering, y: &str) {
            assert_eq!(n64(x).cmp(&n64(y)), ord, "{} {:?} {}", x, ord, y);
        }

        assert_cmp("0", Ordering::Equal, "0");
        assert_cmp("0", Ordering::Less, "1");
        assert_cmp("0", Ordering::Greater, "-1");
        assert_cmp("1", Ordering::Greater, "0");
        assert_cmp("-1", Ordering::Less, "0");
        assert_cmp("3.14", Ordering::Greater, "-3.14");
        assert_cmp("3.14", Ordering::Less, "3.15");
        assert_cmp("-3.14", Ordering::Greater, "-3.15");
        assert_cmp("123456789.987654321", Ordering::Equal, "123456789.987654321");
        assert_cmp("100", Ordering::Greater, "99.9999");
        assert_cmp("1E-100", Ordering::Greater, "1E-101");
        assert_cmp("-1E-100", Ordering::Less, "-1E-101");
        assert_cmp("0.5", Ordering::Less, "5");
    }

    #[test]
    fn test_round() {
        fn assert_round(val: &str, scale: i32, expected: &str) {
            assert_eq!(n64(val).round(scale).to_string(), expected);
        }

        assert_round("0", 0, "0");
        assert_round("123456", 0, "123456");
        assert_round("123456.123456", 6, "123456.123456");
        assert_round("123456.123456", 5, "123456.12346");
        assert_round("123456.123456", 1, "123456.1");
        assert_round("123456.123456", 0, "123456");
        assert_round("123456.123456", -1, "123460");
        assert_round("123456.123456", -5, "100000");
        assert_round("123456.123456", -6, "0");
        assert_round("9.995", 2, "10");
        assert_round("1.2345", 0, "1");
        assert_round("9999.999", 2, "10000");
        assert_round("-123456.123456", 4, "-123456.1235");
        assert_round("-0.06", 1, "-0.1");
        assert_round("0.04", 1, "0");
        assert_round("0.05", 1, "0.1");
        assert_round("0.00000001", 2, "0");
    }

    #[test]
    fn test_round_carry_extends_exponent() {
        let v = n64("9.9999999999999999999999999999999999999999999999999999999999999999");
        // the mantissa is all nines after parse rounding
        assert_eq!(v, n64("10"));
        assert_eq!(n64("9.995").round(2), n64("10"));
        assert_eq!(n64("99.95").round(1), n64("100"));
    }

    #[test]
    fn test_round_saturates_at_ceiling() {
        let v = n64("9.9E+65535");
        assert_eq!(v.round(-65536), v);
    }

    #[test]
    fn test_trunc() {
        fn assert_trunc(val: &str, scale: i32, expected: &str) {
            assert_eq!(n64(val).trunc(scale).to_string(), expected);
        }

        assert_trunc("0", 0, "0");
        assert_trunc("123456", 0, "123456");
        assert_trunc("123456.123456", 6, "123456.123456");
        assert_trunc("123456.123456", 5, "123456.12345");
        assert_trunc("123456.123456", 0, "123456");
        assert_trunc("123456.123456", -1, "123450");
        assert_trunc("123456.123456", -5, "100000");
        assert_trunc("123456.123456", -6, "0");
        assert_trunc("9988776655.4433277112", 5, "9988776655.44332");
        assert_trunc("-1.99999", 0, "-1");
        assert_trunc("0.00000001", 2, "0");
    }

    #[test]
    fn test_floor_ceil_fract() {
        fn assert_fcf(val: &str, floor: &str, ceil: &str, fract: &str) {
            let v = n64(val);
            assert_eq!(v.floor(), n64(floor), "floor of {}", val);
            assert_eq!(v.ceil(), n64(ceil), "ceil of {}", val);
            assert_eq!(v.fract(), n64(fract), "fract of {}", val);
        }

        assert_fcf("0", "0", "0", "0");
        assert_fcf("5", "5", "5", "0");
        assert_fcf("-5", "-5", "-5", "0");
        assert_fcf("1.5", "1", "2", "0.5");
        assert_fcf("-1.5", "-2", "-1", "0.5");
        assert_fcf("0.25", "0", "1", "0.25");
        assert_fcf("-0.25", "-1", "0", "0.75");
        assert_fcf("123456.789", "123456", "123457", "0.789");
    }

    #[test]
    fn test_precision() {
        assert_eq!(n64("0").precision(), 1);
        assert_eq!(n64("7").precision(), 1);
        assert_eq!(n64("-100").precision(), 1);
        assert_eq!(n64("123.456").precision(), 6);
        assert_eq!(n64("0.000123").precision(), 3);
        assert_eq!(
            n64("1.234567890123456789012345678901234567890123456789012345678901234").precision(),
            64
        );
    }

    #[test]
    fn test_epsilon_ulp() {
        assert_eq!(Numeric64::epsilon(), n64("1E-63"));
        assert_eq!(n64("1").ulp(), n64("1E-63"));
        assert_eq!(n64("123.45").ulp(), n64("1E-61"));
        assert_eq!(n64("0").ulp(), Numeric64::epsilon());
    }

    #[test]
    fn test_display() {
        fn assert_fmt(val: &str, expected: &str) {
            assert_eq!(n64(val).to_string(), expected);
        }

        assert_fmt("0", "0");
        assert_fmt("-0", "0");
        assert_fmt("000123", "123");
        assert_fmt("123.456000", "123.456");
        assert_fmt("-123.456", "-123.456");
        assert_fmt("0.00012", "0.00012");
        assert_fmt("-0.00012", "-0.00012");
        assert_fmt("1000000", "1000000");
        assert_fmt("1E+39", "1000000000000000000000000000000000000000");
        assert_fmt("1E+40", "1E+40");
        assert_fmt("-1.5E+50", "-1.5E+50");
        assert_fmt("1E-8", "0.00000001");
        assert_fmt("1E-9", "1E-9");
        assert_fmt("1.25E-9", "1.25E-9");
    }

    #[test]
    fn test_display_precision() {
        assert_eq!(format!("{:.2}", n64("0")), "0.00");
        assert_eq!(format!("{:.0}", n64("1.5")), "2");
        assert_eq!(format!("{:.2}", n64("9.995")), "10.00");
        assert_eq!(format!("{:.4}", n64("123.456")), "123.4560");
        assert_eq!(format!("{:.1}", n64("-0.04")), "0.0");
        assert_eq!(format!("{:.1}", n64("-0.06")), "-0.1");
        assert_eq!(format!("{:.2}", n64("0.005")), "0.01");
    }

    #[test]
    fn test_encode_decode() {
        fn assert_roundtrip(val: &str) {
            let v = n64(val);
            let mut bytes = Vec::new();
            let n = v.encode(&mut bytes).unwrap();
            assert_eq!(n, Numeric64::BINARY_SIZE);
            assert_eq!(bytes.len(), Numeric64::BINARY_SIZE);
            assert_eq!(Numeric64::decode(&bytes).unwrap(), v);
        }

        assert_roundtrip("0");
        assert_roundtrip("1");
        assert_roundtrip("-1");
        assert_roundtrip("123456789.987654321");
        assert_roundtrip("-0.00000000000000000000001");
        assert_roundtrip("9.9E+65535");
        assert_roundtrip("1E-65536");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(
            Numeric64::decode(&[]).unwrap_err(),
            NumericConvertError::Invalid
        );
        let mut bytes = vec![0u8; Numeric64::BINARY_SIZE];
        bytes[0] = 2; // bad sign byte
        assert_eq!(
            Numeric64::decode(&bytes).unwrap_err(),
            NumericConvertError::Invalid
        );
        let mut bytes = vec![0u8; Numeric64::BINARY_SIZE];
        bytes[5..9].copy_from_slice(&u32::MAX.to_be_bytes()); // limb >= BASE
        assert_eq!(
            Numeric64::decode(&bytes).unwrap_err(),
            NumericConvertError::Invalid
        );
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        fn hash(v: &Numeric64) -> u64 {
            let mut hasher = DefaultHasher::new();
            v.hash(&mut hasher);
            hasher.finish()
        }

        assert_eq!(hash(&n64("1.23")), hash(&n64("1.230000")));
        assert_eq!(hash(&n64("0")), hash(&n64("-0.000")));
    }

    #[test]
    fn test_other_geometries() {
        let v: Numeric16 = "123.456".parse().unwrap();
        assert_eq!(v.to_string(), "123.456");
        assert_eq!(Numeric16::DIGITS, 16);

        let v: Numeric32 = "1.5".parse().unwrap();
        assert_eq!((v + v).to_string(), "3");

        // narrow geometry rounds at 16 digits
        let v: Numeric16 = "1.23456789012345678".parse().unwrap();
        assert_eq!(v.to_string(), "1.234567890123457");
    }
}
