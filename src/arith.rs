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

//! Signed arithmetic over the magnitude kernels.
//!
//! Every operation computes an exact wide intermediate and funnels it through
//! `Numeric::from_wide`, which skips leading zeros, rounds half-up at the
//! precision boundary and enforces the exponent range. Sign handling stays in
//! this layer.

use crate::error::NumericError;
use crate::magnitude::{self, LimbBuf};
use crate::numeric::Numeric;
use std::cmp::Ordering;

impl<const N: usize, const D: u32> Numeric<N, D> {
    /// Checked addition. Computes `self + other`, returning an error if the
    /// result exceeds the exponent range.
    pub fn checked_add(&self, other: &Self) -> Result<Self, NumericError> {
        if other.is_zero() {
            return Ok(*self);
        }
        if self.is_zero() {
            return Ok(*other);
        }

        if self.negative == other.negative {
            self.add_magnitude(other, self.negative)
        } else {
            match self.magnitude_cmp(other) {
                Ordering::Equal => Ok(Self::zero()),
                Ordering::Greater => self.sub_magnitude(other, self.negative),
                Ordering::Less => other.sub_magnitude(self, other.negative),
            }
        }
    }

    /// Checked subtraction. Computes `self - other`, returning an error if
    /// the result exceeds the exponent range.
    #[inline]
    pub fn checked_sub(&self, other: &Self) -> Result<Self, NumericError> {
        self.checked_add(&other.neg_value())
    }

    /// Lays out `hi`'s mantissa in a wide buffer with room for a carry limb
    /// in front and `lo`'s shifted mantissa behind, so both operands sit on
    /// the same digit grid. `offset` is where `lo`'s first limb lands.
    ///
    /// The wide buffer's first digit has power `hi.exponent + D`.
    fn align(hi: &Self, lo: &Self) -> Option<(LimbBuf, LimbBuf, usize)> {
        let e = hi.exponent - lo.exponent;
        debug_assert!(e >= 0);
        if e > Self::DIGITS as i32 {
            // too far apart to interact at this precision
            return None;
        }
        let q = (e / D as i32) as usize;
        let r = (e % D as i32) as u32;

        let mut w = LimbBuf::new();
        w.push(0);
        for &limb in hi.limbs.iter() {
            w.push(limb);
        }
        for _ in 0..q + 1 {
            w.push(0);
        }
        let shifted = magnitude::shift_right_digits(&lo.limbs, r, D);
        Some((w, shifted, q + 1))
    }

    fn add_magnitude(&self, other: &Self, negative: bool) -> Result<Self, NumericError> {
        let (hi, lo) = if self.exponent >= other.exponent {
            (self, other)
        } else {
            (other, self)
        };
        let (mut w, shifted, offset) = match Self::align(hi, lo) {
            Some(parts) => parts,
            None => return Ok(hi.with_sign(negative)),
        };
        magnitude::add_at(w.as_mut_slice(), shifted.as_slice(), offset, Self::BASE);
        Self::from_wide(w.as_slice(), hi.exponent + D as i32, negative)
    }

    /// `self` must have the larger magnitude.
    fn sub_magnitude(&self, other: &Self, negative: bool) -> Result<Self, NumericError> {
        debug_assert_eq!(self.magnitude_cmp(other), Ordering::Greater);
        let (mut w, shifted, offset) = match Self::align(self, other) {
            Some(parts) => parts,
            None => return Ok(self.with_sign(negative)),
        };
        magnitude::sub_at(w.as_mut_slice(), shifted.as_slice(), offset, Self::BASE);
        Self::from_wide(w.as_slice(), self.exponent + D as i32, negative)
    }

    #[inline]
    fn with_sign(&self, negative: bool) -> Self {
        let mut v = *self;
        v.negative = negative;
        v
    }

    /// Checked multiplication. Computes `self * other`, returning an error
    /// if the result exceeds the exponent range.
    pub fn checked_mul(&self, other: &Self) -> Result<Self, NumericError> {
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero());
        }
        let negative = self.negative != other.negative;
        let wide = magnitude::mul_columns(&self.limbs, &other.limbs, Self::BASE);
        // leading digits have powers `exponent` each; their product digit
        // sits at `exponent_a + exponent_b` or one above
        Self::from_wide(
            wide.as_slice(),
            self.exponent + other.exponent + 1,
            negative,
        )
    }

    /// Checked division. Computes `self / other`, returning an error on
    /// division by zero or if the result exceeds the exponent range.
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumericError> {
        if other.is_zero() {
            return Err(NumericError::DivideByZero);
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let negative = self.negative != other.negative;
        let quot = Self::long_divide(&self.limbs, &other.limbs);
        let top_power = self.exponent - other.exponent + (N as i32 * D as i32) - 1;
        Self::from_wide(quot.as_slice(), top_power, negative)
    }

    /// Schoolbook long division of the mantissas, producing `2N + 2` quotient
    /// limbs: enough for a full precision result plus a rounding digit
    /// whichever way the leading digits compare.
    ///
    /// Each step appends one dividend limb (then zeros) to the remainder and
    /// finds the largest single-limb `q` with `q * divisor <= remainder`. The
    /// estimate from the leading limbs brackets `q` within a narrow range and
    /// a binary search settles it.
    fn long_divide(num: &[u32; N], den: &[u32; N]) -> LimbBuf {
        let base = Self::BASE as u64;
        let v0 = den[0] as u64;
        debug_assert!(v0 > 0);

        let mut rem = LimbBuf::new();
        for _ in 0..N + 1 {
            rem.push(0);
        }
        let mut quot = LimbBuf::new();

        for step in 0..2 * N + 2 {
            let feed = if step < N { num[step] } else { 0 };

            // rem = rem * BASE + feed; the invariant rem < den keeps the
            // first limb clear before the shift
            let r = rem.as_mut_slice();
            debug_assert_eq!(r[0], 0);
            for i in 0..N {
                r[i] = r[i + 1];
            }
            r[N] = feed;

            let r01 = r[0] as u64 * base + r[1] as u64;
            let mut hi = (r01 / v0).min(base - 1);
            let mut lo = r01 / (v0 + 1);
            while lo < hi {
                let mid = (lo + hi + 1) / 2;
                let prod = magnitude::mul_by_limb(den, mid, Self::BASE);
                if magnitude::cmp_slices(prod.as_slice(), r) != Ordering::Greater {
                    lo = mid;
                } else {
                    hi = mid - 1;
                }
            }

            if lo > 0 {
                let prod = magnitude::mul_by_limb(den, lo, Self::BASE);
                magnitude::sub_at(r, prod.as_slice(), 0, Self::BASE);
            }
            quot.push(lo as u32);
        }
        quot
    }

    /// Checked remainder. Computes `self % other` with the sign of `self`
    /// (truncated division convention, `a - trunc(a / b) * b`).
    ///
    /// Errors on a zero divisor, and with `Overflow` when the quotient's
    /// integer part does not fit the precision, since the remainder is then
    /// unresolvable at this digit count.
    pub fn checked_rem(&self, other: &Self) -> Result<Self, NumericError> {
        if other.is_zero() {
            return Err(NumericError::DivideByZero);
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }

        let quot = self.checked_div(other)?.trunc(0);
        if quot.is_zero() {
            return Ok(*self);
        }
        if quot.exponent() >= Self::DIGITS as i32 {
            return Err(NumericError::Overflow);
        }
        let rem = self.checked_sub(&quot.checked_mul(other)?)?;
        // the rounded quotient can overshoot the true integer part by one,
        // flipping the remainder's sign; step it back
        if !rem.is_zero() && rem.is_sign_negative() != self.is_sign_negative() {
            return rem.checked_add(&other.abs().with_sign(self.negative));
        }
        Ok(rem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Numeric64;

    fn n64(s: &str) -> Numeric64 {
        s.parse().unwrap()
    }

    fn assert_add(x: &str, y: &str, expected: &str) {
        let result = n64(x).checked_add(&n64(y)).unwrap();
        assert_eq!(result.to_string(), expected, "{} + {}", x, y);
        let result = n64(y).checked_add(&n64(x)).unwrap();
        assert_eq!(result.to_string(), expected, "{} + {}", y, x);
    }

    #[test]
    fn test_add() {
        assert_add("0", "0", "0");
        assert_add("1", "0", "1");
        assert_add("1", "1", "2");
        assert_add("1", "-1", "0");
        assert_add("-1", "-1", "-2");
        assert_add("0.1", "0.2", "0.3");
        assert_add("123456789.987654321", "-123456789.987654321", "0");
        assert_add("123456789.987654321", "987654321.123456789", "1111111111.11111111");
        assert_add("1E+10", "1", "10000000001");
        assert_add("1E-10", "1", "1.0000000001");
        assert_add("99999999999999999999999999999999", "1", "100000000000000000000000000000000");
        assert_add("-123", "-0.5", "-123.5");
        assert_add("3.0005", "-3.00002", "0.00048");
    }

    #[test]
    fn test_add_far_apart_keeps_larger() {
        // the small operand is beyond the precision window
        assert_add("1E+100", "1", "1E+100");
        assert_add("1", "1E-100", "1");
        assert_add("-1E+100", "-1", "-1E+100");
    }

    #[test]
    fn test_add_rounds_at_precision() {
        // 65th significant digit rounds half-up
        let a = n64("1000000000000000000000000000000000000000000000000000000000000000");
        assert_eq!(a.exponent(), 63);
        let sum = a.checked_add(&n64("0.5")).unwrap();
        assert_eq!(
            sum,
            n64("1000000000000000000000000000000000000000000000000000000000000001")
        );
        let sum = a.checked_add(&n64("0.4")).unwrap();
        assert_eq!(sum, a);
    }

    fn assert_sub(x: &str, y: &str, expected: &str) {
        let result = n64(x).checked_sub(&n64(y)).unwrap();
        assert_eq!(result.to_string(), expected, "{} - {}", x, y);
    }

    #[test]
    fn test_sub() {
        assert_sub("0", "0", "0");
        assert_sub("1", "1", "0");
        assert_sub("1", "-1", "2");
        assert_sub("-1", "1", "-2");
        assert_sub("0.3", "0.1", "0.2");
        assert_sub("0.1", "0.3", "-0.2");
        assert_sub("100", "99.9999", "0.0001");
        assert_sub("1000000", "0.000001", "999999.999999");
        assert_sub("123456789.987654321", "987654321.123456789", "-864197531.135802468");
        // cancellation of nearly equal values
        assert_sub("1.0000000000000000000000000000001", "1", "1E-31");
    }

    fn assert_mul(x: &str, y: &str, expected: &str) {
        let result = n64(x).checked_mul(&n64(y)).unwrap();
        assert_eq!(result.to_string(), expected, "{} * {}", x, y);
        let result = n64(y).checked_mul(&n64(x)).unwrap();
        assert_eq!(result.to_string(), expected, "{} * {}", y, x);
    }

    #[test]
    fn test_mul() {
        assert_mul("0", "0", "0");
        assert_mul("0", "1", "0");
        assert_mul("1", "1", "1");
        assert_mul("1", "-1", "-1");
        assert_mul("-1", "-1", "1");
        assert_mul("0.5", "2", "1");
        assert_mul("0.1", "0.1", "0.01");
        assert_mul("123456789.987654321", "987654321.123456789", "121932632103337905.662094193112635269");
        assert_mul("1E+30", "1E+30", "1E+60");
        assert_mul("1E-30", "1E-30", "1E-60");
        assert_mul("99999999", "99999999", "9999999800000001");
    }

    #[test]
    fn test_mul_rounds_at_precision() {
        // exact square has 128 digits: 63 nines, an 8, 63 zeros, a 1
        let a = n64("9999999999999999999999999999999999999999999999999999999999999999");
        let sq = a.checked_mul(&a).unwrap();
        assert_eq!(
            sq.to_string(),
            "9.999999999999999999999999999999999999999999999999999999999999998E+127"
        );
        // 65th significant digit of the exact square is 8, rounds up
        let b = n64("0.6666666666666666666666666666666666666666666666666666666666666667");
        let p = b.checked_mul(&b).unwrap();
        assert_eq!(
            p.to_string(),
            "0.4444444444444444444444444444444444444444444444444444444444444445"
        );
    }

    fn assert_div(x: &str, y: &str, expected: &str) {
        let result = n64(x).checked_div(&n64(y)).unwrap();
        assert_eq!(result.to_string(), expected, "{} / {}", x, y);
    }

    #[test]
    fn test_div() {
        assert_div("0", "1", "0");
        assert_div("1", "1", "1");
        assert_div("1", "-1", "-1");
        assert_div("-1", "-1", "1");
        assert_div("1", "2", "0.5");
        assert_div("6", "3", "2");
        assert_div("1", "0.1", "10");
        assert_div("12.5", "0.25", "50");
        assert_div("1E+60", "1E-3", "1E+63");
        assert_div(
            "1",
            "3",
            "0.3333333333333333333333333333333333333333333333333333333333333333",
        );
        assert_div(
            "2",
            "3",
            "0.6666666666666666666666666666666666666666666666666666666666666667",
        );
        assert_div(
            "123456.789012345678",
            "9988776655.4433221100",
            "0.00001235955045056179765144678702196566090151522832918880262820054469",
        );
    }

    #[test]
    fn test_div_round_to_scale() {
        let q = n64("123456.789012345678")
            .checked_div(&n64("9988776655.4433221100"))
            .unwrap();
        assert_eq!(q.round(9).to_string(), "0.00001236");
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(
            n64("1").checked_div(&n64("0")).unwrap_err(),
            NumericError::DivideByZero
        );
        assert_eq!(
            n64("0").checked_div(&n64("0")).unwrap_err(),
            NumericError::DivideByZero
        );
        assert_eq!(
            n64("1").checked_rem(&n64("0")).unwrap_err(),
            NumericError::DivideByZero
        );
    }

    #[test]
    fn test_div_mul_roundtrip() {
        let a = n64("123456789.987654321");
        let b = n64("9876.54321");
        let q = a.checked_div(&b).unwrap();
        let back = q.checked_mul(&b).unwrap();
        let diff = back.checked_sub(&a).unwrap().abs();
        assert!(diff <= n64("1E-55"), "diff {}", diff);
    }

    fn assert_rem(x: &str, y: &str, expected: &str) {
        let result = n64(x).checked_rem(&n64(y)).unwrap();
        assert_eq!(result.to_string(), expected, "{} % {}", x, y);
    }

    #[test]
    fn test_rem() {
        assert_rem("0", "1", "0");
        assert_rem("7", "3", "1");
        assert_rem("-7", "3", "-1");
        assert_rem("7", "-3", "1");
        assert_rem("-7", "-3", "-1");
        assert_rem("-3", "2", "-1");
        assert_rem("3", "-2", "1");
        assert_rem("12.34", "1.233", "0.01");
        assert_rem("6", "3", "0");
        assert_rem("0.5", "7", "0.5");
        assert_rem("10", "0.3", "0.1");
    }

    #[test]
    fn test_rem_keeps_dividend_sign() {
        // the 64-digit quotient of (10^64 - 5) / 7 rounds up past the true
        // integer part; the remainder must still follow the dividend
        let a = n64("9999999999999999999999999999999999999999999999999999999999999995");
        assert_eq!(a.checked_rem(&n64("7")).unwrap().to_string(), "6");
        assert_eq!((-a).checked_rem(&n64("7")).unwrap().to_string(), "-6");
        assert_eq!(a.checked_rem(&n64("-7")).unwrap().to_string(), "6");
    }

    #[test]
    fn test_rem_huge_quotient_overflows() {
        assert_eq!(
            n64("1E+100").checked_rem(&n64("3")).unwrap_err(),
            NumericError::Overflow
        );
    }

    #[test]
    fn test_exponent_range() {
        let huge = n64("9.9E+65535");
        assert_eq!(
            huge.checked_mul(&huge).unwrap_err(),
            NumericError::Overflow
        );
        assert_eq!(
            huge.checked_add(&huge).unwrap_err(),
            NumericError::Overflow
        );

        // underflow flushes to zero instead of erroring
        let tiny = n64("1E-65536");
        assert_eq!(tiny.checked_mul(&tiny).unwrap(), Numeric64::zero());
        assert_eq!(n64("1E-65000").checked_div(&n64("1E+65000")).unwrap(), Numeric64::zero());
    }

    #[test]
    fn test_algebraic_laws() {
        let a = n64("123.456");
        let b = n64("-78.9");
        let c = n64("0.00012345");

        // commutativity
        assert_eq!(a + b, b + a);
        assert_eq!(a * c, c * a);
        // associativity on exactly representable values
        assert_eq!((a + b) + c, a + (b + c));
        // distributivity on exactly representable values
        assert_eq!(a * (b + c), a * b + a * c);
        // identity
        assert_eq!(a + Numeric64::zero(), a);
        assert_eq!(a * Numeric64::one(), a);
        assert_eq!(a - a, Numeric64::zero());
    }
}
