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

//! Transcendental functions.
//!
//! Every function reduces its argument into a small interval with exact
//! identities, runs a Taylor series or Newton iteration there, and undoes the
//! reduction. Series stop when the next term drops below [`Numeric::epsilon`]
//! and iterations stop when successive iterates agree to within a few units
//! in the last place; both carry an iteration bound that turns a stall into
//! [`NumericError::Convergence`].

use crate::error::NumericError;
use crate::magnitude::LimbBuf;
use crate::numeric::Numeric;
use std::convert::TryFrom;

const MAX_ITERATIONS: usize = 500;

// 280 digits each, enough for the widest supported geometry plus a rounding
// digit.
const PI_DIGITS: &str = "3141592653589793238462643383279502884197169399375105820974944592307816406286208998628034825342117067982148086513282306647093844609550582231725359408128481117450284102701938521105559644622948954930381964428810975665933446128475648233786783165271201909145648566923460348610454326648";
const LN10_DIGITS: &str = "2302585092994045684017991454684364207601101488628772976033327900967572609677352480235997205089598298341967784042286248633409525465082806756666287369098781689482907208325554680843799894826233198528393505308965377732628846163366222287698219886746543667474404243274365155048934314939";
const LN2_DIGITS: &str = "6931471805599453094172321214581765680755001343602552541206800094933936219696947156058633269964186875420014810205706857336855202357581305570326707516350759619307275708283714351903070386238916734711233501153644979552391204751726815749320651555247341395258829504530070953263666426541";

/// Two values agreeing to within ten units in the last place.
fn approx_eq<const N: usize, const D: u32>(a: &Numeric<N, D>, b: &Numeric<N, D>) -> bool {
    if a == b {
        return true;
    }
    let diff = match a.checked_sub(b) {
        Ok(d) => d.abs(),
        Err(_) => return false,
    };
    diff <= Numeric::power_of_ten(a.exponent() - Numeric::<N, D>::DIGITS as i32 + 2)
}

impl<const N: usize, const D: u32> Numeric<N, D> {
    /// The circle constant π at this precision.
    pub fn pi() -> Self {
        Self::from_constant(PI_DIGITS, 0)
    }

    /// The natural logarithm of 10 at this precision.
    pub fn ln_10() -> Self {
        Self::from_constant(LN10_DIGITS, 0)
    }

    /// The natural logarithm of 2 at this precision.
    pub fn ln_2() -> Self {
        Self::from_constant(LN2_DIGITS, -1)
    }

    /// Materializes a constant from its digit string. `top_power` is the
    /// power of the first digit.
    fn from_constant(digits: &str, top_power: i32) -> Self {
        let bytes = digits.as_bytes();
        let take = bytes.len().min(Self::DIGITS as usize + 1);
        let mut buf = LimbBuf::new();
        let mut limb = 0u32;
        let mut count = 0u32;
        for &b in &bytes[..take] {
            limb = limb * 10 + (b - b'0') as u32;
            count += 1;
            if count == D {
                buf.push(limb);
                limb = 0;
                count = 0;
            }
        }
        if count > 0 {
            while count < D {
                limb *= 10;
                count += 1;
            }
            buf.push(limb);
        }
        match Self::from_wide(buf.as_slice(), top_power, false) {
            Ok(v) => v,
            Err(_) => unreachable!(),
        }
    }

    #[inline]
    fn half() -> Self {
        Self::small(5, -1, false)
    }

    /// Square root by Newton iteration on the reciprocal square root, which
    /// avoids a full division per step: `u <- u * (3 - v * u^2) / 2`
    /// converges to `1 / sqrt(v)`, then `sqrt(v) = v * u`.
    ///
    /// The exponent splits off as `10^(2j)` first so the iteration always
    /// runs on a mantissa in `[1, 100)`.
    pub fn sqrt(&self) -> Result<Self, NumericError> {
        if self.is_sign_negative() {
            return Err(NumericError::Domain);
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        if *self == Self::one() {
            return Ok(Self::one());
        }

        let r = self.exponent().rem_euclid(2);
        let j = (self.exponent() - r) / 2;
        let mut v = *self;
        v.exponent = r;

        let seed = 1.0 / f64::from(&v).sqrt();
        let mut u = match Self::from_f64(seed) {
            Some(u) => u,
            None => return Err(NumericError::Convergence),
        };
        let three = Self::small(3, 0, false);
        let half = Self::half();
        let mut last = u;
        for _ in 0..MAX_ITERATIONS {
            let uu = u.checked_mul(&u)?;
            let t = three.checked_sub(&v.checked_mul(&uu)?)?;
            u = u.checked_mul(&t)?.checked_mul(&half)?;
            if approx_eq(&u, &last) {
                let mut s = v.checked_mul(&u)?;
                s.exponent += j;
                return Ok(s);
            }
            last = u;
        }
        Err(NumericError::Convergence)
    }

    /// Natural logarithm. The argument must be positive.
    ///
    /// The power of ten splits off against `ln 10`, square roots pull the
    /// mantissa close to 1, and `ln x = 2 atanh((x - 1) / (x + 1))` finishes
    /// with a fast-converging odd series.
    pub fn ln(&self) -> Result<Self, NumericError> {
        if self.is_sign_negative() || self.is_zero() {
            return Err(NumericError::Domain);
        }
        if *self == Self::one() {
            return Ok(Self::zero());
        }

        let power = self.exponent();
        let mut x = *self;
        x.exponent = 0;

        let bound = Self::from(12u32).checked_div(&Self::from(10u32))?;
        let mut roots = 0u32;
        while x >= bound {
            x = x.sqrt()?;
            roots += 1;
            if roots > 32 {
                return Err(NumericError::Convergence);
            }
        }

        let one = Self::one();
        let z = x.checked_sub(&one)?.checked_div(&x.checked_add(&one)?)?;
        let zz = z.checked_mul(&z)?;
        let eps = Self::epsilon();
        let mut term = z;
        let mut sum = z;
        let mut i = 1u32;
        for _ in 0..MAX_ITERATIONS {
            i += 2;
            term = term.checked_mul(&zz)?;
            let t = term.checked_div(&Self::from(i))?;
            if t.abs() < eps {
                let reduced = sum.checked_mul(&Self::from(1u64 << (roots + 1)))?;
                if power == 0 {
                    return Ok(reduced);
                }
                return reduced.checked_add(&Self::ln_10().checked_mul(&Self::from(power))?);
            }
            sum = sum.checked_add(&t)?;
        }
        Err(NumericError::Convergence)
    }

    /// Base-ten logarithm. The argument must be positive. Exact powers of
    /// ten short-circuit to their exponent.
    pub fn log10(&self) -> Result<Self, NumericError> {
        if self.is_sign_negative() || self.is_zero() {
            return Err(NumericError::Domain);
        }
        if self.precision() == 1 && self.digit(0) == 1 {
            return Ok(Self::from(self.exponent()));
        }
        self.ln()?.checked_div(&Self::ln_10())
    }

    /// The exponential function. Overflows past the exponent ceiling;
    /// arguments far below it flush to zero.
    ///
    /// Repeated halving brings the argument under 1/2 for the Taylor series,
    /// then the result squares back up.
    pub fn exp(&self) -> Result<Self, NumericError> {
        if self.is_zero() {
            return Ok(Self::one());
        }

        // e^150903 is already past 10^65536
        if self.abs() > Self::from(150903u32) {
            return if self.is_sign_negative() {
                Ok(Self::zero())
            } else {
                Err(NumericError::Overflow)
            };
        }

        let half = Self::half();
        let mut x = self.abs();
        let mut squarings = 0u32;
        while x > half {
            x = x.checked_mul(&half)?;
            squarings += 1;
        }

        let eps = Self::epsilon();
        let mut term = x;
        let mut sum = Self::one().checked_add(&x)?;
        let mut i = 1u32;
        for _ in 0..MAX_ITERATIONS {
            i += 1;
            term = term.checked_mul(&x)?.checked_div(&Self::from(i))?;
            if term < eps {
                let mut r = sum;
                for _ in 0..squarings {
                    r = r.checked_mul(&r)?;
                }
                return if self.is_sign_negative() {
                    Self::one().checked_div(&r)
                } else {
                    Ok(r)
                };
            }
            sum = sum.checked_add(&term)?;
        }
        Err(NumericError::Convergence)
    }

    /// Checked exponentiation. Computes `self.pow(exponent)`.
    ///
    /// Whole-number exponents that fit a machine word go through binary
    /// squaring, which also handles negative bases; anything else is
    /// `exp(exponent * ln self)` and requires a positive base.
    pub fn checked_pow(&self, exponent: &Self) -> Result<Self, NumericError> {
        if exponent.is_zero() {
            return Ok(Self::one());
        }
        if self.is_zero() {
            return if exponent.is_sign_negative() {
                Err(NumericError::DivideByZero)
            } else {
                Ok(Self::zero())
            };
        }
        if *self == Self::one() {
            return Ok(Self::one());
        }

        if exponent.fract().is_zero() {
            if let Ok(e) = i64::try_from(exponent) {
                return self.pow_integer(e);
            }
        }

        if self.is_sign_negative() {
            return Err(NumericError::Domain);
        }
        exponent.checked_mul(&self.ln()?)?.exp()
    }

    fn pow_integer(&self, exp: i64) -> Result<Self, NumericError> {
        let negative = self.is_sign_negative() && exp % 2 != 0;
        let mut base = if exp < 0 {
            // inverting first lets huge negative powers flush to zero
            // instead of overflowing on the way up
            Self::one().checked_div(&self.abs())?
        } else {
            self.abs()
        };
        let mut e = exp.unsigned_abs();
        let mut acc = Self::one();
        loop {
            if e & 1 == 1 {
                acc = acc.checked_mul(&base)?;
            }
            e >>= 1;
            if e == 0 {
                break;
            }
            base = base.checked_mul(&base)?;
        }
        Ok(if negative { acc.neg_value() } else { acc })
    }

    /// `|self| mod 2π`, in `[0, 2π)`.
    fn circle_reduce(&self) -> Result<Self, NumericError> {
        let two_pi = Self::pi().checked_mul(&Self::two())?;
        let a = self.abs();
        if a < two_pi {
            return Ok(a);
        }
        a.checked_rem(&two_pi)
    }

    /// Sine, argument in radians.
    pub fn sin(&self) -> Result<Self, NumericError> {
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let pi = Self::pi();
        let half_pi = pi.checked_mul(&Self::half())?;
        let mut y = self.circle_reduce()?;
        let mut negate = self.is_sign_negative();
        if y >= pi {
            y = y.checked_sub(&pi)?;
            negate = !negate;
        }
        if y > half_pi {
            y = pi.checked_sub(&y)?;
        }
        let s = Self::sin_series(&y)?;
        Ok(if negate { s.neg_value() } else { s })
    }

    /// Taylor series for `sin`, argument in `[0, π/2]`.
    fn sin_series(y: &Self) -> Result<Self, NumericError> {
        if y.is_zero() {
            return Ok(Self::zero());
        }
        let yy = y.checked_mul(y)?;
        let eps = Self::epsilon();
        let mut term = *y;
        let mut sum = *y;
        let mut i = 0u32;
        for _ in 0..MAX_ITERATIONS {
            i += 1;
            let div = Self::from(2 * i * (2 * i + 1));
            term = term.checked_mul(&yy)?.checked_div(&div)?.neg_value();
            if term.abs() < eps {
                return Ok(sum);
            }
            sum = sum.checked_add(&term)?;
        }
        Err(NumericError::Convergence)
    }

    /// Cosine, argument in radians.
    ///
    /// Reduction folds the angle into `[0, π]`, trisects it under 1/2 for the
    /// series, and unwinds with `cos 3t = 4 cos³t - 3 cos t`.
    pub fn cos(&self) -> Result<Self, NumericError> {
        if self.is_zero() {
            return Ok(Self::one());
        }
        let pi = Self::pi();
        let mut y = self.circle_reduce()?;
        if y > pi {
            y = pi.checked_mul(&Self::two())?.checked_sub(&y)?;
        }

        let three = Self::small(3, 0, false);
        let half = Self::half();
        let mut trisections = 0u32;
        while y > half {
            y = y.checked_div(&three)?;
            trisections += 1;
        }

        let mut c = Self::cos_series(&y)?;
        let four = Self::small(4, 0, false);
        for _ in 0..trisections {
            let cc = c.checked_mul(&c)?;
            c = c.checked_mul(&four.checked_mul(&cc)?.checked_sub(&three)?)?;
        }
        Ok(c)
    }

    /// Taylor series for `cos`, argument in `[0, 1/2]`.
    fn cos_series(y: &Self) -> Result<Self, NumericError> {
        let yy = y.checked_mul(y)?;
        let eps = Self::epsilon();
        let mut term = Self::one();
        let mut sum = Self::one();
        let mut i = 0u32;
        for _ in 0..MAX_ITERATIONS {
            i += 1;
            let div = Self::from((2 * i - 1) * (2 * i));
            term = term.checked_mul(&yy)?.checked_div(&div)?.neg_value();
            if term.abs() < eps {
                return Ok(sum);
            }
            sum = sum.checked_add(&term)?;
        }
        Err(NumericError::Convergence)
    }

    /// Tangent, argument in radians. Errors with `Domain` at the poles.
    pub fn tan(&self) -> Result<Self, NumericError> {
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let s = self.sin()?;
        let c = self.cos()?;
        if c.is_zero() {
            return Err(NumericError::Domain);
        }
        s.checked_div(&c)
    }

    /// Inverse sine, result in `[-π/2, π/2]`. The argument must lie in
    /// `[-1, 1]`.
    ///
    /// The half-angle identity pulls the argument under 1/2, then Newton
    /// solves `sin y = a` from an `f64` seed, and the angle doubles back.
    pub fn asin(&self) -> Result<Self, NumericError> {
        let one = Self::one();
        let mut a = self.abs();
        if a > one {
            return Err(NumericError::Domain);
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let half_pi = Self::pi().checked_mul(&Self::half())?;
        if a == one {
            return Ok(if self.is_sign_negative() {
                half_pi.neg_value()
            } else {
                half_pi
            });
        }

        let sqrt2 = Self::two().sqrt()?;
        let half = Self::half();
        let mut doublings = 0u32;
        while a > half {
            // asin a = 2 asin(a / (sqrt 2 * sqrt(1 + sqrt(1 - a^2))))
            let s = one.checked_sub(&a.checked_mul(&a)?)?.sqrt()?;
            let denom = sqrt2.checked_mul(&one.checked_add(&s)?.sqrt()?)?;
            a = a.checked_div(&denom)?;
            doublings += 1;
            if doublings > 8 {
                return Err(NumericError::Convergence);
            }
        }

        let seed = f64::from(&a).asin();
        let mut y = match Self::from_f64(seed) {
            Some(y) => y,
            None => return Err(NumericError::Convergence),
        };
        let mut last = y;
        for _ in 0..MAX_ITERATIONS {
            let s = Self::sin_series(&y)?;
            let c = Self::cos_series(&y)?;
            y = y.checked_sub(&s.checked_sub(&a)?.checked_div(&c)?)?;
            if approx_eq(&y, &last) {
                let r = y.checked_mul(&Self::from(1u64 << doublings))?;
                return Ok(if self.is_sign_negative() { r.neg_value() } else { r });
            }
            last = y;
        }
        Err(NumericError::Convergence)
    }

    /// Inverse cosine, result in `[0, π]`. The argument must lie in
    /// `[-1, 1]`.
    pub fn acos(&self) -> Result<Self, NumericError> {
        let half_pi = Self::pi().checked_mul(&Self::half())?;
        half_pi.checked_sub(&self.asin()?)
    }

    /// Inverse tangent, result in `(-π/2, π/2)`.
    pub fn atan(&self) -> Result<Self, NumericError> {
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let one = Self::one();
        let a = self.abs();
        let r = if a > one {
            // atan a = π/2 - atan(1/a)
            let half_pi = Self::pi().checked_mul(&Self::half())?;
            half_pi.checked_sub(&Self::atan_reduced(&one.checked_div(&a)?)?)?
        } else {
            Self::atan_reduced(&a)?
        };
        Ok(if self.is_sign_negative() { r.neg_value() } else { r })
    }

    /// Alternating odd series for `atan`, argument in `[0, 1]`. One
    /// half-angle step (`a -> a / (1 + sqrt(1 + a^2))`) caps the series
    /// argument at `tan(π/8)`.
    fn atan_reduced(a: &Self) -> Result<Self, NumericError> {
        if a.is_zero() {
            return Ok(Self::zero());
        }
        let one = Self::one();
        let half = Self::half();
        let mut a = *a;
        let mut angle_factor = 1u64;
        while a > half {
            let s = one.checked_add(&a.checked_mul(&a)?)?.sqrt()?;
            a = a.checked_div(&one.checked_add(&s)?)?;
            angle_factor *= 2;
        }

        let aa = a.checked_mul(&a)?;
        let eps = Self::epsilon();
        let mut power = a;
        let mut sum = a;
        let mut i = 1u32;
        for _ in 0..MAX_ITERATIONS {
            i += 2;
            power = power.checked_mul(&aa)?.neg_value();
            let term = power.checked_div(&Self::from(i))?;
            if term.abs() < eps {
                return sum.checked_mul(&Self::from(angle_factor));
            }
            sum = sum.checked_add(&term)?;
        }
        Err(NumericError::Convergence)
    }

    /// Four-quadrant inverse tangent of `self / other` (`self` is the
    /// ordinate, `other` the abscissa). `atan2(0, 0)` is 0.
    pub fn atan2(&self, other: &Self) -> Result<Self, NumericError> {
        let pi = Self::pi();
        if other.is_zero() {
            if self.is_zero() {
                return Ok(Self::zero());
            }
            let half_pi = pi.checked_mul(&Self::half())?;
            return Ok(if self.is_sign_negative() {
                half_pi.neg_value()
            } else {
                half_pi
            });
        }
        if self.is_zero() {
            return Ok(if other.is_sign_negative() {
                pi
            } else {
                Self::zero()
            });
        }

        let base = self.checked_div(other)?.atan()?;
        if other.is_sign_negative() {
            if self.is_sign_negative() {
                base.checked_sub(&pi)
            } else {
                base.checked_add(&pi)
            }
        } else {
            Ok(base)
        }
    }
}
