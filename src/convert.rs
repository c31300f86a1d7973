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

//! Conversion between `Numeric` and primitive types.

use crate::buf::Buf;
use crate::error::NumericConvertError;
use crate::magnitude::LimbBuf;
use crate::numeric::Numeric;
use std::convert::TryFrom;
use std::io::Write;

impl<const N: usize, const D: u32> Numeric<N, D> {
    /// Builds a value from a decimal magnitude. `lsd_power` is the power of
    /// the magnitude's least significant digit.
    pub(crate) fn from_u128_parts(mag: u128, negative: bool, lsd_power: i32) -> Self {
        if mag == 0 {
            return Self::zero();
        }
        let base = Self::BASE as u128;
        let mut rev = LimbBuf::new();
        let mut m = mag;
        while m > 0 {
            rev.push((m % base) as u32);
            m /= base;
        }
        let mut wide = LimbBuf::new();
        for i in (0..rev.len()).rev() {
            wide.push(rev.as_slice()[i]);
        }
        let top_power = lsd_power + wide.len() as i32 * D as i32 - 1;
        match Self::from_wide(wide.as_slice(), top_power, negative) {
            Ok(v) => v,
            Err(_) => unreachable!(),
        }
    }

    /// Builds a value from an integer part and a fractional part given as
    /// decimal digits, e.g. `(12, 345)` is `12.345` and `(-1, 5)` is `-1.5`.
    pub fn from_int_and_frac(int: i64, frac: u64) -> Self {
        let negative = int < 0;
        let whole = Self::from_u128_parts(int.unsigned_abs() as u128, negative, 0);
        if frac == 0 {
            return whole;
        }
        let mut digits = 0i32;
        let mut f = frac;
        while f > 0 {
            f /= 10;
            digits += 1;
        }
        let part = Self::from_u128_parts(frac as u128, negative, -digits);
        match whole.checked_add(&part) {
            Ok(v) => v,
            Err(_) => unreachable!(),
        }
    }

    #[inline]
    pub(crate) fn from_f64(value: f64) -> Option<Self> {
        Self::try_from(value).ok()
    }
}

macro_rules! impl_from_uint {
    ($ty: ty) => {
        impl<const N: usize, const D: u32> From<$ty> for Numeric<N, D> {
            #[inline]
            fn from(val: $ty) -> Self {
                Self::from_u128_parts(val as u128, false, 0)
            }
        }
    };
}

impl_from_uint!(u8);
impl_from_uint!(u16);
impl_from_uint!(u32);
impl_from_uint!(u64);
impl_from_uint!(u128);
impl_from_uint!(usize);

macro_rules! impl_from_int {
    ($ty: ty) => {
        impl<const N: usize, const D: u32> From<$ty> for Numeric<N, D> {
            #[inline]
            fn from(val: $ty) -> Self {
                Self::from_u128_parts(val.unsigned_abs() as u128, val < 0, 0)
            }
        }
    };
}

impl_from_int!(i8);
impl_from_int!(i16);
impl_from_int!(i32);
impl_from_int!(i64);
impl_from_int!(i128);
impl_from_int!(isize);

/// Rounds to an integer and accumulates its digits, erring when they do not
/// fit a `u128`.
fn integer_magnitude<const N: usize, const D: u32>(
    value: &Numeric<N, D>,
) -> Result<(u128, bool), NumericConvertError> {
    let rounded = value.round(0);
    if rounded.is_zero() {
        return Ok((0, false));
    }
    let e = rounded.exponent();
    if e >= 39 {
        return Err(NumericConvertError::Overflow);
    }
    let mut mag: u128 = 0;
    for i in 0..=e as usize {
        mag = mag
            .checked_mul(10)
            .and_then(|m| m.checked_add(rounded.digit(i) as u128))
            .ok_or(NumericConvertError::Overflow)?;
    }
    Ok((mag, rounded.is_sign_negative()))
}

macro_rules! impl_try_into_uint {
    ($ty: ty) => {
        impl<const N: usize, const D: u32> TryFrom<&Numeric<N, D>> for $ty {
            type Error = NumericConvertError;

            #[inline]
            fn try_from(value: &Numeric<N, D>) -> Result<Self, Self::Error> {
                let (mag, negative) = integer_magnitude(value)?;
                if negative {
                    return Err(NumericConvertError::Overflow);
                }
                <$ty>::try_from(mag).map_err(|_| NumericConvertError::Overflow)
            }
        }

        impl<const N: usize, const D: u32> TryFrom<Numeric<N, D>> for $ty {
            type Error = NumericConvertError;

            #[inline]
            fn try_from(value: Numeric<N, D>) -> Result<Self, Self::Error> {
                <$ty>::try_from(&value)
            }
        }
    };
}

impl_try_into_uint!(u8);
impl_try_into_uint!(u16);
impl_try_into_uint!(u32);
impl_try_into_uint!(u64);
impl_try_into_uint!(u128);
impl_try_into_uint!(usize);

macro_rules! impl_try_into_int {
    ($ty: ty) => {
        impl<const N: usize, const D: u32> TryFrom<&Numeric<N, D>> for $ty {
            type Error = NumericConvertError;

            fn try_from(value: &Numeric<N, D>) -> Result<Self, Self::Error> {
                let (mag, negative) = integer_magnitude(value)?;
                if negative {
                    let min_mag = <$ty>::MAX as u128 + 1;
                    if mag > min_mag {
                        return Err(NumericConvertError::Overflow);
                    }
                    if mag == min_mag {
                        return Ok(<$ty>::MIN);
                    }
                    Ok(-(mag as $ty))
                } else {
                    <$ty>::try_from(mag).map_err(|_| NumericConvertError::Overflow)
                }
            }
        }

        impl<const N: usize, const D: u32> TryFrom<Numeric<N, D>> for $ty {
            type Error = NumericConvertError;

            #[inline]
            fn try_from(value: Numeric<N, D>) -> Result<Self, Self::Error> {
                <$ty>::try_from(&value)
            }
        }
    };
}

impl_try_into_int!(i8);
impl_try_into_int!(i16);
impl_try_into_int!(i32);
impl_try_into_int!(i64);
impl_try_into_int!(i128);
impl_try_into_int!(isize);

impl<const N: usize, const D: u32> From<&Numeric<N, D>> for f64 {
    /// Lossy conversion through the first 19 significant digits.
    fn from(val: &Numeric<N, D>) -> f64 {
        if val.is_zero() {
            return 0.0;
        }
        let mut buf = Buf::new();
        if val.is_sign_negative() {
            buf.write_u8(b'-');
        }
        buf.write_u8(b'0' + val.digit(0) as u8);
        buf.write_u8(b'.');
        for i in 1..(Numeric::<N, D>::DIGITS as usize).min(19) {
            buf.write_u8(b'0' + val.digit(i) as u8);
        }
        let _ = write!(&mut buf, "e{}", val.exponent());
        fast_float::parse(buf.as_slice()).unwrap_or(f64::NAN)
    }
}

impl<const N: usize, const D: u32> From<Numeric<N, D>> for f64 {
    #[inline]
    fn from(val: Numeric<N, D>) -> f64 {
        f64::from(&val)
    }
}

impl<const N: usize, const D: u32> From<&Numeric<N, D>> for f32 {
    #[inline]
    fn from(val: &Numeric<N, D>) -> f32 {
        f64::from(val) as f32
    }
}

impl<const N: usize, const D: u32> From<Numeric<N, D>> for f32 {
    #[inline]
    fn from(val: Numeric<N, D>) -> f32 {
        f64::from(&val) as f32
    }
}

impl<const N: usize, const D: u32> TryFrom<f64> for Numeric<N, D> {
    type Error = NumericConvertError;

    /// Converts through the shortest decimal rendering that round-trips the
    /// float, so `0.1f64` becomes exactly `0.1`.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_nan() {
            return Err(NumericConvertError::Invalid);
        }
        if value.is_infinite() {
            return Err(NumericConvertError::Overflow);
        }
        let s = format!("{:e}", value);
        Ok(s.parse::<Self>()?)
    }
}

impl<const N: usize, const D: u32> TryFrom<f32> for Numeric<N, D> {
    type Error = NumericConvertError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        if value.is_nan() {
            return Err(NumericConvertError::Invalid);
        }
        if value.is_infinite() {
            return Err(NumericConvertError::Overflow);
        }
        let s = format!("{:e}", value);
        Ok(s.parse::<Self>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Numeric16, Numeric64};

    fn n64(s: &str) -> Numeric64 {
        s.parse().unwrap()
    }

    #[test]
    fn test_from_ints() {
        assert_eq!(Numeric64::from(0u8), Numeric64::zero());
        assert_eq!(Numeric64::from(255u8).to_string(), "255");
        assert_eq!(Numeric64::from(-128i8).to_string(), "-128");
        assert_eq!(Numeric64::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Numeric64::from(i64::MIN).to_string(), "-9223372036854775808");
        assert_eq!(
            Numeric64::from(u128::MAX).to_string(),
            "340282366920938463463374607431768211455"
        );
        assert_eq!(Numeric64::from(-1isize).to_string(), "-1");
    }

    #[test]
    fn test_from_int_rounds_in_narrow_geometry() {
        // 39 digits into 16 digits of precision
        let v = Numeric16::from(u128::MAX);
        assert_eq!(v.to_string(), "340282366920938500000000000000000000000");
        assert_eq!(v.precision(), 16);
    }

    #[test]
    fn test_try_into_ints() {
        assert_eq!(u32::try_from(n64("0")).unwrap(), 0);
        assert_eq!(u32::try_from(n64("123")).unwrap(), 123);
        assert_eq!(u32::try_from(n64("123.4")).unwrap(), 123);
        assert_eq!(u32::try_from(n64("123.5")).unwrap(), 124);
        assert_eq!(i32::try_from(n64("-123.5")).unwrap(), -124);
        assert_eq!(i64::try_from(n64("-9223372036854775808")).unwrap(), i64::MIN);
        assert_eq!(u64::try_from(n64("18446744073709551615")).unwrap(), u64::MAX);

        assert_eq!(
            u8::try_from(n64("256")).unwrap_err(),
            NumericConvertError::Overflow
        );
        assert_eq!(
            u32::try_from(n64("-1")).unwrap_err(),
            NumericConvertError::Overflow
        );
        assert_eq!(
            i64::try_from(n64("9223372036854775808")).unwrap_err(),
            NumericConvertError::Overflow
        );
        assert_eq!(
            u64::try_from(n64("1E+39")).unwrap_err(),
            NumericConvertError::Overflow
        );
    }

    #[test]
    fn test_try_from_f64() {
        assert_eq!(Numeric64::try_from(0.0f64).unwrap(), Numeric64::zero());
        assert_eq!(Numeric64::try_from(0.1f64).unwrap(), n64("0.1"));
        assert_eq!(Numeric64::try_from(-2.5f64).unwrap(), n64("-2.5"));
        assert_eq!(Numeric64::try_from(1e300f64).unwrap(), n64("1E+300"));
        assert_eq!(
            Numeric64::try_from(f64::NAN).unwrap_err(),
            NumericConvertError::Invalid
        );
        assert_eq!(
            Numeric64::try_from(f64::INFINITY).unwrap_err(),
            NumericConvertError::Overflow
        );
    }

    #[test]
    fn test_try_from_f32() {
        assert_eq!(Numeric64::try_from(0.25f32).unwrap(), n64("0.25"));
        assert_eq!(Numeric64::try_from(-1.5f32).unwrap(), n64("-1.5"));
        assert_eq!(
            Numeric64::try_from(f32::NAN).unwrap_err(),
            NumericConvertError::Invalid
        );
    }

    #[test]
    fn test_into_f64() {
        assert_eq!(f64::from(n64("0")), 0.0);
        assert_eq!(f64::from(n64("0.5")), 0.5);
        assert_eq!(f64::from(n64("-123.456")), -123.456);
        assert_eq!(f64::from(n64("1E+300")), 1e300);
        assert_eq!(f64::from(n64("1E-300")), 1e-300);
        assert_eq!(f32::from(n64("2.5")), 2.5f32);
        // far past f64 range
        assert_eq!(f64::from(n64("1E+65535")), f64::INFINITY);
    }

    #[test]
    fn test_f64_roundtrip() {
        for v in [0.1f64, 1.0, -2.5, 12345.6789, 1e-10, 9.87e250] {
            let d = Numeric64::try_from(v).unwrap();
            assert_eq!(f64::from(d), v, "{}", v);
        }
    }

    #[test]
    fn test_from_int_and_frac() {
        assert_eq!(Numeric64::from_int_and_frac(0, 0), Numeric64::zero());
        assert_eq!(Numeric64::from_int_and_frac(12, 345).to_string(), "12.345");
        assert_eq!(Numeric64::from_int_and_frac(-1, 5).to_string(), "-1.5");
        assert_eq!(Numeric64::from_int_and_frac(7, 0).to_string(), "7");
        assert_eq!(Numeric64::from_int_and_frac(0, 25).to_string(), "0.25");
    }
}
