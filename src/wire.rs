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

//! ODBC `SQL_NUMERIC_STRUCT` interchange.

use crate::error::NumericConvertError;
use crate::numeric::Numeric;
use ethnum::U256;

/// The ODBC numeric wire struct: a scaled integer magnitude in 16
/// little-endian bytes. `sign` is 1 for non-negative values and 0 for
/// negative ones; the represented value is `magnitude * 10^-scale`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SqlNumeric {
    pub sign: u8,
    pub precision: u8,
    pub scale: u8,
    pub val: [u8; 16],
}

impl<const N: usize, const D: u32> Numeric<N, D> {
    /// Converts to the wire struct at the requested scale, rounding half-up.
    /// Errors with `Overflow` when the scaled magnitude does not fit 16
    /// bytes.
    pub fn to_sql_numeric(&self, scale: u8) -> Result<SqlNumeric, NumericConvertError> {
        let rounded = self.round(scale as i32);
        if rounded.is_zero() {
            return Ok(SqlNumeric {
                sign: 1,
                precision: 1,
                scale,
                val: [0; 16],
            });
        }

        // digit count of the scaled integer; anything past 39 digits cannot
        // fit 16 bytes
        let ndigits = rounded.exponent() as i64 + 1 + scale as i64;
        debug_assert!(ndigits > 0);
        if ndigits > 39 {
            return Err(NumericConvertError::Overflow);
        }

        // a 256-bit accumulator makes 39-digit magnitudes past `u128::MAX`
        // detectable instead of wrapping
        let mut acc = U256::ZERO;
        let ten = U256::new(10);
        for i in 0..ndigits as usize {
            acc = acc * ten + U256::new(rounded.digit(i) as u128);
        }
        if acc > U256::from(u128::MAX) {
            return Err(NumericConvertError::Overflow);
        }

        Ok(SqlNumeric {
            sign: if rounded.is_sign_negative() { 0 } else { 1 },
            precision: ndigits.min(255) as u8,
            scale,
            val: acc.as_u128().to_le_bytes(),
        })
    }

    /// Converts from the wire struct. Only the sign byte can be invalid; any
    /// magnitude and scale combination maps to a value (rounded if it
    /// carries more digits than this geometry holds).
    pub fn from_sql_numeric(num: &SqlNumeric) -> Result<Self, NumericConvertError> {
        let negative = match num.sign {
            1 => false,
            0 => true,
            _ => return Err(NumericConvertError::Invalid),
        };
        let mag = u128::from_le_bytes(num.val);
        if mag == 0 {
            return Ok(Self::zero());
        }
        Ok(Self::from_u128_parts(mag, negative, -(num.scale as i32)))
    }
}
