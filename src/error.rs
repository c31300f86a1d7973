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

//! Numeric error definitions.

use thiserror::Error;

/// An error which can be returned when parsing a numeric.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericParseError {
    /// Empty string.
    #[error("cannot parse number from empty string")]
    Empty,
    /// Invalid numeric.
    #[error("invalid number")]
    Invalid,
    /// Numeric is overflowed.
    #[error("value overflows numeric format")]
    Overflow,
    /// Numeric is underflowed.
    #[error("value underflows numeric format")]
    Underflow,
}

/// An error which can be returned when a conversion between another type and
/// numeric fails.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum NumericConvertError {
    /// Invalid input.
    #[error("invalid number")]
    Invalid,
    /// Value does not fit the target representation.
    #[error("numeric overflow")]
    Overflow,
}

/// An error which can be returned by arithmetic operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum NumericError {
    /// Division by zero.
    #[error("division by zero")]
    DivideByZero,
    /// The result exceeds the representable exponent range.
    #[error("numeric overflow")]
    Overflow,
    /// The argument lies outside the function's domain.
    #[error("argument out of domain")]
    Domain,
    /// An iterative algorithm failed to converge within its iteration bound.
    #[error("iteration failed to converge")]
    Convergence,
}

impl From<NumericParseError> for NumericConvertError {
    #[inline]
    fn from(e: NumericParseError) -> Self {
        match e {
            NumericParseError::Empty | NumericParseError::Invalid => NumericConvertError::Invalid,
            NumericParseError::Overflow | NumericParseError::Underflow => NumericConvertError::Overflow,
        }
    }
}

impl From<NumericError> for NumericConvertError {
    #[inline]
    fn from(_: NumericError) -> Self {
        NumericConvertError::Overflow
    }
}
