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

//! Exact decimal arithmetic with a fixed number of significant digits.
//!
//! [`Numeric<N, D>`] stores a sign, a decimal exponent in
//! `[-65536, 65535]` and a mantissa of `N` limbs of `D` decimal digits
//! each, always normalized so the leading digit is non-zero. Arithmetic is
//! computed exactly in wide scratch buffers and rounded half-up at the
//! precision boundary, so results are decimal-correct rather than subject
//! to binary floating point artifacts. The [`Numeric64`] alias gives 64
//! significant digits.
//!
//! On top of the field operations sits a transcendental layer (`sqrt`,
//! `ln`, `exp`, `log10`, `pow`, the trigonometric functions and their
//! inverses) computed to the same precision, plus conversions to and from
//! primitives, a binary encoding, and the ODBC [`SqlNumeric`] wire struct.
//!
//! # Examples
//!
//! ```
//! use numeric_rs::Numeric64;
//!
//! let a: Numeric64 = "123.45".parse().unwrap();
//! let b: Numeric64 = "0.55".parse().unwrap();
//! assert_eq!((a + b).to_string(), "124");
//! assert_eq!((a / b).round(6).to_string(), "224.454545");
//! ```
//!
//! Transcendental functions return `Result` and never produce NaN or
//! infinity sentinels:
//!
//! ```
//! use numeric_rs::Numeric64;
//!
//! let two: Numeric64 = "2".parse().unwrap();
//! let root = two.sqrt().unwrap();
//! assert_eq!(root.round(10).to_string(), "1.4142135624");
//! assert!("-1".parse::<Numeric64>().unwrap().sqrt().is_err());
//! ```

mod arith;
mod buf;
mod convert;
mod error;
mod magnitude;
mod numeric;
mod ops;
mod parse;
#[cfg(feature = "serde")]
mod serde;
mod transcend;
mod wire;

pub use crate::error::{NumericConvertError, NumericError, NumericParseError};
pub use crate::numeric::{
    Numeric, Numeric16, Numeric32, Numeric64, MAX_EXPONENT, MIN_EXPONENT,
};
pub use crate::wire::SqlNumeric;
