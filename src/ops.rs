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

//! Operator implementations. These panic on overflow and division by zero;
//! use the `checked_*` methods to handle errors.

use crate::numeric::Numeric;
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

impl<const N: usize, const D: u32> Neg for Numeric<N, D> {
    type Output = Numeric<N, D>;

    #[inline]
    fn neg(self) -> Self::Output {
        self.neg_value()
    }
}

impl<const N: usize, const D: u32> Neg for &Numeric<N, D> {
    type Output = Numeric<N, D>;

    #[inline]
    fn neg(self) -> Self::Output {
        self.neg_value()
    }
}

macro_rules! impl_arith {
    ($op: ident, $method: ident, $checked: ident, $msg: expr) => {
        impl<const N: usize, const D: u32> $op<&Numeric<N, D>> for &Numeric<N, D> {
            type Output = Numeric<N, D>;

            #[inline]
            fn $method(self, other: &Numeric<N, D>) -> Self::Output {
                match self.$checked(other) {
                    Ok(result) => result,
                    Err(e) => panic!("{}: {}", $msg, e),
                }
            }
        }

        impl<const N: usize, const D: u32> $op<Numeric<N, D>> for &Numeric<N, D> {
            type Output = Numeric<N, D>;

            #[inline]
            fn $method(self, other: Numeric<N, D>) -> Self::Output {
                $op::$method(self, &other)
            }
        }

        impl<const N: usize, const D: u32> $op<&Numeric<N, D>> for Numeric<N, D> {
            type Output = Numeric<N, D>;

            #[inline]
            fn $method(self, other: &Numeric<N, D>) -> Self::Output {
                $op::$method(&self, other)
            }
        }

        impl<const N: usize, const D: u32> $op<Numeric<N, D>> for Numeric<N, D> {
            type Output = Numeric<N, D>;

            #[inline]
            fn $method(self, other: Numeric<N, D>) -> Self::Output {
                $op::$method(&self, &other)
            }
        }
    };
}

impl_arith!(Add, add, checked_add, "addition failed");
impl_arith!(Sub, sub, checked_sub, "subtraction failed");
impl_arith!(Mul, mul, checked_mul, "multiplication failed");
impl_arith!(Div, div, checked_div, "division failed");
impl_arith!(Rem, rem, checked_rem, "remainder failed");

macro_rules! impl_arith_assign {
    ($op: ident, $method: ident, $base: ident, $base_method: ident) => {
        impl<const N: usize, const D: u32> $op<&Numeric<N, D>> for Numeric<N, D> {
            #[inline]
            fn $method(&mut self, other: &Numeric<N, D>) {
                *self = $base::$base_method(&*self, other);
            }
        }

        impl<const N: usize, const D: u32> $op<Numeric<N, D>> for Numeric<N, D> {
            #[inline]
            fn $method(&mut self, other: Numeric<N, D>) {
                *self = $base::$base_method(&*self, &other);
            }
        }
    };
}

impl_arith_assign!(AddAssign, add_assign, Add, add);
impl_arith_assign!(SubAssign, sub_assign, Sub, sub);
impl_arith_assign!(MulAssign, mul_assign, Mul, mul);
impl_arith_assign!(DivAssign, div_assign, Div, div);
impl_arith_assign!(RemAssign, rem_assign, Rem, rem);

impl<const N: usize, const D: u32> Sum for Numeric<N, D> {
    fn sum<I: Iterator<Item = Numeric<N, D>>>(iter: I) -> Self {
        iter.fold(Numeric::zero(), |acc, v| acc + v)
    }
}

impl<'a, const N: usize, const D: u32> Sum<&'a Numeric<N, D>> for Numeric<N, D> {
    fn sum<I: Iterator<Item = &'a Numeric<N, D>>>(iter: I) -> Self {
        iter.fold(Numeric::zero(), |acc, v| acc + v)
    }
}

impl<const N: usize, const D: u32> Product for Numeric<N, D> {
    fn product<I: Iterator<Item = Numeric<N, D>>>(iter: I) -> Self {
        iter.fold(Numeric::one(), |acc, v| acc * v)
    }
}

impl<'a, const N: usize, const D: u32> Product<&'a Numeric<N, D>> for Numeric<N, D> {
    fn product<I: Iterator<Item = &'a Numeric<N, D>>>(iter: I) -> Self {
        iter.fold(Numeric::one(), |acc, v| acc * v)
    }
}

macro_rules! impl_arith_with_from_num {
    ($ty: ty) => {
        impl<const N: usize, const D: u32> PartialEq<$ty> for Numeric<N, D> {
            #[inline]
            fn eq(&self, other: &$ty) -> bool {
                *self == Numeric::<N, D>::from(*other)
            }
        }

        impl<const N: usize, const D: u32> PartialOrd<$ty> for Numeric<N, D> {
            #[inline]
            fn partial_cmp(&self, other: &$ty) -> Option<Ordering> {
                self.partial_cmp(&Numeric::<N, D>::from(*other))
            }
        }

        impl<const N: usize, const D: u32> Add<$ty> for Numeric<N, D> {
            type Output = Numeric<N, D>;

            #[inline]
            fn add(self, other: $ty) -> Self::Output {
                self + Numeric::<N, D>::from(other)
            }
        }

        impl<const N: usize, const D: u32> Sub<$ty> for Numeric<N, D> {
            type Output = Numeric<N, D>;

            #[inline]
            fn sub(self, other: $ty) -> Self::Output {
                self - Numeric::<N, D>::from(other)
            }
        }

        impl<const N: usize, const D: u32> Mul<$ty> for Numeric<N, D> {
            type Output = Numeric<N, D>;

            #[inline]
            fn mul(self, other: $ty) -> Self::Output {
                self * Numeric::<N, D>::from(other)
            }
        }

        impl<const N: usize, const D: u32> Div<$ty> for Numeric<N, D> {
            type Output = Numeric<N, D>;

            #[inline]
            fn div(self, other: $ty) -> Self::Output {
                self / Numeric::<N, D>::from(other)
            }
        }

        impl<const N: usize, const D: u32> Rem<$ty> for Numeric<N, D> {
            type Output = Numeric<N, D>;

            #[inline]
            fn rem(self, other: $ty) -> Self::Output {
                self % Numeric::<N, D>::from(other)
            }
        }
    };
}

impl_arith_with_from_num!(u8);
impl_arith_with_from_num!(u16);
impl_arith_with_from_num!(u32);
impl_arith_with_from_num!(u64);
impl_arith_with_from_num!(u128);
impl_arith_with_from_num!(usize);
impl_arith_with_from_num!(i8);
impl_arith_with_from_num!(i16);
impl_arith_with_from_num!(i32);
impl_arith_with_from_num!(i64);
impl_arith_with_from_num!(i128);
impl_arith_with_from_num!(isize);

macro_rules! impl_arith_with_try_num {
    ($ty: ty) => {
        impl<const N: usize, const D: u32> Add<$ty> for Numeric<N, D> {
            type Output = Numeric<N, D>;

            #[inline]
            fn add(self, other: $ty) -> Self::Output {
                match Numeric::<N, D>::try_from(other) {
                    Ok(other) => self + other,
                    Err(e) => panic!("addition failed: {}", e),
                }
            }
        }

        impl<const N: usize, const D: u32> Sub<$ty> for Numeric<N, D> {
            type Output = Numeric<N, D>;

            #[inline]
            fn sub(self, other: $ty) -> Self::Output {
                match Numeric::<N, D>::try_from(other) {
                    Ok(other) => self - other,
                    Err(e) => panic!("subtraction failed: {}", e),
                }
            }
        }

        impl<const N: usize, const D: u32> Mul<$ty> for Numeric<N, D> {
            type Output = Numeric<N, D>;

            #[inline]
            fn mul(self, other: $ty) -> Self::Output {
                match Numeric::<N, D>::try_from(other) {
                    Ok(other) => self * other,
                    Err(e) => panic!("multiplication failed: {}", e),
                }
            }
        }

        impl<const N: usize, const D: u32> Div<$ty> for Numeric<N, D> {
            type Output = Numeric<N, D>;

            #[inline]
            fn div(self, other: $ty) -> Self::Output {
                match Numeric::<N, D>::try_from(other) {
                    Ok(other) => self / other,
                    Err(e) => panic!("division failed: {}", e),
                }
            }
        }

        impl<const N: usize, const D: u32> Rem<$ty> for Numeric<N, D> {
            type Output = Numeric<N, D>;

            #[inline]
            fn rem(self, other: $ty) -> Self::Output {
                match Numeric::<N, D>::try_from(other) {
                    Ok(other) => self % other,
                    Err(e) => panic!("remainder failed: {}", e),
                }
            }
        }
    };
}

impl_arith_with_try_num!(f32);
impl_arith_with_try_num!(f64);
