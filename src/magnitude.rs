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

//! Unsigned magnitude kernels over limb slices.
//!
//! A mantissa is a slice of decimal limbs, most significant first, each limb
//! holding `d` decimal digits (`limb < 10^d`). Carries and borrows are plain
//! data flowing through the buffers; signs never appear at this layer.

use stack_buf::StackVec;
use std::cmp::Ordering;

/// Scratch buffer for wide intermediate mantissas. The capacity covers the
/// widest intermediate of any kernel (`2 * N + 2` limbs) for `N <= 32`.
pub(crate) type LimbBuf = StackVec<u32, 80>;

/// Computes `10^n` for small `n`.
pub(crate) const fn pow10(n: u32) -> u32 {
    let mut p = 1u32;
    let mut i = 0;
    while i < n {
        p *= 10;
        i += 1;
    }
    p
}

/// Returns the decimal digit at digit index `idx` (0 = most significant
/// digit of the first limb).
#[inline]
pub(crate) fn digit_at(limbs: &[u32], idx: usize, d: u32) -> u32 {
    let limb = limbs[idx / d as usize];
    let pos = (idx % d as usize) as u32;
    limb / pow10(d - 1 - pos) % 10
}

/// Finds the index of the first non-zero digit, if any.
pub(crate) fn first_nonzero_digit(limbs: &[u32], d: u32) -> Option<usize> {
    for (i, &limb) in limbs.iter().enumerate() {
        if limb != 0 {
            let mut off = 0u32;
            let mut p = pow10(d - 1);
            while limb < p {
                p /= 10;
                off += 1;
            }
            return Some(i * d as usize + off as usize);
        }
    }
    None
}

/// Shifts a mantissa right by `r < d` digits, widening by one limb. The
/// result keeps the input's limb grid: the first limb gains `r` leading zero
/// digits, the dropped digits spill into the extra trailing limb.
pub(crate) fn shift_right_digits(src: &[u32], r: u32, d: u32) -> LimbBuf {
    let base = pow10(d);
    let mut out = LimbBuf::new();
    if r == 0 {
        for &limb in src {
            out.push(limb);
        }
        out.push(0);
        return out;
    }
    let low = pow10(r);
    let high = base / low;
    let mut spill = 0u32;
    for &limb in src {
        out.push(spill * high + limb / low);
        spill = limb % low;
    }
    out.push(spill * high);
    out
}

/// Adds `addend` into `w` at limb `offset`, propagating the carry toward the
/// front of `w`. The caller must leave room for the carry to land.
pub(crate) fn add_at(w: &mut [u32], addend: &[u32], offset: usize, base: u32) {
    let mut carry = 0u32;
    for i in (0..addend.len()).rev() {
        let sum = w[offset + i] + addend[i] + carry;
        w[offset + i] = sum % base;
        carry = sum / base;
    }
    let mut i = offset;
    while carry != 0 {
        debug_assert!(i > 0, "carry escaped the buffer");
        i -= 1;
        let sum = w[i] + carry;
        w[i] = sum % base;
        carry = sum / base;
    }
}

/// Subtracts `sub` from `w` at limb `offset`, propagating the borrow toward
/// the front. The minuend must not be smaller than the subtrahend.
pub(crate) fn sub_at(w: &mut [u32], sub: &[u32], offset: usize, base: u32) {
    let mut borrow = 0u32;
    for i in (0..sub.len()).rev() {
        let need = sub[i] + borrow;
        if w[offset + i] >= need {
            w[offset + i] -= need;
            borrow = 0;
        } else {
            w[offset + i] = w[offset + i] + base - need;
            borrow = 1;
        }
    }
    let mut i = offset;
    while borrow != 0 {
        debug_assert!(i > 0, "borrow escaped the buffer");
        i -= 1;
        if w[i] >= borrow {
            w[i] -= borrow;
            borrow = 0;
        } else {
            w[i] = w[i] + base - borrow;
            borrow = 1;
        }
    }
}

/// Lexicographic comparison of two equal-length mantissas.
#[inline]
pub(crate) fn cmp_slices(a: &[u32], b: &[u32]) -> Ordering {
    debug_assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        match x.cmp(y) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}

/// Schoolbook multiplication. For each limb pair `(i, j)` the double-width
/// product is split and accumulated into columns `i + j` and `i + j + 1`;
/// a single carry sweep at the end flattens the columns into limbs.
pub(crate) fn mul_columns(a: &[u32], b: &[u32], base: u32) -> LimbBuf {
    let len = a.len() + b.len();
    let mut cols = [0u64; 80];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        for (j, &y) in b.iter().enumerate() {
            let prod = x as u64 * y as u64;
            cols[i + j] += prod / base as u64;
            cols[i + j + 1] += prod % base as u64;
        }
    }

    let mut out = LimbBuf::new();
    for _ in 0..len {
        out.push(0);
    }
    let limbs = out.as_mut_slice();
    let mut carry = 0u64;
    for k in (0..len).rev() {
        let v = cols[k] + carry;
        limbs[k] = (v % base as u64) as u32;
        carry = v / base as u64;
    }
    debug_assert_eq!(carry, 0);
    out
}

/// Multiplies a mantissa by a single limb, widening by one limb at the front.
pub(crate) fn mul_by_limb(v: &[u32], q: u64, base: u32) -> LimbBuf {
    let mut out = LimbBuf::new();
    for _ in 0..v.len() + 1 {
        out.push(0);
    }
    let limbs = out.as_mut_slice();
    let mut carry = 0u64;
    for i in (0..v.len()).rev() {
        let t = v[i] as u64 * q + carry;
        limbs[i + 1] = (t % base as u64) as u32;
        carry = t / base as u64;
    }
    debug_assert!(carry < base as u64);
    limbs[0] = carry as u32;
    out
}
