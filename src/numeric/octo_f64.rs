// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use num_traits::{One, ToPrimitive, Zero};

use crate::{
    numeric::scalar::Scalar,
    operations::{Abs, Sqrt},
};

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Hardware double. Equality is plain `==`, so distance ties are exact
/// bit-for-bit comparisons of the computed values.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct OctoF64(pub f64);

impl Scalar for OctoF64 {
    fn from_num_den(num: i32, den: i32) -> Self {
        OctoF64(num as f64 / den as f64)
    }

    fn from_count(count: usize) -> Self {
        OctoF64(count as f64)
    }

    fn try_from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(OctoF64(value))
    }

    fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    #[inline(always)]
    fn half(&self) -> Self {
        OctoF64(self.0 * 0.5)
    }

    fn to_f64_lossy(&self) -> f64 {
        self.0
    }
}

impl<'a, 'b> Add<&'b OctoF64> for &'a OctoF64 {
    type Output = OctoF64;
    fn add(self, rhs: &'b OctoF64) -> OctoF64 {
        OctoF64(self.0 + rhs.0)
    }
}

impl Add for OctoF64 {
    type Output = OctoF64;
    fn add(self, rhs: OctoF64) -> OctoF64 {
        &self + &rhs
    }
}

impl<'a, 'b> Sub<&'b OctoF64> for &'a OctoF64 {
    type Output = OctoF64;
    fn sub(self, rhs: &'b OctoF64) -> OctoF64 {
        OctoF64(self.0 - rhs.0)
    }
}

impl Sub for OctoF64 {
    type Output = OctoF64;
    fn sub(self, rhs: OctoF64) -> OctoF64 {
        &self - &rhs
    }
}

impl<'a, 'b> Mul<&'b OctoF64> for &'a OctoF64 {
    type Output = OctoF64;
    fn mul(self, rhs: &'b OctoF64) -> OctoF64 {
        OctoF64(self.0 * rhs.0)
    }
}

impl Mul for OctoF64 {
    type Output = OctoF64;
    fn mul(self, rhs: OctoF64) -> OctoF64 {
        &self * &rhs
    }
}

impl<'a, 'b> Div<&'b OctoF64> for &'a OctoF64 {
    type Output = OctoF64;
    fn div(self, rhs: &'b OctoF64) -> OctoF64 {
        OctoF64(self.0 / rhs.0)
    }
}

impl Div for OctoF64 {
    type Output = OctoF64;
    fn div(self, rhs: OctoF64) -> OctoF64 {
        &self / &rhs
    }
}

impl<'c> AddAssign<&'c OctoF64> for OctoF64 {
    fn add_assign(&mut self, rhs: &'c OctoF64) {
        self.0 += rhs.0;
    }
}

impl<'c> SubAssign<&'c OctoF64> for OctoF64 {
    fn sub_assign(&mut self, rhs: &'c OctoF64) {
        self.0 -= rhs.0;
    }
}

impl<'c> MulAssign<&'c OctoF64> for OctoF64 {
    fn mul_assign(&mut self, rhs: &'c OctoF64) {
        self.0 *= rhs.0;
    }
}

impl Neg for OctoF64 {
    type Output = OctoF64;
    fn neg(self) -> OctoF64 {
        OctoF64(-self.0)
    }
}

impl From<i32> for OctoF64 {
    fn from(value: i32) -> Self {
        OctoF64(value as f64)
    }
}

impl From<f64> for OctoF64 {
    fn from(value: f64) -> Self {
        OctoF64(value)
    }
}

impl From<OctoF64> for f64 {
    fn from(value: OctoF64) -> Self {
        value.0
    }
}

impl ToPrimitive for OctoF64 {
    fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }
    fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }
    fn to_f64(&self) -> Option<f64> {
        Some(self.0)
    }
}

impl Zero for OctoF64 {
    fn zero() -> Self {
        OctoF64(0.0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl One for OctoF64 {
    fn one() -> Self {
        OctoF64(1.0)
    }
}

impl Abs for OctoF64 {
    fn abs(&self) -> Self {
        OctoF64(self.0.abs())
    }
}

impl Sqrt for OctoF64 {
    fn sqrt(&self) -> Self {
        OctoF64(self.0.sqrt())
    }
}
