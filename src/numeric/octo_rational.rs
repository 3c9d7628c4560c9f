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
use rug::{Integer, Rational};

use crate::{
    numeric::scalar::Scalar,
    operations::{Abs, Sqrt},
};

use std::{
    cmp::Ordering,
    ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// Exact rational backed by GMP. Centroids, squared distances and cube
/// tests are computed without rounding, so corner ties are genuine ties.
#[derive(Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct OctoRational(pub Rational);

impl Scalar for OctoRational {
    fn from_num_den(num: i32, den: i32) -> Self {
        OctoRational(Rational::from((num, den)))
    }

    fn from_count(count: usize) -> Self {
        OctoRational(Rational::from(Integer::from(count)))
    }

    fn try_from_f64(value: f64) -> Option<Self> {
        Rational::from_f64(value).map(OctoRational)
    }

    fn is_finite(&self) -> bool {
        true
    }

    fn to_f64_lossy(&self) -> f64 {
        self.0.to_f64()
    }
}

impl<'a, 'b> Add<&'b OctoRational> for &'a OctoRational {
    type Output = OctoRational;

    fn add(self, rhs: &'b OctoRational) -> OctoRational {
        // in-place API on rug::Rational: result = self + rhs
        let mut result = self.0.clone();
        result += &rhs.0;
        OctoRational(result)
    }
}

impl Add for OctoRational {
    type Output = OctoRational;
    fn add(mut self, rhs: OctoRational) -> OctoRational {
        self.0 += rhs.0;
        self
    }
}

impl<'a, 'b> Sub<&'b OctoRational> for &'a OctoRational {
    type Output = OctoRational;

    fn sub(self, rhs: &'b OctoRational) -> OctoRational {
        let mut result = self.0.clone();
        result -= &rhs.0;
        OctoRational(result)
    }
}

impl Sub for OctoRational {
    type Output = OctoRational;
    fn sub(mut self, rhs: OctoRational) -> OctoRational {
        self.0 -= rhs.0;
        self
    }
}

impl<'a, 'b> Mul<&'b OctoRational> for &'a OctoRational {
    type Output = OctoRational;

    fn mul(self, rhs: &'b OctoRational) -> OctoRational {
        let mut result = self.0.clone();
        result *= &rhs.0;
        OctoRational(result)
    }
}

impl Mul for OctoRational {
    type Output = OctoRational;
    fn mul(mut self, rhs: OctoRational) -> OctoRational {
        self.0 *= rhs.0;
        self
    }
}

impl<'a, 'b> Div<&'b OctoRational> for &'a OctoRational {
    type Output = OctoRational;

    fn div(self, rhs: &'b OctoRational) -> OctoRational {
        let mut result = self.0.clone();
        result /= &rhs.0;
        OctoRational(result)
    }
}

impl Div for OctoRational {
    type Output = OctoRational;
    fn div(mut self, rhs: OctoRational) -> OctoRational {
        self.0 /= rhs.0;
        self
    }
}

impl<'c> AddAssign<&'c OctoRational> for OctoRational {
    fn add_assign(&mut self, rhs: &'c OctoRational) {
        self.0 += &rhs.0;
    }
}

impl<'c> SubAssign<&'c OctoRational> for OctoRational {
    fn sub_assign(&mut self, rhs: &'c OctoRational) {
        self.0 -= &rhs.0;
    }
}

impl<'c> MulAssign<&'c OctoRational> for OctoRational {
    fn mul_assign(&mut self, rhs: &'c OctoRational) {
        self.0 *= &rhs.0;
    }
}

impl Neg for OctoRational {
    type Output = OctoRational;
    fn neg(self) -> OctoRational {
        OctoRational(-self.0)
    }
}

impl From<i32> for OctoRational {
    fn from(value: i32) -> Self {
        OctoRational(Rational::from(value))
    }
}

impl From<Rational> for OctoRational {
    fn from(value: Rational) -> Self {
        OctoRational(value)
    }
}

impl ToPrimitive for OctoRational {
    fn to_i64(&self) -> Option<i64> {
        self.0.to_f64().to_i64()
    }
    fn to_u64(&self) -> Option<u64> {
        self.0.to_f64().to_u64()
    }
    fn to_f64(&self) -> Option<f64> {
        Some(self.0.to_f64())
    }
}

impl Zero for OctoRational {
    fn zero() -> Self {
        OctoRational(Rational::new())
    }

    fn is_zero(&self) -> bool {
        self.0.cmp0() == Ordering::Equal
    }
}

impl One for OctoRational {
    fn one() -> Self {
        OctoRational(Rational::from(1))
    }
}

impl Abs for OctoRational {
    fn abs(&self) -> Self {
        OctoRational(self.0.clone().abs())
    }
}

impl Sqrt for OctoRational {
    /// Exact when numerator and denominator are both perfect squares,
    /// otherwise rounded through f64. Negative inputs yield zero.
    fn sqrt(&self) -> Self {
        if self.0.cmp0() != Ordering::Greater {
            return OctoRational::zero();
        }
        let (numer, denom) = (self.0.numer(), self.0.denom());
        if numer.is_perfect_square() && denom.is_perfect_square() {
            let root = Rational::from((numer.clone().sqrt(), denom.clone().sqrt()));
            return OctoRational(root);
        }
        let approx = self.0.to_f64().sqrt();
        OctoRational(Rational::from_f64(approx).unwrap_or_default())
    }
}
