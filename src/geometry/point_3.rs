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

use crate::{error::GeometryError, numeric::scalar::Scalar};

use std::ops::Index;

#[derive(Debug, Clone, PartialEq)]
pub struct Point3<T>
where
    T: Scalar,
{
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Point3<T>
where
    T: Scalar,
{
    pub fn new<X, Y, Z>(x: X, y: Y, z: Z) -> Self
    where
        X: Into<T>,
        Y: Into<T>,
        Z: Into<T>,
    {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }

    /// Converts raw coordinates, rejecting any the backend cannot hold.
    pub fn try_from_f64s(coords: [f64; 3]) -> Result<Self, GeometryError> {
        let convert = |axis: usize| {
            T::try_from_f64(coords[axis]).ok_or(GeometryError::NonFinite { axis })
        };
        Ok(Self {
            x: convert(0)?,
            y: convert(1)?,
            z: convert(2)?,
        })
    }

    pub fn distance_squared_to(&self, other: &Self) -> T {
        let mut total = T::zero();
        for axis in 0..3 {
            let mut d = self[axis].clone();
            d -= &other[axis];
            let mut sq = d.clone();
            sq *= &d;
            total += &sq;
        }
        total
    }

    pub fn distance_to(&self, other: &Self) -> T {
        self.distance_squared_to(other).sqrt()
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        let mid = |a: &T, b: &T| {
            let mut s = a.clone();
            s += b;
            s.half()
        };
        Self {
            x: mid(&self.x, &other.x),
            y: mid(&self.y, &other.y),
            z: mid(&self.z, &other.z),
        }
    }

    /// Index of the first non-finite coordinate, if any.
    pub fn non_finite_axis(&self) -> Option<usize> {
        (0..3).find(|&axis| !self[axis].is_finite())
    }
}

impl<T> Index<usize> for Point3<T>
where
    T: Scalar,
{
    type Output = T;

    fn index(&self, axis: usize) -> &T {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis"),
        }
    }
}
