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

use crate::{geometry::Point3, numeric::scalar::Scalar};

/// An axis-aligned bounding box in 3D.
#[derive(Clone, Debug, PartialEq)]
pub struct Aabb<T: Scalar> {
    pub min: Point3<T>,
    pub max: Point3<T>,
}

impl<T: Scalar> Aabb<T> {
    pub fn new(min: Point3<T>, max: Point3<T>) -> Self {
        Aabb { min, max }
    }

    /// Degenerate box holding a single point.
    pub fn from_point(p: &Point3<T>) -> Self {
        Aabb::new(p.clone(), p.clone())
    }

    /// Smallest box containing every point, `None` for an empty iterator.
    pub fn from_points<'p, I>(points: I) -> Option<Self>
    where
        T: 'p,
        I: IntoIterator<Item = &'p Point3<T>>,
    {
        let mut iter = points.into_iter();
        let mut aabb = Aabb::from_point(iter.next()?);
        for p in iter {
            aabb.grow(p);
        }
        Some(aabb)
    }

    pub fn grow(&mut self, p: &Point3<T>) {
        if p.x < self.min.x {
            self.min.x = p.x.clone();
        }
        if p.y < self.min.y {
            self.min.y = p.y.clone();
        }
        if p.z < self.min.z {
            self.min.z = p.z.clone();
        }
        if p.x > self.max.x {
            self.max.x = p.x.clone();
        }
        if p.y > self.max.y {
            self.max.y = p.y.clone();
        }
        if p.z > self.max.z {
            self.max.z = p.z.clone();
        }
    }

    pub fn contains(&self, p: &Point3<T>) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    pub fn center(&self) -> Point3<T> {
        self.min.midpoint(&self.max)
    }

    /// Length along axis `i`.
    pub fn extent(&self, i: usize) -> T {
        (self.max[i].clone() - self.min[i].clone()).abs()
    }

    /// Return the axis index with largest extent.
    pub fn longest_axis(&self) -> usize {
        let mut best_i = 0usize;
        let mut best = self.extent(0);
        for i in 1..3 {
            let e = self.extent(i);
            if e > best {
                best_i = i;
                best = e;
            }
        }
        best_i
    }

    pub fn longest_extent(&self) -> T {
        self.extent(self.longest_axis())
    }

    /// Squared distance from `p` to the closest point of the box; zero inside.
    pub fn distance_squared_to(&self, p: &Point3<T>) -> T {
        let mut total = T::zero();
        for i in 0..3 {
            let gap = if p[i] < self.min[i] {
                self.min[i].clone() - p[i].clone()
            } else if p[i] > self.max[i] {
                p[i].clone() - self.max[i].clone()
            } else {
                continue;
            };
            let mut sq = gap.clone();
            sq *= &gap;
            total += &sq;
        }
        total
    }
}
