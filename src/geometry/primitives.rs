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

use smallvec::SmallVec;

use crate::{error::GeometryError, geometry::Point3, numeric::scalar::Scalar};

/// Corners tied for the minimum distance. Faces have four corners, so this
/// never spills to the heap for face input.
pub type NearestCorners<T> = SmallVec<[Point3<T>; 4]>;

/// Per-axis arithmetic mean of `points`.
pub fn centroid<T: Scalar>(points: &[Point3<T>]) -> Result<Point3<T>, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::EmptyPointSet);
    }

    let mut sum: Point3<T> = Point3::new(T::zero(), T::zero(), T::zero());
    for p in points {
        sum.x += &p.x;
        sum.y += &p.y;
        sum.z += &p.z;
    }
    let n = T::from_count(points.len());
    let mean = Point3 {
        x: sum.x / n.clone(),
        y: sum.y / n.clone(),
        z: sum.z / n,
    };

    match mean.non_finite_axis() {
        Some(axis) => Err(GeometryError::NonFinite { axis }),
        None => Ok(mean),
    }
}

/// Largest Euclidean distance over all unordered pairs. O(k²), meant for the
/// handful of corners on a face.
pub fn max_pairwise_distance<T: Scalar>(points: &[Point3<T>]) -> T {
    let mut best = T::zero();
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let d = a.distance_squared_to(b);
            if d > best {
                best = d;
            }
        }
    }
    best.sqrt()
}

/// Axis-aligned cube test: `|point[i] - center[i]| <= span / 2` on every
/// axis. The boundary counts as inside.
pub fn within_cube<T: Scalar>(point: &Point3<T>, center: &Point3<T>, span: &T) -> bool {
    let half = span.half();
    (0..3).all(|i| (point[i].clone() - center[i].clone()).abs() <= half)
}

/// Every corner at exactly the minimum distance from `reference`, in input
/// order. Ties are decided by `==` on the computed squared distances.
pub fn nearest_corners<T: Scalar>(
    reference: &Point3<T>,
    corners: &[Point3<T>],
) -> NearestCorners<T> {
    let mut nearest = NearestCorners::new();
    let mut min_dist: Option<T> = None;
    for corner in corners {
        let d = reference.distance_squared_to(corner);
        match &min_dist {
            Some(m) if d > *m => {}
            Some(m) if d == *m => nearest.push(corner.clone()),
            _ => {
                nearest.clear();
                nearest.push(corner.clone());
                min_dist = Some(d);
            }
        }
    }
    nearest
}

/// Like [`nearest_corners`], but a corner is tied when its distance is
/// within `tolerance` of the minimum. A tolerance that is not positive
/// ties only the corners at exactly the minimum distance.
pub fn nearest_corners_within<T: Scalar>(
    reference: &Point3<T>,
    corners: &[Point3<T>],
    tolerance: &T,
) -> NearestCorners<T> {
    let distances: SmallVec<[T; 4]> = corners.iter().map(|c| reference.distance_to(c)).collect();
    let Some(min) = distances.iter().cloned().reduce(Scalar::min) else {
        return NearestCorners::new();
    };
    let mut limit = min;
    if *tolerance > T::zero() {
        limit += tolerance;
    }
    corners
        .iter()
        .zip(&distances)
        .filter(|(_, d)| **d <= limit)
        .map(|(c, _)| c.clone())
        .collect()
}
