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

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointKind {
    /// An input point looking for a face.
    Query,
    /// A face centroid stored in the index.
    Centroid,
}

/// A position with an identity. Ids are unique and dense within one
/// [`PointKind`] for the lifetime of the [`IdAllocator`] that issued them.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedPoint<T: Scalar> {
    pub id: usize,
    pub kind: PointKind,
    pub position: Point3<T>,
}

/// Independent id counters for query points and centroids.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next_query: usize,
    next_centroid: usize,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag<T: Scalar>(&mut self, kind: PointKind, position: Point3<T>) -> TaggedPoint<T> {
        let counter = match kind {
            PointKind::Query => &mut self.next_query,
            PointKind::Centroid => &mut self.next_centroid,
        };
        let id = *counter;
        *counter += 1;
        TaggedPoint { id, kind, position }
    }
}
