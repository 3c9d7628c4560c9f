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

use ahash::AHashMap;

use crate::{
    error::GeometryError,
    geometry::{
        IdAllocator, NearestCorners, Point3, PointKind, Quad, TaggedPoint, centroid,
        max_pairwise_distance,
    },
    numeric::scalar::Scalar,
};

/// Everything the pipeline knows about one face, keyed by a single id.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceRecord<T: Scalar> {
    pub id: usize,
    pub corners: Quad<T>,
    /// Shares `id` with the face.
    pub centroid: TaggedPoint<T>,
    pub max_corner_distance: T,
}

impl<T: Scalar> FaceRecord<T> {
    /// Tags the centroid with the next centroid id from `ids`; callers keep
    /// that id equal to the face's position in its input slice.
    pub fn new(ids: &mut IdAllocator, corners: Quad<T>) -> Result<Self, GeometryError> {
        let center = centroid(&corners)?;
        let max_corner_distance = max_pairwise_distance(&corners);
        let centroid = ids.tag(PointKind::Centroid, center);
        Ok(Self {
            id: centroid.id,
            corners,
            centroid,
            max_corner_distance,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MatchRecord<T: Scalar> {
    Face {
        face_id: usize,
        /// Corners nearest the face centroid, in corner order.
        corners: NearestCorners<T>,
    },
    NoMatch,
}

impl<T: Scalar> MatchRecord<T> {
    pub fn face_id(&self) -> Option<usize> {
        match self {
            MatchRecord::Face { face_id, .. } => Some(*face_id),
            MatchRecord::NoMatch => None,
        }
    }

    pub fn corners(&self) -> &[Point3<T>] {
        match self {
            MatchRecord::Face { corners, .. } => corners.as_slice(),
            MatchRecord::NoMatch => &[],
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchRecord::Face { .. })
    }
}

/// Output of one matching run.
#[derive(Clone, Debug)]
pub struct MatchOutput<T: Scalar> {
    /// One record per query point, keyed by point id.
    pub matches: AHashMap<usize, MatchRecord<T>>,
    pub points: Vec<TaggedPoint<T>>,
    pub faces: Vec<FaceRecord<T>>,
}

impl<T: Scalar> MatchOutput<T> {
    pub fn empty() -> Self {
        Self {
            matches: AHashMap::new(),
            points: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn get(&self, point_id: usize) -> Option<&MatchRecord<T>> {
        self.matches.get(&point_id)
    }

    pub fn centroids(&self) -> impl Iterator<Item = &TaggedPoint<T>> {
        self.faces.iter().map(|f| &f.centroid)
    }

    pub fn matched_count(&self) -> usize {
        self.matches.values().filter(|m| m.is_match()).count()
    }
}
