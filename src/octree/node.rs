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

use tracing::trace;

use crate::{
    geometry::{Aabb, Point3, TaggedPoint},
    numeric::scalar::Scalar,
    octree::{OctreeConfig, SearchStrategy},
};

/// Children of an internal node, indexed by octant code.
pub type Children<'a, T> = Box<[OctreeNode<'a, T>; 8]>;

enum NodeKind<'a, T: Scalar> {
    Leaf { bucket: Vec<&'a TaggedPoint<T>> },
    Internal { children: Children<'a, T> },
}

/// One cube of the partition: `center ± size` on every axis.
///
/// A node starts as a leaf and becomes internal on its first subdivision.
/// It never turns back into a leaf.
pub struct OctreeNode<'a, T: Scalar> {
    center: Point3<T>,
    size: T,
    depth: usize,
    max_depth: usize,
    bucket_capacity: usize,
    /// Bounds of the points actually stored below this node.
    bounds: Option<Aabb<T>>,
    kind: NodeKind<'a, T>,
}

/// Best candidate found so far during a nearest search.
#[derive(Clone, Debug)]
pub(crate) struct Candidate<'a, T: Scalar> {
    pub point: &'a TaggedPoint<T>,
    pub distance_squared: T,
}

impl<'a, T: Scalar> OctreeNode<'a, T> {
    pub fn new(center: Point3<T>, size: T, depth: usize, config: &OctreeConfig) -> Self {
        Self {
            center,
            size,
            depth,
            max_depth: config.max_depth,
            bucket_capacity: config.bucket_capacity,
            bounds: None,
            kind: NodeKind::Leaf { bucket: Vec::new() },
        }
    }

    pub fn center(&self) -> &Point3<T> {
        &self.center
    }

    /// Half-extent of the cube.
    pub fn size(&self) -> &T {
        &self.size
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn bounds(&self) -> Option<&Aabb<T>> {
        self.bounds.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Points held directly by this node. Always empty for internal nodes.
    pub fn bucket(&self) -> &[&'a TaggedPoint<T>] {
        match &self.kind {
            NodeKind::Leaf { bucket } => bucket,
            NodeKind::Internal { .. } => &[],
        }
    }

    pub fn children(&self) -> Option<&[OctreeNode<'a, T>; 8]> {
        match &self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Internal { children } => Some(children),
        }
    }

    /// 3-bit octant code: bit 0 for x, bit 1 for y, bit 2 for z. A bit is
    /// set iff the coordinate is strictly greater than the center's, so a
    /// point on a splitting plane belongs to the lower side.
    pub fn octant_index(&self, point: &Point3<T>) -> usize {
        octant_of(&self.center, point)
    }

    pub fn insert(&mut self, point: &'a TaggedPoint<T>) {
        match &mut self.bounds {
            Some(bounds) => bounds.grow(&point.position),
            None => self.bounds = Some(Aabb::from_point(&point.position)),
        }

        match &mut self.kind {
            NodeKind::Leaf { bucket } => {
                bucket.push(point);
                if bucket.len() > self.bucket_capacity && self.depth < self.max_depth {
                    self.subdivide();
                }
            }
            NodeKind::Internal { children } => {
                children[octant_of(&self.center, &point.position)].insert(point);
            }
        }
    }

    /// Split a leaf into eight children and push its bucket down one level.
    ///
    /// Splits even when every held point lands in the same octant. No-op at
    /// the depth limit or on a node that is already internal.
    pub fn subdivide(&mut self) {
        if self.depth >= self.max_depth {
            return;
        }
        let NodeKind::Leaf { bucket } = &mut self.kind else {
            return;
        };
        let held = std::mem::take(bucket);
        trace!(depth = self.depth, held = held.len(), "subdividing octree node");

        let half = self.size.half();
        let mut children: [OctreeNode<'a, T>; 8] = std::array::from_fn(|octant| OctreeNode {
            center: child_center(&self.center, &half, octant),
            size: half.clone(),
            depth: self.depth + 1,
            max_depth: self.max_depth,
            bucket_capacity: self.bucket_capacity,
            bounds: None,
            kind: NodeKind::Leaf { bucket: Vec::new() },
        });
        for point in held {
            children[octant_of(&self.center, &point.position)].insert(point);
        }
        self.kind = NodeKind::Internal {
            children: Box::new(children),
        };
    }

    /// Walks the query's own octant first, then the remaining children in
    /// index order. A candidate only replaces the best on a strictly smaller
    /// distance, so the first one found wins ties.
    pub(crate) fn search(
        &self,
        query: &Point3<T>,
        strategy: SearchStrategy,
        best: &mut Option<Candidate<'a, T>>,
    ) {
        let Some(bounds) = &self.bounds else {
            return;
        };
        if strategy == SearchStrategy::Pruned {
            if let Some(current) = best.as_ref() {
                if bounds.distance_squared_to(query) >= current.distance_squared {
                    return;
                }
            }
        }

        match &self.kind {
            NodeKind::Leaf { bucket } => {
                for &point in bucket {
                    let d = point.position.distance_squared_to(query);
                    if best.as_ref().is_none_or(|b| d < b.distance_squared) {
                        *best = Some(Candidate {
                            point,
                            distance_squared: d,
                        });
                    }
                }
            }
            NodeKind::Internal { children } => {
                let first = self.octant_index(query);
                children[first].search(query, strategy, best);
                for (octant, child) in children.iter().enumerate() {
                    if octant != first {
                        child.search(query, strategy, best);
                    }
                }
            }
        }
    }

    /// Depth of the deepest node below (and including) this one.
    pub fn deepest(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { .. } => self.depth,
            NodeKind::Internal { children } => {
                children.iter().map(|c| c.deepest()).max().unwrap_or(self.depth)
            }
        }
    }

    pub fn node_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { .. } => 1,
            NodeKind::Internal { children } => {
                1 + children.iter().map(|c| c.node_count()).sum::<usize>()
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { .. } => 1,
            NodeKind::Internal { children } => children.iter().map(|c| c.leaf_count()).sum(),
        }
    }
}

#[inline(always)]
fn octant_of<T: Scalar>(center: &Point3<T>, p: &Point3<T>) -> usize {
    (p.x > center.x) as usize | ((p.y > center.y) as usize) << 1 | ((p.z > center.z) as usize) << 2
}

/// Center of child `octant`: `-half` on an axis whose bit is clear,
/// `+half` where it is set. Mirrors [`octant_of`] exactly.
fn child_center<T: Scalar>(center: &Point3<T>, half: &T, octant: usize) -> Point3<T> {
    let shift = |c: &T, bit: usize| {
        let mut v = c.clone();
        if octant & bit != 0 {
            v += half;
        } else {
            v -= half;
        }
        v
    };
    Point3 {
        x: shift(&center.x, 1),
        y: shift(&center.y, 2),
        z: shift(&center.z, 4),
    }
}
