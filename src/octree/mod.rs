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

pub mod node;

pub use node::OctreeNode;

use tracing::{instrument, trace};

use crate::{
    geometry::{Aabb, Point3, TaggedPoint},
    numeric::scalar::Scalar,
};

/// How [`Octree::find_nearest`] walks the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Visit every node.
    #[default]
    Exhaustive,
    /// Skip subtrees whose stored points are all at least as far as the
    /// current best. Returns the same point as `Exhaustive`.
    Pruned,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OctreeConfig {
    /// Nodes at this depth never subdivide.
    pub max_depth: usize,
    /// A leaf subdivides once it holds more than this many points.
    pub bucket_capacity: usize,
    pub strategy: SearchStrategy,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            bucket_capacity: 8,
            strategy: SearchStrategy::Exhaustive,
        }
    }
}

impl OctreeConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_bucket_capacity(mut self, bucket_capacity: usize) -> Self {
        self.bucket_capacity = bucket_capacity;
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Result of a nearest query. `point` is `None` only for an empty index.
#[derive(Clone, Debug)]
pub struct Nearest<'a, T: Scalar> {
    pub point: Option<&'a TaggedPoint<T>>,
    pub distance_squared: Option<T>,
}

impl<'a, T: Scalar> Nearest<'a, T> {
    /// Euclidean distance to the match, `+inf` when nothing was found.
    pub fn distance(&self) -> f64 {
        match &self.distance_squared {
            Some(d) => d.sqrt().to_f64_lossy(),
            None => f64::INFINITY,
        }
    }
}

/// Point octree over borrowed [`TaggedPoint`]s.
pub struct Octree<'a, T: Scalar> {
    root: OctreeNode<'a, T>,
    strategy: SearchStrategy,
    len: usize,
}

impl<'a, T: Scalar> Octree<'a, T> {
    pub fn new(center: Point3<T>, size: T, config: &OctreeConfig) -> Self {
        Self {
            root: OctreeNode::new(center, size, 0, config),
            strategy: config.strategy,
            len: 0,
        }
    }

    /// Root cube centered on `bounds`, sized by its longest extent.
    pub fn from_bounds(bounds: &Aabb<T>, config: &OctreeConfig) -> Self {
        Self::new(bounds.center(), bounds.longest_extent(), config)
    }

    pub fn insert(&mut self, point: &'a TaggedPoint<T>) {
        self.root.insert(point);
        self.len += 1;
    }

    /// Closest stored point to `query`.
    ///
    /// `max_distance` is a caller hint carried into the trace output. It does
    /// not limit the search: a point farther away is still returned.
    #[instrument(level = "trace", skip_all, fields(max_distance = max_distance.to_f64_lossy()))]
    pub fn find_nearest(&self, query: &Point3<T>, max_distance: &T) -> Nearest<'a, T> {
        let mut best = None;
        self.root.search(query, self.strategy, &mut best);
        trace!(found = ?best.as_ref().map(|c| c.point.id), "nearest query");
        match best {
            Some(candidate) => Nearest {
                point: Some(candidate.point),
                distance_squared: Some(candidate.distance_squared),
            },
            None => Nearest {
                point: None,
                distance_squared: None,
            },
        }
    }

    pub fn root(&self) -> &OctreeNode<'a, T> {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn depth(&self) -> usize {
        self.root.deepest()
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}
