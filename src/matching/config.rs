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

use crate::octree::{OctreeConfig, SearchStrategy};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchConfig {
    pub octree: OctreeConfig,
    /// `None` ties corners only on exactly equal distances. `Some(tol)` also
    /// ties corners whose distance exceeds the minimum by at most `tol`.
    /// `f64::INFINITY` ties every corner. A negative or NaN tolerance is
    /// logged and treated as `None`.
    pub tie_tolerance: Option<f64>,
}

impl MatchConfig {
    pub fn with_octree(mut self, octree: OctreeConfig) -> Self {
        self.octree = octree;
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.octree.strategy = strategy;
        self
    }

    pub fn with_tie_tolerance(mut self, tolerance: f64) -> Self {
        self.tie_tolerance = Some(tolerance);
        self
    }
}
