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

//! Input generators for tests and benchmarks. Not used by the matcher.

use rand::Rng;

/// `count` points with each axis drawn uniformly from `ranges[axis]`.
/// A range given as `(hi, lo)` is swapped.
pub fn random_points<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    ranges: [(f64, f64); 3],
) -> Vec<[f64; 3]> {
    let ranges = ranges.map(|(a, b)| (a.min(b), a.max(b)));
    (0..count)
        .map(|_| ranges.map(|(lo, hi)| rng.random_range(lo..=hi)))
        .collect()
}

/// Split the parallelogram spanned by `a`, `b` and `c` into
/// `along_ab * along_ad` quads.
///
/// The fourth corner is `d = a + (c - b)`. Quads are emitted with `i`
/// (steps along `ab`) as the outer loop and `j` (steps along `ad`) inner,
/// each with corners `(i, j), (i + 1, j), (i + 1, j + 1), (i, j + 1)`.
pub fn subdivide_parallelogram(
    a: [f64; 3],
    b: [f64; 3],
    c: [f64; 3],
    along_ab: usize,
    along_ad: usize,
) -> Vec<[[f64; 3]; 4]> {
    let d: [f64; 3] = std::array::from_fn(|k| a[k] + (c[k] - b[k]));
    let step_ab: [f64; 3] = std::array::from_fn(|k| (b[k] - a[k]) / along_ab as f64);
    let step_ad: [f64; 3] = std::array::from_fn(|k| (d[k] - a[k]) / along_ad as f64);
    let at = |i: usize, j: usize| -> [f64; 3] {
        std::array::from_fn(|k| a[k] + step_ab[k] * i as f64 + step_ad[k] * j as f64)
    };

    let mut quads = Vec::with_capacity(along_ab * along_ad);
    for i in 0..along_ab {
        for j in 0..along_ad {
            quads.push([at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)]);
        }
    }
    quads
}
