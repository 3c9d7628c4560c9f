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
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument, warn};

use crate::{
    error::MatchError,
    geometry::{
        Aabb, IdAllocator, Point3, PointKind, Quad, TaggedPoint, nearest_corners,
        nearest_corners_within, within_cube,
    },
    matching::{FaceRecord, MatchConfig, MatchOutput, MatchRecord},
    numeric::scalar::Scalar,
    octree::Octree,
};

/// Assign every point to the face whose centroid is nearest, provided the
/// point falls inside that face's containment cube.
///
/// Ids restart at zero for each call. Point `i` of `points` gets id `i` and
/// face `i` of `faces` gets centroid id `i`.
#[instrument(level = "debug", skip_all, fields(points = points.len(), faces = faces.len()))]
pub fn match_points<T: Scalar>(
    points: &[Point3<T>],
    faces: &[Quad<T>],
    config: &MatchConfig,
) -> Result<MatchOutput<T>, MatchError> {
    let mut ids = IdAllocator::new();
    let tagged: Vec<TaggedPoint<T>> = points
        .iter()
        .map(|p| ids.tag(PointKind::Query, p.clone()))
        .collect();

    let mut records = Vec::with_capacity(faces.len());
    for (face, corners) in faces.iter().enumerate() {
        let record = FaceRecord::new(&mut ids, corners.clone())
            .map_err(|source| MatchError::InvalidGeometry { face, source })?;
        records.push(record);
    }

    let positions = tagged
        .iter()
        .map(|p| &p.position)
        .chain(records.iter().map(|r| &r.centroid.position));
    let Some(bounds) = Aabb::from_points(positions) else {
        debug!("no points and no faces, nothing to match");
        return Ok(MatchOutput::empty());
    };

    let ties = CornerTies::from_tolerance(config.tie_tolerance);

    let matches = {
        let mut octree = Octree::from_bounds(&bounds, &config.octree);
        for record in &records {
            octree.insert(&record.centroid);
        }
        debug!(
            centroids = octree.len(),
            depth = octree.depth(),
            leaves = octree.leaf_count(),
            "octree built"
        );

        let search_radius = records
            .iter()
            .map(|r| r.max_corner_distance.clone())
            .reduce(Scalar::max)
            .unwrap_or_else(T::zero);

        resolve_all(&octree, &tagged, &records, &search_radius, &ties)
    };

    let output = MatchOutput {
        matches,
        points: tagged,
        faces: records,
    };
    debug!(
        matched = output.matched_count(),
        total = output.points.len(),
        "matching finished"
    );
    Ok(output)
}

/// How corners are tied for one run, resolved once from
/// [`MatchConfig::tie_tolerance`].
enum CornerTies<T> {
    Exact,
    Within(T),
    All,
}

impl<T: Scalar> CornerTies<T> {
    fn from_tolerance(tolerance: Option<f64>) -> Self {
        let Some(tol) = tolerance else {
            return CornerTies::Exact;
        };
        if tol == f64::INFINITY {
            return CornerTies::All;
        }
        if tol.is_nan() || tol < 0.0 {
            warn!(tolerance = tol, "tie tolerance must be non-negative, using exact ties");
            return CornerTies::Exact;
        }
        match T::try_from_f64(tol) {
            Some(tol) => CornerTies::Within(tol),
            None => {
                warn!(tolerance = tol, "tie tolerance is not representable, using exact ties");
                CornerTies::Exact
            }
        }
    }
}

/// [`match_points`] over raw coordinates.
pub fn match_coords<T: Scalar>(
    points: &[[f64; 3]],
    faces: &[[[f64; 3]; 4]],
    config: &MatchConfig,
) -> Result<MatchOutput<T>, MatchError> {
    let points = points
        .iter()
        .enumerate()
        .map(|(point, &coords)| {
            Point3::<T>::try_from_f64s(coords)
                .map_err(|source| MatchError::InvalidPoint { point, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut quads: Vec<Quad<T>> = Vec::with_capacity(faces.len());
    for (face, &[a, b, c, d]) in faces.iter().enumerate() {
        let convert = |coords: [f64; 3]| {
            Point3::<T>::try_from_f64s(coords)
                .map_err(|source| MatchError::InvalidGeometry { face, source })
        };
        quads.push([convert(a)?, convert(b)?, convert(c)?, convert(d)?]);
    }

    match_points(&points, &quads, config)
}

#[cfg(not(feature = "parallel"))]
fn resolve_all<T: Scalar>(
    octree: &Octree<'_, T>,
    points: &[TaggedPoint<T>],
    faces: &[FaceRecord<T>],
    search_radius: &T,
    ties: &CornerTies<T>,
) -> AHashMap<usize, MatchRecord<T>> {
    points
        .iter()
        .map(|p| (p.id, resolve(octree, p, faces, search_radius, ties)))
        .collect()
}

/// The octree is fully built before this runs and is only read here.
#[cfg(feature = "parallel")]
fn resolve_all<T: Scalar>(
    octree: &Octree<'_, T>,
    points: &[TaggedPoint<T>],
    faces: &[FaceRecord<T>],
    search_radius: &T,
    ties: &CornerTies<T>,
) -> AHashMap<usize, MatchRecord<T>> {
    let resolved: Vec<(usize, MatchRecord<T>)> = points
        .par_iter()
        .map(|p| (p.id, resolve(octree, p, faces, search_radius, ties)))
        .collect();
    resolved.into_iter().collect()
}

fn resolve<T: Scalar>(
    octree: &Octree<'_, T>,
    point: &TaggedPoint<T>,
    faces: &[FaceRecord<T>],
    search_radius: &T,
    ties: &CornerTies<T>,
) -> MatchRecord<T> {
    let nearest = octree.find_nearest(&point.position, search_radius);
    let Some(centroid) = nearest.point else {
        return MatchRecord::NoMatch;
    };
    let Some(face) = faces.get(centroid.id) else {
        return MatchRecord::NoMatch;
    };
    if !within_cube(&point.position, &centroid.position, &face.max_corner_distance) {
        return MatchRecord::NoMatch;
    }

    let corners = match ties {
        CornerTies::Exact => nearest_corners(&centroid.position, &face.corners),
        CornerTies::Within(tol) => nearest_corners_within(&centroid.position, &face.corners, tol),
        CornerTies::All => face.corners.iter().cloned().collect(),
    };
    MatchRecord::Face {
        face_id: face.id,
        corners,
    }
}
