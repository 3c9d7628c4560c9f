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

use rand::SeedableRng;
use rand::rngs::StdRng;

use octomatch::geometry::{Aabb, Point3, PointKind, Quad, nearest_corners, within_cube};
use octomatch::numeric::{OctoF64, OctoRational, Scalar};
use octomatch::octree::{Octree, OctreeConfig, SearchStrategy};
use octomatch::synth::{random_points, subdivide_parallelogram};
use octomatch::{GeometryError, MatchConfig, MatchError, MatchRecord, match_coords, match_points};

fn p(x: f64, y: f64, z: f64) -> Point3<OctoF64> {
    Point3::new(x, y, z)
}

fn square_face() -> Quad<OctoF64> {
    [
        p(0.0, 0.0, 0.0),
        p(10.0, 0.0, 0.0),
        p(10.0, 10.0, 0.0),
        p(0.0, 10.0, 0.0),
    ]
}

#[test]
fn test_match_point_at_face_center() {
    let out = match_points(&[p(5.0, 5.0, 0.0)], &[square_face()], &MatchConfig::default())
        .unwrap();

    let face = &out.faces[0];
    assert_eq!(face.centroid.position, p(5.0, 5.0, 0.0));
    assert_eq!(face.centroid.id, 0);
    assert_eq!(face.centroid.kind, PointKind::Centroid);
    assert!((face.max_corner_distance.0 - 10.0 * 2f64.sqrt()).abs() < 1e-12);

    match out.get(0).unwrap() {
        MatchRecord::Face { face_id, corners } => {
            assert_eq!(*face_id, 0);
            assert_eq!(corners.as_slice(), &square_face()[..]);
        }
        MatchRecord::NoMatch => panic!("expected a match"),
    }
}

#[test]
fn test_match_point_near_corner() {
    let out = match_points(&[p(1.0, 1.0, 0.0)], &[square_face()], &MatchConfig::default())
        .unwrap();

    // Ties are resolved from the centroid, which is equidistant to all four.
    let record = out.get(0).unwrap();
    assert_eq!(record.face_id(), Some(0));
    assert_eq!(record.corners().len(), 4);

    // Measured from the point itself, (0, 0, 0) is the single nearest corner.
    let from_point = nearest_corners(&p(1.0, 1.0, 0.0), &square_face());
    assert_eq!(from_point.as_slice(), &[p(0.0, 0.0, 0.0)]);
}

#[test]
fn test_match_no_faces() {
    let points = [p(1.0, 2.0, 3.0), p(-4.0, 0.0, 9.0), p(0.0, 0.0, 0.0)];
    let out = match_points::<OctoF64>(&points, &[], &MatchConfig::default())
        .unwrap();
    assert_eq!(out.matches.len(), 3);
    assert!(out.matches.values().all(|m| *m == MatchRecord::NoMatch));
    assert_eq!(out.matched_count(), 0);
    assert_eq!(out.centroids().count(), 0);
}

#[test]
fn test_match_far_point_fails_containment() {
    let far = p(100.0, 100.0, 0.0);
    let out = match_points(&[far.clone()], &[square_face()], &MatchConfig::default())
        .unwrap();
    assert_eq!(out.get(0), Some(&MatchRecord::NoMatch));

    // A nearest centroid exists; only the cube test rejects it.
    let face = &out.faces[0];
    assert!(!within_cube(&far, &face.centroid.position, &face.max_corner_distance));
}

#[test]
fn test_empty_input() {
    let out = match_points::<OctoF64>(&[], &[], &MatchConfig::default())
        .unwrap();
    assert!(out.matches.is_empty());
    assert!(out.points.is_empty());
}

#[test]
fn test_faces_without_points() {
    let out = match_points::<OctoF64>(&[], &[square_face()], &MatchConfig::default())
        .unwrap();
    assert!(out.matches.is_empty());
    assert_eq!(out.centroids().count(), 1);
}

#[test]
fn test_degenerate_face_only_accepts_coincident_point() {
    let spot = p(3.0, 3.0, 3.0);
    let face: Quad<OctoF64> = [spot.clone(), spot.clone(), spot.clone(), spot.clone()];
    let points = [spot.clone(), p(3.0, 3.0, 3.0 + 1e-9)];
    let out = match_points(&points, &[face], &MatchConfig::default())
        .unwrap();

    assert_eq!(out.faces[0].max_corner_distance, OctoF64(0.0));
    assert_eq!(out.get(0).unwrap().face_id(), Some(0));
    assert_eq!(out.get(0).unwrap().corners().len(), 4);
    assert_eq!(out.get(1), Some(&MatchRecord::NoMatch));
}

#[test]
fn test_ids_are_dense_and_coupled_to_faces() {
    let faces = subdivide_parallelogram(
        [0.0, 0.0, 0.0],
        [100.0, 0.0, 0.0],
        [0.0, 100.0, 0.0],
        4,
        5,
    );
    let mut rng = StdRng::seed_from_u64(3);
    let points = random_points(&mut rng, 100, [(-100.0, 100.0), (0.0, 100.0), (5.0, -5.0)]);
    let out = match_coords::<OctoF64>(&points, &faces, &MatchConfig::default())
        .unwrap();

    assert_eq!(out.points.len(), 100);
    assert_eq!(out.faces.len(), 20);
    for (i, point) in out.points.iter().enumerate() {
        assert_eq!(point.id, i);
        assert_eq!(point.kind, PointKind::Query);
        assert!(out.get(i).is_some());
    }
    for (i, face) in out.faces.iter().enumerate() {
        assert_eq!(face.id, i);
        assert_eq!(face.centroid.id, i);
    }
}

#[test]
fn test_ids_restart_each_run() {
    let config = MatchConfig::default();
    let first = match_points(
        &[p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)],
        &[square_face()],
        &config,
    )
    .unwrap();
    let second = match_points(
        &[p(2.0, 2.0, 2.0)],
        &[square_face(), square_face()],
        &config,
    )
    .unwrap();
    assert_eq!(first.points.last().map(|t| t.id), Some(1));
    assert_eq!(second.points[0].id, 0);
    assert_eq!(second.faces[1].centroid.id, 1);
}

#[test]
fn test_matches_agree_with_brute_force_pipeline() {
    let faces = subdivide_parallelogram(
        [0.0, 0.0, 0.0],
        [100.0, 0.0, 0.0],
        [0.0, 100.0, 0.0],
        6,
        6,
    );
    let mut rng = StdRng::seed_from_u64(11);
    let points = random_points(&mut rng, 300, [(-120.0, 120.0), (-10.0, 110.0), (-8.0, 8.0)]);

    let out = match_coords::<OctoF64>(&points, &faces, &MatchConfig::default())
        .unwrap();
    assert!(out.matched_count() > 0);
    for point in &out.points {
        // First face with the smallest centroid distance.
        let mut best: Option<(usize, OctoF64)> = None;
        for face in &out.faces {
            let d = face.centroid.position.distance_squared_to(&point.position);
            if best.as_ref().is_none_or(|(_, b)| d < *b) {
                best = Some((face.id, d));
            }
        }
        let (face_id, _) = best.unwrap();
        let face = &out.faces[face_id];
        let contained =
            within_cube(&point.position, &face.centroid.position, &face.max_corner_distance);
        let expected = contained.then_some(face_id);
        let got = out.get(point.id).unwrap();
        if expected.is_none() {
            assert_eq!(got, &MatchRecord::NoMatch);
        } else {
            // Equal-distance centroids may resolve to another face; the
            // distance must still be minimal.
            let got_face = &out.faces[got.face_id().unwrap()];
            assert_eq!(
                got_face.centroid.position.distance_squared_to(&point.position),
                best.unwrap().1
            );
        }
    }
}

#[test]
fn test_pruned_and_exhaustive_pipelines_agree() {
    let faces = subdivide_parallelogram(
        [-50.0, -50.0, 0.0],
        [50.0, -50.0, 0.0],
        [50.0, 50.0, 0.0],
        8,
        8,
    );
    let mut rng = StdRng::seed_from_u64(99);
    let points = random_points(&mut rng, 400, [(-60.0, 60.0), (-60.0, 60.0), (-3.0, 3.0)]);

    let exhaustive = match_coords::<OctoF64>(&points, &faces, &MatchConfig::default())
        .unwrap();
    let pruned_cfg = MatchConfig::default().with_strategy(SearchStrategy::Pruned);
    let pruned = match_coords::<OctoF64>(&points, &faces, &pruned_cfg)
        .unwrap();
    assert_eq!(exhaustive.matches.len(), pruned.matches.len());
    for id in 0..points.len() {
        assert_eq!(exhaustive.get(id), pruned.get(id), "point {id}");
    }
}

#[test]
fn test_rational_backend_matches_f64_on_integer_grid() {
    let faces = subdivide_parallelogram([0.0, 0.0, 0.0], [30.0, 0.0, 0.0], [30.0, 30.0, 0.0], 3, 3);
    let points = [[4.0, 4.0, 0.0], [15.0, 15.0, 1.0], [29.0, 1.0, 0.0], [60.0, 60.0, 0.0]];
    let f = match_coords::<OctoF64>(&points, &faces, &MatchConfig::default())
        .unwrap();
    let r = match_coords::<OctoRational>(&points, &faces, &MatchConfig::default())
        .unwrap();
    for id in 0..points.len() {
        assert_eq!(f.get(id).unwrap().face_id(), r.get(id).unwrap().face_id());
        assert_eq!(f.get(id).unwrap().corners().len(), r.get(id).unwrap().corners().len());
    }
    assert_eq!(r.get(3), Some(&MatchRecord::NoMatch));
}

#[test]
fn test_rational_backend_exact_ties_on_thirds() {
    let third = |n: i32| OctoRational::from_num_den(n, 3);
    let face: Quad<OctoRational> = [
        Point3::new(third(1), third(1), third(0)),
        Point3::new(third(2), third(1), third(0)),
        Point3::new(third(2), third(2), third(0)),
        Point3::new(third(1), third(2), third(0)),
    ];
    let half = OctoRational::from_num_den(1, 2);
    let query = Point3::new(half.clone(), half, third(0));
    let out = match_points(&[query], &[face.clone()], &MatchConfig::default())
        .unwrap();
    assert_eq!(out.faces[0].centroid.position.x, OctoRational::from_num_den(1, 2));
    assert_eq!(out.get(0).unwrap().corners(), &face[..]);
}

/// Corner distances from the centroid differ by about 1e-10, and the corner
/// at (0, 10, 0) is the single nearest one.
fn skewed_face() -> Quad<OctoF64> {
    [
        p(0.0, 0.0, 0.0),
        p(10.0, 0.0, 0.0),
        p(10.0, 10.0 + 2e-10, 0.0),
        p(0.0, 10.0, 0.0),
    ]
}

#[test]
fn test_tie_tolerance_widens_corner_set() {
    let face = skewed_face();
    let point = [p(5.0, 5.0, 0.0)];
    let exact = match_points(&point, &[face.clone()], &MatchConfig::default())
        .unwrap();
    let loose_cfg = MatchConfig::default().with_tie_tolerance(1e-6);
    let loose = match_points(&point, &[face], &loose_cfg).unwrap();
    assert!(exact.get(0).unwrap().corners().len() < 4);
    assert_eq!(loose.get(0).unwrap().corners().len(), 4);
}

#[test]
fn test_negative_tie_tolerance_falls_back_to_exact_ties() {
    let point = [p(5.0, 5.0, 0.0)];
    let config = MatchConfig::default().with_tie_tolerance(-1.0);

    let skewed = match_points(&point, &[skewed_face()], &config).unwrap();
    assert_eq!(skewed.get(0).unwrap().corners(), &[p(0.0, 10.0, 0.0)]);

    let square = match_points(&point, &[square_face()], &config).unwrap();
    assert_eq!(square.get(0).unwrap().corners(), &square_face()[..]);
}

#[test]
fn test_nan_tie_tolerance_falls_back_to_exact_ties() {
    let config = MatchConfig::default().with_tie_tolerance(f64::NAN);
    let out = match_points(&[p(5.0, 5.0, 0.0)], &[skewed_face()], &config).unwrap();
    assert_eq!(out.get(0).unwrap().corners(), &[p(0.0, 10.0, 0.0)]);
}

#[test]
fn test_infinite_tie_tolerance_ties_every_corner() {
    let config = MatchConfig::default().with_tie_tolerance(f64::INFINITY);
    let out = match_points(&[p(1.0, 9.0, 0.0)], &[skewed_face()], &config).unwrap();
    assert_eq!(out.get(0).unwrap().face_id(), Some(0));
    assert_eq!(out.get(0).unwrap().corners(), &skewed_face()[..]);

    // Containment still applies.
    let far = match_points(&[p(40.0, 40.0, 0.0)], &[skewed_face()], &config).unwrap();
    assert_eq!(far.get(0), Some(&MatchRecord::NoMatch));
}

/// Recomputes every match one point at a time through the octree and
/// compares with the pipeline, which runs its query loop on the rayon pool
/// when built with `parallel`.
#[test]
fn test_pipeline_matches_sequential_queries() {
    let faces = subdivide_parallelogram(
        [0.0, 0.0, 0.0],
        [80.0, 0.0, 0.0],
        [80.0, 80.0, 0.0],
        10,
        10,
    );
    let mut rng = StdRng::seed_from_u64(21);
    let points = random_points(&mut rng, 2_000, [(-20.0, 100.0), (-20.0, 100.0), (-6.0, 6.0)]);
    let octree_config = OctreeConfig::default()
        .with_bucket_capacity(2)
        .with_max_depth(6);
    let config = MatchConfig::default().with_octree(octree_config);
    let out = match_coords::<OctoF64>(&points, &faces, &config).unwrap();

    let positions = out
        .points
        .iter()
        .map(|t| &t.position)
        .chain(out.centroids().map(|c| &c.position));
    let bounds = Aabb::from_points(positions).unwrap();
    let mut octree = Octree::from_bounds(&bounds, &config.octree);
    for face in &out.faces {
        octree.insert(&face.centroid);
    }

    assert_eq!(out.matches.len(), out.points.len());
    for point in &out.points {
        let nearest = octree.find_nearest(&point.position, &OctoF64(0.0));
        let centroid = nearest.point.unwrap();
        let face = &out.faces[centroid.id];
        let expected =
            if within_cube(&point.position, &centroid.position, &face.max_corner_distance) {
                MatchRecord::Face {
                    face_id: face.id,
                    corners: nearest_corners(&centroid.position, &face.corners),
                }
            } else {
                MatchRecord::NoMatch
            };
        assert_eq!(out.get(point.id), Some(&expected), "point {}", point.id);
    }
}

#[test]
fn test_invalid_face_is_reported_with_index() {
    let faces = [
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        [[0.0, 0.0, 0.0], [f64::NAN, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
    ];
    let err = match_coords::<OctoF64>(&[[0.5, 0.5, 0.0]], &faces, &MatchConfig::default())
        .unwrap_err();
    assert_eq!(
        err,
        MatchError::InvalidGeometry {
            face: 1,
            source: GeometryError::NonFinite { axis: 0 },
        }
    );
}

#[test]
fn test_overflowing_centroid_is_invalid_geometry() {
    let big = f64::MAX;
    let face: Quad<OctoF64> = [
        p(big, 0.0, 0.0),
        p(big, 0.0, 0.0),
        p(big, 1.0, 0.0),
        p(big, 1.0, 0.0),
    ];
    let err = match_points(&[p(0.0, 0.0, 0.0)], &[face], &MatchConfig::default())
        .unwrap_err();
    assert!(matches!(err, MatchError::InvalidGeometry { face: 0, .. }));
}

#[test]
fn test_invalid_point_is_reported_with_index() {
    let faces = [[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]];
    let points = [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [0.0, f64::INFINITY, 0.0]];
    let err = match_coords::<OctoRational>(&points, &faces, &MatchConfig::default())
        .unwrap_err();
    assert_eq!(
        err,
        MatchError::InvalidPoint {
            point: 2,
            source: GeometryError::NonFinite { axis: 1 },
        }
    );
}
