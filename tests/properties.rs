// SPDX-License-Identifier: AGPL-3.0-or-later

//! Randomized consistency checks of the boolean operations against point
//! membership.

use proptest::prelude::*;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use geomop::{construct, Geometry, Operation, Point, Polygon};

const OPERATIONS: [Operation; 4] = [
    Operation::Intersection,
    Operation::Union,
    Operation::Difference,
    Operation::Xor,
];

/// Axis aligned rectangle with integer corners.
fn rect(x: i32, y: i32, w: i32, h: i32) -> Geometry {
    let (x, y, w, h) = (x as f64, y as f64, w as f64, h as f64);
    Geometry::from(Polygon::from(vec![
        (x, y),
        (x + w, y),
        (x + w, y + h),
        (x, y + h),
    ]))
}

fn contains(result: &Option<Geometry>, x: f64, y: f64) -> bool {
    match result {
        Some(Geometry::Polygon(polygon)) => polygon.contains_point(Point::new(x, y)),
        None => false,
        other => panic!("expected polygon output, got {:?}", other),
    }
}

/// Probe points on half integer coordinates. They can never fall onto an
/// edge of an integer rectangle, so membership is unambiguous.
fn probe_grid() -> impl Iterator<Item = (f64, f64)> {
    (0..16).flat_map(|i| (0..16).map(move |j| (i as f64 - 0.5, j as f64 - 0.5)))
}

fn apply(a: &Geometry, b: &Geometry, operation: Operation) -> Option<Geometry> {
    construct(Some(a), Some(b), operation).unwrap()
}

/// Membership in each result must equal the boolean combination of
/// membership in the operands.
fn check_membership(a: (i32, i32, i32, i32), b: (i32, i32, i32, i32)) {
    let ga = rect(a.0, a.1, a.2, a.3);
    let gb = rect(b.0, b.1, b.2, b.3);
    let results: Vec<_> = OPERATIONS
        .iter()
        .map(|&operation| apply(&ga, &gb, operation))
        .collect();

    let in_rect = |r: (i32, i32, i32, i32), x: f64, y: f64| {
        x > r.0 as f64 && x < (r.0 + r.2) as f64 && y > r.1 as f64 && y < (r.1 + r.3) as f64
    };

    for (x, y) in probe_grid() {
        let in_a = in_rect(a, x, y);
        let in_b = in_rect(b, x, y);
        let expected = [in_a & in_b, in_a | in_b, in_a & !in_b, in_a ^ in_b];

        for ((result, &operation), expected) in results.iter().zip(OPERATIONS.iter()).zip(expected)
        {
            assert_eq!(
                contains(result, x, y),
                expected,
                "{:?} of {:?} and {:?} at probe ({}, {})",
                operation,
                a,
                b,
                x,
                y
            );
        }
    }
}

fn rect_strategy() -> impl Strategy<Value = (i32, i32, i32, i32)> {
    (0..8i32, 0..8i32, 1..6i32, 1..6i32)
}

proptest! {
    #[test]
    fn probe_membership_matches_the_operation(a in rect_strategy(), b in rect_strategy()) {
        check_membership(a, b);
    }

    #[test]
    fn union_intersection_and_xor_commute(a in rect_strategy(), b in rect_strategy()) {
        let ga = rect(a.0, a.1, a.2, a.3);
        let gb = rect(b.0, b.1, b.2, b.3);

        for operation in [Operation::Union, Operation::Intersection, Operation::Xor] {
            let ab = apply(&ga, &gb, operation);
            let ba = apply(&gb, &ga, operation);
            for (x, y) in probe_grid() {
                prop_assert_eq!(
                    contains(&ab, x, y),
                    contains(&ba, x, y),
                    "{:?} at probe ({}, {})",
                    operation,
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn operations_against_self(a in rect_strategy()) {
        let ga = rect(a.0, a.1, a.2, a.3);

        prop_assert_eq!(apply(&ga, &ga, Operation::Difference), None);
        prop_assert_eq!(apply(&ga, &ga, Operation::Xor), None);

        let own = Some(ga.clone());
        let union = apply(&ga, &ga, Operation::Union);
        let intersection = apply(&ga, &ga, Operation::Intersection);
        for (x, y) in probe_grid() {
            prop_assert_eq!(contains(&union, x, y), contains(&own, x, y));
            prop_assert_eq!(contains(&intersection, x, y), contains(&own, x, y));
        }
    }

    #[test]
    fn results_are_reproducible(a in rect_strategy(), b in rect_strategy()) {
        let ga = rect(a.0, a.1, a.2, a.3);
        let gb = rect(b.0, b.1, b.2, b.3);

        for operation in OPERATIONS {
            prop_assert_eq!(
                apply(&ga, &gb, operation),
                apply(&ga, &gb, operation),
                "{:?}",
                operation
            );
        }
    }
}

/// Unit cells counted through their center points behave like an area
/// measure on integer rectangles, so the operations must preserve it.
#[test]
fn cell_counts_of_random_rectangles() {
    let seed = 3u8;
    let mut rng = StdRng::from_seed([seed; 32]);

    let position = Uniform::from(0..12);
    let extent = Uniform::from(1..6);

    let cells = |result: &Option<Geometry>| -> i32 {
        let mut count = 0;
        for i in 0..18 {
            for j in 0..18 {
                if contains(result, i as f64 + 0.5, j as f64 + 0.5) {
                    count += 1;
                }
            }
        }
        count
    };

    for _ in 0..50 {
        let a = (
            position.sample(&mut rng),
            position.sample(&mut rng),
            extent.sample(&mut rng),
            extent.sample(&mut rng),
        );
        let b = (
            position.sample(&mut rng),
            position.sample(&mut rng),
            extent.sample(&mut rng),
            extent.sample(&mut rng),
        );
        let ga = rect(a.0, a.1, a.2, a.3);
        let gb = rect(b.0, b.1, b.2, b.3);

        let overlap_w = ((a.0 + a.2).min(b.0 + b.2) - a.0.max(b.0)).max(0);
        let overlap_h = ((a.1 + a.3).min(b.1 + b.3) - a.1.max(b.1)).max(0);
        let overlap = overlap_w * overlap_h;

        assert_eq!(cells(&apply(&ga, &gb, Operation::Intersection)), overlap);
        assert_eq!(
            cells(&apply(&ga, &gb, Operation::Union)),
            a.2 * a.3 + b.2 * b.3 - overlap
        );
        assert_eq!(
            cells(&apply(&ga, &gb, Operation::Difference)),
            a.2 * a.3 - overlap
        );
        assert_eq!(
            cells(&apply(&ga, &gb, Operation::Xor)),
            a.2 * a.3 + b.2 * b.3 - 2 * overlap
        );
    }
}
