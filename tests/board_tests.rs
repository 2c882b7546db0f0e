//! Board topology property tests.
//!
//! These check the geometric guarantees every legality rule relies on:
//! symmetric adjacency, outward projectile rays, and well-formed
//! intersections.

use proptest::prelude::*;

use realm_engine::board::{Board, Coord, Direction};

fn cell() -> impl Strategy<Value = (i32, i32)> {
    (0..Board::ROWS, 0..Board::COLS)
}

fn any_cell() -> impl Strategy<Value = (i32, i32)> {
    (-3..Board::ROWS + 3, -3..Board::COLS + 3)
}

// =============================================================================
// Adjacency
// =============================================================================

proptest! {
    #[test]
    fn test_adjacent_in_bounds_and_symmetric((row, col) in cell()) {
        let board = Board::new();
        let origin = Coord::new(row, col);
        let adjacent = board.get_adjacent_locations(row, col);

        prop_assert!(adjacent.len() <= 4);
        for (at, _) in adjacent {
            prop_assert!(Board::contains(at));
            prop_assert_eq!(at.manhattan(origin), 1);
            let back = board.get_adjacent_locations(at.row, at.col);
            prop_assert!(back.iter().any(|(c, _)| *c == origin));
        }
    }

    #[test]
    fn test_nearby_in_bounds((row, col) in cell()) {
        let board = Board::new();
        let origin = Coord::new(row, col);
        let nearby = board.get_nearby_locations(row, col);

        prop_assert!(nearby.len() <= 8);
        for (at, _) in nearby {
            prop_assert!(Board::contains(at));
            prop_assert_eq!(at.chebyshev(origin), 1);
        }
    }

    #[test]
    fn test_lookups_never_fail((row, col) in any_cell()) {
        let board = Board::new();
        let inside = Board::contains(Coord::new(row, col));
        prop_assert_eq!(board.get_location(row, col).is_some(), inside);
        prop_assert_eq!(board.get_intersection(row, col).is_some(), inside);
    }
}

// =============================================================================
// Projectile rays
// =============================================================================

proptest! {
    #[test]
    fn test_rays_walk_outward((row, col) in cell()) {
        let board = Board::new();
        let origin = Coord::new(row, col);
        let rays = board.get_projectile_locations(row, col);

        prop_assert_eq!(rays.len(), 4);
        for ray in rays {
            let mut last = 0;
            for (at, _) in ray {
                prop_assert_ne!(at, origin);
                prop_assert!(Board::contains(at));
                let distance = at.manhattan(origin);
                prop_assert!(distance > last);
                last = distance;
            }
        }
    }

    #[test]
    fn test_rays_restart((row, col) in cell()) {
        let board = Board::new();
        for mut ray in board.get_projectile_locations(row, col) {
            let first: Vec<_> = ray.by_ref().map(|(at, _)| at).collect();
            ray.restart();
            let second: Vec<_> = ray.map(|(at, _)| at).collect();
            prop_assert_eq!(first, second);
        }
    }
}

#[test]
fn test_ray_lengths_from_corner() {
    let board = Board::new();
    let lengths: Vec<_> = board
        .get_projectile_locations(0, 0)
        .into_iter()
        .map(|ray| (ray.direction(), ray.count()))
        .collect();

    assert_eq!(
        lengths,
        vec![
            (Direction::Up, 0),
            (Direction::Down, 4),
            (Direction::Left, 0),
            (Direction::Right, 3),
        ]
    );
}

// =============================================================================
// Intersections
// =============================================================================

proptest! {
    #[test]
    fn test_intersection_bounds((row, col) in cell()) {
        let board = Board::new();
        let base = Coord::new(row, col);
        let intersection = board.get_intersection(row, col).unwrap();

        prop_assert!((1..=4).contains(&intersection.locations.len()));
        prop_assert!(intersection.borders(base));
        for at in &intersection.locations {
            prop_assert!(board.location(*at).is_some());
        }
    }
}

#[test]
fn test_every_index_unique_and_row_major() {
    let board = Board::new();
    let indices: Vec<_> = board.iter().map(|(_, l)| l.index).collect();
    let expected: Vec<u32> = (1..=20).collect();
    assert_eq!(indices, expected);
    assert!(board.validate().is_ok());
}
