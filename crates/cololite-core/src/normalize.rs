//! Canonical coordinates for corners and edges shared between hexes.
//!
//! A corner touches up to three hexes and an edge up to two, so each has
//! several raw spellings. Every direction carries an ordered list of
//! candidates `(neighbour across edge, direction on that neighbour)`. The
//! first candidate whose neighbour is inside the map wins; with no in-bounds
//! candidate the raw spelling is already canonical. `Right` and
//! `BottomRight` corners and the three bottom edges never move.
//!
//! For any two in-bounds hexes sharing a corner or edge, normalizing either
//! hex's spelling yields the same coordinate, and normalizing a normalized
//! coordinate is a no-op.

use crate::bounds::MapBounds;
use crate::hex::{CornerCoord, EdgeCoord, HexCoord, HexCornerDirection, HexDirection, HexEdgeDirection};

/// A normalization candidate: look across `.0`, re-spell as `.1` there.
pub type Candidate<D> = (HexEdgeDirection, D);

/// Corner candidates by [`HexCornerDirection`] index.
pub const CORNER_NORMALIZATION_RULES: [&[Candidate<HexCornerDirection>]; 6] = [
    // Right
    &[],
    // BottomRight
    &[],
    // BottomLeft
    &[(HexEdgeDirection::BottomLeft, HexCornerDirection::Right)],
    // Left
    &[(HexEdgeDirection::TopLeft, HexCornerDirection::BottomRight)],
    // TopLeft
    &[
        (HexEdgeDirection::TopLeft, HexCornerDirection::Right),
        (HexEdgeDirection::Top, HexCornerDirection::BottomLeft),
    ],
    // TopRight
    &[
        (HexEdgeDirection::Top, HexCornerDirection::BottomRight),
        (HexEdgeDirection::TopRight, HexCornerDirection::Left),
    ],
];

/// Edge candidates by [`HexEdgeDirection`] index.
pub const EDGE_NORMALIZATION_RULES: [&[Candidate<HexEdgeDirection>]; 6] = [
    // BottomRight
    &[],
    // Bottom
    &[],
    // BottomLeft
    &[],
    // TopLeft
    &[(HexEdgeDirection::TopLeft, HexEdgeDirection::BottomRight)],
    // Top
    &[(HexEdgeDirection::Top, HexEdgeDirection::Bottom)],
    // TopRight
    &[(HexEdgeDirection::TopRight, HexEdgeDirection::BottomLeft)],
];

/// Candidates tried when normalizing a corner in `direction`
pub fn corner_candidates(direction: HexCornerDirection) -> &'static [Candidate<HexCornerDirection>] {
    CORNER_NORMALIZATION_RULES[direction.index()]
}

/// Candidates tried when normalizing an edge in `direction`
pub fn edge_candidates(direction: HexEdgeDirection) -> &'static [Candidate<HexEdgeDirection>] {
    EDGE_NORMALIZATION_RULES[direction.index()]
}

fn first_in_bounds<D: Copy>(
    hex: HexCoord,
    direction: D,
    candidates: &[Candidate<D>],
    bounds: &MapBounds,
) -> (HexCoord, D) {
    candidates
        .iter()
        .map(|&(across, respelled)| (hex.neighbor(across), respelled))
        .find(|(neighbor, _)| bounds.is_within_bounds(neighbor))
        .unwrap_or((hex, direction))
}

/// Canonical spelling of a corner within `bounds`
pub fn normalize_corner(raw: CornerCoord, bounds: &MapBounds) -> CornerCoord {
    let (hex, direction) = first_in_bounds(raw.hex, raw.direction, corner_candidates(raw.direction), bounds);
    CornerCoord::new(hex, direction)
}

/// Canonical spelling of an edge within `bounds`
pub fn normalize_edge(raw: EdgeCoord, bounds: &MapBounds) -> EdgeCoord {
    let (hex, direction) = first_in_bounds(raw.hex, raw.direction, edge_candidates(raw.direction), bounds);
    EdgeCoord::new(hex, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_coords::MapCoords;
    use pretty_assertions::assert_eq;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_candidates_name_the_same_corner() {
        for direction in HexCornerDirection::ALL {
            let raw = CornerCoord::new(HexCoord::new(1, -1), direction);
            for &(across, respelled) in corner_candidates(direction) {
                let candidate = CornerCoord::new(raw.hex.neighbor(across), respelled);
                assert!(close(raw.to_pixel(1.0), candidate.to_pixel(1.0)), "{:?} via {:?}", direction, across);
            }
        }
    }

    #[test]
    fn test_candidates_name_the_same_edge() {
        for direction in HexEdgeDirection::ALL {
            let raw = EdgeCoord::new(HexCoord::new(-2, 1), direction);
            for &(across, respelled) in edge_candidates(direction) {
                assert_eq!(EdgeCoord::new(raw.hex.neighbor(across), respelled), raw.from_other_side());
            }
        }
    }

    #[test]
    fn test_interior_corner_moves_to_canonical_hex() {
        let bounds = MapBounds::for_map_size(1);
        let raw = CornerCoord::new(HexCoord::new(1, 0), HexCornerDirection::TopLeft);
        assert_eq!(
            normalize_corner(raw, &bounds),
            CornerCoord::new(HexCoord::ORIGIN, HexCornerDirection::Right)
        );

        let raw = CornerCoord::new(HexCoord::new(0, 1), HexCornerDirection::TopRight);
        assert_eq!(
            normalize_corner(raw, &bounds),
            CornerCoord::new(HexCoord::ORIGIN, HexCornerDirection::BottomRight)
        );
    }

    #[test]
    fn test_boundary_corners() {
        let bounds = MapBounds::for_map_size(1);

        // Top neighbour (1,-1) is in bounds.
        let raw = CornerCoord::new(HexCoord::new(1, 0), HexCornerDirection::TopRight);
        assert_eq!(
            normalize_corner(raw, &bounds),
            CornerCoord::new(HexCoord::new(1, -1), HexCornerDirection::BottomRight)
        );

        // (0,-1): top neighbour (0,-2) is out, top-right neighbour (1,-2) is out.
        let raw = CornerCoord::new(HexCoord::new(0, -1), HexCornerDirection::TopRight);
        assert_eq!(normalize_corner(raw, &bounds), raw);

        // (-1,1): top-left (-2,1) is out, top (-1,0) is in.
        let raw = CornerCoord::new(HexCoord::new(-1, 1), HexCornerDirection::TopLeft);
        assert_eq!(
            normalize_corner(raw, &bounds),
            CornerCoord::new(HexCoord::new(-1, 0), HexCornerDirection::BottomLeft)
        );

        // Top neighbour (-1,0) is tried before the top-right one.
        let raw = CornerCoord::new(HexCoord::new(-1, 1), HexCornerDirection::TopRight);
        assert_eq!(
            normalize_corner(raw, &bounds),
            CornerCoord::new(HexCoord::new(-1, 0), HexCornerDirection::BottomRight)
        );
    }

    #[test]
    fn test_fallback_second_candidate_for_top_right() {
        // Top neighbour out of bounds, top-right neighbour in bounds.
        let bounds = MapBounds::for_map_size(1);
        let raw = CornerCoord::new(HexCoord::new(-1, 0), HexCornerDirection::TopRight);
        assert_eq!(
            normalize_corner(raw, &bounds),
            CornerCoord::new(HexCoord::new(0, -1), HexCornerDirection::Left)
        );
    }

    #[test]
    fn test_single_hex_keeps_raw_coordinates() {
        let bounds = MapBounds::for_map_size(0);
        for direction in HexCornerDirection::ALL {
            let raw = CornerCoord::new(HexCoord::ORIGIN, direction);
            assert_eq!(normalize_corner(raw, &bounds), raw);
        }
        for direction in HexEdgeDirection::ALL {
            let raw = EdgeCoord::new(HexCoord::ORIGIN, direction);
            assert_eq!(normalize_edge(raw, &bounds), raw);
        }
    }

    #[test]
    fn test_edge_normalization() {
        let bounds = MapBounds::for_map_size(1);
        let raw = EdgeCoord::new(HexCoord::new(0, 1), HexEdgeDirection::Top);
        assert_eq!(
            normalize_edge(raw, &bounds),
            EdgeCoord::new(HexCoord::ORIGIN, HexEdgeDirection::Bottom)
        );

        let raw = EdgeCoord::new(HexCoord::new(0, -1), HexEdgeDirection::Top);
        assert_eq!(normalize_edge(raw, &bounds), raw);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for radius in 0..=4 {
            let bounds = MapBounds::for_map_size(radius);
            for hex in MapCoords::new(radius) {
                for direction in HexCornerDirection::ALL {
                    let once = normalize_corner(CornerCoord::new(hex, direction), &bounds);
                    assert_eq!(normalize_corner(once, &bounds), once);
                    assert!(bounds.is_within_bounds(&once.hex));
                }
                for direction in HexEdgeDirection::ALL {
                    let once = normalize_edge(EdgeCoord::new(hex, direction), &bounds);
                    assert_eq!(normalize_edge(once, &bounds), once);
                    assert!(bounds.is_within_bounds(&once.hex));
                }
            }
        }
    }

    #[test]
    fn test_edge_normalization_is_symmetric() {
        for radius in 0..=4 {
            let bounds = MapBounds::for_map_size(radius);
            for hex in MapCoords::new(radius) {
                for direction in HexEdgeDirection::ALL {
                    let raw = EdgeCoord::new(hex, direction);
                    let other = raw.from_other_side();
                    if bounds.is_within_bounds(&other.hex) {
                        assert_eq!(normalize_edge(raw, &bounds), normalize_edge(other, &bounds));
                    }
                }
            }
        }
    }

    #[test]
    fn test_corner_normalization_is_symmetric() {
        for radius in 0..=4 {
            let bounds = MapBounds::for_map_size(radius);
            for hex in MapCoords::new(radius) {
                for direction in HexCornerDirection::ALL {
                    let raw = CornerCoord::new(hex, direction);
                    let expected = normalize_corner(raw, &bounds);
                    for spelling in raw.spellings() {
                        if bounds.is_within_bounds(&spelling.hex) {
                            assert_eq!(normalize_corner(spelling, &bounds), expected, "{:?}", spelling);
                        }
                    }
                }
            }
        }
    }
}
