//! Which axial coordinates belong to a map.

use crate::hex::HexCoord;
use serde::{Deserialize, Serialize};

/// Radius-based bounds, symmetric around the origin.
///
/// The radius counts rings including the centre hex: bounds of radius `n`
/// admit every hex fewer than `n` steps from the origin. `from_radius(1)` is
/// the lone centre hex and `from_radius(0)` admits nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapBounds {
    radius: u32,
}

impl MapBounds {
    /// Bounds admitting hexes at distance `< radius` from the origin
    pub const fn from_radius(radius: u32) -> Self {
        Self { radius }
    }

    /// Bounds matching the hexes of `Map::build_map_of_size(size)`, i.e.
    /// distance `<= size`
    pub const fn for_map_size(size: u32) -> Self {
        Self::from_radius(size.saturating_add(1))
    }

    /// The radius these bounds were created with
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Largest admitted distance from the origin, if any hex is admitted
    pub fn max_distance(&self) -> Option<u32> {
        self.radius.checked_sub(1)
    }

    /// Whether `coord` lies inside the map. Out-of-bounds coordinates are an
    /// ordinary answer here, not an error.
    pub fn is_within_bounds(&self, coord: &HexCoord) -> bool {
        coord.distance_from_origin() < self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_one_admits_only_center() {
        let map_bounds = MapBounds::from_radius(1);

        assert!(!map_bounds.is_within_bounds(&HexCoord::new(1, 0)));
        assert!(!map_bounds.is_within_bounds(&HexCoord::new(-1, 0)));
        assert!(!map_bounds.is_within_bounds(&HexCoord::new(0, 1)));
        assert!(!map_bounds.is_within_bounds(&HexCoord::new(0, -1)));
        assert!(!map_bounds.is_within_bounds(&HexCoord::new(1, -1)));

        assert!(map_bounds.is_within_bounds(&HexCoord::new(0, 0)));
    }

    #[test]
    fn test_radius_two_admits_direct_neighbours() {
        let map_bounds = MapBounds::from_radius(2);

        for neighbor in HexCoord::ORIGIN.neighbors() {
            assert!(map_bounds.is_within_bounds(&neighbor), "{:?}", neighbor);
        }
        assert!(!map_bounds.is_within_bounds(&HexCoord::new(2, 0)));
        assert!(!map_bounds.is_within_bounds(&HexCoord::new(1, 1)));
        assert!(!map_bounds.is_within_bounds(&HexCoord::new(-2, 1)));
    }

    #[test]
    fn test_radius_zero_admits_nothing() {
        let map_bounds = MapBounds::from_radius(0);
        assert!(!map_bounds.is_within_bounds(&HexCoord::ORIGIN));
        assert_eq!(map_bounds.max_distance(), None);
    }

    #[test]
    fn test_for_map_size() {
        let map_bounds = MapBounds::for_map_size(2);
        assert_eq!(map_bounds.max_distance(), Some(2));
        assert!(map_bounds.is_within_bounds(&HexCoord::new(2, -2)));
        assert!(map_bounds.is_within_bounds(&HexCoord::new(-1, -1)));
        assert!(!map_bounds.is_within_bounds(&HexCoord::new(3, -1)));
        assert!(MapBounds::for_map_size(0).is_within_bounds(&HexCoord::ORIGIN));
    }

    #[test]
    fn test_bounds_are_symmetric() {
        let map_bounds = MapBounds::from_radius(3);
        for q in -4..=4 {
            for r in -4..=4 {
                let coord = HexCoord::new(q, r);
                let mirrored = HexCoord::new(-q, -r);
                assert_eq!(
                    map_bounds.is_within_bounds(&coord),
                    map_bounds.is_within_bounds(&mirrored)
                );
            }
        }
    }
}
