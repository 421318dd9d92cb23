//! Hex coordinate system using axial coordinates (q, r).
//!
//! This module provides the foundational coordinate types for the hex map:
//! - `HexCoord`: Identifies individual hex tiles
//! - `CornerCoord`: Identifies a corner as seen from one of its hexes
//! - `EdgeCoord`: Identifies an edge as seen from one of its hexes
//!
//! Hexes are flat-topped. Corner `i` of a hex sits at `60° * i` around its
//! centre (screen coordinates, y pointing down) and edge `i` runs from corner
//! `i` to corner `i + 1`. Corner and edge coordinates are raw: the same
//! geometric corner has up to three spellings, one per touching hex. Picking
//! the canonical one needs the map bounds and lives in [`crate::normalize`].

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::Add;

/// Behaviour shared by the three six-valued direction enums.
pub trait HexDirection: Copy + Eq + Debug + 'static {
    /// All six directions in index order
    const ALL: [Self; 6];

    /// Position of this direction in [`HexDirection::ALL`]
    fn index(self) -> usize;

    /// Direction at `index`, wrapping around the cycle
    fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// Direction three positions further around the cycle
    fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Direction `steps` positions further around the cycle (clockwise)
    fn rotated(self, steps: usize) -> Self {
        Self::from_index(self.index() + steps % 6)
    }
}

/// Returns the direction pointing the other way.
///
/// Turns "the neighbour sees me towards `d`" into "I see the neighbour
/// towards `opposite_direction(d)`".
pub fn opposite_direction<D: HexDirection>(direction: D) -> D {
    direction.opposite()
}

/// Direction of an edge relative to its hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HexEdgeDirection {
    /// Edge centred at 30°
    BottomRight,
    /// Edge centred at 90°
    Bottom,
    /// Edge centred at 150°
    BottomLeft,
    /// Edge centred at 210°
    TopLeft,
    /// Edge centred at 270°
    Top,
    /// Edge centred at 330°
    TopRight,
}

impl HexDirection for HexEdgeDirection {
    const ALL: [HexEdgeDirection; 6] = [
        HexEdgeDirection::BottomRight,
        HexEdgeDirection::Bottom,
        HexEdgeDirection::BottomLeft,
        HexEdgeDirection::TopLeft,
        HexEdgeDirection::Top,
        HexEdgeDirection::TopRight,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl HexEdgeDirection {
    /// Angle from the hex centre to the edge midpoint, in degrees
    pub fn angle_degrees(&self) -> f64 {
        60.0 * self.index() as f64 + 30.0
    }

    /// Directions from the edge midpoint towards its two corners
    pub fn corner_edge_directions(&self) -> [CornerEdgeDirection; 2] {
        EDGE_TO_CORNER_DIRECTION_MAPPING[self.index()]
    }

    /// The two corners of the hex this edge joins, in clockwise order
    pub fn corners(&self) -> [HexCornerDirection; 2] {
        self.corner_edge_directions()
            .map(|towards| edge_direction_to_corner_direction(*self, towards))
    }
}

/// Direction of a corner relative to its hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HexCornerDirection {
    /// Corner at 0°
    Right,
    /// Corner at 60°
    BottomRight,
    /// Corner at 120°
    BottomLeft,
    /// Corner at 180°
    Left,
    /// Corner at 240°
    TopLeft,
    /// Corner at 300°
    TopRight,
}

impl HexDirection for HexCornerDirection {
    const ALL: [HexCornerDirection; 6] = [
        HexCornerDirection::Right,
        HexCornerDirection::BottomRight,
        HexCornerDirection::BottomLeft,
        HexCornerDirection::Left,
        HexCornerDirection::TopLeft,
        HexCornerDirection::TopRight,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl HexCornerDirection {
    /// Angle from the hex centre to the corner, in degrees
    pub fn angle_degrees(&self) -> f64 {
        60.0 * self.index() as f64
    }

    /// Directions in which the three edges of this corner leave it
    pub fn edge_directions(&self) -> [CornerEdgeDirection; 3] {
        CORNER_TO_EDGE_DIRECTION_MAPPING[self.index()]
    }
}

/// Direction of an edge as seen from a corner, or of a corner as seen from
/// an edge midpoint.
///
/// Edges leave a corner along multiples of 60°, so the six values line up
/// with [`HexCornerDirection`] angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CornerEdgeDirection {
    /// 0°
    Right,
    /// 60°
    BottomRight,
    /// 120°
    BottomLeft,
    /// 180°
    Left,
    /// 240°
    TopLeft,
    /// 300°
    TopRight,
}

impl HexDirection for CornerEdgeDirection {
    const ALL: [CornerEdgeDirection; 6] = [
        CornerEdgeDirection::Right,
        CornerEdgeDirection::BottomRight,
        CornerEdgeDirection::BottomLeft,
        CornerEdgeDirection::Left,
        CornerEdgeDirection::TopLeft,
        CornerEdgeDirection::TopRight,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl CornerEdgeDirection {
    /// Angle of this direction, in degrees
    pub fn angle_degrees(&self) -> f64 {
        60.0 * self.index() as f64
    }
}

/// For each corner direction (by index), the directions in which its three
/// edges leave the corner: outwards first, then along the hex's own edges.
pub const CORNER_TO_EDGE_DIRECTION_MAPPING: [[CornerEdgeDirection; 3]; 6] = [
    // Right
    [
        CornerEdgeDirection::Right,
        CornerEdgeDirection::BottomLeft,
        CornerEdgeDirection::TopLeft,
    ],
    // BottomRight
    [
        CornerEdgeDirection::BottomRight,
        CornerEdgeDirection::Left,
        CornerEdgeDirection::TopRight,
    ],
    // BottomLeft
    [
        CornerEdgeDirection::BottomLeft,
        CornerEdgeDirection::TopLeft,
        CornerEdgeDirection::Right,
    ],
    // Left
    [
        CornerEdgeDirection::Left,
        CornerEdgeDirection::TopRight,
        CornerEdgeDirection::BottomRight,
    ],
    // TopLeft
    [
        CornerEdgeDirection::TopLeft,
        CornerEdgeDirection::Right,
        CornerEdgeDirection::BottomLeft,
    ],
    // TopRight
    [
        CornerEdgeDirection::TopRight,
        CornerEdgeDirection::BottomRight,
        CornerEdgeDirection::Left,
    ],
];

/// For each edge direction (by index), the directions from the edge midpoint
/// towards its two corners: the counter-clockwise corner first.
pub const EDGE_TO_CORNER_DIRECTION_MAPPING: [[CornerEdgeDirection; 2]; 6] = [
    // BottomRight
    [CornerEdgeDirection::TopRight, CornerEdgeDirection::BottomLeft],
    // Bottom
    [CornerEdgeDirection::Right, CornerEdgeDirection::Left],
    // BottomLeft
    [CornerEdgeDirection::BottomRight, CornerEdgeDirection::TopLeft],
    // TopLeft
    [CornerEdgeDirection::BottomLeft, CornerEdgeDirection::TopRight],
    // Top
    [CornerEdgeDirection::Left, CornerEdgeDirection::Right],
    // TopRight
    [CornerEdgeDirection::TopLeft, CornerEdgeDirection::BottomRight],
];

/// Which corner of the hex lies at the end of `edge` reached by walking
/// towards `towards`.
///
/// # Panics
///
/// Panics when `towards` is not one of the two entries of
/// [`EDGE_TO_CORNER_DIRECTION_MAPPING`] for `edge`. The tables are exhaustive,
/// so reaching the panic means a caller mixed up its directions.
pub fn edge_direction_to_corner_direction(
    edge: HexEdgeDirection,
    towards: CornerEdgeDirection,
) -> HexCornerDirection {
    use CornerEdgeDirection as Towards;
    use HexCornerDirection as Corner;
    use HexEdgeDirection as Edge;

    match (edge, towards) {
        (Edge::BottomRight, Towards::TopRight) => Corner::Right,
        (Edge::BottomRight, Towards::BottomLeft) => Corner::BottomRight,
        (Edge::Bottom, Towards::Right) => Corner::BottomRight,
        (Edge::Bottom, Towards::Left) => Corner::BottomLeft,
        (Edge::BottomLeft, Towards::BottomRight) => Corner::BottomLeft,
        (Edge::BottomLeft, Towards::TopLeft) => Corner::Left,
        (Edge::TopLeft, Towards::BottomLeft) => Corner::Left,
        (Edge::TopLeft, Towards::TopRight) => Corner::TopLeft,
        (Edge::Top, Towards::Left) => Corner::TopLeft,
        (Edge::Top, Towards::Right) => Corner::TopRight,
        (Edge::TopRight, Towards::TopLeft) => Corner::TopRight,
        (Edge::TopRight, Towards::BottomRight) => Corner::Right,
        (edge, towards) => panic!(
            "invalid edge/corner direction combination: edge {:?} has no corner towards {:?}",
            edge, towards
        ),
    }
}

/// Axial coordinate for hex grid.
///
/// In axial coordinates:
/// - `q` increases going bottom-right
/// - `r` increases going down
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct HexCoord {
    /// Column (increases going bottom-right)
    pub q: i32,
    /// Row (increases going down)
    pub r: i32,
}

impl HexCoord {
    /// The centre of every map
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Get the neighbor across a specific edge
    pub fn neighbor(&self, direction: HexEdgeDirection) -> HexCoord {
        match direction {
            HexEdgeDirection::Top => HexCoord::new(self.q, self.r - 1),
            HexEdgeDirection::TopRight => HexCoord::new(self.q + 1, self.r - 1),
            HexEdgeDirection::BottomRight => HexCoord::new(self.q + 1, self.r),
            HexEdgeDirection::Bottom => HexCoord::new(self.q, self.r + 1),
            HexEdgeDirection::BottomLeft => HexCoord::new(self.q - 1, self.r + 1),
            HexEdgeDirection::TopLeft => HexCoord::new(self.q - 1, self.r),
        }
    }

    /// The six neighboring hexes, in edge direction order
    pub fn neighbors(&self) -> [HexCoord; 6] {
        HexEdgeDirection::ALL.map(|direction| self.neighbor(direction))
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (i64::from(self.q) - i64::from(other.q)).abs();
        let dr = (i64::from(self.r) - i64::from(other.r)).abs();
        let ds = (i64::from(self.s()) - i64::from(other.s())).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// Distance to the map centre
    pub fn distance_from_origin(&self) -> u32 {
        self.distance_to(&Self::ORIGIN)
    }

    /// Convert to pixel coordinates (center of hex), flat-top orientation
    /// with the given hex size (centre to corner)
    pub fn to_pixel(&self, hex_size: f64) -> (f64, f64) {
        let x = hex_size * (3.0 / 2.0 * self.q as f64);
        let y = hex_size * (3.0_f64.sqrt() * (self.r as f64 + self.q as f64 / 2.0));
        (x, y)
    }
}

impl Add for HexCoord {
    type Output = HexCoord;

    fn add(self, other: HexCoord) -> HexCoord {
        HexCoord::new(self.q + other.q, self.r + other.r)
    }
}

/// A corner as seen from one adjacent hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CornerCoord {
    /// The hex this corner is seen from
    pub hex: HexCoord,
    /// Which corner of the hex
    pub direction: HexCornerDirection,
}

impl CornerCoord {
    /// Create a raw (not normalized) corner coordinate
    pub const fn new(hex: HexCoord, direction: HexCornerDirection) -> Self {
        Self { hex, direction }
    }

    /// The three raw spellings of this corner, starting with `self`: one per
    /// hex meeting at it (some of which may lie outside any given map)
    pub fn spellings(&self) -> [CornerCoord; 3] {
        let k = self.direction.index();
        let after = HexEdgeDirection::from_index(k);
        let before = HexEdgeDirection::from_index(k + 5);
        [
            *self,
            CornerCoord::new(self.hex.neighbor(after), HexCornerDirection::from_index(k + 4)),
            CornerCoord::new(self.hex.neighbor(before), HexCornerDirection::from_index(k + 2)),
        ]
    }

    /// Convert to pixel coordinates
    pub fn to_pixel(&self, hex_size: f64) -> (f64, f64) {
        let (hx, hy) = self.hex.to_pixel(hex_size);
        let angle = self.direction.angle_degrees().to_radians();
        (hx + hex_size * angle.cos(), hy + hex_size * angle.sin())
    }
}

/// An edge as seen from one adjacent hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeCoord {
    /// The hex this edge is seen from
    pub hex: HexCoord,
    /// Which edge of the hex
    pub direction: HexEdgeDirection,
}

impl EdgeCoord {
    /// Create a raw (not normalized) edge coordinate
    pub const fn new(hex: HexCoord, direction: HexEdgeDirection) -> Self {
        Self { hex, direction }
    }

    /// The same edge spelled from the hex on the other side
    pub fn from_other_side(&self) -> EdgeCoord {
        EdgeCoord::new(self.hex.neighbor(self.direction), self.direction.opposite())
    }

    /// The two corners at the ends of this edge, seen from the same hex
    pub fn endpoints(&self) -> [CornerCoord; 2] {
        self.direction
            .corners()
            .map(|direction| CornerCoord::new(self.hex, direction))
    }

    /// Convert to pixel coordinates (midpoint of edge)
    pub fn to_pixel(&self, hex_size: f64) -> (f64, f64) {
        let [a, b] = self.endpoints();
        let (x1, y1) = a.to_pixel(hex_size);
        let (x2, y2) = b.to_pixel(hex_size);
        ((x1 + x2) / 2.0, (y1 + y2) / 2.0)
    }
}
