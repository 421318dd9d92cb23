//! Cololite - hex map topology and game-state core for a Catan-style game
//!
//! This crate provides:
//! - Axial hex coordinates with corner and edge directions
//! - Normalization of the many spellings of a shared corner or edge
//! - A map builder that links hexes, corners and edges exactly once
//! - Player resources, building rules, dice production and bank trading
//!
//! # Architecture
//!
//! The map is an arena: `Map` owns every `Hex`, `Corner` and `Edge`, and
//! records refer to one another through `HexId`, `CornerId` and `EdgeId`.
//! After construction the topology never changes; only houses and roads do,
//! and `GameState` is the single owner through which they are built.
//!
//! # Modules
//!
//! - [`hex`]: Coordinates, directions and direction mapping tables
//! - [`bounds`]: Which coordinates belong to a map
//! - [`normalize`]: Canonical corner and edge coordinates
//! - [`map_coords`]: Row-by-row iteration over a map's hexes
//! - [`tiles`]: Resources and the shuffled tile assignment
//! - [`map`]: The linked map and its JSON snapshot
//! - [`player`]: Resource hands and building costs
//! - [`game`]: Game state, rules and dice

pub mod bounds;
pub mod game;
pub mod hex;
pub mod map;
pub mod map_coords;
pub mod normalize;
pub mod player;
pub mod tiles;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use bounds::MapBounds;
pub use game::{GameError, GameState, Roll, RollManager};
pub use hex::{
    edge_direction_to_corner_direction, opposite_direction, CornerCoord, CornerEdgeDirection, EdgeCoord,
    HexCoord, HexCornerDirection, HexDirection, HexEdgeDirection,
};
pub use map::{Corner, CornerId, Edge, EdgeId, Hex, HexId, House, Map, MapJson, Road};
pub use map_coords::MapCoords;
pub use normalize::{normalize_corner, normalize_edge};
pub use player::{PlayerId, ResourceHand};
pub use tiles::{Resource, TileAssignment};
