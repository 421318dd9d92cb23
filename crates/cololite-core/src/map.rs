//! The linked hex map: hexes, the corners and edges they share, and what
//! has been built on them.
//!
//! This module contains:
//! - Arena ids (`HexId`, `CornerId`, `EdgeId`) and direction-keyed slots
//! - `Hex`, `Corner` and `Edge` records
//! - `House` and `Road` pieces
//! - The map builder and its read API
//! - A JSON-friendly snapshot for renderers
//!
//! The `Map` owns every record in three vectors. Records refer to each other
//! by id only, and each geometric corner or edge exists exactly once, keyed by
//! its normalized coordinate.

use crate::bounds::MapBounds;
use crate::hex::{
    edge_direction_to_corner_direction, CornerCoord, CornerEdgeDirection, EdgeCoord, HexCoord,
    HexCornerDirection, HexDirection, HexEdgeDirection,
};
use crate::map_coords::{hex_count, MapCoords};
use crate::normalize::{normalize_corner, normalize_edge};
use crate::player::PlayerId;
use crate::tiles::{tile_assignments, Resource};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::marker::PhantomData;

/// Index of a hex in its map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexId(pub usize);

/// Index of a corner in its map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CornerId(pub usize);

/// Index of an edge in its map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

/// Up to six values keyed by a direction enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct DirectionSlots<D, T> {
    slots: [Option<T>; 6],
    #[serde(skip)]
    direction: PhantomData<D>,
}

impl<D: HexDirection, T: Copy> DirectionSlots<D, T> {
    pub fn new() -> Self {
        Self {
            slots: [None; 6],
            direction: PhantomData,
        }
    }

    /// Value stored towards `direction`
    pub fn get(&self, direction: D) -> Option<T> {
        self.slots[direction.index()]
    }

    fn set(&mut self, direction: D, value: T) {
        self.slots[direction.index()] = Some(value);
    }

    /// Filled slots in direction order
    pub fn iter(&self) -> impl Iterator<Item = (D, T)> + '_ {
        D::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(direction, slot)| slot.map(|value| (direction, value)))
    }

    /// Values of the filled slots in direction order
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// Number of filled slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<D: HexDirection, T: Copy> Default for DirectionSlots<D, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// What's built on a corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum House {
    /// Settlement (1 VP, 1 resource per adjacent hex)
    Settlement(PlayerId),
    /// Town (2 VP, 2 resources per adjacent hex)
    Town(PlayerId),
}

impl House {
    /// Get the owner of this house
    pub fn owner(&self) -> PlayerId {
        match self {
            House::Settlement(p) | House::Town(p) => *p,
        }
    }

    /// Victory points provided by this house
    pub fn victory_points(&self) -> u32 {
        match self {
            House::Settlement(_) => 1,
            House::Town(_) => 2,
        }
    }

    /// Resource multiplier (how many resources per production)
    pub fn resource_multiplier(&self) -> u32 {
        match self {
            House::Settlement(_) => 1,
            House::Town(_) => 2,
        }
    }
}

/// A road on an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Road {
    pub owner: PlayerId,
}

/// A hex tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hex {
    id: HexId,
    /// Position on the grid
    pub coord: HexCoord,
    /// What the hex produces (`Resource::None` for the desert)
    pub resource: Resource,
    /// Dice number that triggers production (7 for the desert)
    pub number: u8,
    corners: DirectionSlots<HexCornerDirection, CornerId>,
    edges: DirectionSlots<HexEdgeDirection, EdgeId>,
}

impl Hex {
    pub fn id(&self) -> HexId {
        self.id
    }

    /// Corner of this hex in `direction`
    pub fn corner(&self, direction: HexCornerDirection) -> Option<CornerId> {
        self.corners.get(direction)
    }

    /// Edge of this hex in `direction`
    pub fn edge(&self, direction: HexEdgeDirection) -> Option<EdgeId> {
        self.edges.get(direction)
    }

    pub fn corners(&self) -> &DirectionSlots<HexCornerDirection, CornerId> {
        &self.corners
    }

    pub fn edges(&self) -> &DirectionSlots<HexEdgeDirection, EdgeId> {
        &self.edges
    }

    pub fn is_desert(&self) -> bool {
        self.resource == Resource::None
    }
}

/// A corner shared by up to three hexes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corner {
    id: CornerId,
    coord: CornerCoord,
    /// Hexes keyed by the direction from the corner to the hex centre
    hexes: DirectionSlots<HexCornerDirection, HexId>,
    /// Edges keyed by the direction in which they leave the corner
    edges: DirectionSlots<CornerEdgeDirection, EdgeId>,
    house: Option<House>,
}

impl Corner {
    pub fn id(&self) -> CornerId {
        self.id
    }

    /// Normalized coordinate of this corner
    pub fn coord(&self) -> CornerCoord {
        self.coord
    }

    pub fn hexes(&self) -> &DirectionSlots<HexCornerDirection, HexId> {
        &self.hexes
    }

    pub fn edges(&self) -> &DirectionSlots<CornerEdgeDirection, EdgeId> {
        &self.edges
    }

    pub fn house(&self) -> Option<House> {
        self.house
    }
}

/// An edge shared by up to two hexes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    coord: EdgeCoord,
    /// Hexes keyed by the direction from the edge to the hex centre
    hexes: DirectionSlots<HexEdgeDirection, HexId>,
    /// Both end corners keyed by the direction from the edge midpoint
    corners: DirectionSlots<CornerEdgeDirection, CornerId>,
    road: Option<Road>,
}

impl Edge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Normalized coordinate of this edge
    pub fn coord(&self) -> EdgeCoord {
        self.coord
    }

    pub fn hexes(&self) -> &DirectionSlots<HexEdgeDirection, HexId> {
        &self.hexes
    }

    pub fn corners(&self) -> &DirectionSlots<CornerEdgeDirection, CornerId> {
        &self.corners
    }

    pub fn road(&self) -> Option<Road> {
        self.road
    }
}

/// A fully linked hex map
#[derive(Debug, Clone)]
pub struct Map {
    radius: u32,
    bounds: MapBounds,
    hexes: Vec<Hex>,
    corners: Vec<Corner>,
    edges: Vec<Edge>,
    hex_index: HashMap<HexCoord, HexId>,
    corner_index: HashMap<CornerCoord, CornerId>,
    edge_index: HashMap<EdgeCoord, EdgeId>,
}

impl Map {
    /// Build a map of every hex within `radius` steps of the centre, with
    /// randomly assigned resources and numbers
    pub fn build_map_of_size(radius: u32) -> Self {
        let mut rng = rand::thread_rng();
        Self::build_map_of_size_with_rng(radius, &mut rng)
    }

    /// Build a map with a provided RNG.
    /// This allows for deterministic map generation when needed
    pub fn build_map_of_size_with_rng<R: Rng + ?Sized>(radius: u32, rng: &mut R) -> Self {
        let coords = MapCoords::new(radius);
        let assignments = tile_assignments(hex_count(radius), rng);

        let mut map = Self {
            radius,
            bounds: MapBounds::for_map_size(radius),
            hexes: Vec::with_capacity(coords.len()),
            corners: Vec::new(),
            edges: Vec::new(),
            hex_index: HashMap::with_capacity(coords.len()),
            corner_index: HashMap::new(),
            edge_index: HashMap::new(),
        };

        for (coord, assignment) in coords.into_iter().zip(assignments) {
            map.add_hex(coord, assignment.resource, assignment.number);
        }

        tracing::debug!(
            radius,
            hexes = map.hexes.len(),
            corners = map.corners.len(),
            edges = map.edges.len(),
            "built map"
        );
        map
    }

    fn add_hex(&mut self, coord: HexCoord, resource: Resource, number: u8) {
        let hex_id = HexId(self.hexes.len());
        self.hexes.push(Hex {
            id: hex_id,
            coord,
            resource,
            number,
            corners: DirectionSlots::new(),
            edges: DirectionSlots::new(),
        });
        self.hex_index.insert(coord, hex_id);

        for direction in HexCornerDirection::ALL {
            let corner_id = self.corner_for(CornerCoord::new(coord, direction));
            self.hexes[hex_id.0].corners.set(direction, corner_id);
            self.corners[corner_id.0].hexes.set(direction.opposite(), hex_id);
        }

        for direction in HexEdgeDirection::ALL {
            let edge_id = self.edge_for(EdgeCoord::new(coord, direction));
            self.hexes[hex_id.0].edges.set(direction, edge_id);
            self.edges[edge_id.0].hexes.set(direction.opposite(), hex_id);
        }
    }

    /// Existing corner at `raw`, or a fresh one under its normalized key
    fn corner_for(&mut self, raw: CornerCoord) -> CornerId {
        let key = normalize_corner(raw, &self.bounds);
        if let Some(&id) = self.corner_index.get(&key) {
            return id;
        }
        let id = CornerId(self.corners.len());
        self.corners.push(Corner {
            id,
            coord: key,
            hexes: DirectionSlots::new(),
            edges: DirectionSlots::new(),
            house: None,
        });
        self.corner_index.insert(key, id);
        id
    }

    /// Existing edge at `raw`, or a fresh one linked to both its corners.
    /// The corners of the hex must already exist.
    fn edge_for(&mut self, raw: EdgeCoord) -> EdgeId {
        let key = normalize_edge(raw, &self.bounds);
        if let Some(&id) = self.edge_index.get(&key) {
            return id;
        }
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            id,
            coord: key,
            hexes: DirectionSlots::new(),
            corners: DirectionSlots::new(),
            road: None,
        });
        self.edge_index.insert(key, id);

        for towards in raw.direction.corner_edge_directions() {
            let corner_direction = edge_direction_to_corner_direction(raw.direction, towards);
            let corner_id = self.corner_for(CornerCoord::new(raw.hex, corner_direction));
            self.corners[corner_id.0].edges.set(towards.opposite(), id);
            self.edges[id.0].corners.set(towards, corner_id);
        }
        id
    }

    // ==================== Read API ====================

    /// Radius the map was built with
    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn bounds(&self) -> MapBounds {
        self.bounds
    }

    /// Hex ids keyed by coordinate
    pub fn get_hexes(&self) -> &HashMap<HexCoord, HexId> {
        &self.hex_index
    }

    /// Corner ids keyed by normalized coordinate
    pub fn get_corners(&self) -> &HashMap<CornerCoord, CornerId> {
        &self.corner_index
    }

    /// Edge ids keyed by normalized coordinate
    pub fn get_edges(&self) -> &HashMap<EdgeCoord, EdgeId> {
        &self.edge_index
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this map.
    pub fn hex(&self, id: HexId) -> &Hex {
        &self.hexes[id.0]
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this map.
    pub fn corner(&self, id: CornerId) -> &Corner {
        &self.corners[id.0]
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this map.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// All hexes in build order
    pub fn hexes(&self) -> impl Iterator<Item = &Hex> {
        self.hexes.iter()
    }

    /// All corners in creation order
    pub fn corners(&self) -> impl Iterator<Item = &Corner> {
        self.corners.iter()
    }

    /// All edges in creation order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn hex_at(&self, coord: &HexCoord) -> Option<&Hex> {
        self.hex_index.get(coord).map(|&id| self.hex(id))
    }

    /// The corner named by any of its spellings, including spellings from a
    /// hex just outside the map
    pub fn corner_at(&self, raw: &CornerCoord) -> Option<&Corner> {
        let spelling = raw
            .spellings()
            .into_iter()
            .find(|spelling| self.bounds.is_within_bounds(&spelling.hex))?;
        let key = self.get_normalized_corner_coord(spelling);
        self.corner_index.get(&key).map(|&id| self.corner(id))
    }

    /// The edge named by either of its spellings
    pub fn edge_at(&self, raw: &EdgeCoord) -> Option<&Edge> {
        let spelling = [*raw, raw.from_other_side()]
            .into_iter()
            .find(|spelling| self.bounds.is_within_bounds(&spelling.hex))?;
        let key = self.get_normalized_edge_coord(spelling);
        self.edge_index.get(&key).map(|&id| self.edge(id))
    }

    /// Canonical key for a raw corner coordinate of an in-bounds hex
    pub fn get_normalized_corner_coord(&self, raw: CornerCoord) -> CornerCoord {
        normalize_corner(raw, &self.bounds)
    }

    /// Canonical key for a raw edge coordinate of an in-bounds hex
    pub fn get_normalized_edge_coord(&self, raw: EdgeCoord) -> EdgeCoord {
        normalize_edge(raw, &self.bounds)
    }

    /// Corners one edge away from `id`
    pub fn corner_neighbors(&self, id: CornerId) -> Vec<CornerId> {
        self.corner(id)
            .edges
            .values()
            .flat_map(|edge| self.edge(edge).corners.values())
            .filter(|&other| other != id)
            .collect()
    }

    /// Edges sharing a corner with `id`
    pub fn edge_neighbors(&self, id: EdgeId) -> Vec<EdgeId> {
        self.edge(id)
            .corners
            .values()
            .flat_map(|corner| self.corner(corner).edges.values())
            .filter(|&other| other != id)
            .collect()
    }

    // ==================== Mutation ====================

    /// Replace the house on a corner, returning the previous one
    pub fn set_house(&mut self, id: CornerId, house: Option<House>) -> Option<House> {
        std::mem::replace(&mut self.corners[id.0].house, house)
    }

    /// Replace the road on an edge, returning the previous one
    pub fn set_road(&mut self, id: EdgeId, road: Option<Road>) -> Option<Road> {
        std::mem::replace(&mut self.edges[id.0].road, road)
    }

    /// Convert to a JSON-friendly representation with arrays instead of HashMaps
    /// This is needed because JSON doesn't support complex types as keys
    pub fn to_json_friendly(&self) -> MapJson {
        MapJson {
            radius: self.radius,
            hexes: self
                .hexes
                .iter()
                .map(|hex| {
                    let (x, y) = hex.coord.to_pixel(1.0);
                    HexJson {
                        q: hex.coord.q,
                        r: hex.coord.r,
                        resource: hex.resource,
                        number: hex.number,
                        x,
                        y,
                    }
                })
                .collect(),
            corners: self
                .corners
                .iter()
                .map(|corner| CornerJson {
                    hex_q: corner.coord.hex.q,
                    hex_r: corner.coord.hex.r,
                    direction: corner.coord.direction,
                    house: corner.house,
                    hexes: corner.hexes.values().map(|id| self.hex(id).coord).collect(),
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|edge| EdgeJson {
                    hex_q: edge.coord.hex.q,
                    hex_r: edge.coord.hex.r,
                    direction: edge.coord.direction,
                    road: edge.road,
                    corners: edge.corners.values().map(|id| self.corner(id).coord).collect(),
                })
                .collect(),
        }
    }
}

/// JSON-friendly map representation with arrays instead of HashMaps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapJson {
    pub radius: u32,
    pub hexes: Vec<HexJson>,
    pub corners: Vec<CornerJson>,
    pub edges: Vec<EdgeJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexJson {
    pub q: i32,
    pub r: i32,
    pub resource: Resource,
    pub number: u8,
    /// Centre for a hex of unit size
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CornerJson {
    pub hex_q: i32,
    pub hex_r: i32,
    pub direction: HexCornerDirection,
    pub house: Option<House>,
    pub hexes: Vec<HexCoord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeJson {
    pub hex_q: i32,
    pub hex_r: i32,
    pub direction: HexEdgeDirection,
    pub road: Option<Road>,
    pub corners: Vec<CornerCoord>,
}
