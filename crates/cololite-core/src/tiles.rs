//! Resources and the random (resource, number) assignment of hexes.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Resource produced by a hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resource {
    /// Desert - produces nothing
    None,
    Wood,
    Brick,
    Sheep,
    Wheat,
    Stone,
}

impl Resource {
    /// Resources that can be produced, held and traded
    pub const PRODUCIBLE: [Resource; 5] = [
        Resource::Wood,
        Resource::Brick,
        Resource::Sheep,
        Resource::Wheat,
        Resource::Stone,
    ];

    /// Whether a hex of this resource ever yields anything
    pub fn is_producible(&self) -> bool {
        !matches!(self, Resource::None)
    }
}

/// Dice number of the desert hex
pub const DESERT_NUMBER: u8 = 7;

/// Resources for the producing hexes: 4 wheat, 4 wood, 4 sheep, 3 brick,
/// 3 stone. Ordered so that any prefix stays close to an even mix.
pub const RESOURCE_TABLE: [Resource; 18] = [
    Resource::Wheat,
    Resource::Wood,
    Resource::Sheep,
    Resource::Brick,
    Resource::Stone,
    Resource::Wheat,
    Resource::Wood,
    Resource::Sheep,
    Resource::Brick,
    Resource::Stone,
    Resource::Wheat,
    Resource::Wood,
    Resource::Sheep,
    Resource::Brick,
    Resource::Stone,
    Resource::Wheat,
    Resource::Wood,
    Resource::Sheep,
];

/// Numbers for the producing hexes: two each of 2-6 and 8-12. The rare
/// 2 and 12 come last, so the 18 hexes of a radius-2 map get the classic
/// distribution with a single 2 and a single 12.
pub const NUMBER_TABLE: [u8; 20] = [6, 8, 5, 9, 4, 10, 3, 11, 2, 12, 6, 8, 5, 9, 4, 10, 3, 11, 2, 12];

/// What a single hex produces and on which roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileAssignment {
    pub resource: Resource,
    pub number: u8,
}

impl TileAssignment {
    /// The desert: no resource, number 7
    pub const DESERT: TileAssignment = TileAssignment {
        resource: Resource::None,
        number: DESERT_NUMBER,
    };

    pub fn is_desert(&self) -> bool {
        self.resource == Resource::None
    }
}

/// Shuffled assignments for `hex_count` hexes: one desert somewhere in the
/// list, every other hex pairing a resource with a number.
///
/// Both tables are taken in order, repeated when the map outgrows them, and
/// cut to `hex_count - 1` entries before shuffling.
pub fn tile_assignments<R: Rng + ?Sized>(hex_count: usize, rng: &mut R) -> Vec<TileAssignment> {
    if hex_count == 0 {
        return Vec::new();
    }
    let producing = hex_count - 1;

    let mut resources: Vec<Resource> = RESOURCE_TABLE.iter().copied().cycle().take(producing).collect();
    let mut numbers: Vec<u8> = NUMBER_TABLE.iter().copied().cycle().take(producing).collect();
    resources.shuffle(rng);
    numbers.shuffle(rng);

    let mut assignments: Vec<TileAssignment> = resources
        .into_iter()
        .zip(numbers)
        .map(|(resource, number)| TileAssignment { resource, number })
        .collect();
    assignments.push(TileAssignment::DESERT);
    assignments.shuffle(rng);
    assignments
}
