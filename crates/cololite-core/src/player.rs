//! Player resources.
//!
//! This module contains:
//! - `ResourceHand` for counting the five producible resources
//! - Building costs
//! - The starting stock every player begins with

use crate::tiles::Resource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Player identifier (index into the game's hands)
pub type PlayerId = u8;

/// Amount of each resource a player starts with
pub const STARTING_RESOURCES: u32 = 20;

/// A hand of resources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHand {
    pub wood: u32,
    pub brick: u32,
    pub sheep: u32,
    pub wheat: u32,
    pub stone: u32,
}

impl ResourceHand {
    /// Create an empty hand
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand with specific amounts
    pub fn with_amounts(wood: u32, brick: u32, sheep: u32, wheat: u32, stone: u32) -> Self {
        Self {
            wood,
            brick,
            sheep,
            wheat,
            stone,
        }
    }

    /// The same amount of every resource
    pub fn uniform(amount: u32) -> Self {
        Self::with_amounts(amount, amount, amount, amount, amount)
    }

    /// Hand every player starts the game with
    pub fn starting() -> Self {
        Self::uniform(STARTING_RESOURCES)
    }

    /// Total number of resource cards
    pub fn total(&self) -> u32 {
        self.wood + self.brick + self.sheep + self.wheat + self.stone
    }

    /// Check if hand is empty
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Get count of a specific resource. The desert resource is always 0.
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::None => 0,
            Resource::Wood => self.wood,
            Resource::Brick => self.brick,
            Resource::Sheep => self.sheep,
            Resource::Wheat => self.wheat,
            Resource::Stone => self.stone,
        }
    }

    fn slot_mut(&mut self, resource: Resource) -> Option<&mut u32> {
        match resource {
            Resource::None => None,
            Resource::Wood => Some(&mut self.wood),
            Resource::Brick => Some(&mut self.brick),
            Resource::Sheep => Some(&mut self.sheep),
            Resource::Wheat => Some(&mut self.wheat),
            Resource::Stone => Some(&mut self.stone),
        }
    }

    /// Set count of a specific resource (no-op for the desert resource)
    pub fn set(&mut self, resource: Resource, count: u32) {
        if let Some(slot) = self.slot_mut(resource) {
            *slot = count;
        }
    }

    /// Add resources to hand (no-op for the desert resource)
    pub fn add(&mut self, resource: Resource, amount: u32) {
        if let Some(slot) = self.slot_mut(resource) {
            *slot += amount;
        }
    }

    /// Add another hand to this one
    pub fn add_hand(&mut self, other: &ResourceHand) {
        self.wood += other.wood;
        self.brick += other.brick;
        self.sheep += other.sheep;
        self.wheat += other.wheat;
        self.stone += other.stone;
    }

    /// Check if can afford a cost
    pub fn can_afford(&self, cost: &ResourceHand) -> bool {
        self.wood >= cost.wood
            && self.brick >= cost.brick
            && self.sheep >= cost.sheep
            && self.wheat >= cost.wheat
            && self.stone >= cost.stone
    }

    /// Subtract a cost (panics if insufficient)
    pub fn subtract(&mut self, cost: &ResourceHand) {
        assert!(self.can_afford(cost), "Cannot afford this cost");
        self.wood -= cost.wood;
        self.brick -= cost.brick;
        self.sheep -= cost.sheep;
        self.wheat -= cost.wheat;
        self.stone -= cost.stone;
    }

    /// Try to subtract, returning false if insufficient
    pub fn try_subtract(&mut self, cost: &ResourceHand) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.subtract(cost);
        true
    }

    /// Create a hand with a single resource
    pub fn single(resource: Resource, amount: u32) -> Self {
        let mut hand = Self::new();
        hand.add(resource, amount);
        hand
    }

    /// Convert to HashMap for iteration, skipping empty slots
    pub fn to_map(&self) -> HashMap<Resource, u32> {
        Resource::PRODUCIBLE
            .iter()
            .map(|&resource| (resource, self.get(resource)))
            .filter(|&(_, count)| count > 0)
            .collect()
    }
}

/// Building costs
pub mod costs {
    use super::ResourceHand;

    /// Cost to build a road: 1 wood, 1 brick
    pub fn road() -> ResourceHand {
        ResourceHand::with_amounts(1, 1, 0, 0, 0)
    }

    /// Cost to build a settlement: 1 wood, 1 brick, 1 sheep, 1 wheat
    pub fn settlement() -> ResourceHand {
        ResourceHand::with_amounts(1, 1, 1, 1, 0)
    }

    /// Cost to upgrade a settlement to a town: 2 wheat, 3 stone
    pub fn town() -> ResourceHand {
        ResourceHand::with_amounts(0, 0, 0, 2, 3)
    }
}
