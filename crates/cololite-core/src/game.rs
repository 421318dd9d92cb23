//! Game state: the map plus everything players own.
//!
//! This module contains:
//! - `Roll` and the `RollManager` dice deck
//! - `GameState`, the single owner of all house and road mutation
//! - Placement rules (distance rule, road connectivity)
//! - Production on a roll and 4:1 bank trading
//!
//! Corner and edge ids passed in must come from the game's own map.

use crate::map::{CornerId, EdgeId, House, Map, Road};
use crate::player::{costs, PlayerId, ResourceHand};
use crate::tiles::Resource;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

/// Cards given to the bank for one card of another resource
pub const TRADE_RATE: u32 = 4;

/// Errors that can occur when applying a game action
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("Corner already has a house")]
    CornerOccupied,

    #[error("Edge already has a road")]
    EdgeOccupied,

    #[error("Too close to another house")]
    TooCloseToHouse,

    #[error("Not connected to your roads or houses")]
    NotConnected,

    #[error("No settlement of yours to upgrade")]
    NoHouseToUpgrade,

    #[error("Cannot afford this")]
    CannotAfford,

    #[error("Invalid trade")]
    InvalidTrade,

    #[error("No house has been placed yet")]
    NoLastBuiltCorner,
}

/// The outcome of throwing two dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roll {
    pub first: u8,
    pub second: u8,
}

impl Roll {
    pub fn new(first: u8, second: u8) -> Self {
        Self { first, second }
    }

    /// Sum of both dice (2-12)
    pub fn total(&self) -> u8 {
        self.first + self.second
    }

    /// Every ordered pair of two six-sided dice
    pub fn all() -> Vec<Roll> {
        (1..=6)
            .flat_map(|first| (1..=6).map(move |second| Roll::new(first, second)))
            .collect()
    }
}

/// A deck of all 36 dice outcomes.
///
/// Rolls are drawn from a shuffled queue and moved to a discard pile; once
/// the queue runs out the discard pile is shuffled back in. Over one pass of
/// the deck every outcome comes up exactly once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RollManager {
    rolls_queue: VecDeque<Roll>,
    discard_pile: Vec<Roll>,
}

impl RollManager {
    /// A freshly shuffled deck
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut manager = Self::default();
        manager.initialize_rolls(rng);
        manager
    }

    /// Reset to a full shuffled deck with an empty discard pile
    pub fn initialize_rolls<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut rolls = Roll::all();
        rolls.shuffle(rng);
        self.rolls_queue = rolls.into();
        self.discard_pile.clear();
    }

    /// Take the next roll, reshuffling the discard pile when the queue is empty
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Roll {
        loop {
            if let Some(roll) = self.rolls_queue.pop_front() {
                self.discard_pile.push(roll);
                return roll;
            }
            self.reshuffle(rng);
        }
    }

    fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut pile = std::mem::take(&mut self.discard_pile);
        if pile.is_empty() {
            pile = Roll::all();
        }
        pile.shuffle(rng);
        self.rolls_queue = pile.into();
    }

    /// Rolls left before the next reshuffle
    pub fn remaining(&self) -> usize {
        self.rolls_queue.len()
    }

    /// Rolls drawn since the last reshuffle
    pub fn discarded(&self) -> &[Roll] {
        &self.discard_pile
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    map: Map,
    hands: Vec<ResourceHand>,
    roll_manager: RollManager,
    last_built_corner: Option<CornerId>,
}

impl GameState {
    /// Create a new game on `map` for `player_count` players
    pub fn new(map: Map, player_count: u8) -> Self {
        let mut rng = rand::thread_rng();
        Self::with_rng(map, player_count, &mut rng)
    }

    /// Create a new game with a provided RNG for the roll deck
    pub fn with_rng<R: Rng + ?Sized>(map: Map, player_count: u8, rng: &mut R) -> Self {
        Self {
            map,
            hands: (0..player_count).map(|_| ResourceHand::starting()).collect(),
            roll_manager: RollManager::new(rng),
            last_built_corner: None,
        }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player_count(&self) -> u8 {
        self.hands.len() as u8
    }

    pub fn roll_manager(&self) -> &RollManager {
        &self.roll_manager
    }

    /// Corner of the most recently placed or built house
    pub fn last_built_corner(&self) -> Option<CornerId> {
        self.last_built_corner
    }

    /// Resources held by `player`
    pub fn hand(&self, player: PlayerId) -> Result<&ResourceHand, GameError> {
        self.hands
            .get(usize::from(player))
            .ok_or(GameError::UnknownPlayer(player))
    }

    fn hand_mut(&mut self, player: PlayerId) -> Result<&mut ResourceHand, GameError> {
        self.hands
            .get_mut(usize::from(player))
            .ok_or(GameError::UnknownPlayer(player))
    }

    /// Victory points from `player`'s houses
    pub fn victory_points(&self, player: PlayerId) -> u32 {
        self.map
            .corners()
            .filter_map(|corner| corner.house())
            .filter(|house| house.owner() == player)
            .map(|house| house.victory_points())
            .sum()
    }

    // ==================== Validation ====================

    /// Whether `corner` is free and no house sits one edge away
    pub fn check_house_spot(&self, corner: CornerId) -> Result<(), GameError> {
        if self.map.corner(corner).house().is_some() {
            return Err(GameError::CornerOccupied);
        }
        let crowded = self
            .map
            .corner_neighbors(corner)
            .into_iter()
            .any(|neighbor| self.map.corner(neighbor).house().is_some());
        if crowded {
            return Err(GameError::TooCloseToHouse);
        }
        Ok(())
    }

    /// Whether `player` may build a house on `corner`: a valid spot touched
    /// by one of the player's roads
    pub fn check_build_house(&self, player: PlayerId, corner: CornerId) -> Result<(), GameError> {
        self.hand(player)?;
        self.check_house_spot(corner)?;
        if !self.has_road_at(player, corner) {
            return Err(GameError::NotConnected);
        }
        Ok(())
    }

    /// Whether `player` may build a road on `edge`: free, and reaching one of
    /// the player's houses, or one of the player's roads through a corner no
    /// opponent holds
    pub fn check_build_road(&self, player: PlayerId, edge: EdgeId) -> Result<(), GameError> {
        self.hand(player)?;
        if self.map.edge(edge).road().is_some() {
            return Err(GameError::EdgeOccupied);
        }
        let connected = self.map.edge(edge).corners().values().any(|corner| {
            match self.map.corner(corner).house() {
                Some(house) => house.owner() == player,
                None => self.has_road_at(player, corner),
            }
        });
        if !connected {
            return Err(GameError::NotConnected);
        }
        Ok(())
    }

    fn has_road_at(&self, player: PlayerId, corner: CornerId) -> bool {
        self.map
            .corner(corner)
            .edges()
            .values()
            .any(|edge| self.map.edge(edge).road() == Some(Road { owner: player }))
    }

    /// Houses `player` could build right now, ignoring cost
    pub fn valid_house_spots(&self, player: PlayerId) -> Vec<CornerId> {
        self.map
            .corners()
            .map(|corner| corner.id())
            .filter(|&corner| self.check_build_house(player, corner).is_ok())
            .collect()
    }

    /// Roads `player` could build right now, ignoring cost
    pub fn valid_road_spots(&self, player: PlayerId) -> Vec<EdgeId> {
        self.map
            .edges()
            .map(|edge| edge.id())
            .filter(|&edge| self.check_build_road(player, edge).is_ok())
            .collect()
    }

    // ==================== Building ====================

    /// Place a settlement without paying or needing a road (opening placement)
    pub fn place_free_house(&mut self, player: PlayerId, corner: CornerId) -> Result<(), GameError> {
        self.hand(player)?;
        self.check_house_spot(corner)?;
        self.map.set_house(corner, Some(House::Settlement(player)));
        self.last_built_corner = Some(corner);
        tracing::info!(player, corner = corner.0, "free house placed");
        Ok(())
    }

    /// Place a road without paying; it must touch the last placed house
    pub fn place_free_road(&mut self, player: PlayerId, edge: EdgeId) -> Result<(), GameError> {
        self.hand(player)?;
        let anchor = self.last_built_corner.ok_or(GameError::NoLastBuiltCorner)?;
        if self.map.edge(edge).road().is_some() {
            return Err(GameError::EdgeOccupied);
        }
        let owned = self.map.corner(anchor).house().map(|house| house.owner()) == Some(player);
        if !owned || !self.map.edge(edge).corners().values().any(|corner| corner == anchor) {
            return Err(GameError::NotConnected);
        }
        self.map.set_road(edge, Some(Road { owner: player }));
        tracing::info!(player, edge = edge.0, "free road placed");
        Ok(())
    }

    /// Build a settlement, paying its cost
    pub fn build_house(&mut self, player: PlayerId, corner: CornerId) -> Result<(), GameError> {
        self.check_build_house(player, corner)?;
        self.pay(player, &costs::settlement())?;
        self.map.set_house(corner, Some(House::Settlement(player)));
        self.last_built_corner = Some(corner);
        tracing::info!(player, corner = corner.0, "house built");
        Ok(())
    }

    /// Upgrade one of `player`'s settlements to a town, paying its cost
    pub fn upgrade_house(&mut self, player: PlayerId, corner: CornerId) -> Result<(), GameError> {
        self.hand(player)?;
        if self.map.corner(corner).house() != Some(House::Settlement(player)) {
            return Err(GameError::NoHouseToUpgrade);
        }
        self.pay(player, &costs::town())?;
        self.map.set_house(corner, Some(House::Town(player)));
        self.last_built_corner = Some(corner);
        tracing::info!(player, corner = corner.0, "house upgraded");
        Ok(())
    }

    /// Build a road, paying its cost
    pub fn build_road(&mut self, player: PlayerId, edge: EdgeId) -> Result<(), GameError> {
        self.check_build_road(player, edge)?;
        self.pay(player, &costs::road())?;
        self.map.set_road(edge, Some(Road { owner: player }));
        tracing::info!(player, edge = edge.0, "road built");
        Ok(())
    }

    fn pay(&mut self, player: PlayerId, cost: &ResourceHand) -> Result<(), GameError> {
        if self.hand_mut(player)?.try_subtract(cost) {
            Ok(())
        } else {
            Err(GameError::CannotAfford)
        }
    }

    // ==================== Production ====================

    /// Resources each player would receive for a roll totalling `total`
    pub fn production_for_roll(&self, total: u8) -> HashMap<PlayerId, ResourceHand> {
        let mut production: HashMap<PlayerId, ResourceHand> = HashMap::new();
        for hex in self.map.hexes() {
            if hex.number != total || !hex.resource.is_producible() {
                continue;
            }
            for corner in hex.corners().values() {
                if let Some(house) = self.map.corner(corner).house() {
                    production
                        .entry(house.owner())
                        .or_default()
                        .add(hex.resource, house.resource_multiplier());
                }
            }
        }
        production
    }

    /// Draw the next roll and hand out what it produces
    pub fn roll_dice<R: Rng + ?Sized>(&mut self, rng: &mut R) -> (Roll, HashMap<PlayerId, ResourceHand>) {
        let roll = self.roll_manager.draw(rng);
        let production = self.production_for_roll(roll.total());
        for (&player, gained) in &production {
            if let Some(hand) = self.hands.get_mut(usize::from(player)) {
                hand.add_hand(gained);
            }
        }
        tracing::info!(
            first = roll.first,
            second = roll.second,
            producing_players = production.len(),
            "dice rolled"
        );
        (roll, production)
    }

    // ==================== Trading ====================

    /// Whether `player` holds enough of `sell` for at least one bank trade
    pub fn can_trade(&self, player: PlayerId, sell: Resource) -> bool {
        sell.is_producible()
            && self
                .hand(player)
                .is_ok_and(|hand| hand.get(sell) >= TRADE_RATE)
    }

    /// How many `buy` cards `player` could get for their `sell` cards
    pub fn max_trade(&self, player: PlayerId, sell: Resource, buy: Resource) -> u32 {
        if sell == buy || !sell.is_producible() || !buy.is_producible() {
            return 0;
        }
        self.hand(player)
            .map(|hand| hand.get(sell) / TRADE_RATE)
            .unwrap_or(0)
    }

    /// Give `quantity * TRADE_RATE` of `sell` to the bank for `quantity` of `buy`
    pub fn apply_trade(
        &mut self,
        player: PlayerId,
        sell: Resource,
        buy: Resource,
        quantity: u32,
    ) -> Result<(), GameError> {
        self.hand(player)?;
        if quantity == 0 || quantity > self.max_trade(player, sell, buy) {
            return Err(GameError::InvalidTrade);
        }
        let hand = self.hand_mut(player)?;
        hand.subtract(&ResourceHand::single(sell, quantity * TRADE_RATE));
        hand.add(buy, quantity);
        tracing::info!(player, ?sell, ?buy, quantity, "bank trade");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::{HexCoord, HexCornerDirection, HexEdgeDirection};
    use crate::player::STARTING_RESOURCES;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn new_game() -> GameState {
        let mut rng = StdRng::seed_from_u64(42);
        let map = Map::build_map_of_size_with_rng(2, &mut rng);
        GameState::with_rng(map, 2, &mut rng)
    }

    fn center_corner(game: &GameState, direction: HexCornerDirection) -> CornerId {
        game.map()
            .hex_at(&HexCoord::ORIGIN)
            .and_then(|hex| hex.corner(direction))
            .unwrap()
    }

    fn center_edge(game: &GameState, direction: HexEdgeDirection) -> EdgeId {
        game.map()
            .hex_at(&HexCoord::ORIGIN)
            .and_then(|hex| hex.edge(direction))
            .unwrap()
    }

    #[test]
    fn test_roll_deck_covers_every_outcome() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut manager = RollManager::new(&mut rng);
        assert_eq!(manager.remaining(), 36);

        let drawn: HashSet<_> = (0..36).map(|_| manager.draw(&mut rng)).collect();
        assert_eq!(drawn.len(), 36);
        assert_eq!(manager.remaining(), 0);
        assert_eq!(manager.discarded().len(), 36);

        manager.draw(&mut rng);
        assert_eq!(manager.remaining(), 35);
        assert_eq!(manager.discarded().len(), 1);
    }

    #[test]
    fn test_roll_totals() {
        let rolls = Roll::all();
        assert_eq!(rolls.len(), 36);
        assert_eq!(rolls.iter().filter(|r| r.total() == 7).count(), 6);
        assert_eq!(rolls.iter().filter(|r| r.total() == 2).count(), 1);
        assert!(rolls.iter().all(|r| (2..=12).contains(&r.total())));
    }

    #[test]
    fn test_starting_hands() {
        let game = new_game();
        assert_eq!(game.player_count(), 2);
        assert_eq!(game.hand(0).unwrap(), &ResourceHand::uniform(STARTING_RESOURCES));
        assert_eq!(game.hand(2), Err(GameError::UnknownPlayer(2)));
    }

    #[test]
    fn test_distance_rule() {
        let mut game = new_game();
        let corner = center_corner(&game, HexCornerDirection::Right);
        game.place_free_house(0, corner).unwrap();
        assert_eq!(game.last_built_corner(), Some(corner));

        assert_eq!(game.place_free_house(1, corner), Err(GameError::CornerOccupied));
        let adjacent = center_corner(&game, HexCornerDirection::BottomRight);
        assert_eq!(game.place_free_house(1, adjacent), Err(GameError::TooCloseToHouse));

        let two_away = center_corner(&game, HexCornerDirection::BottomLeft);
        assert_eq!(game.place_free_house(1, two_away), Ok(()));
    }

    #[test]
    fn test_free_road_must_touch_last_house() {
        let mut game = new_game();
        let edge = center_edge(&game, HexEdgeDirection::BottomRight);
        assert_eq!(game.place_free_road(0, edge), Err(GameError::NoLastBuiltCorner));

        game.place_free_house(0, center_corner(&game, HexCornerDirection::Right)).unwrap();
        let far = center_edge(&game, HexEdgeDirection::BottomLeft);
        assert_eq!(game.place_free_road(0, far), Err(GameError::NotConnected));
        assert_eq!(game.place_free_road(1, edge), Err(GameError::NotConnected));

        game.place_free_road(0, edge).unwrap();
        assert_eq!(game.place_free_road(0, edge), Err(GameError::EdgeOccupied));
        assert_eq!(game.hand(0).unwrap().total(), 5 * STARTING_RESOURCES);
    }

    #[test]
    fn test_build_road_and_house() {
        let mut game = new_game();
        game.place_free_house(0, center_corner(&game, HexCornerDirection::Right)).unwrap();
        game.place_free_road(0, center_edge(&game, HexEdgeDirection::BottomRight)).unwrap();

        // Not adjacent to anything of player 0.
        let bottom_left = center_edge(&game, HexEdgeDirection::BottomLeft);
        assert_eq!(game.build_road(0, bottom_left), Err(GameError::NotConnected));

        let bottom = center_edge(&game, HexEdgeDirection::Bottom);
        game.build_road(0, bottom).unwrap();
        assert_eq!(game.hand(0).unwrap().wood, STARTING_RESOURCES - 1);
        assert_eq!(game.hand(0).unwrap().brick, STARTING_RESOURCES - 1);

        // BottomRight corner is next to the house; BottomLeft is two roads away.
        let too_close = center_corner(&game, HexCornerDirection::BottomRight);
        assert_eq!(game.build_house(0, too_close), Err(GameError::TooCloseToHouse));
        let spot = center_corner(&game, HexCornerDirection::BottomLeft);
        assert_eq!(game.build_house(1, spot), Err(GameError::NotConnected));
        game.build_house(0, spot).unwrap();
        assert_eq!(game.last_built_corner(), Some(spot));
        assert_eq!(game.victory_points(0), 2);
        assert!(game.valid_house_spots(0).iter().all(|&c| c != spot));
    }

    #[test]
    fn test_opponent_house_blocks_road_extension() {
        let mut game = new_game();
        game.place_free_house(0, center_corner(&game, HexCornerDirection::Right)).unwrap();
        game.place_free_road(0, center_edge(&game, HexEdgeDirection::BottomRight)).unwrap();
        game.place_free_house(1, center_corner(&game, HexCornerDirection::BottomLeft)).unwrap();
        let blocker = center_corner(&game, HexCornerDirection::BottomRight);
        game.map.set_house(blocker, Some(House::Settlement(1)));

        // The only link to the Bottom edge runs through player 1's house.
        let bottom = center_edge(&game, HexEdgeDirection::Bottom);
        assert_eq!(game.build_road(0, bottom), Err(GameError::NotConnected));
        assert!(game.valid_road_spots(1).contains(&bottom));
    }

    #[test]
    fn test_upgrade_house() {
        let mut game = new_game();
        let corner = center_corner(&game, HexCornerDirection::Right);
        assert_eq!(game.upgrade_house(0, corner), Err(GameError::NoHouseToUpgrade));

        game.place_free_house(0, corner).unwrap();
        assert_eq!(game.upgrade_house(1, corner), Err(GameError::NoHouseToUpgrade));
        game.upgrade_house(0, corner).unwrap();
        assert_eq!(game.map().corner(corner).house(), Some(House::Town(0)));
        assert_eq!(game.hand(0).unwrap().stone, STARTING_RESOURCES - 3);
        assert_eq!(game.hand(0).unwrap().wheat, STARTING_RESOURCES - 2);
        assert_eq!(game.upgrade_house(0, corner), Err(GameError::NoHouseToUpgrade));
        assert_eq!(game.victory_points(0), 2);
    }

    #[test]
    fn test_cannot_afford() {
        let mut game = new_game();
        let corner = center_corner(&game, HexCornerDirection::Right);
        game.place_free_house(0, corner).unwrap();
        game.hands[0] = ResourceHand::new();
        assert_eq!(game.upgrade_house(0, corner), Err(GameError::CannotAfford));
        assert_eq!(game.map().corner(corner).house(), Some(House::Settlement(0)));
    }

    #[test]
    fn test_production_for_roll() {
        let mut game = new_game();
        let corner = center_corner(&game, HexCornerDirection::Right);
        game.place_free_house(0, corner).unwrap();

        let touching: Vec<_> = game
            .map()
            .corner(corner)
            .hexes()
            .values()
            .map(|id| game.map().hex(id).clone())
            .collect();
        let producer = touching.iter().find(|hex| !hex.is_desert()).unwrap();

        let production = game.production_for_roll(producer.number);
        let expected = touching
            .iter()
            .filter(|hex| hex.number == producer.number && hex.resource == producer.resource)
            .count() as u32;
        assert!(production[&0].get(producer.resource) >= expected);
        assert!(!production.contains_key(&1));

        game.upgrade_house(0, corner).unwrap();
        let doubled = game.production_for_roll(producer.number);
        assert_eq!(
            doubled[&0].get(producer.resource),
            2 * production[&0].get(producer.resource)
        );
        assert!(game.production_for_roll(7).is_empty());
    }

    #[test]
    fn test_roll_dice_pays_out() {
        let mut game = new_game();
        for direction in [HexCornerDirection::Right, HexCornerDirection::BottomLeft, HexCornerDirection::TopLeft] {
            let corner = center_corner(&game, direction);
            game.place_free_house(0, corner).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(9);
        let before = game.hand(0).unwrap().total();
        let mut gained = 0;
        for _ in 0..36 {
            let (roll, production) = game.roll_dice(&mut rng);
            assert!((2..=12).contains(&roll.total()));
            gained += production.get(&0).map_or(0, ResourceHand::total);
        }
        assert_eq!(game.hand(0).unwrap().total(), before + gained);
        // Every hex touching the centre gets its number rolled at least once.
        assert!(gained > 0);
    }

    #[test]
    fn test_trading() {
        let mut game = new_game();
        assert!(game.can_trade(0, Resource::Wood));
        assert!(!game.can_trade(0, Resource::None));
        assert_eq!(game.max_trade(0, Resource::Wood, Resource::Stone), 5);
        assert_eq!(game.max_trade(0, Resource::Wood, Resource::Wood), 0);

        game.apply_trade(0, Resource::Wood, Resource::Stone, 2).unwrap();
        let hand = game.hand(0).unwrap();
        assert_eq!(hand.wood, STARTING_RESOURCES - 8);
        assert_eq!(hand.stone, STARTING_RESOURCES + 2);

        assert_eq!(
            game.apply_trade(0, Resource::Wood, Resource::Stone, 4),
            Err(GameError::InvalidTrade)
        );
        assert_eq!(
            game.apply_trade(0, Resource::Wood, Resource::Stone, 0),
            Err(GameError::InvalidTrade)
        );
        assert_eq!(
            game.apply_trade(5, Resource::Wood, Resource::Stone, 1),
            Err(GameError::UnknownPlayer(5))
        );
    }

    #[test]
    fn test_error_serializes() {
        let json = serde_json::to_string(&GameError::UnknownPlayer(3)).unwrap();
        let back: GameError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GameError::UnknownPlayer(3));
        assert_eq!(GameError::TooCloseToHouse.to_string(), "Too close to another house");
    }
}
