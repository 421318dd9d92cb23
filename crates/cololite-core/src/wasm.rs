//! WebAssembly bindings for the Cololite map and game state.
//!
//! Corners and edges are addressed from JavaScript by any hex touching them
//! plus a direction index, and resolved to the map's canonical records here.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::game::{GameError, GameState};
#[cfg(feature = "wasm")]
use crate::hex::{CornerCoord, EdgeCoord, HexCoord, HexCornerDirection, HexDirection, HexEdgeDirection};
#[cfg(feature = "wasm")]
use crate::map::{CornerId, EdgeId, Map};
#[cfg(feature = "wasm")]
use crate::tiles::Resource;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
}

#[cfg(feature = "wasm")]
fn game_error(error: GameError) -> JsValue {
    JsValue::from_str(&format!("Action failed: {}", error))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create a new game on a freshly built map of the given radius
    #[wasm_bindgen(constructor)]
    pub fn new(radius: u32, player_count: u8) -> WasmGame {
        WasmGame {
            state: GameState::new(Map::build_map_of_size(radius), player_count),
        }
    }

    /// Get the map snapshot as JSON
    #[wasm_bindgen(js_name = getMap)]
    pub fn get_map(&self) -> String {
        serde_json::to_string(&self.state.map().to_json_friendly()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get a player's resources as JSON
    #[wasm_bindgen(js_name = getHand)]
    pub fn get_hand(&self, player: u8) -> Result<String, JsValue> {
        let hand = self.state.hand(player).map_err(game_error)?;
        serde_json::to_string(hand).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get victory points for a player
    #[wasm_bindgen(js_name = getVictoryPoints)]
    pub fn get_victory_points(&self, player: u8) -> u32 {
        self.state.victory_points(player)
    }

    #[wasm_bindgen(js_name = placeFreeHouse)]
    pub fn place_free_house(&mut self, player: u8, q: i32, r: i32, corner: usize) -> Result<(), JsValue> {
        let corner = self.corner_id(q, r, corner)?;
        self.state.place_free_house(player, corner).map_err(game_error)
    }

    #[wasm_bindgen(js_name = placeFreeRoad)]
    pub fn place_free_road(&mut self, player: u8, q: i32, r: i32, edge: usize) -> Result<(), JsValue> {
        let edge = self.edge_id(q, r, edge)?;
        self.state.place_free_road(player, edge).map_err(game_error)
    }

    #[wasm_bindgen(js_name = buildHouse)]
    pub fn build_house(&mut self, player: u8, q: i32, r: i32, corner: usize) -> Result<(), JsValue> {
        let corner = self.corner_id(q, r, corner)?;
        self.state.build_house(player, corner).map_err(game_error)
    }

    #[wasm_bindgen(js_name = upgradeHouse)]
    pub fn upgrade_house(&mut self, player: u8, q: i32, r: i32, corner: usize) -> Result<(), JsValue> {
        let corner = self.corner_id(q, r, corner)?;
        self.state.upgrade_house(player, corner).map_err(game_error)
    }

    #[wasm_bindgen(js_name = buildRoad)]
    pub fn build_road(&mut self, player: u8, q: i32, r: i32, edge: usize) -> Result<(), JsValue> {
        let edge = self.edge_id(q, r, edge)?;
        self.state.build_road(player, edge).map_err(game_error)
    }

    /// Roll the dice; returns `{ "roll": [a, b], "production": {...} }` JSON
    #[wasm_bindgen(js_name = rollDice)]
    pub fn roll_dice(&mut self) -> String {
        let mut rng = rand::thread_rng();
        let (roll, production) = self.state.roll_dice(&mut rng);
        serde_json::json!({
            "roll": [roll.first, roll.second],
            "production": production,
        })
        .to_string()
    }

    /// Trade with the bank; resources are JSON strings such as `"Wood"`
    #[wasm_bindgen(js_name = bankTrade)]
    pub fn bank_trade(&mut self, player: u8, sell_json: &str, buy_json: &str, quantity: u32) -> Result<(), JsValue> {
        let sell: Resource = serde_json::from_str(sell_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid resource: {}", e)))?;
        let buy: Resource = serde_json::from_str(buy_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid resource: {}", e)))?;
        self.state.apply_trade(player, sell, buy, quantity).map_err(game_error)
    }
}

#[cfg(feature = "wasm")]
impl WasmGame {
    fn corner_id(&self, q: i32, r: i32, direction: usize) -> Result<CornerId, JsValue> {
        let raw = CornerCoord::new(HexCoord::new(q, r), HexCornerDirection::from_index(direction));
        self.state
            .map()
            .corner_at(&raw)
            .map(|corner| corner.id())
            .ok_or_else(|| JsValue::from_str("No such corner"))
    }

    fn edge_id(&self, q: i32, r: i32, direction: usize) -> Result<EdgeId, JsValue> {
        let raw = EdgeCoord::new(HexCoord::new(q, r), HexEdgeDirection::from_index(direction));
        self.state
            .map()
            .edge_at(&raw)
            .map(|edge| edge.id())
            .ok_or_else(|| JsValue::from_str("No such edge"))
    }
}
