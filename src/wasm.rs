//! Thin bindings so a JavaScript host can drive a [`Level`] directly.
//!
//! Colors and puzzle types cross the boundary as their lowercase names, positions as plain coordinates, moves as `[x, y]` arrays.

use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::builder::LevelBuilder;
use crate::level::Level;
use crate::node::{Color, Node, Position, Uid};
use crate::rules::PuzzleType;
use crate::sim::{ClaimOutcome, Side};

/// Accumulates level data handed over by the host's loader.
#[wasm_bindgen]
pub struct WasmLevelBuilder {
    inner: LevelBuilder,
}

#[wasm_bindgen]
impl WasmLevelBuilder {
    #[wasm_bindgen(constructor)]
    pub fn new(puzzle: &str) -> Result<WasmLevelBuilder, JsError> {
        Ok(Self { inner: LevelBuilder::new(PuzzleType::from_str(puzzle)?) })
    }

    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, uid: Uid, x: f32, y: f32, z: f32, mirror: Option<Uid>) {
        let mut node = Node::new(uid, (x, y, z));
        node.mirror = mirror;
        self.inner.add_node(node);
    }

    pub fn connect(&mut self, a: Uid, b: Uid) {
        self.inner.connect(a, b);
    }

    /// Consume the builder. Every load problem is joined into the thrown error message.
    pub fn build(self, seed: Option<u64>) -> Result<WasmLevel, JsError> {
        let level = self.inner.build().map_err(|reasons| {
            JsError::new(&reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))
        })?;
        // seeded from Math.random; no os entropy on wasm32
        let seed = seed.unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);

        Ok(WasmLevel { inner: level, rng: SmallRng::seed_from_u64(seed) })
    }
}

/// A playable level owned by the host.
#[wasm_bindgen]
pub struct WasmLevel {
    inner: Level,
    rng: SmallRng,
}

#[wasm_bindgen]
impl WasmLevel {
    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, uid: Uid, color: &str) -> Result<bool, JsError> {
        Ok(self.inner.set_color(uid, Color::from_str(color)?))
    }

    #[wasm_bindgen(js_name = setColorMirrored)]
    pub fn set_color_mirrored(&mut self, uid: Uid, color: &str) -> Result<bool, JsError> {
        Ok(self.inner.set_color_mirrored(uid, Color::from_str(color)?))
    }

    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&mut self, uid: Uid, x: f32, y: f32, z: f32) -> bool {
        self.inner.set_position(uid, Position::new(x, y, z))
    }

    pub fn color(&self, uid: Uid) -> Option<String> {
        self.inner.node(uid).map(|node| node.color.to_string())
    }

    /// `[x, y, z]`, or an empty array for an unknown uid.
    pub fn position(&self, uid: Uid) -> Vec<f32> {
        self.inner.node(uid)
            .map(|node| vec![node.position.x, node.position.y, node.position.z])
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = mirrorUid)]
    pub fn mirror_uid(&self, uid: Uid) -> Option<Uid> {
        self.inner.mirror_uid(uid)
    }

    pub fn neighbours(&self, uid: Uid) -> Vec<Uid> {
        self.inner.neighbours(uid)
    }

    #[wasm_bindgen(js_name = checkSolved)]
    pub fn check_solved(&self) -> bool {
        self.inner.check_solved()
    }

    #[wasm_bindgen(js_name = isComplete)]
    pub fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    pub fn step(&mut self, uid: Uid) -> Result<(), JsError> {
        Ok(self.inner.step(uid)?)
    }

    #[wasm_bindgen(js_name = undoStep)]
    pub fn undo_step(&mut self) -> Option<Uid> {
        self.inner.undo_step()
    }

    #[wasm_bindgen(js_name = isLegalMove)]
    pub fn is_legal_move(&self, x: Uid, y: Uid) -> bool {
        self.inner.is_legal_move(x, y)
    }

    /// Claim for the player. Returns `true` if the claim closed the player's own triangle.
    pub fn claim(&mut self, x: Uid, y: Uid) -> Result<bool, JsError> {
        Ok(self.inner.claim(Side::Player, x, y)? == ClaimOutcome::Triangle)
    }

    /// The opponent's answer as `[x, y, lost]`, or an empty array once no move is left.
    pub fn respond(&mut self) -> Result<Vec<Uid>, JsError> {
        Ok(self.inner.respond(&mut self.rng)?
            .map(|((x, y), outcome)| vec![x, y, Uid::from(outcome == ClaimOutcome::Triangle)])
            .unwrap_or_default())
    }

    /// This game's moves as a flat uid sequence.
    pub fn history(&self) -> Vec<Uid> {
        self.inner.history().flat()
    }
}
