use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod movegen;
pub mod rules;
pub mod snapshot;
pub mod types;

use crate::config::RulesConfig;
use crate::game::{GameState, MoveOutcome};
use crate::types::{GoalMode, Position, TurnReport};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// One game owned by the presentation layer.
#[wasm_bindgen]
pub struct CornersGame {
    state: GameState,
}

#[wasm_bindgen]
impl CornersGame {
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str) -> Result<CornersGame, JsValue> {
        Ok(Self {
            state: GameState::new(parse_mode(mode)?),
        })
    }

    /// `config` is a partial `RulesConfig` object; missing fields take defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(mode: &str, config: JsValue) -> Result<CornersGame, JsValue> {
        let config: RulesConfig = if config.is_undefined() || config.is_null() {
            RulesConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            state: GameState::with_config(parse_mode(mode)?, config),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.state.to_view())?)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self, x: u8, y: u8) -> Result<JsValue, JsValue> {
        let from = Position::new(x, y).map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&self.state.legal_moves(from))?)
    }

    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(
        &mut self,
        from_x: u8,
        from_y: u8,
        to_x: u8,
        to_y: u8,
    ) -> Result<JsValue, JsValue> {
        let from = Position::new(from_x, from_y).map_err(to_js_error)?;
        let to = Position::new(to_x, to_y).map_err(to_js_error)?;
        let outcome = self.state.apply_move(from, to).map_err(to_js_error)?;
        self.report(outcome)
    }

    pub fn pass(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.state.pass().map_err(to_js_error)?;
        self.report(outcome)
    }

    pub fn reset(&mut self, mode: &str) -> Result<(), JsValue> {
        self.state.reset(parse_mode(mode)?);
        Ok(())
    }

    pub fn save(&self) -> Vec<u8> {
        snapshot::encode(&self.state)
    }

    pub fn load(bytes: &[u8]) -> Result<CornersGame, JsValue> {
        let state = snapshot::decode(bytes).map_err(to_js_error)?;
        Ok(Self { state })
    }
}

impl CornersGame {
    fn report(&self, outcome: MoveOutcome) -> Result<JsValue, JsValue> {
        let (outcome, side) = match outcome {
            MoveOutcome::Continue(side) => ("continue", side.code()),
            MoveOutcome::Won(side) => ("won", side.code()),
            MoveOutcome::Draw => ("draw", 0),
        };
        let report = TurnReport {
            outcome: outcome.to_string(),
            side,
            state: self.state.to_view(),
        };
        Ok(serde_wasm_bindgen::to_value(&report)?)
    }
}

fn parse_mode(mode: &str) -> Result<GoalMode, JsValue> {
    mode.parse::<GoalMode>().map_err(to_js_error)
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
