//! Browser bindings.
//!
//! Values cross the boundary as plain JS objects via `serde-wasm-bindgen`:
//! participants as `string[]`, exclusions and assignments as
//! `{ giver, receiver }[]`.

use wasm_bindgen::prelude::*;

use crate::matcher::{Exclusion, MatchConfig, MatchProblem, MatchRunner};
use crate::roster::parse_participants_str;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Generates assignments, returning `null` when the rules cannot be met.
#[wasm_bindgen(js_name = generateAssignments)]
pub fn generate_assignments(
    participants: JsValue,
    exclusions: JsValue,
    seed: Option<u64>,
) -> Result<JsValue, JsValue> {
    let participants: Vec<String> =
        serde_wasm_bindgen::from_value(participants).map_err(js_error)?;
    let exclusions: Vec<Exclusion> = if exclusions.is_undefined() || exclusions.is_null() {
        Vec::new()
    } else {
        serde_wasm_bindgen::from_value(exclusions).map_err(js_error)?
    };

    let config = MatchConfig {
        seed,
        ..MatchConfig::default()
    };

    let problem = MatchProblem::new(&participants, &exclusions);
    match MatchRunner::run(&problem, &config).into_assignments() {
        Some(assignments) => serde_wasm_bindgen::to_value(&assignments).map_err(js_error),
        None => Ok(JsValue::NULL),
    }
}

/// Parses participant CSV into `{ name, email }[]`.
#[wasm_bindgen(js_name = parseParticipantsCsv)]
pub fn parse_participants_csv(text: &str) -> Result<JsValue, JsValue> {
    let import = parse_participants_str(text).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&import.participants).map_err(js_error)
}
