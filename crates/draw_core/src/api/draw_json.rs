use super::rules_env::rules_from_env;
use crate::data::world_cup_catalog;
use crate::engine::{DrawEngine, DrawResult};
use crate::error::DrawError;
use crate::models::{group_letter, Assignment, Group, Team};
use crate::rules::DrawRules;
use crate::SCHEMA_VERSION;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

pub mod error_codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const UNSUPPORTED_SCHEMA: &str = "UNSUPPORTED_SCHEMA";
    pub const INVALID_RULES: &str = "INVALID_RULES";
    pub const INVALID_PARTIAL: &str = "INVALID_PARTIAL";
    pub const UNKNOWN_TEAM: &str = "UNKNOWN_TEAM";
    pub const UNSATISFIABLE: &str = "UNSATISFIABLE";
    pub const ILLEGAL_STATE: &str = "ILLEGAL_STATE";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Full draw from an empty assignment
    #[default]
    Full,
    /// Complete `partial`
    Complete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawRequest {
    pub schema_version: u8,
    pub seed: u64,
    #[serde(default)]
    pub mode: DrawMode,
    /// Team codes per group, group A first
    #[serde(default)]
    pub partial: Option<Vec<Vec<String>>>,
    /// Overrides `WC_DRAW_RULES_PATH` and the defaults
    #[serde(default)]
    pub rules: Option<DrawRules>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub success: bool,
    pub groups: Vec<Group>,
    pub reveal_order: Vec<Team>,
    pub attempts: usize,
    pub retries: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl DrawResponse {
    fn success(seed: u64, result: DrawResult) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            seed,
            success: true,
            groups: result.assignment.groups().to_vec(),
            reveal_order: result.reveal_order,
            attempts: result.attempts,
            retries: result.retries,
            error: None,
        }
    }

    /// The starting state comes back untouched on failure.
    fn failure(seed: u64, start: &Assignment, err: &DrawError) -> Self {
        let (code, retries) = match err {
            DrawError::Unsatisfiable { retries, .. } => (error_codes::UNSATISFIABLE, *retries),
            _ => (error_codes::ILLEGAL_STATE, 0),
        };
        Self {
            schema_version: SCHEMA_VERSION,
            seed,
            success: false,
            groups: start.groups().to_vec(),
            reveal_order: Vec::new(),
            attempts: 0,
            retries,
            error: Some(ApiError { code: code.to_string(), message: err.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalGroupsRequest {
    pub schema_version: u8,
    pub team: String,
    #[serde(default)]
    pub partial: Vec<Vec<String>>,
    /// Group the team is being moved out of
    #[serde(default)]
    pub excluded: Option<usize>,
    #[serde(default)]
    pub rules: Option<DrawRules>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalGroupsResponse {
    pub schema_version: u8,
    pub team: String,
    pub groups: Vec<usize>,
    pub letters: Vec<char>,
}

/// Runs a seeded draw described by a JSON request.
///
/// Malformed requests are `Err` with an error-code prefix. A draw that finds
/// no legal assignment is a regular response with `success: false`.
pub fn draw_json(request_json: &str) -> Result<String, String> {
    let request: DrawRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;
    check_schema(request.schema_version)?;

    let engine = build_engine(request.rules)?;
    let start = match (request.mode, request.partial) {
        (DrawMode::Full, _) => engine.empty_assignment(),
        (DrawMode::Complete, Some(partial)) => resolve_partial(&engine, &partial)?,
        (DrawMode::Complete, None) => {
            return Err(err_code(error_codes::INVALID_REQUEST, "mode 'complete' needs 'partial'"));
        }
    };

    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let response = match engine.complete(&start, &mut rng) {
        Ok(result) => DrawResponse::success(request.seed, result),
        Err(e) if e.is_recoverable() => {
            debug!(seed = request.seed, error = %e, "draw request failed");
            DrawResponse::failure(request.seed, &start, &e)
        }
        Err(e @ DrawError::InvalidPartial(_)) => return Err(err_code(error_codes::INVALID_PARTIAL, e)),
        Err(e) => return Err(err_code(error_codes::INVALID_REQUEST, e)),
    };

    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {e}"))
}

/// Lists the groups a team may go to in a given partial state.
pub fn legal_groups_json(request_json: &str) -> Result<String, String> {
    let request: LegalGroupsRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;
    check_schema(request.schema_version)?;

    let engine = build_engine(request.rules)?;
    let state = if request.partial.is_empty() {
        engine.empty_assignment()
    } else {
        resolve_partial(&engine, &request.partial)?
    };
    engine
        .validate_partial(&state)
        .map_err(|e| err_code(error_codes::INVALID_PARTIAL, e))?;
    let team = engine
        .catalog()
        .team(&request.team)
        .ok_or_else(|| err_code(error_codes::UNKNOWN_TEAM, &request.team))?;

    let groups = engine.legal_groups(team, &state, request.excluded);
    let response = LegalGroupsResponse {
        schema_version: SCHEMA_VERSION,
        team: request.team,
        letters: groups.iter().map(|&g| group_letter(g)).collect(),
        groups,
    };
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {e}"))
}

fn check_schema(version: u8) -> Result<(), String> {
    if version != SCHEMA_VERSION {
        return Err(err_code(
            error_codes::UNSUPPORTED_SCHEMA,
            format!("Unsupported schema version: {version}"),
        ));
    }
    Ok(())
}

/// Request rules, then the environment override, then the defaults.
fn build_engine(rules: Option<DrawRules>) -> Result<DrawEngine, String> {
    let rules = match rules {
        Some(rules) => rules,
        None => rules_from_env()
            .map_err(|e| err_code(error_codes::INVALID_RULES, e))?
            .unwrap_or_default(),
    };
    DrawEngine::new(world_cup_catalog().clone(), rules)
        .map_err(|e| err_code(error_codes::INVALID_RULES, e))
}

fn resolve_partial(engine: &DrawEngine, partial: &[Vec<String>]) -> Result<Assignment, String> {
    let group_count = engine.rules().group_count;
    if partial.len() != group_count {
        return Err(err_code(
            error_codes::INVALID_PARTIAL,
            format!("expected {group_count} groups, got {}", partial.len()),
        ));
    }

    let mut seen = HashSet::new();
    let mut groups = Vec::with_capacity(partial.len());
    for codes in partial {
        let mut teams = Vec::with_capacity(codes.len());
        for code in codes {
            if !seen.insert(code.as_str()) {
                return Err(err_code(error_codes::INVALID_PARTIAL, format!("{code} placed twice")));
            }
            let team = engine
                .catalog()
                .team(code)
                .ok_or_else(|| err_code(error_codes::UNKNOWN_TEAM, code))?;
            teams.push(team.clone());
        }
        groups.push(teams);
    }
    Ok(Assignment::from_groups(groups))
}
