//! # draw_core - FIFA World Cup 2026 Group Draw Engine
//!
//! Places 48 teams from four seeding pots into twelve groups of four under
//! the draw rules (one team per pot per group, confederation separation with
//! the UEFA exception, fixed host slots).
//!
//! ## Features
//! - Seeded, reproducible draws (same seed = same result)
//! - Bounded backtracking search with feasibility lookahead
//! - Completion of partial (manual) draws
//! - Staged reveal of a computed draw
//! - JSON API for UI integration

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]

pub mod api;
pub mod data;
pub mod engine;
pub mod error;
pub mod manual;
pub mod models;
pub mod rules;

// Re-export main API functions
pub use api::{draw_json, legal_groups_json, DrawRequest, DrawResponse};
pub use error::{CatalogError, DrawError, InvariantViolation, Result, SearchFailure};

// Re-export draw types
pub use data::{world_cup_catalog, Pot, TeamCatalog};
pub use engine::{DrawEngine, DrawResult, Reveal, RevealStep};
pub use manual::ManualDraw;
pub use models::{Assignment, Confederation, Group, Team};
pub use rules::{can_place, legal_groups, validate_assignment, DrawRules, HostSlot};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use serde_json::json;

    #[test]
    fn test_basic_draw() {
        let engine = DrawEngine::world_cup_2026().unwrap();
        let result = engine.full_draw(&mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        validate_assignment(&result.assignment, engine.catalog(), engine.rules()).unwrap();
    }

    #[test]
    fn test_determinism_through_json() {
        let request = json!({ "schema_version": SCHEMA_VERSION, "seed": 999 }).to_string();
        let first = draw_json(&request).unwrap();
        let second = draw_json(&request).unwrap();
        assert_eq!(first, second, "same seed must give the same draw");
    }

    #[test]
    fn test_version_set() {
        assert!(!VERSION.is_empty());
    }
}
