//! Draw entry points.
//!
//! The engine always computes the complete result first. Staged reveals
//! replay that result in queue order (see [`super::reveal`]).

use super::queue::draw_queue;
use super::search::place;
use crate::data::{world_cup_catalog, Pot, TeamCatalog};
use crate::error::{DrawError, Result, SearchFailure};
use crate::models::{Assignment, Team};
use crate::rules::{can_place, legal_groups, validate_assignment, validate_groups, DrawRules};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// A finished draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    /// State the draw started from (empty for a full draw)
    pub base: Assignment,
    /// Complete, validated assignment
    pub assignment: Assignment,
    /// Teams in the order they were drawn; reveal order
    pub reveal_order: Vec<Team>,
    /// Placement attempts of the successful search
    pub attempts: usize,
    /// Searches run, including the successful one
    pub retries: u32,
}

/// Constraint model plus search, bound to one catalog and rule set.
#[derive(Debug, Clone)]
pub struct DrawEngine {
    catalog: TeamCatalog,
    rules: DrawRules,
}

impl DrawEngine {
    pub fn new(catalog: TeamCatalog, rules: DrawRules) -> Result<Self> {
        rules.validate().map_err(DrawError::Config)?;
        catalog.validate(&rules)?;
        Ok(Self { catalog, rules })
    }

    /// 2026 World Cup pots and rules.
    pub fn world_cup_2026() -> Result<Self> {
        Self::new(world_cup_catalog().clone(), DrawRules::world_cup_2026())
    }

    pub fn catalog(&self) -> &TeamCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &DrawRules {
        &self.rules
    }

    pub fn empty_assignment(&self) -> Assignment {
        Assignment::new(self.rules.group_count)
    }

    pub fn can_place(
        &self,
        team: &Team,
        group: usize,
        assignment: &Assignment,
        excluded: Option<usize>,
    ) -> bool {
        can_place(team, group, assignment, &self.rules, excluded)
    }

    pub fn legal_groups(
        &self,
        team: &Team,
        assignment: &Assignment,
        excluded: Option<usize>,
    ) -> Vec<usize> {
        legal_groups(team, assignment, &self.rules, excluded)
    }

    /// Full random draw from an empty assignment.
    pub fn full_draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DrawResult> {
        let result = self.run(&self.empty_assignment(), rng)?;
        info!(attempts = result.attempts, retries = result.retries, "full draw complete");
        Ok(result)
    }

    /// Full draw revealed all at once: only the final assignment.
    pub fn instant_draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Assignment> {
        self.full_draw(rng).map(|r| r.assignment)
    }

    /// Completes a partially filled assignment with every team not yet in it.
    ///
    /// `partial` is not modified. On failure the caller keeps its state and
    /// may retry or reset. A partial state that already breaks a rule is
    /// rejected before any search runs.
    pub fn complete<R: Rng + ?Sized>(&self, partial: &Assignment, rng: &mut R) -> Result<DrawResult> {
        self.validate_partial(partial)?;
        let result = self.run(partial, rng)?;
        info!(
            already_placed = partial.placed_count(),
            attempts = result.attempts,
            retries = result.retries,
            "draw completed from partial state"
        );
        Ok(result)
    }

    /// Pots with the teams of `assignment` removed.
    pub fn remaining_pots(&self, assignment: &Assignment) -> Vec<Pot> {
        self.catalog
            .pots()
            .iter()
            .map(|pot| Pot {
                name: pot.name.clone(),
                teams: pot.teams.iter().filter(|t| !assignment.contains(&t.code)).cloned().collect(),
            })
            .collect()
    }

    /// Structural checks (group count, known and unique teams) followed by
    /// the per-group rules.
    pub fn validate_partial(&self, partial: &Assignment) -> Result<()> {
        if partial.group_count() != self.rules.group_count {
            return Err(DrawError::InvalidGroup(partial.group_count()));
        }
        let mut seen = HashSet::new();
        for team in partial.teams() {
            if self.catalog.team(&team.code).is_none() {
                return Err(DrawError::UnknownTeam(team.code.clone()));
            }
            if !seen.insert(team.code.as_str()) {
                return Err(DrawError::AlreadyPlaced(team.code.clone()));
            }
        }
        validate_groups(partial, &self.rules).map_err(DrawError::InvalidPartial)
    }

    /// Search with re-shuffled queues until one succeeds or the retry
    /// budget runs out.
    fn run<R: Rng + ?Sized>(&self, start: &Assignment, rng: &mut R) -> Result<DrawResult> {
        let mut last = SearchFailure::Exhausted { attempts: 0 };

        for retry in 1..=self.rules.completion_retries {
            let queue = draw_queue(self.catalog.pots(), start, &self.rules, rng);
            match place(start, &queue, &self.rules, rng) {
                Ok(placement) => {
                    validate_assignment(&placement.assignment, &self.catalog, &self.rules)?;
                    return Ok(DrawResult {
                        base: start.clone(),
                        assignment: placement.assignment,
                        reveal_order: queue,
                        attempts: placement.attempts,
                        retries: retry,
                    });
                }
                Err(failure) => {
                    debug!(retry, %failure, "search failed, reshuffling");
                    last = failure;
                }
            }
        }

        warn!(retries = self.rules.completion_retries, %last, "no legal assignment found");
        Err(DrawError::Unsatisfiable { retries: self.rules.completion_retries, last })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvariantViolation;
    use crate::rules::HostSlot;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn engine() -> DrawEngine {
        DrawEngine::world_cup_2026().unwrap()
    }

    fn team(engine: &DrawEngine, code: &str) -> Team {
        engine.catalog().team(code).unwrap().clone()
    }

    /// MEX sits in group F and group A is empty, so A can never be filled.
    fn misplaced_host(engine: &DrawEngine) -> Assignment {
        engine.empty_assignment().with_team(5, team(engine, "MEX"))
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let rules = DrawRules {
            hosts: vec![HostSlot::new("MEX", 0), HostSlot::new("CAN", 0)],
            ..DrawRules::default()
        };
        let err = DrawEngine::new(world_cup_catalog().clone(), rules).unwrap_err();
        assert!(matches!(err, DrawError::Config(_)));
    }

    #[test]
    fn test_full_draw_reveal_order_is_queue() {
        let mut rng = ChaCha8Rng::seed_from_u64(48);
        let result = engine().full_draw(&mut rng).unwrap();
        assert_eq!(result.reveal_order.len(), 48);
        assert_eq!(result.reveal_order[0].code, "MEX");
        assert!(result.base.is_empty());
        assert!(result.retries >= 1);
    }

    #[test]
    fn test_instant_draw_hosts_open_groups() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let assignment = engine().instant_draw(&mut rng).unwrap();
        let openers: Vec<&str> =
            assignment.groups()[..3].iter().map(|g| g.teams[0].code.as_str()).collect();
        assert_eq!(openers, ["MEX", "CAN", "USA"]);
    }

    #[test]
    fn test_remaining_pots() {
        let engine = engine();
        let mex = engine.catalog().team("MEX").unwrap().clone();
        let state = engine.empty_assignment().with_team(0, mex);
        let remaining = engine.remaining_pots(&state);
        assert_eq!(remaining[0].teams.len(), 11);
        assert_eq!(remaining[1].teams.len(), 12);
    }

    #[test]
    fn test_complete_rejects_unknown_team() {
        let engine = engine();
        let stranger = Team::new("XXX", "Nowhere", crate::models::Confederation::Ofc, 3);
        let state = engine.empty_assignment().with_team(5, stranger);
        let err = engine.complete(&state, &mut ChaCha8Rng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, DrawError::UnknownTeam(code) if code == "XXX"));
    }

    #[test]
    fn test_complete_rejects_wrong_group_count() {
        let engine = engine();
        let err = engine.complete(&Assignment::new(8), &mut ChaCha8Rng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, DrawError::InvalidGroup(8)));
    }

    #[test]
    fn test_complete_rejects_confederation_clash_before_search() {
        let engine = engine();
        let state = engine
            .empty_assignment()
            .with_team(3, team(&engine, "ARG"))
            .with_team(3, team(&engine, "URU"));
        let err = engine.complete(&state, &mut ChaCha8Rng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(
            err,
            DrawError::InvalidPartial(InvariantViolation::ConfederationClash { group: 'D', .. })
        ));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_complete_rejects_misplaced_host() {
        let engine = engine();
        let err = engine
            .complete(&misplaced_host(&engine), &mut ChaCha8Rng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(
            err,
            DrawError::InvalidPartial(InvariantViolation::HostMisplaced { group: 'A', .. })
        ));
    }

    #[test]
    fn test_validate_partial_accepts_legal_state() {
        let engine = engine();
        let state = engine
            .empty_assignment()
            .with_team(0, team(&engine, "MEX"))
            .with_team(0, team(&engine, "JPN"));
        engine.validate_partial(&state).unwrap();
    }

    #[test]
    fn test_search_stops_at_attempt_budget() {
        // the lookahead lets the search descend, but no branch can ever fill
        // group A; every retry has to end on the placement budget
        let rules = DrawRules { max_attempts: 200, ..DrawRules::default() };
        let engine = DrawEngine::new(world_cup_catalog().clone(), rules).unwrap();
        let start = misplaced_host(&engine);

        let err = engine.run(&start, &mut ChaCha8Rng::seed_from_u64(6)).unwrap_err();
        match err {
            DrawError::Unsatisfiable { retries, last } => {
                assert_eq!(retries, engine.rules().completion_retries);
                assert_eq!(last, SearchFailure::BudgetExceeded { budget: 200 });
            }
            other => panic!("expected Unsatisfiable, got {other:?}"),
        }
    }

    #[test]
    fn test_complete_does_not_touch_input() {
        let engine = engine();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mex = engine.catalog().team("MEX").unwrap().clone();
        let partial = engine.empty_assignment().with_team(0, mex);
        let snapshot = partial.clone();
        let result = engine.complete(&partial, &mut rng).unwrap();
        assert_eq!(partial, snapshot);
        assert_eq!(result.base, snapshot);
        assert_eq!(result.reveal_order.len(), 47);
    }
}
