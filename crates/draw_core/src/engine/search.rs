//! Backtracking placement search.
//!
//! Teams are taken in queue order. A host goes straight to its reserved
//! group; everyone else tries the groups with free slots in a shuffled order
//! and keeps the first one that leads to a complete draw. Every tentative
//! placement counts against `DrawRules::max_attempts`, so the search always
//! terminates.
//!
//! The search works on its own copy of the starting assignment. Branches
//! push a team, recurse, and pop it again on failure; no sibling ever sees
//! another branch's placements.

use super::lookahead::still_feasible;
use crate::error::SearchFailure;
use crate::models::{Assignment, Team};
use crate::rules::{can_place, DrawRules};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// A successful search.
#[derive(Debug, Clone)]
pub struct Placement {
    pub assignment: Assignment,
    /// Tentative placements made, including undone ones
    pub attempts: usize,
}

struct Search<'a, R: Rng + ?Sized> {
    rules: &'a DrawRules,
    queue: &'a [Team],
    rng: &'a mut R,
    state: Assignment,
    attempts: usize,
}

impl<R: Rng + ?Sized> Search<'_, R> {
    /// Ok(true) once the queue is placed, Ok(false) for a dead branch.
    fn descend(&mut self, index: usize) -> Result<bool, SearchFailure> {
        let Some(team) = self.queue.get(index) else {
            return Ok(self.state.is_full(self.rules.group_size)
                && self.state.placed_count() == self.rules.total_slots());
        };

        for group in self.candidates(team) {
            if !can_place(team, group, &self.state, self.rules, None) {
                continue;
            }
            if self.attempts >= self.rules.max_attempts {
                return Err(SearchFailure::BudgetExceeded { budget: self.rules.max_attempts });
            }
            self.attempts += 1;

            self.state.push(group, team.clone());
            if still_feasible(&self.state, &self.queue[index + 1..], self.rules)
                && self.descend(index + 1)?
            {
                return Ok(true);
            }
            self.state.pop(group);
        }

        Ok(false)
    }

    fn candidates(&mut self, team: &Team) -> Vec<usize> {
        if let Some(group) = self.rules.host_group_of(&team.code) {
            return vec![group];
        }
        let mut open: Vec<usize> = self
            .state
            .groups()
            .iter()
            .enumerate()
            .filter(|(_, g)| g.len() < self.rules.group_size)
            .map(|(i, _)| i)
            .collect();
        open.shuffle(&mut *self.rng);
        open
    }
}

/// Places every team of `queue` on top of `assignment`.
///
/// `assignment` is never modified. The result is complete: every group holds
/// `group_size` teams.
pub fn place<R: Rng + ?Sized>(
    assignment: &Assignment,
    queue: &[Team],
    rules: &DrawRules,
    rng: &mut R,
) -> Result<Placement, SearchFailure> {
    let placed = assignment.placed_count();
    if assignment.group_count() != rules.group_count || placed + queue.len() != rules.total_slots() {
        return Err(SearchFailure::Incomplete { placed });
    }
    if !still_feasible(assignment, queue, rules) {
        return Err(SearchFailure::Exhausted { attempts: 0 });
    }

    let mut search = Search { rules, queue, rng, state: assignment.clone(), attempts: 0 };
    match search.descend(0) {
        Ok(true) => {
            debug!(attempts = search.attempts, queued = queue.len(), "search complete");
            Ok(Placement { assignment: search.state, attempts: search.attempts })
        }
        Ok(false) => {
            debug!(attempts = search.attempts, "search exhausted");
            Err(SearchFailure::Exhausted { attempts: search.attempts })
        }
        Err(failure) => {
            debug!(attempts = search.attempts, "search over budget");
            Err(failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::world_cup_catalog;
    use crate::engine::queue::draw_queue;
    use crate::models::Confederation::{self, *};
    use crate::rules::{validate_assignment, HostSlot};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn t(code: &str, conf: Confederation, pot: usize) -> Team {
        Team::new(code, code, conf, pot)
    }

    #[test]
    fn test_full_search_from_empty() {
        let catalog = world_cup_catalog();
        let rules = DrawRules::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2026);
        let empty = Assignment::new(12);
        let queue = draw_queue(catalog.pots(), &empty, &rules, &mut rng);

        let placement = place(&empty, &queue, &rules, &mut rng).unwrap();
        assert!(empty.is_empty(), "input must stay untouched");
        assert!(placement.attempts >= 48);
        assert!(placement.attempts <= rules.max_attempts);
        validate_assignment(&placement.assignment, catalog, &rules).unwrap();
    }

    #[test]
    fn test_same_seed_same_result() {
        let catalog = world_cup_catalog();
        let rules = DrawRules::default();
        let run = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let empty = Assignment::new(12);
            let queue = draw_queue(catalog.pots(), &empty, &rules, &mut rng);
            place(&empty, &queue, &rules, &mut rng).unwrap().assignment
        };
        assert_eq!(run(11), run(11));
        assert_ne!(run(11), run(12));
    }

    #[test]
    fn test_short_queue_is_incomplete() {
        let rules = DrawRules::default();
        let queue = vec![t("ESP", Uefa, 0)];
        let err =
            place(&Assignment::new(12), &queue, &rules, &mut ChaCha8Rng::seed_from_u64(0)).unwrap_err();
        assert_eq!(err, SearchFailure::Incomplete { placed: 0 });
    }

    #[test]
    fn test_two_hosts_forced_into_one_group_terminates() {
        // 2 groups of 2; both hosts claim group A
        let rules = DrawRules {
            group_count: 2,
            group_size: 2,
            hosts: vec![HostSlot::new("MEX", 0), HostSlot::new("CAN", 0)],
            ..DrawRules::default()
        };
        let queue = vec![
            t("MEX", Concacaf, 0),
            t("CAN", Concacaf, 0),
            t("JPN", Afc, 1),
            t("EGY", Caf, 1),
        ];
        let result = place(&Assignment::new(2), &queue, &rules, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(result.unwrap_err(), SearchFailure::Exhausted { attempts: 0 });
    }

    #[test]
    fn test_budget_exceeded_reported() {
        // a full draw needs at least one attempt per team
        let catalog = world_cup_catalog();
        let rules = DrawRules { max_attempts: 10, ..DrawRules::default() };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let empty = Assignment::new(12);
        let queue = draw_queue(catalog.pots(), &empty, &rules, &mut rng);

        let err = place(&empty, &queue, &rules, &mut rng).unwrap_err();
        assert_eq!(err, SearchFailure::BudgetExceeded { budget: 10 });
        assert_eq!(err.attempts(), 10);
    }

    #[test]
    fn test_completion_from_partial_keeps_existing_teams() {
        let rules = DrawRules { group_count: 2, group_size: 2, hosts: vec![], ..DrawRules::default() };
        let partial = Assignment::from_groups(vec![vec![t("ARG", Conmebol, 0)], vec![]]);
        let queue = vec![t("ESP", Uefa, 0), t("URU", Conmebol, 1), t("JPN", Afc, 1)];
        let placement =
            place(&partial, &queue, &rules, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
        let a = placement.assignment.group(0).unwrap();
        assert_eq!(a.teams[0].code, "ARG");
        assert!(a.contains("JPN"), "URU cannot join ARG");
        assert!(placement.assignment.group(1).unwrap().contains("URU"));
    }
}
