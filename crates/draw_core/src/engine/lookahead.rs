//! Feasibility lookahead for the search.
//!
//! Placements only ever shrink the set of groups a queued team may enter
//! (once hosts have opened their groups), so each check below is a
//! relaxation of "the rest of the queue can still be placed". When a check
//! fails the branch is dead and is cut before the search walks into it.
//!
//! - Teams of one pot need distinct groups: the pending teams of every pot
//!   must have a perfect matching into groups that admit them.
//! - The same holds for every strict (non-flexible) confederation.
//! - Pending flexible-confederation teams must fit into the remaining
//!   flexible capacity, counting the cap on doubled groups.

use crate::models::{Assignment, Confederation, Team};
use crate::rules::predicate::{admits, HostVacancy};
use crate::rules::DrawRules;
use pathfinding::kuhn_munkres::kuhn_munkres_min;
use pathfinding::matrix::Matrix;
use std::collections::BTreeMap;

const COST_BLOCKED: i64 = 1;

/// Teams that may never share a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Bucket {
    Pot(usize),
    Confederation(Confederation),
}

/// False when the pending teams can no longer all be placed on top of `state`.
pub(crate) fn still_feasible(state: &Assignment, pending: &[Team], rules: &DrawRules) -> bool {
    if pending.is_empty() {
        return true;
    }
    flexible_fits(state, pending, rules) && buckets_matchable(state, pending, rules)
}

fn buckets_matchable(state: &Assignment, pending: &[Team], rules: &DrawRules) -> bool {
    let mut buckets: BTreeMap<Bucket, Vec<&Team>> = BTreeMap::new();
    for team in pending {
        buckets.entry(Bucket::Pot(team.pot)).or_default().push(team);
        if team.confederation != rules.flexible_confederation {
            buckets.entry(Bucket::Confederation(team.confederation)).or_default().push(team);
        }
    }

    let groups = state.group_count();
    buckets.values().all(|teams| {
        if teams.len() > groups {
            return false;
        }
        // Hungarian assignment (teams × groups), zero cost where admitted.
        let costs = Matrix::from_fn(teams.len(), groups, |(row, group)| {
            if admits(teams[row], group, state, rules, None, HostVacancy::Relaxed) {
                0
            } else {
                COST_BLOCKED
            }
        });
        let (total, _) = kuhn_munkres_min(&costs);
        total == 0
    })
}

/// Upper bound on flexible teams the free slots can still take, against
/// the number still queued.
fn flexible_fits(state: &Assignment, pending: &[Team], rules: &DrawRules) -> bool {
    let flexible = rules.flexible_confederation;
    let wanted = pending.iter().filter(|t| t.confederation == flexible).count();
    if wanted == 0 {
        return true;
    }

    let max = rules.max_flexible_per_group;
    let mut plain = 0;
    let mut can_double = 0;
    let mut doubled = 0;
    for group in state.groups() {
        let count = group.count_confederation(flexible);
        let free = rules.group_size.saturating_sub(group.len());
        if max == 1 {
            plain += usize::from(count == 0 && free > 0);
            continue;
        }
        if count >= max {
            doubled += 1;
            continue;
        }
        let below_cap = free.min(max - 1 - count);
        plain += below_cap;
        if free > below_cap && count + below_cap + 1 == max {
            can_double += 1;
        }
    }

    let capacity = if max == 1 {
        plain
    } else {
        plain + can_double.min(rules.max_doubled_groups.saturating_sub(doubled))
    };
    wanted <= capacity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confederation::*;
    use crate::rules::HostSlot;

    fn t(code: &str, conf: Confederation, pot: usize) -> Team {
        Team::new(code, code, conf, pot)
    }

    fn two_group_rules() -> DrawRules {
        DrawRules { group_count: 2, group_size: 2, hosts: vec![], ..DrawRules::default() }
    }

    #[test]
    fn test_open_state_is_feasible() {
        let pending = [t("A", Caf, 0), t("B", Afc, 0), t("C", Ofc, 1), t("D", Conmebol, 1)];
        assert!(still_feasible(&Assignment::new(2), &pending, &two_group_rules()));
    }

    #[test]
    fn test_two_teams_one_admissible_group() {
        // both pot-2 teams clash with group A's CAF team, only B is left
        let state = Assignment::from_groups(vec![vec![t("EGY", Caf, 0)], vec![t("JPN", Afc, 0)]]);
        let pending = [t("GHA", Caf, 1), t("CPV", Caf, 1)];
        assert!(!still_feasible(&state, &pending, &two_group_rules()));
    }

    #[test]
    fn test_strict_confederation_across_pots() {
        // pot-wise each CAF team has a group, together they need two CAF-free groups
        let rules = DrawRules { group_count: 3, group_size: 3, hosts: vec![], ..DrawRules::default() };
        let state = Assignment::from_groups(vec![
            vec![t("EGY", Caf, 0)],
            vec![t("SEN", Caf, 0)],
            vec![t("JPN", Afc, 0)],
        ]);
        let pending = [t("GHA", Caf, 1), t("KOR", Afc, 1), t("NZL", Ofc, 1), t("CPV", Caf, 2)];
        assert!(!still_feasible(&state, &pending, &rules));
    }

    #[test]
    fn test_pot_larger_than_group_count() {
        let pending = [t("A", Caf, 0), t("B", Afc, 0), t("C", Ofc, 0)];
        assert!(!still_feasible(&Assignment::new(2), &pending, &two_group_rules()));
    }

    #[test]
    fn test_pending_host_does_not_block_others() {
        // group A is reserved for MEX, which is still queued
        let rules = DrawRules { hosts: vec![HostSlot::new("MEX", 0)], ..two_group_rules() };
        let pending = [t("MEX", Concacaf, 0), t("ESP", Uefa, 0), t("JPN", Afc, 1), t("NZL", Ofc, 1)];
        assert!(still_feasible(&Assignment::new(2), &pending, &rules));
    }

    #[test]
    fn test_flexible_capacity_respects_doubled_cap() {
        // four doubled groups, one single, one empty: two more UEFA teams
        // cannot both fit (the single cannot be doubled any more)
        let pair = |a: &str, b: &str| vec![t(a, Uefa, 0), t(b, Uefa, 1)];
        let rules = DrawRules { group_count: 6, hosts: vec![], ..DrawRules::default() };
        let state = Assignment::from_groups(vec![
            pair("A1", "A2"),
            pair("B1", "B2"),
            pair("C1", "C2"),
            pair("D1", "D2"),
            vec![t("E1", Uefa, 0)],
            vec![t("F1", Afc, 0)],
        ]);
        let one = [t("X1", Uefa, 2)];
        let two = [t("X1", Uefa, 2), t("X2", Uefa, 3)];
        assert!(flexible_fits(&state, &one, &rules));
        assert!(!flexible_fits(&state, &two, &rules));
    }

    #[test]
    fn test_flexible_capacity_counts_free_slots() {
        let rules = DrawRules { group_count: 1, group_size: 2, hosts: vec![], ..DrawRules::default() };
        let full = Assignment::from_groups(vec![vec![t("JPN", Afc, 0), t("GHA", Caf, 1)]]);
        assert!(!flexible_fits(&full, &[t("ESP", Uefa, 2)], &rules));
        let open = Assignment::new(1);
        assert!(flexible_fits(&open, &[t("ESP", Uefa, 0), t("CRO", Uefa, 1)], &rules));
    }
}
